/*
 *  display/drivers/mock.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Mock display hardware for testing without a sunxi board
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::io;
use std::sync::{Arc, Mutex};

use dispswitch_driver_sunxi::ffi::DISP_FORMAT_ARGB8888;

use crate::config::Settings;
use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::traits::{ConsoleRequest, ConsoleTool, DisplayControl, FramebufferQuery};
use crate::display::types::{
    DriverVersion, LayerFramebuffer, LayerHandle, LayerParams, LayerWorkMode, OutputKind, OutputType, PixelDepth,
    Rect, Screen, VideoInfo,
};

/// One recorded port call, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    DriverVersion,
    OutputType,
    SetOutput { kind: OutputKind, on: bool },
    HdmiMode,
    SetHdmiMode(Mode),
    ModeSupported(Mode),
    LayerParams,
    SetLayerParams { work_mode: LayerWorkMode, src: (u32, u32), dst: (u32, u32) },
    LayerFramebuffer,
    ScreenDimensions,
    ByteSize,
    VideoInfo,
    LayerHandle,
    Console(ConsoleRequest),
}

impl MockCall {
    /// Calls that change hardware or console state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            MockCall::SetOutput { .. }
                | MockCall::SetHdmiMode(_)
                | MockCall::SetLayerParams { .. }
                | MockCall::Console(_)
        )
    }
}

/// Simulated hardware plus the call log (shared for inspection in tests)
#[derive(Debug)]
pub struct MockDriverState {
    pub calls: Vec<MockCall>,

    pub version: Option<DriverVersion>,
    pub output: OutputType,
    pub hdmi_mode: Mode,
    /// Mode number outside the table reported instead of `hdmi_mode`
    pub foreign_hdmi_mode: Option<u32>,
    /// Modes the sink does not advertise
    pub unsupported: Vec<Mode>,
    /// Live scan-out size
    pub dimensions: (u32, u32),
    pub panel_dimensions: (u32, u32),
    /// Size the EDID mode resolves to once applied
    pub edid_dimensions: (u32, u32),
    pub layer: LayerParams,
    pub layer_handle: LayerHandle,
    pub layer_fb: LayerFramebuffer,

    pub fb_size: Option<u64>,
    pub fb_resolution: (u32, u32),
    pub bits_per_pixel: Option<u32>,

    /// Simulate failures (for error testing)
    pub fail_operation: Option<&'static str>,
    pub console_fails: bool,
}

impl Default for MockDriverState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            version: Some(DriverVersion { major: 1, minor: 0 }),
            output: OutputType::Panel,
            hdmi_mode: Mode::from_number(5).unwrap(),
            foreign_hdmi_mode: None,
            unsupported: Vec::new(),
            dimensions: (800, 480),
            panel_dimensions: (800, 480),
            edid_dimensions: (1680, 1050),
            layer: LayerParams {
                work_mode: LayerWorkMode::Normal,
                source: Rect { x: 0, y: 0, width: 800, height: 480 },
                screen: Rect { x: 0, y: 0, width: 800, height: 480 },
            },
            layer_handle: LayerHandle::Resolved(100),
            layer_fb: LayerFramebuffer { width: 800, height: 480, format: DISP_FORMAT_ARGB8888 },
            fb_size: Some(32 * 1024 * 1024),
            fb_resolution: (800, 480),
            bits_per_pixel: Some(32),
            fail_operation: None,
            console_fails: false,
        }
    }
}

impl MockDriverState {
    /// Panel active at 800x480
    pub fn panel(bits_per_pixel: u32) -> Self {
        Self { bits_per_pixel: Some(bits_per_pixel), ..Default::default() }
    }

    /// HDMI active in `mode`
    pub fn hdmi(mode: u32, bits_per_pixel: u32) -> Self {
        let mode = Mode::from_number(mode).unwrap();
        let (w, h) = mode.dimensions().unwrap_or((1680, 1050));
        Self {
            output: OutputType::Hdmi,
            hdmi_mode: mode,
            dimensions: (w, h),
            fb_resolution: (w, h),
            bits_per_pixel: Some(bits_per_pixel),
            ..Default::default()
        }
    }

    /// Nothing driving the screen
    pub fn off(bits_per_pixel: u32) -> Self {
        Self {
            output: OutputType::None,
            dimensions: (0, 0),
            bits_per_pixel: Some(bits_per_pixel),
            ..Default::default()
        }
    }

    pub fn mutations(&self) -> Vec<MockCall> {
        self.calls.iter().filter(|c| c.is_mutation()).cloned().collect()
    }

    pub fn position(&self, call: &MockCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    fn check_fail(&self, operation: &'static str) -> Result<(), DisplayError> {
        if self.fail_operation == Some(operation) {
            return Err(DisplayError::driver(operation, io::Error::other("simulated failure")));
        }
        Ok(())
    }
}

pub type SharedState = Arc<Mutex<MockDriverState>>;

#[derive(Debug, Clone)]
pub struct MockControl {
    state: SharedState,
}

#[derive(Debug, Clone)]
pub struct MockFramebuffer {
    state: SharedState,
}

#[derive(Debug, Clone)]
pub struct MockConsole {
    state: SharedState,
}

/// Build a context whose three ports all share `state`
pub fn mock_context(state: MockDriverState, settings: Settings) -> (DisplayContext, SharedState) {
    let shared = Arc::new(Mutex::new(state));
    let ctx = DisplayContext::new(
        Box::new(MockControl { state: Arc::clone(&shared) }),
        Box::new(MockFramebuffer { state: Arc::clone(&shared) }),
        Box::new(MockConsole { state: Arc::clone(&shared) }),
        settings,
    );
    (ctx, shared)
}

impl DisplayControl for MockControl {
    fn driver_version(&mut self) -> Result<Option<DriverVersion>, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::DriverVersion);
        Ok(s.version)
    }

    fn output_type(&mut self, _screen: Screen) -> Result<OutputType, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::OutputType);
        Ok(s.output)
    }

    fn set_output_enabled(&mut self, _screen: Screen, kind: OutputKind, on: bool) -> Result<(), DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::SetOutput { kind, on });
        s.check_fail(if on { "output_on" } else { "output_off" })?;
        if on {
            s.output = match kind {
                OutputKind::Panel => OutputType::Panel,
                OutputKind::Hdmi => OutputType::Hdmi,
                OutputKind::Vga => OutputType::Vga,
                OutputKind::Tv => OutputType::Tv,
            };
            if kind == OutputKind::Panel {
                s.dimensions = s.panel_dimensions;
            }
        } else {
            s.output = OutputType::None;
        }
        Ok(())
    }

    fn hdmi_mode(&mut self, _screen: Screen) -> Result<Mode, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::HdmiMode);
        match s.foreign_hdmi_mode {
            Some(raw) => Err(DisplayError::InvalidQuery {
                operation: "DISP_CMD_HDMI_GET_MODE",
                detail: format!("mode {} is not in the mode table", raw),
            }),
            None => Ok(s.hdmi_mode),
        }
    }

    fn set_hdmi_mode(&mut self, _screen: Screen, mode: Mode) -> Result<(), DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::SetHdmiMode(mode));
        s.check_fail("set_hdmi_mode")?;
        s.hdmi_mode = mode;
        s.dimensions = mode.dimensions().unwrap_or(s.edid_dimensions);
        Ok(())
    }

    fn is_mode_supported(&mut self, _screen: Screen, mode: Mode) -> Result<bool, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::ModeSupported(mode));
        Ok(!s.unsupported.contains(&mode))
    }

    fn layer_params(&mut self, _screen: Screen, _handle: u32) -> Result<LayerParams, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::LayerParams);
        s.check_fail("layer_params")?;
        Ok(s.layer)
    }

    fn set_layer_params(&mut self, _screen: Screen, _handle: u32, params: &LayerParams) -> Result<(), DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::SetLayerParams {
            work_mode: params.work_mode,
            src: (params.source.width, params.source.height),
            dst: (params.screen.width, params.screen.height),
        });
        s.check_fail("set_layer_params")?;
        s.layer = *params;
        Ok(())
    }

    fn layer_framebuffer(&mut self, _screen: Screen, _handle: u32) -> Result<LayerFramebuffer, DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::LayerFramebuffer);
        s.check_fail("layer_framebuffer")?;
        Ok(s.layer_fb)
    }

    fn screen_dimensions(&mut self, _screen: Screen) -> Result<(u32, u32), DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::ScreenDimensions);
        Ok(s.dimensions)
    }
}

impl FramebufferQuery for MockFramebuffer {
    fn byte_size(&mut self, _screen: Screen) -> Option<u64> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::ByteSize);
        s.fb_size
    }

    fn video_info(&mut self, _screen: Screen) -> Option<VideoInfo> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::VideoInfo);
        let (width, height) = s.fb_resolution;
        s.bits_per_pixel.map(|bits_per_pixel| VideoInfo { width, height, bits_per_pixel })
    }

    fn layer_handle(&mut self, _screen: Screen) -> LayerHandle {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::LayerHandle);
        s.layer_handle
    }
}

impl ConsoleTool for MockConsole {
    fn apply(&mut self, _screen: Screen, request: ConsoleRequest) -> Result<(), DisplayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(MockCall::Console(request));
        if s.console_fails {
            return Err(DisplayError::ConsoleTool("simulated fbset failure".to_string()));
        }
        let depth: Option<PixelDepth> = match request {
            ConsoleRequest::Size { width, height } => {
                s.fb_resolution = (width, height);
                None
            }
            ConsoleRequest::SizeAndDepth { width, height, depth } => {
                s.fb_resolution = (width, height);
                Some(depth)
            }
            ConsoleRequest::Depth(depth) => Some(depth),
        };
        if let Some(depth) = depth {
            s.bits_per_pixel = Some(depth.bits());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let (mut ctx, state) = mock_context(MockDriverState::panel(32), Settings::default());
        ctx.control.set_output_enabled(Screen::Zero, OutputKind::Panel, false).unwrap();
        ctx.console.apply(Screen::Zero, ConsoleRequest::Depth(PixelDepth::Bpp16)).unwrap();

        let s = state.lock().unwrap();
        assert_eq!(
            s.calls,
            vec![
                MockCall::SetOutput { kind: OutputKind::Panel, on: false },
                MockCall::Console(ConsoleRequest::Depth(PixelDepth::Bpp16)),
            ]
        );
        assert_eq!(s.output, OutputType::None);
        assert_eq!(s.bits_per_pixel, Some(16));
    }

    #[test]
    fn test_mock_set_mode_updates_dimensions() {
        let (mut ctx, state) = mock_context(MockDriverState::hdmi(5, 32), Settings::default());
        ctx.control.set_hdmi_mode(Screen::Zero, Mode::EDID).unwrap();
        assert_eq!(ctx.control.screen_dimensions(Screen::Zero).unwrap(), (1680, 1050));
        assert_eq!(state.lock().unwrap().hdmi_mode, Mode::EDID);
    }

    #[test]
    fn test_mock_simulated_failure() {
        let mut s = MockDriverState::hdmi(5, 32);
        s.fail_operation = Some("set_hdmi_mode");
        let (mut ctx, _state) = mock_context(s, Settings::default());
        assert!(matches!(
            ctx.control.set_hdmi_mode(Screen::Zero, Mode::EDID),
            Err(DisplayError::Driver { operation: "set_hdmi_mode", .. })
        ));
    }
}
