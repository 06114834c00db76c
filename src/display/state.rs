/*
 *  display/state.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Live snapshot of one screen's configuration
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

use log::{debug, warn};

use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::scaler;
use crate::display::types::{LayerWorkMode, OutputType, PixelDepth, Screen};

/// Depth assumed when the OS framebuffer cannot be queried
pub const FALLBACK_DEPTH: PixelDepth = PixelDepth::Bpp16;

/// The "before" side of a transition, rebuilt from hardware every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub screen: Screen,
    pub output: OutputType,
    /// Current HDMI mode, only queried while HDMI is active; `None` also
    /// when the driver reports a number outside the mode table
    pub mode: Option<Mode>,
    pub depth: PixelDepth,
    pub scaler_enabled: bool,
    /// Live scan-out size at probe time
    pub dimensions: (u32, u32),
}

impl ScreenConfig {
    pub fn probe(ctx: &mut DisplayContext, screen: Screen) -> Result<Self, DisplayError> {
        let output = ctx.control.output_type(screen)?;
        let depth = current_depth(ctx, screen)?;
        let dimensions = ctx.control.screen_dimensions(screen)?;
        let mode = match output {
            OutputType::Hdmi => current_mode(ctx, screen)?,
            _ => None,
        };
        let scaler_enabled = output != OutputType::None && scaler_active(ctx, screen);

        let snapshot = Self { screen, output, mode, depth, scaler_enabled, dimensions };
        debug!("screen {} snapshot: {:?}", screen, snapshot);
        Ok(snapshot)
    }

    /// Pixel count of the geometry being scanned out right now
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.dimensions.0) * u64::from(self.dimensions.1)
    }

    /// Pixel count of `mode`, with the live geometry standing in for EDID
    pub fn mode_pixel_count(&self, mode: Mode) -> u64 {
        mode.pixel_count().unwrap_or_else(|| self.pixel_count())
    }
}

/// Console depth as reported by the framebuffer device
fn current_depth(ctx: &mut DisplayContext, screen: Screen) -> Result<PixelDepth, DisplayError> {
    match ctx.framebuffer.video_info(screen) {
        Some(info) => PixelDepth::from_bits(info.bits_per_pixel).ok_or_else(|| DisplayError::InvalidQuery {
            operation: "FBIOGET_VSCREENINFO",
            detail: format!("unexpected bits per pixel value ({})", info.bits_per_pixel),
        }),
        None => {
            warn!("framebuffer for screen {} unavailable, assuming {}", screen, FALLBACK_DEPTH);
            Ok(FALLBACK_DEPTH)
        }
    }
}

fn current_mode(ctx: &mut DisplayContext, screen: Screen) -> Result<Option<Mode>, DisplayError> {
    match ctx.control.hdmi_mode(screen) {
        Ok(mode) => Ok(Some(mode)),
        Err(e @ DisplayError::InvalidQuery { .. }) => {
            warn!("current HDMI mode of screen {} is unknown: {}", screen, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn scaler_active(ctx: &mut DisplayContext, screen: Screen) -> bool {
    let handle = scaler::resolve_handle(ctx, screen);
    match ctx.control.layer_params(screen, handle) {
        Ok(params) => params.work_mode == LayerWorkMode::Scaler,
        Err(e) => {
            warn!("cannot read layer parameters of screen {}: {}", screen, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::display::drivers::mock::{mock_context, MockDriverState};

    #[test]
    fn test_probe_panel() {
        let (mut ctx, _state) = mock_context(MockDriverState::panel(32), Settings::default());
        let snap = ScreenConfig::probe(&mut ctx, Screen::Zero).unwrap();
        assert_eq!(snap.output, OutputType::Panel);
        assert_eq!(snap.mode, None);
        assert_eq!(snap.depth, PixelDepth::Bpp32);
        assert_eq!(snap.dimensions, (800, 480));
        assert!(!snap.scaler_enabled);
    }

    #[test]
    fn test_probe_hdmi_reads_mode() {
        let mut s = MockDriverState::hdmi(10, 16);
        s.layer.work_mode = LayerWorkMode::Scaler;
        let (mut ctx, _state) = mock_context(s, Settings::default());
        let snap = ScreenConfig::probe(&mut ctx, Screen::Zero).unwrap();
        assert_eq!(snap.mode, Some(Mode::from_number(10).unwrap()));
        assert_eq!(snap.depth, PixelDepth::Bpp16);
        assert!(snap.scaler_enabled);
    }

    #[test]
    fn test_probe_tolerates_mode_outside_table() {
        let mut s = MockDriverState::hdmi(10, 32);
        s.foreign_hdmi_mode = Some(13);
        let (mut ctx, _state) = mock_context(s, Settings::default());
        let snap = ScreenConfig::probe(&mut ctx, Screen::Zero).unwrap();
        assert_eq!(snap.output, OutputType::Hdmi);
        assert_eq!(snap.mode, None);
        assert_eq!(snap.dimensions, (1920, 1080));
    }

    #[test]
    fn test_missing_framebuffer_assumes_16bpp() {
        let mut s = MockDriverState::panel(32);
        s.bits_per_pixel = None;
        let (mut ctx, _state) = mock_context(s, Settings::default());
        assert_eq!(ScreenConfig::probe(&mut ctx, Screen::Zero).unwrap().depth, PixelDepth::Bpp16);
    }

    #[test]
    fn test_unexpected_depth_is_invalid_query() {
        let (mut ctx, _state) = mock_context(MockDriverState::panel(8), Settings::default());
        assert!(matches!(
            ScreenConfig::probe(&mut ctx, Screen::Zero),
            Err(DisplayError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_edid_pixel_count_uses_live_geometry() {
        let (mut ctx, _state) = mock_context(MockDriverState::panel(32), Settings::default());
        let snap = ScreenConfig::probe(&mut ctx, Screen::Zero).unwrap();
        assert_eq!(snap.mode_pixel_count(Mode::EDID), 800 * 480);
        assert_eq!(snap.mode_pixel_count(Mode::from_number(8).unwrap()), 1920 * 1080);
    }
}
