/*
 *  display/traits.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Port traits over the display driver, framebuffer devices and the
 *  console reconciliation tool
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

use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::types::{
    DriverVersion, LayerFramebuffer, LayerHandle, LayerParams, OutputKind, OutputType, PixelDepth, Screen, VideoInfo,
};

/// Control channel of the display driver
///
/// Every method maps onto one driver request. Mutations that the driver
/// rejects come back as `DisplayError::Driver`; callers never retry.
pub trait DisplayControl {
    /// Interface version, `None` when the driver predates versioning
    fn driver_version(&mut self) -> Result<Option<DriverVersion>, DisplayError>;

    /// Which output currently drives `screen`
    fn output_type(&mut self, screen: Screen) -> Result<OutputType, DisplayError>;

    /// Switch one output on or off
    ///
    /// Turning one output on never turns the others off; that is the
    /// caller's job.
    fn set_output_enabled(&mut self, screen: Screen, kind: OutputKind, on: bool) -> Result<(), DisplayError>;

    fn hdmi_mode(&mut self, screen: Screen) -> Result<Mode, DisplayError>;

    fn set_hdmi_mode(&mut self, screen: Screen, mode: Mode) -> Result<(), DisplayError>;

    /// Whether the attached sink advertises `mode`
    fn is_mode_supported(&mut self, screen: Screen, mode: Mode) -> Result<bool, DisplayError>;

    fn layer_params(&mut self, screen: Screen, handle: u32) -> Result<LayerParams, DisplayError>;

    fn set_layer_params(&mut self, screen: Screen, handle: u32, params: &LayerParams) -> Result<(), DisplayError>;

    /// Size and pixel format of the framebuffer a layer scans out
    fn layer_framebuffer(&mut self, screen: Screen, handle: u32) -> Result<LayerFramebuffer, DisplayError>;

    /// Live scan-out size; zero in either dimension means unknown
    fn screen_dimensions(&mut self, screen: Screen) -> Result<(u32, u32), DisplayError>;
}

/// Per-screen OS framebuffer device
///
/// A screen without a usable framebuffer reports `None` / `Unavailable`
/// rather than failing.
pub trait FramebufferQuery {
    /// Size of the allocated framebuffer memory in bytes
    fn byte_size(&mut self, screen: Screen) -> Option<u64>;

    fn video_info(&mut self, screen: Screen) -> Option<VideoInfo>;

    /// Compositing layer backing the screen's framebuffer
    fn layer_handle(&mut self, screen: Screen) -> LayerHandle;
}

/// A console framebuffer change handed to the external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleRequest {
    Size { width: u32, height: u32 },
    SizeAndDepth { width: u32, height: u32, depth: PixelDepth },
    Depth(PixelDepth),
}

/// External tool that rewrites the console framebuffer geometry
pub trait ConsoleTool {
    fn apply(&mut self, screen: Screen, request: ConsoleRequest) -> Result<(), DisplayError>;
}
