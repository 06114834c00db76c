/*
 *  display/types.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Value types shared by the display ports and the sequencer
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

use std::fmt;
use std::str::FromStr;

use dispswitch_driver_sunxi::ffi::{
    DISP_FORMAT_ARGB4444, DISP_FORMAT_ARGB888, DISP_FORMAT_ARGB8888, DISP_FORMAT_RGB655, DISP_FORMAT_RGB888,
    DISP_FORMAT_RGBA5551, DISP_LAYER_WORK_MODE_GAMMA, DISP_LAYER_WORK_MODE_INTER_BUF, DISP_LAYER_WORK_MODE_NORMAL,
    DISP_LAYER_WORK_MODE_PALETTE, DISP_LAYER_WORK_MODE_SCALER, DISP_OUTPUT_TYPE_HDMI, DISP_OUTPUT_TYPE_LCD,
    DISP_OUTPUT_TYPE_NONE, DISP_OUTPUT_TYPE_TV, DISP_OUTPUT_TYPE_VGA,
};
use serde::{Deserialize, Serialize};

/// One of the two display pipelines of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Screen {
    #[default]
    Zero,
    One,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Zero, Screen::One];

    pub fn index(self) -> u32 {
        match self {
            Screen::Zero => 0,
            Screen::One => 1,
        }
    }
}

impl TryFrom<u8> for Screen {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Screen::Zero),
            1 => Ok(Screen::One),
            other => Err(format!("screen must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Screen> for u8 {
    fn from(screen: Screen) -> Self {
        screen.index() as u8
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.trim().parse().map_err(|_| format!("invalid screen '{}'", s))?;
        Screen::try_from(n)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Physical sink currently driving a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    None,
    Panel,
    Tv,
    Hdmi,
    Vga,
}

impl OutputType {
    /// Decode the driver's __disp_output_type_t value
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            DISP_OUTPUT_TYPE_NONE => Some(OutputType::None),
            DISP_OUTPUT_TYPE_LCD => Some(OutputType::Panel),
            DISP_OUTPUT_TYPE_TV => Some(OutputType::Tv),
            DISP_OUTPUT_TYPE_HDMI => Some(OutputType::Hdmi),
            DISP_OUTPUT_TYPE_VGA => Some(OutputType::Vga),
            _ => None,
        }
    }

    /// The enable/disable target for this output, `None` when nothing is active
    pub fn kind(self) -> Option<OutputKind> {
        match self {
            OutputType::None => None,
            OutputType::Panel => Some(OutputKind::Panel),
            OutputType::Tv => Some(OutputKind::Tv),
            OutputType::Hdmi => Some(OutputKind::Hdmi),
            OutputType::Vga => Some(OutputKind::Vga),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputType::None => "NONE",
            OutputType::Panel => "LCD",
            OutputType::Tv => "TV",
            OutputType::Hdmi => "HDMI",
            OutputType::Vga => "VGA",
        };
        f.write_str(s)
    }
}

/// Outputs that can be switched on or off individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Panel,
    Tv,
    Hdmi,
    Vga,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputKind::Panel => "LCD",
            OutputKind::Tv => "TV",
            OutputKind::Hdmi => "HDMI",
            OutputKind::Vga => "VGA",
        };
        f.write_str(s)
    }
}

/// Console framebuffer pixel depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PixelDepth {
    Bpp16,
    Bpp24,
    Bpp32,
}

impl PixelDepth {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(PixelDepth::Bpp16),
            24 => Some(PixelDepth::Bpp24),
            32 => Some(PixelDepth::Bpp32),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        self.bytes() * 8
    }

    pub fn bytes(self) -> u32 {
        match self {
            PixelDepth::Bpp16 => 2,
            PixelDepth::Bpp24 => 3,
            PixelDepth::Bpp32 => 4,
        }
    }

    /// fbset -rgba layout for this depth
    pub fn rgba(self) -> &'static str {
        match self {
            PixelDepth::Bpp16 => "5,6,5,0",
            PixelDepth::Bpp24 => "8,8,8,0",
            PixelDepth::Bpp32 => "8,8,8,8",
        }
    }
}

impl FromStr for PixelDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(PixelDepth::from_bits)
            .ok_or_else(|| format!("bits per pixel must be 16, 24 or 32, got '{}'", s))
    }
}

impl fmt::Display for PixelDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bpp", self.bits())
    }
}

/// Layer work mode (__disp_layer_work_mode_t)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerWorkMode {
    #[default]
    Normal,
    Palette,
    InternalBuffer,
    Gamma,
    Scaler,
}

impl LayerWorkMode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            DISP_LAYER_WORK_MODE_NORMAL => Some(LayerWorkMode::Normal),
            DISP_LAYER_WORK_MODE_PALETTE => Some(LayerWorkMode::Palette),
            DISP_LAYER_WORK_MODE_INTER_BUF => Some(LayerWorkMode::InternalBuffer),
            DISP_LAYER_WORK_MODE_GAMMA => Some(LayerWorkMode::Gamma),
            DISP_LAYER_WORK_MODE_SCALER => Some(LayerWorkMode::Scaler),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            LayerWorkMode::Normal => DISP_LAYER_WORK_MODE_NORMAL,
            LayerWorkMode::Palette => DISP_LAYER_WORK_MODE_PALETTE,
            LayerWorkMode::InternalBuffer => DISP_LAYER_WORK_MODE_INTER_BUF,
            LayerWorkMode::Gamma => DISP_LAYER_WORK_MODE_GAMMA,
            LayerWorkMode::Scaler => DISP_LAYER_WORK_MODE_SCALER,
        }
    }
}

impl fmt::Display for LayerWorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayerWorkMode::Normal => "NORMAL",
            LayerWorkMode::Palette => "PALETTE",
            LayerWorkMode::InternalBuffer => "INTERNAL FRAMEBUFFER",
            LayerWorkMode::Gamma => "GAMMA CORRECTION",
            LayerWorkMode::Scaler => "SCALER",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Parameters of a screen's primary compositing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerParams {
    pub work_mode: LayerWorkMode,
    /// framebuffer source window
    pub source: Rect,
    /// screen window
    pub screen: Rect,
}

/// Framebuffer bound to a compositing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFramebuffer {
    pub width: u32,
    pub height: u32,
    /// raw __disp_pixel_fmt_t value
    pub format: u32,
}

impl LayerFramebuffer {
    /// Bytes per pixel of the RGB formats; palette and YUV formats count as one
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            DISP_FORMAT_RGB655..=DISP_FORMAT_RGBA5551 | DISP_FORMAT_ARGB4444 => 2,
            DISP_FORMAT_RGB888 => 3,
            DISP_FORMAT_ARGB888 | DISP_FORMAT_ARGB8888 => 4,
            _ => 1,
        }
    }

    pub fn byte_size(&self) -> u64 {
        u64::from(self.bytes_per_pixel()) * u64::from(self.width) * u64::from(self.height)
    }
}

/// Sunxi layer handles are numbered from 100; the first one backs fb0
pub const FALLBACK_LAYER_HANDLE: u32 = 100;

/// Result of resolving the compositing layer behind a screen's framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerHandle {
    Resolved(u32),
    Unavailable,
}

/// Scaler source and destination sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalerWindow {
    pub src_width: u32,
    pub src_height: u32,
    pub dst_width: u32,
    pub dst_height: u32,
}

impl ScalerWindow {
    /// Same size in and out
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self { src_width: width, src_height: height, dst_width: width, dst_height: height }
    }
}

/// Variable screen info as reported by the OS framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
}

impl DriverVersion {
    pub fn from_packed(packed: u32) -> Self {
        Self { major: packed >> 16, minor: packed & 0xffff }
    }

    pub fn is_legacy(&self) -> bool {
        self.major < 1
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
