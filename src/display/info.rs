/*
 *  display/info.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Read-only reports: per-screen status and the mode table
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
use std::path::PathBuf;

use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::scaler;
use crate::display::types::{LayerFramebuffer, LayerParams, OutputType, Screen, VideoInfo};

const MIB: f64 = 1024.0 * 1024.0;

/// Everything `info` shows for one screen
#[derive(Debug, Clone)]
pub struct ScreenReport {
    pub screen: Screen,
    pub fb_path: PathBuf,
    pub video: Option<VideoInfo>,
    pub fb_bytes: Option<u64>,
    pub dimensions: (u32, u32),
    pub output: OutputType,
    /// Layer handle and parameters, absent while no output is active
    pub layer: Option<(u32, LayerParams)>,
    /// Framebuffer the layer scans out, alongside `layer`
    pub layer_fb: Option<LayerFramebuffer>,
    /// Modes the sink advertises, only gathered for HDMI
    pub supported_modes: Vec<Mode>,
}

impl ScreenReport {
    pub fn collect(ctx: &mut DisplayContext, screen: Screen) -> Result<Self, DisplayError> {
        let fb_path = ctx.settings.fb_device(screen).to_path_buf();
        let video = ctx.framebuffer.video_info(screen);
        let fb_bytes = ctx.framebuffer.byte_size(screen);
        let dimensions = ctx.control.screen_dimensions(screen)?;
        let output = ctx.control.output_type(screen)?;

        let (layer, layer_fb) = if output == OutputType::None {
            (None, None)
        } else {
            let handle = scaler::resolve_handle(ctx, screen);
            let fb = ctx.control.layer_framebuffer(screen, handle)?;
            (Some((handle, ctx.control.layer_params(screen, handle)?)), Some(fb))
        };

        let mut supported_modes = Vec::new();
        if output == OutputType::Hdmi {
            for mode in Mode::all() {
                if ctx.control.is_mode_supported(screen, mode)? {
                    supported_modes.push(mode);
                }
            }
        }

        Ok(Self { screen, fb_path, video, fb_bytes, dimensions, output, layer, layer_fb, supported_modes })
    }
}

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Screen {} ({}):", self.screen, self.fb_path.display())?;
        match self.video {
            Some(v) => writeln!(
                f,
                "        Linux framebuffer is {} x {}, {} bits per pixel.",
                v.width, v.height, v.bits_per_pixel
            )?,
            None => writeln!(f, "        Linux framebuffer is unavailable.")?,
        }
        if let Some(bytes) = self.fb_bytes {
            writeln!(f, "        Framebuffer size {:.2} MB.", bytes as f64 / MIB)?;
        }
        writeln!(f, "        Display dimensions are {} x {}.", self.dimensions.0, self.dimensions.1)?;
        writeln!(f, "        Output type is {}.", self.output)?;

        if let Some(fb) = &self.layer_fb {
            writeln!(
                f,
                "        Framebuffer dimensions are {} x {} ({:.2} MB).",
                fb.width,
                fb.height,
                fb.byte_size() as f64 / MIB
            )?;
            writeln!(
                f,
                "        Framebuffer pixel format = 0x{:02X} ({}bpp).",
                fb.format,
                fb.bytes_per_pixel() * 8
            )?;
        }

        if let Some((handle, params)) = &self.layer {
            writeln!(f, "        Layer {} working mode is {}.", handle, params.work_mode)?;
            writeln!(
                f,
                "        Layer source window size is {} x {}.",
                params.source.width, params.source.height
            )?;
            writeln!(
                f,
                "        Layer screen window size is {} x {}.",
                params.screen.width, params.screen.height
            )?;
        }

        if self.output == OutputType::Hdmi {
            writeln!(f, "Supported HDMI modes:")?;
            for mode in &self.supported_modes {
                writeln!(f, "{:2}      {}", mode.number(), mode.label())?;
            }
        }
        Ok(())
    }
}

/// The mode table, one line per usable number
pub struct ModeTable;

impl fmt::Display for ModeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mode in Mode::all() {
            match mode.dimensions() {
                Some((w, h)) => writeln!(f, "{:2}  {:<18} {} x {}", mode.number(), mode.label(), w, h)?,
                None => writeln!(f, "{:2}  {:<18} negotiated", mode.number(), mode.label())?,
            }
        }
        Ok(())
    }
}
