/*
 *  display/capacity.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Framebuffer capacity guard
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
use crate::display::types::{PixelDepth, Screen};

/// Bytes needed to scan out `pixels` at `bytes_per_pixel` with `buffers` pages
pub fn required_bytes(pixels: u64, bytes_per_pixel: u32, buffers: u32) -> u64 {
    pixels * u64::from(bytes_per_pixel) * u64::from(buffers)
}

/// Refuse a mode/depth pair the framebuffer memory cannot hold
///
/// `depth` of `None` keeps `current`. The EDID mode is sized from the live
/// scan-out geometry. Skipped when disabled or the framebuffer is missing.
pub fn check_capacity(
    ctx: &mut DisplayContext,
    screen: Screen,
    mode: Mode,
    depth: Option<PixelDepth>,
    current: PixelDepth,
) -> Result<(), DisplayError> {
    if !ctx.settings.check_capacity {
        debug!("capacity check disabled");
        return Ok(());
    }
    let Some(available) = ctx.framebuffer.byte_size(screen) else {
        warn!("framebuffer size of screen {} unknown, skipping capacity check", screen);
        return Ok(());
    };

    let bytes = depth.unwrap_or(current).bytes();
    let pixels = match mode.pixel_count() {
        Some(p) => p,
        None => {
            let (w, h) = ctx.control.screen_dimensions(screen)?;
            u64::from(w) * u64::from(h)
        }
    };
    let buffers = ctx.settings.buffer_count;
    let required = required_bytes(pixels, bytes, buffers);
    debug!("mode {} needs {} bytes of {} available", mode, required, available);

    if required > available {
        return Err(DisplayError::Capacity { available, required, buffers });
    }
    Ok(())
}
