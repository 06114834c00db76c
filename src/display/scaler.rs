/*
 *  display/scaler.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Scaler layer control and the large-mode scaler policy
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

//! The scaler is engaged for 32bpp modes larger than 1280x1024 to work
//! around scan-out bandwidth artifacts. Manual rescale and disable bypass
//! that policy.

use log::{info, warn};

use crate::config::Settings;
use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::types::{LayerHandle, LayerWorkMode, PixelDepth, ScalerWindow, Screen, FALLBACK_LAYER_HANDLE};

/// Pixel count above which 32bpp modes go through the scaler
pub const SCALER_PIXEL_THRESHOLD: u64 = 1280 * 1024;

/// Layer handle for `screen`, falling back to the first sunxi handle
pub fn resolve_handle(ctx: &mut DisplayContext, screen: Screen) -> u32 {
    match ctx.framebuffer.layer_handle(screen) {
        LayerHandle::Resolved(handle) => handle,
        LayerHandle::Unavailable => {
            warn!(
                "cannot resolve layer handle for screen {}, using handle {}",
                screen, FALLBACK_LAYER_HANDLE
            );
            FALLBACK_LAYER_HANDLE
        }
    }
}

/// Whether a mode of `pixels` at `depth` should be scanned out through the scaler
pub fn wants_scaler(settings: &Settings, depth: PixelDepth, pixels: u64) -> bool {
    settings.use_scaler && depth == PixelDepth::Bpp32 && pixels > SCALER_PIXEL_THRESHOLD
}

/// Put the screen's layer back into normal work mode
pub fn disable_scaler(ctx: &mut DisplayContext, screen: Screen) -> Result<(), DisplayError> {
    let handle = resolve_handle(ctx, screen);
    let mut params = ctx.control.layer_params(screen, handle)?;
    params.work_mode = LayerWorkMode::Normal;
    info!("Disabling scaler on screen {}.", screen);
    ctx.control.set_layer_params(screen, handle, &params)
}

pub fn enable_scaler_for_window(
    ctx: &mut DisplayContext,
    screen: Screen,
    window: ScalerWindow,
) -> Result<(), DisplayError> {
    let handle = resolve_handle(ctx, screen);
    let mut params = ctx.control.layer_params(screen, handle)?;
    params.work_mode = LayerWorkMode::Scaler;
    params.source.width = window.src_width;
    params.source.height = window.src_height;
    params.screen.width = window.dst_width;
    params.screen.height = window.dst_height;
    info!(
        "Enabling scaler on screen {}: {} x {} -> {} x {}.",
        screen, window.src_width, window.src_height, window.dst_width, window.dst_height
    );
    ctx.control.set_layer_params(screen, handle, &params)
}

/// Scaler with source and destination both at the mode's size
///
/// The EDID mode has no table size, so the live scan-out size is used;
/// call this only after the mode has been applied.
pub fn enable_scaler_for_mode(ctx: &mut DisplayContext, screen: Screen, mode: Mode) -> Result<(), DisplayError> {
    let (width, height) = match mode.dimensions() {
        Some(dims) => dims,
        None => ctx.control.screen_dimensions(screen)?,
    };
    enable_scaler_for_window(ctx, screen, ScalerWindow::unscaled(width, height))
}

/// Apply the large-mode policy after a mode change
///
/// With `explicit` set the scaler is disabled when the policy does not
/// want it; otherwise it is left alone. Returns whether it was enabled.
pub fn apply_policy(
    ctx: &mut DisplayContext,
    screen: Screen,
    mode: Mode,
    depth: PixelDepth,
    explicit: bool,
) -> Result<bool, DisplayError> {
    let pixels = match mode.pixel_count() {
        Some(p) => p,
        None => {
            let (w, h) = ctx.control.screen_dimensions(screen)?;
            u64::from(w) * u64::from(h)
        }
    };
    if wants_scaler(&ctx.settings, depth, pixels) {
        enable_scaler_for_mode(ctx, screen, mode)?;
        Ok(true)
    } else {
        if explicit {
            disable_scaler(ctx, screen)?;
        }
        Ok(false)
    }
}
