/*
 *  display/console.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Keep the OS console framebuffer in step with the hardware mode
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

//! Console reconciliation.
//!
//! The console tool needs geometry and depth to be jointly valid when it
//! runs, so callers pick one of the three operations below according to
//! what changed. A failing tool is reported as a warning; the hardware
//! mode has already been applied by then.

use log::{info, warn};

use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::traits::ConsoleRequest;
use crate::display::types::{PixelDepth, Screen};

fn run(ctx: &mut DisplayContext, screen: Screen, request: ConsoleRequest) {
    if let Err(e) = ctx.console.apply(screen, request) {
        warn!("console reconciliation on screen {} failed: {}", screen, e);
    }
}

/// Live scan-out geometry, refusing the zero "unknown" answer
pub fn live_geometry(ctx: &mut DisplayContext, screen: Screen) -> Result<(u32, u32), DisplayError> {
    let (width, height) = ctx.control.screen_dimensions(screen)?;
    if width == 0 || height == 0 {
        return Err(DisplayError::InvalidQuery {
            operation: "DISP_CMD_SCN_GET_WIDTH/HEIGHT",
            detail: format!("screen {} reports {} x {}", screen, width, height),
        });
    }
    Ok((width, height))
}

/// Resize the console to the live scan-out geometry
pub fn match_screen_size(ctx: &mut DisplayContext, screen: Screen) -> Result<(), DisplayError> {
    let (width, height) = live_geometry(ctx, screen)?;
    info!("Setting console framebuffer resolution to {} x {}.", width, height);
    run(ctx, screen, ConsoleRequest::Size { width, height });
    Ok(())
}

/// Resize and change depth in one console call
pub fn match_size_and_depth(ctx: &mut DisplayContext, screen: Screen, width: u32, height: u32, depth: PixelDepth) {
    info!("Setting console framebuffer resolution to {} x {} at {}.", width, height, depth);
    run(ctx, screen, ConsoleRequest::SizeAndDepth { width, height, depth });
}

pub fn match_depth_only(ctx: &mut DisplayContext, screen: Screen, depth: PixelDepth) {
    info!("Setting console framebuffer depth to {}.", depth);
    run(ctx, screen, ConsoleRequest::Depth(depth));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::display::drivers::mock::{mock_context, MockCall, MockDriverState};

    #[test]
    fn test_size_comes_from_live_geometry() {
        let (mut ctx, state) = mock_context(MockDriverState::hdmi(4, 32), Settings::default());
        match_screen_size(&mut ctx, Screen::Zero).unwrap();
        assert_eq!(
            state.lock().unwrap().mutations(),
            vec![MockCall::Console(ConsoleRequest::Size { width: 1280, height: 720 })]
        );
    }

    #[test]
    fn test_unknown_geometry_aborts() {
        let (mut ctx, state) = mock_context(MockDriverState::off(32), Settings::default());
        assert!(matches!(
            match_screen_size(&mut ctx, Screen::Zero),
            Err(DisplayError::InvalidQuery { .. })
        ));
        assert!(state.lock().unwrap().mutations().is_empty());
    }

    #[test]
    fn test_tool_failure_is_not_fatal() {
        let mut s = MockDriverState::panel(32);
        s.console_fails = true;
        let (mut ctx, state) = mock_context(s, Settings::default());
        match_screen_size(&mut ctx, Screen::Zero).unwrap();
        match_depth_only(&mut ctx, Screen::Zero, PixelDepth::Bpp16);
        assert_eq!(state.lock().unwrap().mutations().len(), 2);
    }
}
