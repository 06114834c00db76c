/*
 *  display/sequencer.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Mode transition sequencer
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

//! Ordered device operations for every supported transition.
//!
//! Each transition probes the screen first and checks its precondition,
//! support and capacity before the first mutation. Once hardware has been
//! touched a failing request aborts the run where it stands; nothing is
//! rolled back.

use std::cmp::Ordering;

use log::{debug, info};

use crate::display::capacity;
use crate::display::console;
use crate::display::context::DisplayContext;
use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::scaler;
use crate::display::state::ScreenConfig;
use crate::display::types::{OutputKind, OutputType, PixelDepth, ScalerWindow, Screen};

/// Target of an HDMI mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HdmiRequest {
    pub mode: Mode,
    /// `None` keeps the current console depth
    pub depth: Option<PixelDepth>,
    /// Skip the driver's mode support query
    pub force: bool,
}

impl HdmiRequest {
    pub fn new(mode: Mode, depth: Option<PixelDepth>, force: bool) -> Self {
        Self { mode, depth, force }
    }
}

/// Runs transitions against one screen of a `DisplayContext`
pub struct ModeSequencer<'a> {
    ctx: &'a mut DisplayContext,
    screen: Screen,
}

impl<'a> ModeSequencer<'a> {
    pub fn new(ctx: &'a mut DisplayContext, screen: Screen) -> Self {
        Self { ctx, screen }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    fn probe(&mut self) -> Result<ScreenConfig, DisplayError> {
        ScreenConfig::probe(self.ctx, self.screen)
    }

    fn set_output(&mut self, kind: OutputKind, on: bool) -> Result<(), DisplayError> {
        info!("Turning {} {} on screen {}.", kind, if on { "on" } else { "off" }, self.screen);
        self.ctx.control.set_output_enabled(self.screen, kind, on)
    }

    /// Panel to HDMI
    pub fn switch_to_hdmi(&mut self, request: HdmiRequest) -> Result<(), DisplayError> {
        let before = self.probe()?;
        match before.output {
            OutputType::Hdmi => {
                return Err(DisplayError::precondition(
                    "cannot switch to HDMI because HDMI is already enabled",
                ));
            }
            OutputType::Panel => {}
            _ => {
                return Err(DisplayError::precondition(
                    "cannot switch to HDMI because the LCD is not enabled",
                ));
            }
        }
        self.enter_hdmi(&before, request, Some(OutputKind::Panel))
    }

    /// HDMI from a screen with no active output
    pub fn enable_hdmi(&mut self, request: HdmiRequest) -> Result<(), DisplayError> {
        let before = self.probe()?;
        match before.output {
            OutputType::None => {}
            OutputType::Hdmi => {
                return Err(DisplayError::precondition("HDMI is already enabled"));
            }
            other => {
                return Err(DisplayError::precondition(format!(
                    "cannot enable HDMI while {} is active; use switchtohdmi or displayoff first",
                    other
                )));
            }
        }
        self.enter_hdmi(&before, request, None)
    }

    fn enter_hdmi(
        &mut self,
        before: &ScreenConfig,
        request: HdmiRequest,
        disable_previous: Option<OutputKind>,
    ) -> Result<(), DisplayError> {
        self.verify_target(before, request)?;
        if let Some(previous) = disable_previous {
            self.set_output(previous, false)?;
        }
        // a scaler left on from a manual rescale must not keep its old window
        self.apply_mode(before, request, before.scaler_enabled)
    }

    /// New HDMI mode and optionally depth while HDMI stays the output
    pub fn change_hdmi_mode(&mut self, request: HdmiRequest) -> Result<(), DisplayError> {
        let before = self.probe()?;
        if before.output != OutputType::Hdmi {
            return Err(DisplayError::precondition(
                "cannot change HDMI mode because HDMI is not enabled",
            ));
        }
        self.verify_target(&before, request)?;
        self.set_output(OutputKind::Hdmi, false)?;
        self.apply_mode(&before, request, true)
    }

    /// Support query (unless forced) and capacity check, before any mutation
    fn verify_target(&mut self, before: &ScreenConfig, request: HdmiRequest) -> Result<(), DisplayError> {
        if !request.force && !self.ctx.control.is_mode_supported(self.screen, request.mode)? {
            return Err(DisplayError::UnsupportedMode(request.mode.to_string()));
        }
        capacity::check_capacity(self.ctx, self.screen, request.mode, request.depth, before.depth)
    }

    /// Console depth, mode set, scaler, output on, console size
    ///
    /// A shrinking depth is applied to the console before the mode. A
    /// growing depth goes together with the size when the new mode is
    /// smaller than the old geometry, otherwise before the mode with the
    /// size following once the mode is live.
    fn apply_mode(
        &mut self,
        before: &ScreenConfig,
        request: HdmiRequest,
        explicit_scaler: bool,
    ) -> Result<(), DisplayError> {
        let screen = self.screen;
        let target = request.depth.unwrap_or(before.depth);
        let mut size_done = false;

        match target.bytes().cmp(&before.depth.bytes()) {
            Ordering::Less => console::match_depth_only(self.ctx, screen, target),
            Ordering::Greater => {
                let target_pixels = before.mode_pixel_count(request.mode);
                match request.mode.dimensions() {
                    Some((width, height)) if target_pixels < before.pixel_count() => {
                        console::match_size_and_depth(self.ctx, screen, width, height, target);
                        size_done = true;
                    }
                    _ => console::match_depth_only(self.ctx, screen, target),
                }
            }
            Ordering::Equal => debug!("console depth stays at {}", target),
        }

        info!("Setting HDMI mode {} on screen {}.", request.mode, screen);
        self.ctx.control.set_hdmi_mode(screen, request.mode)?;
        scaler::apply_policy(self.ctx, screen, request.mode, target, explicit_scaler)?;
        self.set_output(OutputKind::Hdmi, true)?;

        if !size_done {
            console::match_screen_size(self.ctx, screen)?;
        }
        Ok(())
    }

    /// HDMI back to the panel, which always runs at 32bpp
    pub fn switch_to_panel(&mut self) -> Result<(), DisplayError> {
        let before = self.probe()?;
        match before.output {
            OutputType::Hdmi => {}
            OutputType::Panel => {
                return Err(DisplayError::precondition(
                    "cannot switch to LCD because the LCD is already enabled",
                ));
            }
            _ => {
                return Err(DisplayError::precondition(
                    "cannot switch to LCD because HDMI is not enabled",
                ));
            }
        }
        self.set_output(OutputKind::Hdmi, false)?;
        scaler::disable_scaler(self.ctx, self.screen)?;
        self.light_panel(&before)
    }

    /// Panel on a screen with no active output
    pub fn panel_on(&mut self) -> Result<(), DisplayError> {
        let before = self.probe()?;
        if before.output != OutputType::None {
            return Err(DisplayError::precondition(format!(
                "cannot turn the LCD on while {} is active",
                before.output
            )));
        }
        self.light_panel(&before)
    }

    fn light_panel(&mut self, before: &ScreenConfig) -> Result<(), DisplayError> {
        self.set_output(OutputKind::Panel, true)?;
        if before.depth != PixelDepth::Bpp32 {
            let (width, height) = console::live_geometry(self.ctx, self.screen)?;
            console::match_size_and_depth(self.ctx, self.screen, width, height, PixelDepth::Bpp32);
            Ok(())
        } else {
            console::match_screen_size(self.ctx, self.screen)
        }
    }

    /// Change only the console depth of the current HDMI mode
    pub fn change_pixel_depth(&mut self, depth: PixelDepth) -> Result<(), DisplayError> {
        let before = self.probe()?;
        if before.output != OutputType::Hdmi {
            return Err(DisplayError::precondition(
                "cannot change pixel depth because HDMI is not enabled",
            ));
        }
        if before.depth == depth {
            return Err(DisplayError::precondition(format!("pixel depth is already {}", depth)));
        }
        let mode = match before.mode {
            Some(mode) => mode,
            None => self.ctx.control.hdmi_mode(self.screen)?,
        };
        capacity::check_capacity(self.ctx, self.screen, mode, Some(depth), before.depth)?;

        self.set_output(OutputKind::Hdmi, false)?;
        scaler::apply_policy(self.ctx, self.screen, mode, depth, true)?;
        console::match_depth_only(self.ctx, self.screen, depth);
        self.set_output(OutputKind::Hdmi, true)
    }

    /// Turn off whichever output is driving the screen
    pub fn display_off(&mut self) -> Result<(), DisplayError> {
        let output = self.ctx.control.output_type(self.screen)?;
        match output.kind() {
            Some(kind) => self.set_output(kind, false),
            None => Err(DisplayError::precondition(format!(
                "no output is active on screen {}",
                self.screen
            ))),
        }
    }

    pub fn rescale(&mut self, window: ScalerWindow) -> Result<(), DisplayError> {
        scaler::enable_scaler_for_window(self.ctx, self.screen, window)
    }

    pub fn disable_scaler(&mut self) -> Result<(), DisplayError> {
        scaler::disable_scaler(self.ctx, self.screen)
    }
}
