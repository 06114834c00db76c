/*
 *  dispatch.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Map a parsed command onto the sequencer
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

use std::io::Write;

use anyhow::{Context, Result};
use log::debug;

use crate::config::{Command, ModeArgs};
use crate::display::info::{ModeTable, ScreenReport};
use crate::display::{DisplayContext, HdmiRequest, Mode, ModeSequencer, Screen};

pub fn print_modes(out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", ModeTable).context("writing mode table")?;
    Ok(())
}

fn request(args: ModeArgs, force: bool) -> Result<HdmiRequest> {
    let mode = Mode::from_number(args.mode)?;
    Ok(HdmiRequest::new(mode, args.depth, force))
}

/// Run one command against the hardware behind `ctx`
///
/// The driver version gate runs first so an unsupported driver is refused
/// before anything is queried or changed.
pub fn run(ctx: &mut DisplayContext, command: Command, out: &mut dyn Write) -> Result<()> {
    if command == Command::Modes {
        return print_modes(out);
    }
    ctx.check_driver_version()?;

    if command == Command::Info {
        for screen in Screen::ALL {
            let report = ScreenReport::collect(ctx, screen)?;
            write!(out, "{}", report).context("writing screen report")?;
        }
        return Ok(());
    }

    let screen = ctx.settings.screen;
    let mut seq = ModeSequencer::new(ctx, screen);
    debug!("running {:?} on screen {}", command, seq.screen());

    match command {
        Command::SwitchToHdmi(args) => seq.switch_to_hdmi(request(args, false)?)?,
        Command::SwitchToHdmiForce(args) => seq.switch_to_hdmi(request(args, true)?)?,
        Command::EnableHdmi(args) => seq.enable_hdmi(request(args, false)?)?,
        Command::EnableHdmiForce(args) => seq.enable_hdmi(request(args, true)?)?,
        Command::ChangeHdmiMode(args) => seq.change_hdmi_mode(request(args, false)?)?,
        Command::ChangeHdmiModeForce(args) => seq.change_hdmi_mode(request(args, true)?)?,
        Command::ChangePixelDepth { depth } => seq.change_pixel_depth(depth)?,
        Command::SwitchToLcd => seq.switch_to_panel()?,
        Command::LcdOn => seq.panel_on()?,
        Command::DisplayOff => seq.display_off()?,
        Command::DisableScaler => seq.disable_scaler()?,
        Command::Rescale { .. } => {
            if let Some(window) = command.rescale_window() {
                seq.rescale(window)?;
            }
        }
        Command::Info | Command::Modes => {}
    }
    Ok(())
}
