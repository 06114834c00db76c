/*
 *  display/drivers/fbset.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  ConsoleTool backed by the fbset(8) utility
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

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::display::error::DisplayError;
use crate::display::traits::{ConsoleRequest, ConsoleTool};
use crate::display::types::Screen;

#[derive(Debug, Clone)]
pub struct FbsetTool {
    program: PathBuf,
    fb_devices: [PathBuf; 2],
}

impl FbsetTool {
    pub fn new(program: PathBuf, fb_devices: [PathBuf; 2]) -> Self {
        Self { program, fb_devices }
    }

    /// Argument list for one request against `screen`'s framebuffer
    pub fn args(&self, screen: Screen, request: ConsoleRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-fb".into(),
            self.fb_devices[screen.index() as usize].clone().into_os_string(),
            "--all".into(),
        ];
        let mut push = |k: &str, v: String| {
            args.push(k.into());
            args.push(v.into());
        };
        match request {
            ConsoleRequest::Size { width, height } => {
                push("-xres", width.to_string());
                push("-yres", height.to_string());
            }
            ConsoleRequest::SizeAndDepth { width, height, depth } => {
                push("-xres", width.to_string());
                push("-yres", height.to_string());
                push("-depth", depth.bits().to_string());
                push("-rgba", depth.rgba().to_string());
            }
            ConsoleRequest::Depth(depth) => {
                push("-depth", depth.bits().to_string());
                push("-rgba", depth.rgba().to_string());
            }
        }
        args
    }
}

impl ConsoleTool for FbsetTool {
    fn apply(&mut self, screen: Screen, request: ConsoleRequest) -> Result<(), DisplayError> {
        let args = self.args(screen, request);
        debug!("running {} {:?}", self.program.display(), args);
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| DisplayError::ConsoleTool(format!("cannot run {}: {}", self.program.display(), e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(DisplayError::ConsoleTool(format!("{} exited with {}", self.program.display(), status)))
        }
    }
}
