/*
 *  display/context.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Per-invocation bundle of device ports and resolved settings
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

use log::{info, warn};

use crate::config::Settings;
use crate::display::drivers::fbdev::FbDevices;
use crate::display::drivers::fbset::FbsetTool;
use crate::display::drivers::sunxi::SunxiDisplay;
use crate::display::error::DisplayError;
use crate::display::traits::{ConsoleTool, DisplayControl, FramebufferQuery};

pub type BoxedControl = Box<dyn DisplayControl>;
pub type BoxedFramebuffer = Box<dyn FramebufferQuery>;
pub type BoxedConsole = Box<dyn ConsoleTool>;

/// Everything one invocation needs to talk to the display subsystem
pub struct DisplayContext {
    pub control: BoxedControl,
    pub framebuffer: BoxedFramebuffer,
    pub console: BoxedConsole,
    pub settings: Settings,
}

impl DisplayContext {
    pub fn new(
        control: BoxedControl,
        framebuffer: BoxedFramebuffer,
        console: BoxedConsole,
        settings: Settings,
    ) -> Self {
        Self { control, framebuffer, console, settings }
    }

    /// Open the real devices named in `settings`
    ///
    /// The control node is mandatory. Missing framebuffer devices only
    /// degrade the checks that depend on them.
    pub fn open(settings: Settings) -> Result<Self, DisplayError> {
        let control = SunxiDisplay::open(&settings.disp_device)?;
        let framebuffer = FbDevices::open(&settings.fb_devices);
        let console = FbsetTool::new(settings.console_program.clone(), settings.fb_devices.clone());
        Ok(Self::new(Box::new(control), Box::new(framebuffer), Box::new(console), settings))
    }

    /// Gate mutation on the driver interface version
    ///
    /// Drivers older than 1.0 (or without versioning) are refused unless
    /// the legacy override is set, in which case we carry on best effort.
    pub fn check_driver_version(&mut self) -> Result<(), DisplayError> {
        let version = match self.control.driver_version()? {
            Some(v) => {
                info!("sunxi disp kernel module version is {}", v);
                v
            }
            None => {
                warn!("kernel sunxi disp driver does not support versioning");
                Default::default()
            }
        };

        if !version.is_legacy() {
            return Ok(());
        }
        if self.settings.allow_legacy_driver {
            warn!("display driver {} predates 1.0; continuing, some requests may be unsupported", version);
            Ok(())
        } else {
            Err(DisplayError::LegacyDriver { found: version.to_string() })
        }
    }
}
