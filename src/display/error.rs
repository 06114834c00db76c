/*
 *  display/error.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Unified error types for display subsystem
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

use std::io;
use std::path::PathBuf;

use thiserror::Error;

fn mb(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

/// Unified error type for all display operations
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The screen is not in a state the command can start from.
    /// Raised before any hardware is touched.
    #[error("{0}")]
    Precondition(String),

    /// The driver reports the attached sink cannot show this mode
    #[error("HDMI mode {0} is not supported by the display according to the display driver")]
    UnsupportedMode(String),

    /// Reported framebuffer is too small for the requested mode and depth
    #[error(
        "reported framebuffer size is too small to fit mode: {:.2} MB available, {:.2} MB required for {buffers} buffer(s)",
        mb(.available),
        mb(.required)
    )]
    Capacity { available: u64, required: u64, buffers: u32 },

    /// A control request was rejected by the kernel driver
    #[error("ioctl({operation}) failed: {source}")]
    Driver {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// A query returned a value that cannot be acted on
    #[error("{operation} returned an unusable result: {detail}")]
    InvalidQuery { operation: &'static str, detail: String },

    /// Mode number outside the table or on a reserved slot
    #[error("mode number {0} is out of range or reserved")]
    InvalidMode(u32),

    /// Driver interface is older than 1.0
    #[error("this program requires sunxi display driver 1.0 or higher (found {found}); upgrade your kernel or pass --force-legacy")]
    LegacyDriver { found: String },

    /// A device node could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The console reconciliation tool could not be run or reported failure
    ///
    /// Transitions log this as a warning; it never ends the process.
    #[error("console tool: {0}")]
    ConsoleTool(String),
}

impl DisplayError {
    pub fn driver(operation: &'static str, source: io::Error) -> Self {
        DisplayError::Driver { operation, source }
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        DisplayError::Precondition(msg.into())
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            DisplayError::Precondition(_) | DisplayError::InvalidMode(_) | DisplayError::ConsoleTool(_) => 1,
            DisplayError::UnsupportedMode(_) => 2,
            DisplayError::Capacity { .. } => 3,
            DisplayError::Driver { .. } => 4,
            DisplayError::InvalidQuery { .. } => 5,
            DisplayError::LegacyDriver { .. } => 6,
            DisplayError::DeviceOpen { .. } => 7,
        }
    }

    /// Extra advice printed after the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DisplayError::Capacity { buffers: 1, .. } => {
                Some("Increase the default framebuffer size allocated at boot.")
            }
            DisplayError::Capacity { .. } => Some(
                "Increase the default framebuffer size allocated at boot, or if you don't need \
                 double buffering (used by Mali and video acceleration) run with --buffers 1.",
            ),
            DisplayError::DeviceOpen { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
                Some("Are you root?")
            }
            _ => None,
        }
    }
}
