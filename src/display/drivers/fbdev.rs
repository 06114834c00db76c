/*
 *  display/drivers/fbdev.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  FramebufferQuery over the Linux /dev/fbN devices
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

use std::path::PathBuf;

use dispswitch_driver_sunxi::FbDevice;
use log::{debug, warn};

use crate::display::traits::FramebufferQuery;
use crate::display::types::{LayerHandle, Screen, VideoInfo};

/// Framebuffer devices for both screens; either may be missing
#[derive(Debug)]
pub struct FbDevices {
    devices: [Option<FbDevice>; 2],
}

impl FbDevices {
    /// Open both devices, downgrading failures to warnings
    pub fn open(paths: &[PathBuf; 2]) -> Self {
        let open = |path: &PathBuf| match FbDevice::open(path) {
            Ok(dev) => {
                debug!("opened framebuffer {}", path.display());
                Some(dev)
            }
            Err(e) => {
                warn!("failed to open {}: {}; dependent checks will be skipped", path.display(), e);
                None
            }
        };
        Self { devices: [open(&paths[0]), open(&paths[1])] }
    }

    fn device(&self, screen: Screen) -> Option<&FbDevice> {
        self.devices[screen.index() as usize].as_ref()
    }
}

impl FramebufferQuery for FbDevices {
    fn byte_size(&mut self, screen: Screen) -> Option<u64> {
        let dev = self.device(screen)?;
        match dev.fix_screeninfo() {
            Ok(fix) => Some(u64::from(fix.smem_len)),
            Err(e) => {
                warn!("FBIOGET_FSCREENINFO failed for screen {}: {}", screen, e);
                None
            }
        }
    }

    fn video_info(&mut self, screen: Screen) -> Option<VideoInfo> {
        let dev = self.device(screen)?;
        match dev.var_screeninfo() {
            Ok(var) => Some(VideoInfo {
                width: var.xres,
                height: var.yres,
                bits_per_pixel: var.bits_per_pixel,
            }),
            Err(e) => {
                warn!("FBIOGET_VSCREENINFO failed for screen {}: {}", screen, e);
                None
            }
        }
    }

    fn layer_handle(&mut self, screen: Screen) -> LayerHandle {
        let Some(dev) = self.device(screen) else {
            return LayerHandle::Unavailable;
        };
        match dev.layer_handle(screen.index()) {
            Ok(handle) => LayerHandle::Resolved(handle),
            Err(e) => {
                debug!("FBIOGET_LAYER_HDL_{} failed: {}", screen, e);
                LayerHandle::Unavailable
            }
        }
    }
}
