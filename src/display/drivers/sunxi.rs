/*
 *  display/drivers/sunxi.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  DisplayControl over the sunxi /dev/disp request interface
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

use libc::c_ulong;
use std::path::Path;

use dispswitch_driver_sunxi::ffi::*;
use dispswitch_driver_sunxi::{DispArgs, DispDevice};
use log::debug;

use crate::display::error::DisplayError;
use crate::display::modes::Mode;
use crate::display::traits::DisplayControl;
use crate::display::types::{
    DriverVersion, LayerFramebuffer, LayerParams, LayerWorkMode, OutputKind, OutputType, Rect, Screen,
};

/// Display driver reached through /dev/disp
#[derive(Debug)]
pub struct SunxiDisplay {
    dev: DispDevice,
}

impl SunxiDisplay {
    pub fn open(path: &Path) -> Result<Self, DisplayError> {
        let dev = DispDevice::open(path).map_err(|source| DisplayError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened display driver at {}", path.display());
        Ok(Self { dev })
    }

    fn screen_request(&self, name: &'static str, cmd: c_ulong, screen: Screen) -> Result<i32, DisplayError> {
        self.dev
            .screen_request(cmd, screen.index())
            .map_err(|e| DisplayError::driver(name, e))
    }

    fn raw_layer(&self, screen: Screen, handle: u32) -> Result<DispLayerInfo, DisplayError> {
        self.dev
            .layer_info(screen.index(), handle)
            .map_err(|e| DisplayError::driver("DISP_CMD_LAYER_GET_PARA", e))
    }
}

fn rect_from_raw(r: &DispRect) -> Rect {
    Rect { x: r.x, y: r.y, width: r.width, height: r.height }
}

fn rect_to_raw(r: &Rect, raw: &mut DispRect) {
    raw.x = r.x;
    raw.y = r.y;
    raw.width = r.width;
    raw.height = r.height;
}

fn output_request(kind: OutputKind, on: bool) -> (&'static str, c_ulong) {
    match (kind, on) {
        (OutputKind::Panel, true) => ("DISP_CMD_LCD_ON", DISP_CMD_LCD_ON),
        (OutputKind::Panel, false) => ("DISP_CMD_LCD_OFF", DISP_CMD_LCD_OFF),
        (OutputKind::Hdmi, true) => ("DISP_CMD_HDMI_ON", DISP_CMD_HDMI_ON),
        (OutputKind::Hdmi, false) => ("DISP_CMD_HDMI_OFF", DISP_CMD_HDMI_OFF),
        (OutputKind::Vga, true) => ("DISP_CMD_VGA_ON", DISP_CMD_VGA_ON),
        (OutputKind::Vga, false) => ("DISP_CMD_VGA_OFF", DISP_CMD_VGA_OFF),
        (OutputKind::Tv, true) => ("DISP_CMD_TV_ON", DISP_CMD_TV_ON),
        (OutputKind::Tv, false) => ("DISP_CMD_TV_OFF", DISP_CMD_TV_OFF),
    }
}

impl DisplayControl for SunxiDisplay {
    fn driver_version(&mut self) -> Result<Option<DriverVersion>, DisplayError> {
        // drivers without versioning reject the request outright
        match self.dev.version() {
            Ok(packed) => Ok(Some(DriverVersion::from_packed(packed))),
            Err(e) => {
                debug!("DISP_CMD_VERSION rejected: {}", e);
                Ok(None)
            }
        }
    }

    fn output_type(&mut self, screen: Screen) -> Result<OutputType, DisplayError> {
        let raw = self.screen_request("DISP_CMD_GET_OUTPUT_TYPE", DISP_CMD_GET_OUTPUT_TYPE, screen)?;
        OutputType::from_raw(raw).ok_or_else(|| DisplayError::InvalidQuery {
            operation: "DISP_CMD_GET_OUTPUT_TYPE",
            detail: format!("unknown output type {}", raw),
        })
    }

    fn set_output_enabled(&mut self, screen: Screen, kind: OutputKind, on: bool) -> Result<(), DisplayError> {
        let (name, cmd) = output_request(kind, on);
        self.screen_request(name, cmd, screen).map(|_| ())
    }

    fn hdmi_mode(&mut self, screen: Screen) -> Result<Mode, DisplayError> {
        let raw = self.screen_request("DISP_CMD_HDMI_GET_MODE", DISP_CMD_HDMI_GET_MODE, screen)?;
        Mode::from_number(raw as u32).map_err(|_| DisplayError::InvalidQuery {
            operation: "DISP_CMD_HDMI_GET_MODE",
            detail: format!("mode {} is not in the mode table", raw),
        })
    }

    fn set_hdmi_mode(&mut self, screen: Screen, mode: Mode) -> Result<(), DisplayError> {
        let mut args: DispArgs = [screen.index() as c_ulong, mode.number() as c_ulong, 0, 0];
        self.dev
            .request(DISP_CMD_HDMI_SET_MODE, &mut args)
            .map(|_| ())
            .map_err(|e| DisplayError::driver("DISP_CMD_HDMI_SET_MODE", e))
    }

    fn is_mode_supported(&mut self, screen: Screen, mode: Mode) -> Result<bool, DisplayError> {
        let mut args: DispArgs = [screen.index() as c_ulong, mode.number() as c_ulong, 0, 0];
        self.dev
            .request(DISP_CMD_HDMI_SUPPORT_MODE, &mut args)
            .map(|ret| ret == 1)
            .map_err(|e| DisplayError::driver("DISP_CMD_HDMI_SUPPORT_MODE", e))
    }

    fn layer_params(&mut self, screen: Screen, handle: u32) -> Result<LayerParams, DisplayError> {
        let raw = self.raw_layer(screen, handle)?;
        let work_mode = LayerWorkMode::from_raw(raw.mode).ok_or_else(|| DisplayError::InvalidQuery {
            operation: "DISP_CMD_LAYER_GET_PARA",
            detail: format!("unknown layer work mode {}", raw.mode),
        })?;
        Ok(LayerParams {
            work_mode,
            source: rect_from_raw(&raw.src_win),
            screen: rect_from_raw(&raw.scn_win),
        })
    }

    fn set_layer_params(&mut self, screen: Screen, handle: u32, params: &LayerParams) -> Result<(), DisplayError> {
        // read-modify-write so the framebuffer, pipe and alpha fields survive
        let mut raw = self.raw_layer(screen, handle)?;
        raw.mode = params.work_mode.raw();
        rect_to_raw(&params.source, &mut raw.src_win);
        rect_to_raw(&params.screen, &mut raw.scn_win);
        self.dev
            .set_layer_info(screen.index(), handle, &raw)
            .map_err(|e| DisplayError::driver("DISP_CMD_LAYER_SET_PARA", e))
    }

    fn layer_framebuffer(&mut self, screen: Screen, handle: u32) -> Result<LayerFramebuffer, DisplayError> {
        let fb = self
            .dev
            .layer_fb(screen.index(), handle)
            .map_err(|e| DisplayError::driver("DISP_CMD_LAYER_GET_FB", e))?;
        Ok(LayerFramebuffer { width: fb.size.width, height: fb.size.height, format: fb.format })
    }

    fn screen_dimensions(&mut self, screen: Screen) -> Result<(u32, u32), DisplayError> {
        let width = self.screen_request("DISP_CMD_SCN_GET_WIDTH", DISP_CMD_SCN_GET_WIDTH, screen)?;
        let height = self.screen_request("DISP_CMD_SCN_GET_HEIGHT", DISP_CMD_SCN_GET_HEIGHT, screen)?;
        Ok((width.max(0) as u32, height.max(0) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_requests_are_distinct() {
        let kinds = [OutputKind::Panel, OutputKind::Hdmi, OutputKind::Vga, OutputKind::Tv];
        let mut codes: Vec<c_ulong> = kinds
            .iter()
            .flat_map(|k| [output_request(*k, true).1, output_request(*k, false).1])
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 8);
        assert_eq!(output_request(OutputKind::Hdmi, false), ("DISP_CMD_HDMI_OFF", DISP_CMD_HDMI_OFF));
    }

    #[test]
    fn test_rect_copy_keeps_position() {
        let mut raw = DispRect { x: 5, y: 7, width: 1, height: 1 };
        rect_to_raw(&Rect { x: 5, y: 7, width: 1920, height: 1080 }, &mut raw);
        assert_eq!(rect_from_raw(&raw), Rect { x: 5, y: 7, width: 1920, height: 1080 });
    }

    #[test]
    fn test_open_missing_device_reports_path() {
        let err = SunxiDisplay::open(Path::new("/nonexistent/disp")).unwrap_err();
        assert!(matches!(err, DisplayError::DeviceOpen { .. }));
        assert!(err.to_string().contains("/nonexistent/disp"));
    }
}
