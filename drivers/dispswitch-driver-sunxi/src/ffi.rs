/*
 *  dispswitch sunxi driver - FFI Types
 *
 *  C ABI types matching sunxi_disp_ioctl.h and linux/fb.h
 *  These types must match exactly with the kernel's layouts
 */

use std::os::raw::{c_char, c_ulong};

/// Driver interface version this crate was written against (major << 16 | minor)
pub const SUNXI_DISP_VERSION_MAJOR: u32 = 1;
pub const SUNXI_DISP_VERSION_MINOR: u32 = 0;
pub const SUNXI_DISP_VERSION: u32 = (SUNXI_DISP_VERSION_MAJOR << 16) | SUNXI_DISP_VERSION_MINOR;

// ----disp global----
pub const DISP_CMD_VERSION: c_ulong = 0x00;
pub const DISP_CMD_SCN_GET_WIDTH: c_ulong = 0x08;
pub const DISP_CMD_SCN_GET_HEIGHT: c_ulong = 0x09;
pub const DISP_CMD_GET_OUTPUT_TYPE: c_ulong = 0x0a;

// ----layer----
pub const DISP_CMD_LAYER_GET_FB: c_ulong = 0x49;
pub const DISP_CMD_LAYER_SET_PARA: c_ulong = 0x4a;
pub const DISP_CMD_LAYER_GET_PARA: c_ulong = 0x4b;

// ----lcd----
pub const DISP_CMD_LCD_ON: c_ulong = 0x140;
pub const DISP_CMD_LCD_OFF: c_ulong = 0x141;

// ----tv----
pub const DISP_CMD_TV_ON: c_ulong = 0x180;
pub const DISP_CMD_TV_OFF: c_ulong = 0x181;

// ----hdmi----
pub const DISP_CMD_HDMI_ON: c_ulong = 0x1c0;
pub const DISP_CMD_HDMI_OFF: c_ulong = 0x1c1;
pub const DISP_CMD_HDMI_SET_MODE: c_ulong = 0x1c2;
pub const DISP_CMD_HDMI_GET_MODE: c_ulong = 0x1c3;
pub const DISP_CMD_HDMI_SUPPORT_MODE: c_ulong = 0x1c4;

// ----vga----
pub const DISP_CMD_VGA_ON: c_ulong = 0x200;
pub const DISP_CMD_VGA_OFF: c_ulong = 0x201;

// ----framebuffer----
pub const FBIOGET_VSCREENINFO: c_ulong = 0x4600;
pub const FBIOGET_FSCREENINFO: c_ulong = 0x4602;
pub const FBIOGET_LAYER_HDL_0: c_ulong = 0x4700;
pub const FBIOGET_LAYER_HDL_1: c_ulong = 0x4701;

/// __disp_output_type_t
pub const DISP_OUTPUT_TYPE_NONE: i32 = 0;
pub const DISP_OUTPUT_TYPE_LCD: i32 = 1;
pub const DISP_OUTPUT_TYPE_TV: i32 = 2;
pub const DISP_OUTPUT_TYPE_HDMI: i32 = 4;
pub const DISP_OUTPUT_TYPE_VGA: i32 = 8;

/// __disp_layer_work_mode_t
pub const DISP_LAYER_WORK_MODE_NORMAL: u32 = 0;
pub const DISP_LAYER_WORK_MODE_PALETTE: u32 = 1;
pub const DISP_LAYER_WORK_MODE_INTER_BUF: u32 = 2;
pub const DISP_LAYER_WORK_MODE_GAMMA: u32 = 3;
pub const DISP_LAYER_WORK_MODE_SCALER: u32 = 4;

/// __disp_pixel_fmt_t, the values the bytes-per-pixel mapping needs
pub const DISP_FORMAT_RGB655: u32 = 0x4;
pub const DISP_FORMAT_RGB565: u32 = 0x5;
pub const DISP_FORMAT_RGBA5551: u32 = 0x8;
pub const DISP_FORMAT_ARGB888: u32 = 0x9;
pub const DISP_FORMAT_ARGB8888: u32 = 0xa;
pub const DISP_FORMAT_RGB888: u32 = 0xb;
pub const DISP_FORMAT_ARGB4444: u32 = 0xc;

/// __disp_rect_t
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DispRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// __disp_rectsz_t
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DispRectSize {
    pub width: u32,
    pub height: u32,
}

/// __disp_fb_t
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DispFb {
    pub addr: [u32; 3],
    pub size: DispRectSize,
    pub format: u32,
    pub seq: u32,
    pub mode: u32,
    pub br_swap: u8,
    pub cs_mode: u32,
    pub b_trd_src: u8,
    pub trd_mode: u32,
    pub trd_right_addr: [u32; 3],
    pub pre_multiply: u8,
}

/// __disp_layer_info_t
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DispLayerInfo {
    pub mode: u32,
    pub b_from_screen: u8,
    pub pipe: u8,
    pub prio: u8,
    pub alpha_en: u8,
    pub alpha_val: u16,
    pub ck_enable: u8,
    pub src_win: DispRect,
    pub scn_win: DispRect,
    pub fb: DispFb,
    pub b_trd_out: u8,
    pub out_trd_mode: u32,
    // slack for driver revisions that append fields to the layer struct
    _reserved: [u8; 64],
}

impl Default for DispLayerInfo {
    fn default() -> Self {
        Self {
            mode: DISP_LAYER_WORK_MODE_NORMAL,
            b_from_screen: 0,
            pipe: 0,
            prio: 0,
            alpha_en: 0,
            alpha_val: 0,
            ck_enable: 0,
            src_win: DispRect::default(),
            scn_win: DispRect::default(),
            fb: DispFb::default(),
            b_trd_out: 0,
            out_trd_mode: 0,
            _reserved: [0; 64],
        }
    }
}

/// struct fb_bitfield
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FbBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// struct fb_var_screeninfo
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FbVarScreeninfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: FbBitfield,
    pub green: FbBitfield,
    pub blue: FbBitfield,
    pub transp: FbBitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

/// struct fb_fix_screeninfo
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FbFixScreeninfo {
    pub id: [c_char; 16],
    pub smem_start: c_ulong,
    pub smem_len: u32,
    pub type_: u32,
    pub type_aux: u32,
    pub visual: u32,
    pub xpanstep: u16,
    pub ypanstep: u16,
    pub ywrapstep: u16,
    pub line_length: u32,
    pub mmio_start: c_ulong,
    pub mmio_len: u32,
    pub accel: u32,
    pub capabilities: u16,
    pub reserved: [u16; 2],
}
