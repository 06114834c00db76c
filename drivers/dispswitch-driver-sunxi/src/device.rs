/*
 *  dispswitch sunxi driver - device handles
 *
 *  Thin safe wrappers around ioctl(2) on /dev/disp and /dev/fbN
 */

use std::fs::{File, OpenOptions};
use std::io;
use std::os::raw::c_ulong;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::ffi::*;

/// Four-word argument block used by every sunxi disp request
pub type DispArgs = [c_ulong; 4];

fn open_rw(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open(path)
}

/// Issue one ioctl, mapping a negative return to the errno it left behind.
///
/// # Safety
///
/// `arg` must point to memory the kernel may read and write for `request`.
unsafe fn ioctl_raw(file: &File, request: c_ulong, arg: *mut libc::c_void) -> io::Result<i32> {
    let ret = unsafe { libc::ioctl(file.as_raw_fd(), request as libc::Ioctl, arg) };
    if ret < 0 {
        let err = io::Error::last_os_error();
        #[cfg(feature = "debug-logging")]
        log::debug!("ioctl 0x{:x} failed: {}", request, err);
        return Err(err);
    }
    #[cfg(feature = "debug-logging")]
    log::trace!("ioctl 0x{:x} -> {}", request, ret);
    Ok(ret)
}

/// Open handle on the sunxi display driver control node
#[derive(Debug)]
pub struct DispDevice {
    file: File,
}

impl DispDevice {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self { file: open_rw(path)? })
    }

    /// Issue a request whose arguments are plain integers
    pub fn request(&self, cmd: c_ulong, args: &mut DispArgs) -> io::Result<i32> {
        unsafe { ioctl_raw(&self.file, cmd, args.as_mut_ptr().cast()) }
    }

    /// Request with only the screen index as argument
    pub fn screen_request(&self, cmd: c_ulong, screen: u32) -> io::Result<i32> {
        let mut args: DispArgs = [screen as c_ulong, 0, 0, 0];
        self.request(cmd, &mut args)
    }

    /// Packed driver version, or an error when the driver predates versioning
    pub fn version(&self) -> io::Result<u32> {
        let mut args: DispArgs = [SUNXI_DISP_VERSION as c_ulong, 0, 0, 0];
        self.request(DISP_CMD_VERSION, &mut args).map(|v| v as u32)
    }

    pub fn layer_info(&self, screen: u32, handle: u32) -> io::Result<DispLayerInfo> {
        let mut info = DispLayerInfo::default();
        let mut args: DispArgs = [
            screen as c_ulong,
            handle as c_ulong,
            &mut info as *mut DispLayerInfo as c_ulong,
            0,
        ];
        self.request(DISP_CMD_LAYER_GET_PARA, &mut args)?;
        Ok(info)
    }

    /// Framebuffer bound to a layer (size and pixel format)
    pub fn layer_fb(&self, screen: u32, handle: u32) -> io::Result<DispFb> {
        let mut fb = DispFb::default();
        let mut args: DispArgs = [
            screen as c_ulong,
            handle as c_ulong,
            &mut fb as *mut DispFb as c_ulong,
            0,
        ];
        self.request(DISP_CMD_LAYER_GET_FB, &mut args)?;
        Ok(fb)
    }

    pub fn set_layer_info(&self, screen: u32, handle: u32, info: &DispLayerInfo) -> io::Result<()> {
        let mut copy = *info;
        let mut args: DispArgs = [
            screen as c_ulong,
            handle as c_ulong,
            &mut copy as *mut DispLayerInfo as c_ulong,
            0,
        ];
        self.request(DISP_CMD_LAYER_SET_PARA, &mut args).map(|_| ())
    }
}

/// Open handle on one Linux framebuffer device
#[derive(Debug)]
pub struct FbDevice {
    file: File,
}

impl FbDevice {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self { file: open_rw(path)? })
    }

    pub fn var_screeninfo(&self) -> io::Result<FbVarScreeninfo> {
        let mut info = FbVarScreeninfo::default();
        unsafe {
            ioctl_raw(&self.file, FBIOGET_VSCREENINFO, (&mut info as *mut FbVarScreeninfo).cast())?;
        }
        Ok(info)
    }

    pub fn fix_screeninfo(&self) -> io::Result<FbFixScreeninfo> {
        let mut info = FbFixScreeninfo::default();
        unsafe {
            ioctl_raw(&self.file, FBIOGET_FSCREENINFO, (&mut info as *mut FbFixScreeninfo).cast())?;
        }
        Ok(info)
    }

    /// Layer handle of the screen this framebuffer is attached to
    pub fn layer_handle(&self, screen: u32) -> io::Result<u32> {
        let cmd = if screen == 0 { FBIOGET_LAYER_HDL_0 } else { FBIOGET_LAYER_HDL_1 };
        let mut args: DispArgs = [0; 4];
        unsafe {
            ioctl_raw(&self.file, cmd, args.as_mut_ptr().cast())?;
        }
        Ok(args[0] as u32)
    }
}
