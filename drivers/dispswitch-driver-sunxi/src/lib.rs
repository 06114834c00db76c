/*
 *  dispswitch sunxi driver
 *
 *  Raw bindings for the Allwinner A10/A13/A20 "disp" kernel driver and
 *  the Linux framebuffer devices it backs.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

//! # dispswitch sunxi driver bindings
//!
//! Request codes and `#[repr(C)]` structures for `/dev/disp` and `/dev/fbN`,
//! plus [`DispDevice`] and [`FbDevice`], which own the file handles and issue
//! the ioctls. Everything above this crate works with typed values; nothing
//! here interprets results beyond mapping negative returns to `io::Error`.
//!
//! ## Hardware Support
//!
//! - sunxi-3.4 style display driver, interface version 1.0 or later
//! - two screens, each with its own framebuffer device

pub mod ffi;
mod device;

pub use device::{DispArgs, DispDevice, FbDevice};
