// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # G2D Pixel Format Conversion
//!
//! This library converts raw still-image pixel buffers between packed and
//! planar YUV and packed RGB formats by describing each buffer's memory
//! layout to the NXP i.MX G2D blit engine and delegating the copy/convert
//! to the hardware. The interesting work is the knowledge layer in front
//! of the single accelerated call:
//!
//! - **[`format`]**: static catalog mapping format aliases to native G2D
//!   identifiers and pixel densities.
//! - **[`compat`]**: allow-list of the source/destination pairs the engine
//!   actually implements.
//! - **[`surface`]**: per-family geometry rules computing plane addresses,
//!   stride, and bounds for a frame in one contiguous buffer.
//! - **[`convert`]**: the orchestrator validating a request, sizing the
//!   destination, and driving one blit through an [`accel::Accelerator`]
//!   backend with strict acquire/release discipline.
//!
//! ## Example
//!
//! ```no_run
//! use g2d_convert::Converter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Converter::new()?;
//! let yuyv = std::fs::read("frame.yuyv")?;
//! let rgba = converter.convert("YUYV", "RGBA8888", &yuyv, 640, 480)?;
//! assert_eq!(rgba.len(), 640 * 480 * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Requirements
//!
//! The default backend needs `libg2d.so.2` and G2D-capable hardware (NXP
//! i.MX8 family). The [`accel::loopback`] engine runs anywhere and is what
//! the test suite uses.

pub mod accel;
pub mod compat;
pub mod convert;
pub mod format;
pub mod surface;

pub use convert::{ConvertError, Converter};
pub use format::{Format, FormatInfo};
pub use surface::{build_surface, frame_size, Surface};
