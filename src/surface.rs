// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Surface geometry for the blit engine.
//!
//! A [`Surface`] tells the accelerator where every pixel of a frame lives:
//! plane base addresses within one contiguous buffer, the row stride, and
//! the bounding rectangle. Geometry is dispatched over a closed set of
//! format families rather than per-format conditionals, which makes
//! "catalog-known format without a layout rule" (NV16/NV61) a distinct,
//! reportable state instead of silently bad geometry.

use crate::format::{Format, G2dFormat};

/// Rotation selector as understood by the G2D driver.
///
/// Discriminants mirror `enum g2d_rotation` from `g2d.h`. The layout
/// builder always emits [`Rotation::Rotation0`]; the other variants exist
/// to keep the hardware contract complete.
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Rotation {
    Rotation0 = 0,
    Rotation90 = 1,
    Rotation180 = 2,
    Rotation270 = 3,
}

/// Memory-layout family of a pixel format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Family {
    /// Single plane, two bytes per pixel pair element (YUYV and friends).
    PackedYuv422,
    /// Luma plane followed by one interleaved chroma plane (NV12/NV21).
    SemiPlanar420,
    /// Luma plane followed by two quarter-size chroma planes (I420/YV12).
    Planar420,
    /// Single interleaved RGB plane.
    PackedRgb,
}

impl Format {
    /// Layout family of this format, or `None` if the builder has no
    /// geometry rule for it. NV16/NV61 are catalog-known and appear in the
    /// compatibility list, but carry no layout rule.
    pub fn family(self) -> Option<Family> {
        use Format::*;
        match self {
            Yuyv | Yvyu | Uyvy | Vyuy => Some(Family::PackedYuv422),
            Nv12 | Nv21 => Some(Family::SemiPlanar420),
            I420 | Yv12 => Some(Family::Planar420),
            Rgb565 | Rgba8888 | Rgbx8888 | Argb8888 | Xrgb8888 | Rgb888 | Rgba5551 | Rgbx5551 => {
                Some(Family::PackedRgb)
            }
            Nv16 | Nv61 => None,
        }
    }
}

/// Geometric description of one frame buffer, ready for the blit engine.
///
/// Built fresh for every conversion call and never persisted. Plane
/// entries beyond the family's [`Family::plane_count`] are zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub format: G2dFormat,
    /// Absolute device addresses of each plane.
    pub planes: [u64; 3],
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    /// Row stride in the driver's units (pixels for planar/RGB surfaces,
    /// width*2 for packed 4:2:2).
    pub stride: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: Rotation,
}

impl Family {
    /// Number of memory planes a frame in this family occupies.
    pub fn plane_count(self) -> usize {
        match self {
            Family::PackedYuv422 | Family::PackedRgb => 1,
            Family::SemiPlanar420 => 2,
            Family::Planar420 => 3,
        }
    }
}

/// A format the layout builder has no geometry rule for.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("format {0} has no surface layout rule")]
pub struct UnsupportedLayout(pub Format);

/// Builds the surface descriptor for `format` covering a `width` x
/// `height` frame starting at device address `base`.
///
/// The bounding rectangle always starts at the origin and covers the full
/// frame; rotation is always [`Rotation::Rotation0`].
pub fn build_surface(
    format: Format,
    width: u32,
    height: u32,
    base: u64,
) -> Result<Surface, UnsupportedLayout> {
    let family = format.family().ok_or(UnsupportedLayout(format))?;
    let (w, h) = (width as u64, height as u64);

    let (planes, stride) = match family {
        Family::PackedYuv422 => ([base, 0, 0], width * 2),
        Family::SemiPlanar420 => ([base, base + w * h, 0], width),
        Family::Planar420 => ([base, base + w * h, base + w * h + (w * h) / 4], width),
        Family::PackedRgb => ([base, 0, 0], width),
    };

    Ok(Surface {
        format: format.g2d(),
        planes,
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
        stride: stride as i32,
        width: width as i32,
        height: height as i32,
        rotation: Rotation::Rotation0,
    })
}

/// Byte length of a whole `width` x `height` frame in `format`.
///
/// Sized per family: 4:2:0 frames are `w*h + 2*(w/2)*(h/2)` (a truncated
/// average bits-per-pixel would undersize frames with odd dimensions),
/// 4:2:2 frames are `w*h*2`, packed RGB frames are `w*h` times the whole
/// bytes per pixel.
pub fn frame_size(format: Format, width: u32, height: u32) -> Result<usize, UnsupportedLayout> {
    let family = format.family().ok_or(UnsupportedLayout(format))?;
    let (w, h) = (width as usize, height as usize);

    Ok(match family {
        Family::PackedYuv422 => w * h * 2,
        Family::SemiPlanar420 | Family::Planar420 => w * h + 2 * (w / 2) * (h / 2),
        Family::PackedRgb => w * h * (format.bpp() as usize / 8),
    })
}
