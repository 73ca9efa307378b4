// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Static pixel format catalog.
//!
//! Maps user-facing format aliases (e.g. `"YUYV"`, `"RGBA8888"`) to the
//! native G2D format identifiers and per-format metadata. The catalog is a
//! fixed compile-time table: no registration API exists, so it can be read
//! from any thread without synchronization.

use core::fmt;

/// Logical pixel formats known to the converter.
///
/// Every variant has exactly one [`FormatInfo`] descriptor and one alias in
/// the catalog. Note that being listed here only means the format can be
/// *named*; whether it can participate in a conversion is decided by the
/// compatibility list in [`crate::compat`] and the surface layout rules in
/// [`crate::surface`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Rgb565,
    Rgba8888,
    Rgbx8888,
    Argb8888,
    Xrgb8888,
    Rgb888,
    Rgba5551,
    Rgbx5551,
    Nv12,
    I420,
    Yv12,
    Nv21,
    Yuyv,
    Yvyu,
    Uyvy,
    Vyuy,
    Nv16,
    Nv61,
}

/// Native format identifiers understood by the G2D driver.
///
/// Discriminant values mirror `enum g2d_format` from the NXP `g2d.h`
/// header and are passed through to the hardware unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum G2dFormat {
    Rgb565 = 0,
    Rgba8888 = 1,
    Rgbx8888 = 2,
    Argb8888 = 6,
    Xrgb8888 = 8,
    Rgb888 = 10,
    Rgba5551 = 11,
    Rgbx5551 = 12,
    Nv12 = 20,
    I420 = 21,
    Yv12 = 22,
    Nv21 = 23,
    Yuyv = 24,
    Yvyu = 25,
    Uyvy = 26,
    Vyuy = 27,
    Nv16 = 28,
    Nv61 = 29,
}

/// Catalog entry for a single pixel format.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatInfo {
    /// Canonical alias used on the command line and in diagnostics.
    pub alias: &'static str,
    /// Logical format this entry describes.
    pub format: Format,
    /// Native identifier handed to the blit engine.
    pub g2d: G2dFormat,
    /// Nominal bits per pixel, averaged over the frame for subsampled
    /// formats (12 for 4:2:0, 16 for 4:2:2).
    pub bpp: u32,
}

const FORMATS: [FormatInfo; 18] = [
    FormatInfo { alias: "RGB565", format: Format::Rgb565, g2d: G2dFormat::Rgb565, bpp: 16 },
    FormatInfo { alias: "RGBA8888", format: Format::Rgba8888, g2d: G2dFormat::Rgba8888, bpp: 32 },
    FormatInfo { alias: "RGBX8888", format: Format::Rgbx8888, g2d: G2dFormat::Rgbx8888, bpp: 32 },
    FormatInfo { alias: "ARGB8888", format: Format::Argb8888, g2d: G2dFormat::Argb8888, bpp: 32 },
    FormatInfo { alias: "XRGB8888", format: Format::Xrgb8888, g2d: G2dFormat::Xrgb8888, bpp: 32 },
    FormatInfo { alias: "RGB888", format: Format::Rgb888, g2d: G2dFormat::Rgb888, bpp: 24 },
    FormatInfo { alias: "RGBA5551", format: Format::Rgba5551, g2d: G2dFormat::Rgba5551, bpp: 16 },
    FormatInfo { alias: "RGBX5551", format: Format::Rgbx5551, g2d: G2dFormat::Rgbx5551, bpp: 16 },
    FormatInfo { alias: "NV12", format: Format::Nv12, g2d: G2dFormat::Nv12, bpp: 12 },
    FormatInfo { alias: "I420", format: Format::I420, g2d: G2dFormat::I420, bpp: 12 },
    FormatInfo { alias: "YV12", format: Format::Yv12, g2d: G2dFormat::Yv12, bpp: 12 },
    FormatInfo { alias: "NV21", format: Format::Nv21, g2d: G2dFormat::Nv21, bpp: 12 },
    FormatInfo { alias: "YUYV", format: Format::Yuyv, g2d: G2dFormat::Yuyv, bpp: 16 },
    FormatInfo { alias: "YVYU", format: Format::Yvyu, g2d: G2dFormat::Yvyu, bpp: 16 },
    FormatInfo { alias: "UYVY", format: Format::Uyvy, g2d: G2dFormat::Uyvy, bpp: 16 },
    FormatInfo { alias: "VYUY", format: Format::Vyuy, g2d: G2dFormat::Vyuy, bpp: 16 },
    FormatInfo { alias: "NV16", format: Format::Nv16, g2d: G2dFormat::Nv16, bpp: 16 },
    FormatInfo { alias: "NV61", format: Format::Nv61, g2d: G2dFormat::Nv61, bpp: 16 },
];

impl Format {
    /// Looks up a format by its alias. Matching is exact and
    /// case-sensitive: `"yuyv"` does not resolve.
    pub fn from_alias(alias: &str) -> Option<Format> {
        FORMATS.iter().find(|f| f.alias == alias).map(|f| f.format)
    }

    /// Returns the catalog descriptor for this format. Total by
    /// construction: every variant has exactly one table entry.
    pub fn info(self) -> &'static FormatInfo {
        FORMATS
            .iter()
            .find(|f| f.format == self)
            .unwrap_or_else(|| unreachable!("catalog entry missing for {self:?}"))
    }

    /// Native G2D identifier for this format.
    pub fn g2d(self) -> G2dFormat {
        self.info().g2d
    }

    /// Nominal bits per pixel for this format.
    pub fn bpp(self) -> u32 {
        self.info().bpp
    }
}

/// Iterates over every registered format alias, in table order.
pub fn aliases() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().map(|f| f.alias)
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.info().alias)
    }
}
