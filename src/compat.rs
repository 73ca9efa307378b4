// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Conversion compatibility allow-list.
//!
//! The G2D blit engine only implements a subset of the source/destination
//! format combinations one could name with the catalog. This module is the
//! sole authority on which pairs are usable: membership is an exact match
//! against an enumerated table, anything absent is rejected. The relation
//! is deliberately asymmetric — RGB888 is reachable as a destination of
//! YUYV but is never accepted as a source — and identity pairs are not
//! implicitly present.

use crate::format::Format::{self, *};

/// Source/destination pairs the blit engine supports.
const SUPPORTED: &[(Format, Format)] = &[
    // YUV -> YUV
    (Nv12, Yuyv),
    (I420, Yuyv),
    (Yv12, Yuyv),
    (Nv21, Yuyv),
    (Yuyv, Nv12),
    (Yuyv, Nv21),
    (Yuyv, Nv16),
    (Yuyv, Nv61),
    (Yvyu, Yuyv),
    (Uyvy, Yuyv),
    (Vyuy, Yuyv),
    (Nv16, Yuyv),
    (Nv61, Yuyv),
    // RGB -> YUV
    (Rgba8888, Yuyv),
    (Rgbx8888, Yuyv),
    (Argb8888, Yuyv),
    (Xrgb8888, Yuyv),
    (Rgba5551, Yuyv),
    (Rgbx5551, Yuyv),
    // YUV -> RGB
    (Nv12, Rgb565),
    (Nv12, Rgba8888),
    (Nv12, Rgbx8888),
    (Nv12, Argb8888),
    (Nv12, Xrgb8888),
    (Nv12, Rgba5551),
    (Nv12, Rgbx5551),
    (I420, Rgb565),
    (I420, Rgba8888),
    (I420, Rgbx8888),
    (I420, Argb8888),
    (I420, Xrgb8888),
    (I420, Rgba5551),
    (I420, Rgbx5551),
    (Yv12, Rgb565),
    (Yv12, Rgba8888),
    (Yv12, Rgbx8888),
    (Yv12, Argb8888),
    (Yv12, Xrgb8888),
    (Yv12, Rgba5551),
    (Yv12, Rgbx5551),
    (Nv21, Rgb565),
    (Nv21, Rgba8888),
    (Nv21, Rgbx8888),
    (Nv21, Argb8888),
    (Nv21, Xrgb8888),
    (Nv21, Rgba5551),
    (Nv21, Rgbx5551),
    (Yuyv, Rgb565),
    (Yuyv, Rgba8888),
    (Yuyv, Rgbx8888),
    (Yuyv, Argb8888),
    (Yuyv, Xrgb8888),
    (Yuyv, Rgba5551),
    (Yuyv, Rgbx5551),
    (Yuyv, Rgb888),
    (Yvyu, Rgb565),
    (Yvyu, Rgba8888),
    (Yvyu, Rgbx8888),
    (Yvyu, Argb8888),
    (Yvyu, Xrgb8888),
    (Yvyu, Rgba5551),
    (Yvyu, Rgbx5551),
    (Uyvy, Rgb565),
    (Uyvy, Rgba8888),
    (Uyvy, Rgbx8888),
    (Uyvy, Argb8888),
    (Uyvy, Xrgb8888),
    (Uyvy, Rgba5551),
    (Uyvy, Rgbx5551),
    (Vyuy, Rgb565),
    (Vyuy, Rgba8888),
    (Vyuy, Rgbx8888),
    (Vyuy, Argb8888),
    (Vyuy, Xrgb8888),
    (Vyuy, Rgba5551),
    (Vyuy, Rgbx5551),
];

/// Returns true if the blit engine can convert `src` into `dest`.
///
/// Fails closed: a pair that is not explicitly enumerated is unsupported,
/// including `src == dest`.
pub fn is_supported(src: Format, dest: Format) -> bool {
    SUPPORTED.contains(&(src, dest))
}
