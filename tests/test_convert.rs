// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use g2d_convert::{
    accel::{
        loopback::{FailPoint, LoopbackEngine},
        Accelerator, DeviceBuffer,
    },
    ConvertError, Converter,
};
use serial_test::serial;

fn yuyv_frame(width: usize, height: usize) -> Vec<u8> {
    // Arbitrary but deterministic packed 4:2:2 content.
    (0..width * height * 2).map(|i| (i % 251) as u8).collect()
}

#[test]
fn test_convert_produces_destination_frame() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let src = yuyv_frame(640, 480);

    let out = converter
        .convert("YUYV", "RGBA8888", &src, 640, 480)
        .unwrap();
    assert_eq!(out.len(), 640 * 480 * 4);

    let engine = converter.engine();
    assert_eq!(engine.opens(), 1);
    assert_eq!(engine.blits(), 1);
    assert_eq!(engine.closes(), 1);
    assert_eq!(engine.outstanding(), 0, "all device buffers must be freed");
}

#[test]
fn test_convert_is_deterministic() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let src = yuyv_frame(640, 480);

    let first = converter
        .convert("YUYV", "RGBA8888", &src, 640, 480)
        .unwrap();
    let second = converter
        .convert("YUYV", "RGBA8888", &src, 640, 480)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_convert_sizes_420_destination_per_plane() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let src = yuyv_frame(640, 480);

    let out = converter.convert("YUYV", "NV12", &src, 640, 480).unwrap();
    assert_eq!(out.len(), 640 * 480 + 2 * 320 * 240);
}

#[test]
fn test_convert_scaled_uses_destination_dimensions() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let src = yuyv_frame(640, 480);

    let out = converter
        .convert_scaled("YUYV", "RGBA8888", &src, 640, 480, 320, 240)
        .unwrap();
    assert_eq!(out.len(), 320 * 240 * 4);
}

#[test]
fn test_unknown_alias_never_opens_device() {
    let converter = Converter::with_engine(LoopbackEngine::new());

    let err = converter
        .convert("FOO", "RGBA8888", &[0u8; 16], 2, 2)
        .unwrap_err();
    assert!(matches!(err, ConvertError::InvalidFormat(ref alias) if alias.as_str() == "FOO"));

    let err = converter
        .convert("YUYV", "BAR", &[0u8; 16], 2, 2)
        .unwrap_err();
    assert!(matches!(err, ConvertError::InvalidFormat(_)));

    assert_eq!(converter.engine().opens(), 0);
    assert_eq!(converter.engine().allocs(), 0);
}

#[test]
fn test_unsupported_pair_never_allocates() {
    let converter = Converter::with_engine(LoopbackEngine::new());

    let err = converter
        .convert("RGB888", "NV12", &[0u8; 12], 2, 2)
        .unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));
    assert_eq!(converter.engine().opens(), 0);
    assert_eq!(converter.engine().allocs(), 0);
}

#[test]
fn test_destination_without_layout_fails_before_device() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let src = yuyv_frame(640, 480);

    // YUYV -> NV16 is allow-listed, but NV16 has no surface layout rule.
    let err = converter.convert("YUYV", "NV16", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedDestinationFormat(_)));
    assert_eq!(converter.engine().opens(), 0);
}

#[test]
fn test_source_without_layout_releases_everything() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    // NV16 -> YUYV is allow-listed and YUYV sizes fine, so the device is
    // already open with both buffers allocated when the source-side
    // layout lookup fails.
    let src = vec![0u8; 640 * 480 * 2];

    let err = converter.convert("NV16", "YUYV", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSourceFormat(_)));

    let engine = converter.engine();
    assert_eq!(engine.opens(), 1);
    assert_eq!(engine.allocs(), 2);
    assert_eq!(engine.blits(), 0);
    assert_eq!(engine.outstanding(), 0, "buffers must be freed on the error path");
    assert_eq!(engine.closes(), engine.opens());
}

#[test]
fn test_blit_failure_releases_everything() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Blit);
    let src = yuyv_frame(640, 480);

    let err = converter.convert("YUYV", "RGBA8888", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::Blit(_)));

    let engine = converter.engine();
    assert_eq!(engine.outstanding(), 0, "buffers must be freed on the error path");
    assert_eq!(engine.closes(), engine.opens());
}

#[test]
fn test_finish_failure_releases_everything() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Finish);
    let src = yuyv_frame(640, 480);

    let err = converter.convert("YUYV", "RGBA8888", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::Finish(_)));
    assert_eq!(converter.engine().outstanding(), 0);
    assert_eq!(converter.engine().closes(), converter.engine().opens());
}

#[test]
fn test_open_failure_maps_to_device_error() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Open);

    let err = converter
        .convert("YUYV", "RGBA8888", &yuyv_frame(2, 2), 2, 2)
        .unwrap_err();
    assert!(matches!(err, ConvertError::Device(_)));
    assert_eq!(converter.engine().allocs(), 0);
}

#[test]
fn test_alloc_failure_closes_device() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Alloc);

    let err = converter
        .convert("YUYV", "RGBA8888", &yuyv_frame(2, 2), 2, 2)
        .unwrap_err();
    assert!(matches!(err, ConvertError::Device(_)));
    assert_eq!(converter.engine().closes(), converter.engine().opens());
}

#[test]
fn test_free_failure_is_reported_after_conversion() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Free);
    let src = yuyv_frame(640, 480);

    // The blit itself completes; the caller is told releasing leaked.
    let err = converter.convert("YUYV", "RGBA8888", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::Dealloc(_)));
    assert_eq!(converter.engine().blits(), 1);
}

#[test]
fn test_close_failure_is_reported_after_conversion() {
    let converter = Converter::with_engine(LoopbackEngine::new());
    converter.engine().fail_at(FailPoint::Close);
    let src = yuyv_frame(640, 480);

    let err = converter.convert("YUYV", "RGBA8888", &src, 640, 480).unwrap_err();
    assert!(matches!(err, ConvertError::Device(_)));
    assert_eq!(converter.engine().blits(), 1);
    assert_eq!(converter.engine().outstanding(), 0);
}

#[test]
fn test_device_buffer_clamps_oversized_copies() {
    let engine = LoopbackEngine::new();
    let mut buf = engine.alloc(8, false).unwrap();

    // Longer input/output than the region is truncated, not an error.
    buf.write(&[0xAB; 16]);
    let mut out = [0u8; 16];
    buf.read(&mut out);
    assert_eq!(&out[..8], &[0xAB; 8]);
    assert_eq!(&out[8..], &[0u8; 8]);

    engine.free(buf).unwrap();
}

#[test]
#[serial]
#[ignore = "needs G2D hardware (run with --include-ignored on an i.MX8 target)"]
fn test_hardware_convert() {
    let converter = Converter::new().unwrap();
    let src = yuyv_frame(640, 480);

    let out = converter
        .convert("YUYV", "RGBA8888", &src, 640, 480)
        .unwrap();
    assert_eq!(out.len(), 640 * 480 * 4);
}
