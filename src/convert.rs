// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Conversion orchestration.
//!
//! [`Converter`] ties the catalog, the compatibility list, and the surface
//! builder together and drives one [`Accelerator`] blit per conversion.
//! Each call opens its own device session and releases everything it
//! acquired on every exit path; nothing is shared between calls, so a
//! `Converter` can be used from multiple threads by giving each thread its
//! own instance.

use crate::{
    accel::{g2d::G2dEngine, AccelError, Accelerator, DeviceBuffer},
    compat,
    format::Format,
    surface::{build_surface, frame_size, Surface},
};
use tracing::{debug, warn};

/// Failure modes of a conversion, one variant per failing stage.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Alias not present in the format catalog.
    #[error("unknown pixel format \"{0}\"")]
    InvalidFormat(String),

    /// Format pair absent from the compatibility allow-list.
    #[error("conversion from {src} to {dest} is not supported")]
    UnsupportedConversion { src: Format, dest: Format },

    /// Source format is catalog-known but has no surface layout rule.
    #[error("source format {0} cannot be described as a blit surface")]
    UnsupportedSourceFormat(Format),

    /// Destination format is catalog-known but has no surface layout rule.
    #[error("destination format {0} cannot be described as a blit surface")]
    UnsupportedDestinationFormat(Format),

    /// Device open, buffer allocation, or device close failed.
    #[error("blit device failure: {0}")]
    Device(AccelError),

    /// The blit operation itself failed.
    #[error("blit operation failed: {0}")]
    Blit(AccelError),

    /// Post-blit synchronization failed.
    #[error("blit completion failed: {0}")]
    Finish(AccelError),

    /// Releasing device buffers failed. When returned after an otherwise
    /// complete conversion this is a resource-leak warning, not a
    /// correctness failure: the destination bytes were already produced.
    #[error("device buffer release failed: {0}")]
    Dealloc(AccelError),
}

/// Open device session plus every buffer acquired through it.
///
/// Releasing is explicit on the happy path (so failures are reported) and
/// best-effort on drop, which covers early-return error paths after
/// partial acquisition.
struct Session<'a, A: Accelerator> {
    engine: &'a A,
    handle: Option<A::Handle>,
    buffers: Vec<A::Buffer>,
}

impl<'a, A: Accelerator> Session<'a, A> {
    fn open(engine: &'a A) -> Result<Self, ConvertError> {
        let handle = engine.open().map_err(ConvertError::Device)?;
        Ok(Self {
            engine,
            handle: Some(handle),
            buffers: Vec::with_capacity(2),
        })
    }

    fn handle_mut(&mut self) -> &mut A::Handle {
        match self.handle.as_mut() {
            Some(handle) => handle,
            None => unreachable!("session used after release"),
        }
    }

    /// Allocates a non-cacheable device buffer, returning its index.
    fn alloc(&mut self, len: usize) -> Result<usize, ConvertError> {
        let buf = self.engine.alloc(len, false).map_err(ConvertError::Device)?;
        self.buffers.push(buf);
        Ok(self.buffers.len() - 1)
    }

    fn buffer(&self, idx: usize) -> &A::Buffer {
        &self.buffers[idx]
    }

    fn buffer_mut(&mut self, idx: usize) -> &mut A::Buffer {
        &mut self.buffers[idx]
    }

    fn blit(&mut self, src: &Surface, dest: &Surface) -> Result<(), ConvertError> {
        let engine = self.engine;
        engine
            .blit(self.handle_mut(), src, dest)
            .map_err(ConvertError::Blit)
    }

    fn finish(&mut self) -> Result<(), ConvertError> {
        let engine = self.engine;
        engine.finish(self.handle_mut()).map_err(ConvertError::Finish)
    }

    fn flush(&mut self) {
        let engine = self.engine;
        engine.flush(self.handle_mut());
    }

    /// Frees every buffer and closes the handle, attempting all releases
    /// even if an earlier one fails. The first failure is reported.
    fn release(mut self) -> Result<(), ConvertError> {
        let mut first_err = None;
        for buf in self.buffers.drain(..) {
            if let Err(e) = self.engine.free(buf) {
                warn!("device buffer release failed: {e}");
                first_err.get_or_insert(ConvertError::Dealloc(e));
            }
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.engine.close(handle) {
                warn!("device close failed: {e}");
                first_err.get_or_insert(ConvertError::Device(e));
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<A: Accelerator> Drop for Session<'_, A> {
    fn drop(&mut self) {
        for buf in self.buffers.drain(..) {
            let _ = self.engine.free(buf);
        }
        if let Some(handle) = self.handle.take() {
            let _ = self.engine.close(handle);
        }
    }
}

/// Pixel format converter over one accelerator backend.
pub struct Converter<A: Accelerator> {
    engine: A,
}

impl Converter<G2dEngine> {
    /// Converter backed by the G2D hardware.
    pub fn new() -> Result<Self, ConvertError> {
        Ok(Self::with_engine(G2dEngine::new().map_err(ConvertError::Device)?))
    }
}

impl<A: Accelerator> Converter<A> {
    /// Converter backed by an explicit engine, e.g. the loopback engine in
    /// tests.
    pub fn with_engine(engine: A) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &A {
        &self.engine
    }

    /// Converts a whole frame between formats at unchanged dimensions.
    ///
    /// `src` must hold exactly one `width` x `height` frame in the source
    /// format; see [`crate::surface::frame_size`] for the expected length.
    pub fn convert(
        &self,
        src_format: &str,
        dest_format: &str,
        src: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ConvertError> {
        self.convert_scaled(src_format, dest_format, src, width, height, width, height)
    }

    /// Converts a whole frame, letting the accelerator scale it to
    /// `dest_width` x `dest_height` on the way.
    ///
    /// Format aliases are resolved case-sensitively against the catalog.
    /// No device work happens until both formats resolve, the pair is in
    /// the compatibility list, and the destination has a layout rule. On
    /// success the returned buffer holds exactly one destination frame.
    pub fn convert_scaled(
        &self,
        src_format: &str,
        dest_format: &str,
        src: &[u8],
        width: u32,
        height: u32,
        dest_width: u32,
        dest_height: u32,
    ) -> Result<Vec<u8>, ConvertError> {
        let src_fmt = Format::from_alias(src_format)
            .ok_or_else(|| ConvertError::InvalidFormat(src_format.to_owned()))?;
        let dest_fmt = Format::from_alias(dest_format)
            .ok_or_else(|| ConvertError::InvalidFormat(dest_format.to_owned()))?;

        if !compat::is_supported(src_fmt, dest_fmt) {
            return Err(ConvertError::UnsupportedConversion {
                src: src_fmt,
                dest: dest_fmt,
            });
        }

        let dest_len = frame_size(dest_fmt, dest_width, dest_height)
            .map_err(|e| ConvertError::UnsupportedDestinationFormat(e.0))?;

        debug!(
            "convert {src_fmt} {width}x{height} ({} bytes) -> {dest_fmt} \
             {dest_width}x{dest_height} ({dest_len} bytes)",
            src.len()
        );

        let mut session = Session::open(&self.engine)?;
        let src_buf = session.alloc(src.len())?;
        let dest_buf = session.alloc(dest_len)?;
        session.buffer_mut(src_buf).write(src);

        let src_surface = build_surface(src_fmt, width, height, session.buffer(src_buf).phys())
            .map_err(|e| ConvertError::UnsupportedSourceFormat(e.0))?;
        let dest_surface = build_surface(
            dest_fmt,
            dest_width,
            dest_height,
            session.buffer(dest_buf).phys(),
        )
        .map_err(|e| ConvertError::UnsupportedDestinationFormat(e.0))?;

        session.blit(&src_surface, &dest_surface)?;
        session.finish()?;
        session.flush();

        let mut out = vec![0u8; dest_len];
        session.buffer(dest_buf).read(&mut out);

        // A release failure after this point means the conversion itself
        // succeeded but device resources may have leaked.
        session.release()?;
        Ok(out)
    }
}
