// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Blit accelerator capability contract.
//!
//! The conversion orchestrator never talks to hardware directly; it drives
//! an [`Accelerator`] implementation through the same seven operations the
//! G2D driver exposes (open, alloc, blit, finish, flush, free, close).
//! [`g2d::G2dEngine`] binds the contract to `libg2d.so.2`;
//! [`loopback::LoopbackEngine`] is a deterministic in-memory stand-in used
//! by the test suite and for bring-up on machines without the hardware.

use crate::surface::Surface;

pub mod g2d;
pub mod loopback;

/// Failure reported by an accelerator backend. The orchestrator attributes
/// the failing stage; the backend only supplies the cause.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct AccelError(String);

impl AccelError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<std::io::Error> for AccelError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// Device-visible memory region.
///
/// A buffer stays valid until it is handed back to its engine through
/// [`Accelerator::free`]; dropping one without freeing it leaks the
/// underlying device allocation.
pub trait DeviceBuffer {
    /// Device (physical) address of the start of the region, used for
    /// surface plane addresses.
    fn phys(&self) -> u64;

    /// Length of the region in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies `data` into the start of the region. Input longer than the
    /// region is truncated to the region length.
    fn write(&mut self, data: &[u8]);

    /// Copies the start of the region into `out`. Output longer than the
    /// region is truncated to the region length.
    fn read(&self, out: &mut [u8]);
}

/// One blit accelerator backend.
///
/// A handle represents an open device session. Handles and buffers are not
/// shared between concurrent conversions; every call acquires and releases
/// its own.
pub trait Accelerator {
    type Handle;
    type Buffer: DeviceBuffer;

    /// Opens a device session.
    fn open(&self) -> Result<Self::Handle, AccelError>;

    /// Allocates a device-visible region of `len` bytes. `cacheable`
    /// selects CPU-cacheable backing; the converter always allocates
    /// non-cacheable regions.
    fn alloc(&self, len: usize, cacheable: bool) -> Result<Self::Buffer, AccelError>;

    /// Queues a copy/convert of `src` into `dest`.
    fn blit(&self, handle: &mut Self::Handle, src: &Surface, dest: &Surface)
        -> Result<(), AccelError>;

    /// Blocks until all queued operations on `handle` have completed.
    fn finish(&self, handle: &mut Self::Handle) -> Result<(), AccelError>;

    /// Submits any remaining queued work without waiting. The driver
    /// reports no failure for this operation.
    fn flush(&self, handle: &mut Self::Handle);

    /// Releases a device buffer.
    fn free(&self, buf: Self::Buffer) -> Result<(), AccelError>;

    /// Closes a device session.
    fn close(&self, handle: Self::Handle) -> Result<(), AccelError>;
}
