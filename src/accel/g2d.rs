// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! G2D hardware backend.
//!
//! Binds the [`Accelerator`] contract to the NXP G2D driver by loading
//! `libg2d.so.2` at runtime. The `g2d_buf` and `g2d_surface` structs
//! mirror the `g2d.h` declarations; addresses handed to the driver are the
//! physical addresses of driver-allocated contiguous buffers.

use super::{AccelError, Accelerator, DeviceBuffer};
use crate::surface::Surface;
use libc::{c_int, c_void};
use libloading::{Library, Symbol};
use std::{
    io,
    ptr::{copy_nonoverlapping, null_mut},
};
use tracing::{debug, warn};

/// Contiguous driver allocation, mirror of `struct g2d_buf`.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct g2d_buf {
    pub buf_handle: *mut c_void,
    pub buf_vaddr: *mut c_void,
    pub buf_paddr: c_int,
    pub buf_size: c_int,
}

/// Blit source/destination description, mirror of `struct g2d_surface`.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct g2d_surface {
    pub format: c_int,
    pub planes: [c_int; 3],
    pub left: c_int,
    pub top: c_int,
    pub right: c_int,
    pub bottom: c_int,
    pub stride: c_int,
    pub width: c_int,
    pub height: c_int,
    pub blendfunc: c_int,
    pub global_alpha: c_int,
    pub clrcolor: c_int,
    pub rot: c_int,
}

impl From<&Surface> for g2d_surface {
    fn from(s: &Surface) -> Self {
        Self {
            format: s.format as c_int,
            planes: [
                s.planes[0] as c_int,
                s.planes[1] as c_int,
                s.planes[2] as c_int,
            ],
            left: s.left,
            top: s.top,
            right: s.right,
            bottom: s.bottom,
            stride: s.stride,
            width: s.width,
            height: s.height,
            blendfunc: 0,
            global_alpha: 0,
            clrcolor: 0,
            rot: s.rotation as c_int,
        }
    }
}

type OpenFn = unsafe extern "C" fn(*mut *mut c_void) -> c_int;
type CloseFn = unsafe extern "C" fn(*mut c_void) -> c_int;
type AllocFn = unsafe extern "C" fn(c_int, c_int) -> *mut g2d_buf;
type FreeFn = unsafe extern "C" fn(*mut g2d_buf) -> c_int;
type BlitFn = unsafe extern "C" fn(*mut c_void, *mut g2d_surface, *mut g2d_surface) -> c_int;
type FinishFn = unsafe extern "C" fn(*mut c_void) -> c_int;
type FlushFn = unsafe extern "C" fn(*mut c_void) -> c_int;

/// Open G2D device session (usually `/dev/galcore` underneath).
pub struct G2dHandle(*mut c_void);

/// Driver-allocated device buffer.
pub struct G2dBuffer {
    raw: *mut g2d_buf,
}

impl DeviceBuffer for G2dBuffer {
    fn phys(&self) -> u64 {
        unsafe { (*self.raw).buf_paddr as u32 as u64 }
    }

    fn len(&self) -> usize {
        unsafe { (*self.raw).buf_size as usize }
    }

    fn write(&mut self, data: &[u8]) {
        let n = data.len().min(self.len());
        unsafe { copy_nonoverlapping(data.as_ptr(), (*self.raw).buf_vaddr.cast::<u8>(), n) };
    }

    fn read(&self, out: &mut [u8]) {
        let n = out.len().min(self.len());
        unsafe { copy_nonoverlapping((*self.raw).buf_vaddr.cast::<u8>(), out.as_mut_ptr(), n) };
    }
}

/// Accelerator backend driving the G2D hardware through `libg2d.so.2`.
pub struct G2dEngine {
    lib: Library,
}

impl G2dEngine {
    pub const LIBRARY: &'static str = "libg2d.so.2";

    /// Loads the G2D library. Fails if the shared object is absent or
    /// unlinkable; the device itself is not opened until a conversion
    /// runs.
    pub fn new() -> Result<Self, AccelError> {
        let lib = unsafe { Library::new(Self::LIBRARY) }
            .map_err(|e| AccelError::new(format!("failed to load {}: {e}", Self::LIBRARY)))?;
        debug!("loaded {}", Self::LIBRARY);
        Ok(Self { lib })
    }

    fn sym<T>(&self, name: &'static str) -> Result<Symbol<'_, T>, AccelError> {
        unsafe { self.lib.get(name.as_bytes()) }
            .map_err(|e| AccelError::new(format!("missing symbol {name}: {e}")))
    }
}

impl Accelerator for G2dEngine {
    type Handle = G2dHandle;
    type Buffer = G2dBuffer;

    fn open(&self) -> Result<G2dHandle, AccelError> {
        let open: Symbol<OpenFn> = self.sym("g2d_open")?;
        let mut handle: *mut c_void = null_mut();
        if unsafe { open(&mut handle) } < 0 {
            return Err(io::Error::last_os_error().into());
        }
        debug!("g2d device opened");
        Ok(G2dHandle(handle))
    }

    fn alloc(&self, len: usize, cacheable: bool) -> Result<G2dBuffer, AccelError> {
        let alloc: Symbol<AllocFn> = self.sym("g2d_alloc")?;
        let raw = unsafe { alloc(len as c_int, cacheable as c_int) };
        if raw.is_null() {
            return Err(AccelError::new(format!("g2d_alloc of {len} bytes failed")));
        }
        debug!(len, "g2d buffer allocated");
        Ok(G2dBuffer { raw })
    }

    fn blit(
        &self,
        handle: &mut G2dHandle,
        src: &Surface,
        dest: &Surface,
    ) -> Result<(), AccelError> {
        let blit: Symbol<BlitFn> = self.sym("g2d_blit")?;
        let mut src: g2d_surface = src.into();
        let mut dest: g2d_surface = dest.into();
        if unsafe { blit(handle.0, &mut src, &mut dest) } < 0 {
            return Err(AccelError::new("g2d_blit failed"));
        }
        Ok(())
    }

    fn finish(&self, handle: &mut G2dHandle) -> Result<(), AccelError> {
        let finish: Symbol<FinishFn> = self.sym("g2d_finish")?;
        if unsafe { finish(handle.0) } < 0 {
            return Err(AccelError::new("g2d_finish failed"));
        }
        Ok(())
    }

    fn flush(&self, handle: &mut G2dHandle) {
        // The driver reports no usable failure for a flush.
        match self.sym::<FlushFn>("g2d_flush") {
            Ok(flush) => {
                let _ = unsafe { flush(handle.0) };
            }
            Err(e) => warn!("g2d_flush unavailable: {e}"),
        }
    }

    fn free(&self, buf: G2dBuffer) -> Result<(), AccelError> {
        let free: Symbol<FreeFn> = self.sym("g2d_free")?;
        if unsafe { free(buf.raw) } < 0 {
            return Err(AccelError::new("g2d_free failed"));
        }
        debug!("g2d buffer freed");
        Ok(())
    }

    fn close(&self, handle: G2dHandle) -> Result<(), AccelError> {
        let close: Symbol<CloseFn> = self.sym("g2d_close")?;
        if unsafe { close(handle.0) } < 0 {
            return Err(io::Error::last_os_error().into());
        }
        debug!("g2d device closed");
        Ok(())
    }
}
