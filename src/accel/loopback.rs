// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Deterministic in-memory accelerator.
//!
//! Stands in for the G2D hardware in tests and on development machines.
//! Buffers are plain heap allocations registered at fake physical
//! addresses; `blit` copies bytes from the source region to the
//! destination region without any pixel interpretation, so a given input
//! always yields the same output. The engine counts device operations and
//! tracks outstanding buffers, which lets tests assert that failed
//! conversions touch the device exactly as much as they should and release
//! everything they acquired. Individual operations can be made to fail on
//! demand for error-path coverage.

use super::{AccelError, Accelerator, DeviceBuffer};
use crate::surface::Surface;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

/// Operation the engine should fail on, for error-path tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailPoint {
    Open,
    Alloc,
    Blit,
    Finish,
    Free,
    Close,
}

pub struct LoopbackHandle;

pub struct LoopbackBuffer {
    addr: u64,
    data: Arc<Mutex<Vec<u8>>>,
}

impl DeviceBuffer for LoopbackBuffer {
    fn phys(&self) -> u64 {
        self.addr
    }

    fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    fn write(&mut self, data: &[u8]) {
        let mut mem = self.data.lock().unwrap();
        let n = data.len().min(mem.len());
        mem[..n].copy_from_slice(&data[..n]);
    }

    fn read(&self, out: &mut [u8]) {
        let mem = self.data.lock().unwrap();
        let n = out.len().min(mem.len());
        out[..n].copy_from_slice(&mem[..n]);
    }
}

/// In-memory [`Accelerator`] with deterministic copy-only blits.
#[derive(Default)]
pub struct LoopbackEngine {
    memory: Mutex<BTreeMap<u64, Arc<Mutex<Vec<u8>>>>>,
    next_addr: AtomicU64,
    opens: AtomicUsize,
    closes: AtomicUsize,
    allocs: AtomicUsize,
    blits: AtomicUsize,
    fail: Mutex<Option<FailPoint>>,
}

impl LoopbackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `point` operation fail until cleared with
    /// [`LoopbackEngine::clear_failure`].
    pub fn fail_at(&self, point: FailPoint) {
        *self.fail.lock().unwrap() = Some(point);
    }

    pub fn clear_failure(&self) {
        *self.fail.lock().unwrap() = None;
    }

    /// Device sessions opened so far.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    /// Device sessions closed so far.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::Relaxed)
    }

    /// Buffer allocations performed so far.
    pub fn allocs(&self) -> usize {
        self.allocs.load(Ordering::Relaxed)
    }

    /// Blits performed so far.
    pub fn blits(&self) -> usize {
        self.blits.load(Ordering::Relaxed)
    }

    /// Buffers allocated but not yet freed.
    pub fn outstanding(&self) -> usize {
        self.memory.lock().unwrap().len()
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        *self.fail.lock().unwrap() == Some(point)
    }

    /// Region covering `addr`, as (base address, backing storage).
    fn region(&self, addr: u64) -> Option<(u64, Arc<Mutex<Vec<u8>>>)> {
        let memory = self.memory.lock().unwrap();
        let (&base, data) = memory.range(..=addr).next_back()?;
        if addr < base + data.lock().unwrap().len() as u64 {
            Some((base, Arc::clone(data)))
        } else {
            None
        }
    }
}

impl Accelerator for LoopbackEngine {
    type Handle = LoopbackHandle;
    type Buffer = LoopbackBuffer;

    fn open(&self) -> Result<LoopbackHandle, AccelError> {
        if self.should_fail(FailPoint::Open) {
            return Err(AccelError::new("injected open failure"));
        }
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(LoopbackHandle)
    }

    fn alloc(&self, len: usize, _cacheable: bool) -> Result<LoopbackBuffer, AccelError> {
        if self.should_fail(FailPoint::Alloc) {
            return Err(AccelError::new("injected alloc failure"));
        }
        // Fake physical addresses are page-aligned and never reused.
        let span = (len.max(1) as u64).next_multiple_of(4096);
        let addr = self.next_addr.fetch_add(span, Ordering::Relaxed) + 0x1000;
        let data = Arc::new(Mutex::new(vec![0u8; len]));
        self.memory.lock().unwrap().insert(addr, Arc::clone(&data));
        self.allocs.fetch_add(1, Ordering::Relaxed);
        Ok(LoopbackBuffer { addr, data })
    }

    fn blit(
        &self,
        _handle: &mut LoopbackHandle,
        src: &Surface,
        dest: &Surface,
    ) -> Result<(), AccelError> {
        if self.should_fail(FailPoint::Blit) {
            return Err(AccelError::new("injected blit failure"));
        }
        let (src_base, src_data) = self
            .region(src.planes[0])
            .ok_or_else(|| AccelError::new("source surface points outside device memory"))?;
        let (dest_base, dest_data) = self
            .region(dest.planes[0])
            .ok_or_else(|| AccelError::new("destination surface points outside device memory"))?;

        if Arc::ptr_eq(&src_data, &dest_data) {
            return Err(AccelError::new("overlapping blit regions"));
        }

        let src_off = (src.planes[0] - src_base) as usize;
        let dest_off = (dest.planes[0] - dest_base) as usize;
        let src_mem = src_data.lock().unwrap();
        let mut dest_mem = dest_data.lock().unwrap();
        let n = (src_mem.len() - src_off).min(dest_mem.len() - dest_off);
        dest_mem[dest_off..dest_off + n].copy_from_slice(&src_mem[src_off..src_off + n]);
        self.blits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finish(&self, _handle: &mut LoopbackHandle) -> Result<(), AccelError> {
        if self.should_fail(FailPoint::Finish) {
            return Err(AccelError::new("injected finish failure"));
        }
        Ok(())
    }

    fn flush(&self, _handle: &mut LoopbackHandle) {}

    fn free(&self, buf: LoopbackBuffer) -> Result<(), AccelError> {
        if self.should_fail(FailPoint::Free) {
            return Err(AccelError::new("injected free failure"));
        }
        self.memory.lock().unwrap().remove(&buf.addr);
        Ok(())
    }

    fn close(&self, _handle: LoopbackHandle) -> Result<(), AccelError> {
        if self.should_fail(FailPoint::Close) {
            return Err(AccelError::new("injected close failure"));
        }
        self.closes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
