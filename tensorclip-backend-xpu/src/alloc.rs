//! Device memory accounting.
//!
//! Every device buffer is charged against the allocator of its device and
//! released when the returned [`MemoryLease`] is dropped.

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};

use crate::error::XpuBackendError;

#[derive(Debug, Default)]
struct AllocState {
    in_use: usize,
    peak: usize,
    live: usize,
}

#[derive(Debug)]
pub struct XpuAllocator {
    device_id: u32,
    limit: Option<usize>,
    state: Arc<Mutex<AllocState>>,
}

/// Ownership of `size_bytes` of device memory. Dropping it returns the bytes.
#[derive(Debug)]
pub struct MemoryLease {
    size_bytes: usize,
    device_id: u32,
    state: Arc<Mutex<AllocState>>,
}

impl MemoryLease {
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }
}

impl Drop for MemoryLease {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_use = state.in_use.saturating_sub(self.size_bytes);
        state.live = state.live.saturating_sub(1);
    }
}

impl XpuAllocator {
    pub fn new(device_id: u32, limit: Option<usize>) -> Self {
        Self {
            device_id,
            limit,
            state: Arc::new(Mutex::new(AllocState::default())),
        }
    }

    /// Reserves `size_bytes` on the device.
    ///
    /// # Errors
    /// Returns `XpuBackendError::OutOfMemory` if the reservation would exceed the
    /// configured limit. Nothing is reserved in that case.
    pub fn alloc(&self, size_bytes: usize) -> Result<MemoryLease, XpuBackendError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(limit) = self.limit {
            let fits = state
                .in_use
                .checked_add(size_bytes)
                .is_some_and(|total| total <= limit);
            if !fits {
                warn!(
                    "XPU device {}: allocation of {} bytes refused ({} in use, limit {})",
                    self.device_id, size_bytes, state.in_use, limit
                );
                return Err(XpuBackendError::OutOfMemory {
                    device_id: self.device_id,
                    requested: size_bytes,
                    in_use: state.in_use,
                    limit,
                });
            }
        }
        state.in_use += size_bytes;
        state.live += 1;
        state.peak = state.peak.max(state.in_use);
        debug!(
            "XPU device {}: allocated {} bytes ({} in use)",
            self.device_id, size_bytes, state.in_use
        );
        Ok(MemoryLease {
            size_bytes,
            device_id: self.device_id,
            state: Arc::clone(&self.state),
        })
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Bytes currently held by live leases.
    pub fn in_use(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).in_use
    }

    /// Highest value `in_use` has reached.
    pub fn peak(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).peak
    }

    pub fn live_allocations(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).live
    }
}
