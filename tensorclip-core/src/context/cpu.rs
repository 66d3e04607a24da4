use log::warn;

use super::{byte_size, Allocation, DeviceContext};
use crate::buffer::Buffer;
use crate::device::Backend;
use crate::error::ClipError;
use crate::types::DType;

/// Host context. Allocations come from the global allocator.
#[derive(Debug, Clone, Default)]
pub struct CpuContext {
    max_allocation_bytes: Option<usize>,
}

impl CpuContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses any single allocation larger than `bytes`.
    pub fn with_memory_limit(bytes: usize) -> Self {
        CpuContext {
            max_allocation_bytes: Some(bytes),
        }
    }
}

impl DeviceContext for CpuContext {
    fn backend(&self) -> Backend {
        Backend::Cpu
    }

    fn allocate(&self, dtype: DType, numel: usize) -> Result<Allocation, ClipError> {
        let requested_bytes = byte_size(dtype, numel, Backend::Cpu)?;
        if let Some(limit) = self.max_allocation_bytes {
            if requested_bytes > limit {
                warn!(
                    "CPU allocation of {} bytes refused (limit {})",
                    requested_bytes, limit
                );
                return Err(ClipError::AllocationFailed {
                    backend: Backend::Cpu,
                    requested_bytes,
                    reason: format!("exceeds the {} byte limit", limit),
                });
            }
        }
        let buffer = Buffer::try_zeroed(dtype, numel).map_err(|e| ClipError::AllocationFailed {
            backend: Backend::Cpu,
            requested_bytes,
            reason: e.to_string(),
        })?;
        Ok(Allocation {
            buffer,
            lease: None,
        })
    }
}
