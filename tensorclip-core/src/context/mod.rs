//! Device contexts: where kernels get their output storage and, on the XPU,
//! the vendor handle their primitives run on.

use std::fmt;

use tensorclip_backend_xpu::{MemoryLease, XContext};

use crate::buffer::Buffer;
use crate::device::Backend;
use crate::error::ClipError;
use crate::ops::traits::Element;
use crate::tensor::{checked_numel, DenseTensor};
use crate::types::DType;

pub mod cpu;
pub mod xpu;

pub use cpu::CpuContext;
pub use xpu::XpuDeviceContext;

/// Storage handed out by [`DeviceContext::allocate`].
#[derive(Debug)]
pub struct Allocation {
    pub(crate) buffer: Buffer,
    pub(crate) lease: Option<MemoryLease>,
}

/// Execution environment a kernel runs in.
pub trait DeviceContext: fmt::Debug + Send + Sync {
    fn backend(&self) -> Backend;

    /// Allocates zero-initialized storage for `numel` elements of `dtype`.
    ///
    /// # Errors
    /// `ClipError::AllocationFailed` if the request cannot be satisfied.
    fn allocate(&self, dtype: DType, numel: usize) -> Result<Allocation, ClipError>;

    /// Native vendor handle for accelerator primitives.
    fn x_context(&self) -> Result<&XContext, ClipError> {
        Err(ClipError::DeviceMismatch {
            expected: Backend::Xpu,
            actual: self.backend(),
            operation: "x_context".to_string(),
        })
    }
}

/// Allocates `out` on `ctx` with the given shape and returns its typed storage.
///
/// The output slot must already carry the context's backend and the dtype `T`.
pub fn alloc<'t, T: Element>(
    ctx: &dyn DeviceContext,
    out: &'t mut DenseTensor,
    shape: &[usize],
) -> Result<&'t mut [T], ClipError> {
    if out.backend() != ctx.backend() {
        return Err(ClipError::DeviceMismatch {
            expected: ctx.backend(),
            actual: out.backend(),
            operation: "alloc".to_string(),
        });
    }
    if out.dtype() != T::DTYPE {
        return Err(ClipError::DataTypeMismatch {
            expected: out.dtype(),
            actual: T::DTYPE,
            operation: "alloc".to_string(),
        });
    }
    let numel = checked_numel(shape).ok_or_else(|| ClipError::AllocationFailed {
        backend: ctx.backend(),
        requested_bytes: usize::MAX,
        reason: format!("shape {:?} overflows the element count", shape),
    })?;
    let allocation = ctx.allocate(T::DTYPE, numel)?;
    out.install(shape.to_vec(), allocation.buffer, allocation.lease);
    out.data_mut::<T>()
}

pub(crate) fn byte_size(dtype: DType, numel: usize, backend: Backend) -> Result<usize, ClipError> {
    numel
        .checked_mul(dtype.size_in_bytes())
        .ok_or_else(|| ClipError::AllocationFailed {
            backend,
            requested_bytes: usize::MAX,
            reason: format!("{} elements of {:?} overflow the address space", numel, dtype),
        })
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
