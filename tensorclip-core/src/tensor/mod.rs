// src/tensor/mod.rs

use std::fmt;

use half::f16;
use tensorclip_backend_xpu::MemoryLease;

use crate::buffer::Buffer;
use crate::device::Backend;
use crate::error::ClipError;
use crate::ops::traits::Element;
use crate::types::DType;

pub mod create;

pub use create::{from_vec_bool, from_vec_f16, from_vec_f32, from_vec_f64, from_vec_i32, from_vec_i64, full};

/// A flat, typed, contiguous tensor.
///
/// The dtype and backend are fixed at construction. A tensor created with
/// [`DenseTensor::empty`] is an unallocated output slot: kernels give it a
/// shape and storage through [`crate::context::alloc`] before writing to it.
/// Buffers allocated on the XPU hold a [`MemoryLease`] that returns their bytes
/// to the device allocator when the tensor is dropped.
pub struct DenseTensor {
    dtype: DType,
    backend: Backend,
    shape: Vec<usize>,
    buffer: Option<Buffer>,
    lease: Option<MemoryLease>,
}

impl DenseTensor {
    /// Creates an unallocated tensor of `dtype` on `backend`, with shape `[0]`.
    pub fn empty(dtype: DType, backend: Backend) -> Self {
        DenseTensor {
            dtype,
            backend,
            shape: vec![0],
            buffer: None,
            lease: None,
        }
    }

    /// Creates a CPU tensor from a flat vector in row-major order.
    ///
    /// # Errors
    /// Returns `ClipError::TensorCreationError` if the length of `data` does not
    /// match the number of elements described by `shape`.
    pub fn from_vec<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Self, ClipError> {
        if checked_numel(&shape) != Some(data.len()) {
            return Err(ClipError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(DenseTensor {
            dtype: T::DTYPE,
            backend: Backend::Cpu,
            shape,
            buffer: Some(T::into_buffer(data)),
            lease: None,
        })
    }

    /// Creates a CPU F32 tensor.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    pub fn new_f64(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    pub fn new_f16(data: Vec<f16>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    pub fn new_i32(data: Vec<i32>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    pub fn new_i64(data: Vec<i64>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    pub fn new_bool(data: Vec<bool>, shape: Vec<usize>) -> Result<Self, ClipError> {
        Self::from_vec(data, shape)
    }

    /// Drops the storage and turns the tensor back into an unallocated slot.
    pub(crate) fn release(&mut self) {
        self.shape = vec![0];
        self.buffer = None;
        self.lease = None;
    }

    /// Installs freshly allocated storage. Called by the device contexts only.
    pub(crate) fn install(&mut self, shape: Vec<usize>, buffer: Buffer, lease: Option<MemoryLease>) {
        self.shape = shape;
        self.buffer = Some(buffer);
        self.lease = lease;
    }

    pub(crate) fn buffer(&self) -> Option<&Buffer> {
        self.buffer.as_ref()
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        // Every installed shape went through `checked_numel`.
        checked_numel(&self.shape).unwrap_or(usize::MAX)
    }

    pub fn is_allocated(&self) -> bool {
        self.buffer.is_some()
    }

    /// Bytes charged to the device allocator for this tensor (0 on CPU).
    pub fn device_bytes(&self) -> usize {
        self.lease.as_ref().map_or(0, MemoryLease::size_bytes)
    }

    /// Typed read access to the elements.
    ///
    /// # Errors
    /// `NotAllocated` for an output slot nothing has written to yet, and
    /// `DataTypeMismatch` if `T` is not the tensor's element type.
    pub fn data<T: Element>(&self) -> Result<&[T], ClipError> {
        if T::DTYPE != self.dtype {
            return Err(ClipError::DataTypeMismatch {
                expected: self.dtype,
                actual: T::DTYPE,
                operation: "data".to_string(),
            });
        }
        let buffer = self.buffer.as_ref().ok_or_else(|| ClipError::NotAllocated {
            operation: "data".to_string(),
        })?;
        T::slice(buffer).ok_or_else(|| {
            ClipError::InternalError(format!(
                "buffer holds {:?} but tensor is tagged {:?}",
                buffer.dtype(),
                self.dtype
            ))
        })
    }

    pub(crate) fn data_mut<T: Element>(&mut self) -> Result<&mut [T], ClipError> {
        if T::DTYPE != self.dtype {
            return Err(ClipError::DataTypeMismatch {
                expected: self.dtype,
                actual: T::DTYPE,
                operation: "data_mut".to_string(),
            });
        }
        let dtype = self.dtype;
        let buffer = self.buffer.as_mut().ok_or_else(|| ClipError::NotAllocated {
            operation: "data_mut".to_string(),
        })?;
        let buffer_dtype = buffer.dtype();
        T::slice_mut(buffer).ok_or_else(|| {
            ClipError::InternalError(format!(
                "buffer holds {:?} but tensor is tagged {:?}",
                buffer_dtype, dtype
            ))
        })
    }

    /// Copies the elements out into a `Vec`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, ClipError> {
        self.data::<T>().map(<[T]>::to_vec)
    }

    pub fn get_f32_data(&self) -> Result<Vec<f32>, ClipError> {
        self.to_vec()
    }

    pub fn get_f64_data(&self) -> Result<Vec<f64>, ClipError> {
        self.to_vec()
    }

    pub fn get_f16_data(&self) -> Result<Vec<f16>, ClipError> {
        self.to_vec()
    }

    pub fn get_i32_data(&self) -> Result<Vec<i32>, ClipError> {
        self.to_vec()
    }

    pub fn get_i64_data(&self) -> Result<Vec<i64>, ClipError> {
        self.to_vec()
    }

    pub fn get_bool_data(&self) -> Result<Vec<bool>, ClipError> {
        self.to_vec()
    }
}

/// Element count of `shape`, or `None` if it does not fit in `usize`.
pub(crate) fn checked_numel(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

impl fmt::Debug for DenseTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseTensor")
            .field("dtype", &self.dtype)
            .field("backend", &self.backend)
            .field("shape", &self.shape)
            .field("allocated", &self.buffer.is_some())
            .field("device_bytes", &self.device_bytes())
            .finish()
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
