use std::collections::TryReserveError;

use half::f16;

use crate::types::DType;

/// Typed, contiguous element storage of a tensor.
///
/// The same representation backs CPU and XPU tensors; XPU buffers are
/// additionally charged against the device allocator by the context that
/// created them.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    F16(Vec<f16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    Bool(Vec<bool>),
}

fn try_filled<T: Clone>(numel: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut data = Vec::new();
    data.try_reserve_exact(numel)?;
    data.resize(numel, value);
    Ok(data)
}

impl Buffer {
    /// Allocates `numel` zero-initialized elements of `dtype`.
    ///
    /// Uses fallible reservation so that an impossible request surfaces as
    /// an error instead of aborting the process.
    pub fn try_zeroed(dtype: DType, numel: usize) -> Result<Self, TryReserveError> {
        Ok(match dtype {
            DType::F32 => Buffer::F32(try_filled(numel, 0.0)?),
            DType::F64 => Buffer::F64(try_filled(numel, 0.0)?),
            DType::F16 => Buffer::F16(try_filled(numel, f16::ZERO)?),
            DType::I32 => Buffer::I32(try_filled(numel, 0)?),
            DType::I64 => Buffer::I64(try_filled(numel, 0)?),
            DType::Bool => Buffer::Bool(try_filled(numel, false)?),
        })
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::F16(_) => DType::F16,
            Buffer::I32(_) => DType::I32,
            Buffer::I64(_) => DType::I64,
            Buffer::Bool(_) => DType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(d) => d.len(),
            Buffer::F64(d) => d.len(),
            Buffer::F16(d) => d.len(),
            Buffer::I32(d) => d.len(),
            Buffer::I64(d) => d.len(),
            Buffer::Bool(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
