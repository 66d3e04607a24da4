// src/tensor/create.rs

use half::f16;

use crate::error::ClipError;
use crate::ops::traits::ClipNumeric;
use crate::tensor::{checked_numel, DenseTensor};

/// Creates a new CPU F32 tensor from a `Vec<f32>` and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new(data_vec, shape)
}

/// Creates a new CPU F64 tensor from a `Vec<f64>` and shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new_f64(data_vec, shape)
}

pub fn from_vec_f16(data_vec: Vec<f16>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new_f16(data_vec, shape)
}

pub fn from_vec_i32(data_vec: Vec<i32>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new_i32(data_vec, shape)
}

pub fn from_vec_i64(data_vec: Vec<i64>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new_i64(data_vec, shape)
}

pub fn from_vec_bool(data_vec: Vec<bool>, shape: Vec<usize>) -> Result<DenseTensor, ClipError> {
    DenseTensor::new_bool(data_vec, shape)
}

/// Creates a CPU tensor of `shape` with every element set to `value`.
///
/// This is a host-side helper; the device-aware `full` primitive lives in
/// [`crate::ops::elementwise::full`].
pub fn full<T: ClipNumeric>(shape: &[usize], value: T) -> Result<DenseTensor, ClipError> {
    let numel = checked_numel(shape).ok_or_else(|| ClipError::TensorCreationError {
        data_len: 0,
        shape: shape.to_vec(),
    })?;
    DenseTensor::from_vec(vec![value; numel], shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
