// src/ops/elementwise.rs

use crate::context::DeviceContext;
use crate::error::ClipError;
use crate::kernels::{dispatch, KernelArgs};
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// Element-wise `a < b` as a Bool tensor.
pub fn lt_op(
    ctx: &dyn DeviceContext,
    a: &DenseTensor,
    b: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let mut out = DenseTensor::empty(DType::Bool, ctx.backend());
    dispatch(
        ctx,
        &KernelArgs::new("less_than").with_tensor(a).with_tensor(b),
        &mut out,
    )?;
    Ok(out)
}

/// Element-wise exact equality as a Bool tensor.
pub fn equal_op(
    ctx: &dyn DeviceContext,
    a: &DenseTensor,
    b: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let mut out = DenseTensor::empty(DType::Bool, ctx.backend());
    dispatch(
        ctx,
        &KernelArgs::new("equal").with_tensor(a).with_tensor(b),
        &mut out,
    )?;
    Ok(out)
}

/// A tensor of `shape` and `dtype` with every element set to `value`,
/// allocated on the context's backend. Bool is not a fill type.
pub fn full(
    ctx: &dyn DeviceContext,
    shape: &[usize],
    value: impl Into<Scalar>,
    dtype: DType,
) -> Result<DenseTensor, ClipError> {
    if dtype == DType::Bool {
        return Err(ClipError::UnsupportedDType {
            dtype,
            operation: "full".to_string(),
        });
    }
    let mut out = DenseTensor::empty(dtype, ctx.backend());
    dispatch(
        ctx,
        &KernelArgs::new("full")
            .with_shape(shape)
            .with_scalar(value)
            .with_dtype(dtype),
        &mut out,
    )?;
    Ok(out)
}

/// `condition[i] ? x[i] : y[i]`.
pub fn where_op(
    ctx: &dyn DeviceContext,
    condition: &DenseTensor,
    x: &DenseTensor,
    y: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let mut out = DenseTensor::empty(x.dtype(), ctx.backend());
    dispatch(
        ctx,
        &KernelArgs::new("where")
            .with_tensor(condition)
            .with_tensor(x)
            .with_tensor(y)
            .keyed_by(x.dtype()),
        &mut out,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "elementwise_test.rs"]
mod tests;
