// src/ops/clip.rs

use crate::context::DeviceContext;
use crate::error::ClipError;
use crate::kernels::{dispatch, KernelArgs};
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Clamps every element of `x` into `[min, max]`.
///
/// With inverted bounds (`min > max`) the lower bound is tested first: values
/// below `min` become `min`, values above `max` become `max`.
///
/// # Example
/// ```
/// use tensorclip_core::{ops, CpuContext, DenseTensor};
/// let ctx = CpuContext::new();
/// let x = DenseTensor::new(vec![-1.0, 0.5, 7.0], vec![3]).unwrap();
/// let y = ops::clip(&ctx, &x, 0.0f32, 1.0f32).unwrap();
/// assert_eq!(y.get_f32_data().unwrap(), vec![0.0, 0.5, 1.0]);
/// ```
pub fn clip(
    ctx: &dyn DeviceContext,
    x: &DenseTensor,
    min: impl Into<Scalar>,
    max: impl Into<Scalar>,
) -> Result<DenseTensor, ClipError> {
    let args = KernelArgs::new("clip")
        .with_tensor(x)
        .with_scalar(min)
        .with_scalar(max);
    run(ctx, &args, x)
}

/// Clip with per-element bounds. `min` and `max` must have as many elements
/// as `x`.
pub fn clip_mul(
    ctx: &dyn DeviceContext,
    x: &DenseTensor,
    min: &DenseTensor,
    max: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let args = KernelArgs::new("clipmul")
        .with_tensor(x)
        .with_tensor(min)
        .with_tensor(max);
    run(ctx, &args, x)
}

/// Gradient of [`clip`]: `out_grad` where `min < x < max`, zero elsewhere.
pub fn clip_grad(
    ctx: &dyn DeviceContext,
    x: &DenseTensor,
    out_grad: &DenseTensor,
    min: impl Into<Scalar>,
    max: impl Into<Scalar>,
) -> Result<DenseTensor, ClipError> {
    let args = KernelArgs::new("clip_grad")
        .with_tensor(x)
        .with_tensor(out_grad)
        .with_scalar(min)
        .with_scalar(max);
    run(ctx, &args, x)
}

/// Gradient of [`clip_mul`], composed from `less_than`, `equal`, `full` and
/// `where`.
pub fn clip_mul_grad(
    ctx: &dyn DeviceContext,
    x: &DenseTensor,
    min: &DenseTensor,
    max: &DenseTensor,
    out_grad: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let args = KernelArgs::new("clipmul_grad")
        .with_tensor(x)
        .with_tensor(min)
        .with_tensor(max)
        .with_tensor(out_grad);
    run(ctx, &args, x)
}

fn run(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    like: &DenseTensor,
) -> Result<DenseTensor, ClipError> {
    let mut out = DenseTensor::empty(like.dtype(), ctx.backend());
    dispatch(ctx, args, &mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "clip_test.rs"]
mod tests;
