use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::ClipNumeric;
use crate::tensor::DenseTensor;

/// Lower bound first: with inverted bounds a value below `min` becomes `min`
/// even when it is also above `max`.
#[inline]
fn clip_value<T: PartialOrd + Copy>(x: T, min: T, max: T) -> T {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// `clip`: args `[x, min: Scalar, max: Scalar]`.
pub(crate) fn clip_kernel<T: ClipNumeric>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let min: T = args.scalar(1)?.to();
    let max: T = args.scalar(2)?.to();
    let x_data = x.data::<T>()?;

    let out_data = alloc::<T>(ctx, out, x.shape())?;
    for (o, &v) in out_data.iter_mut().zip(x_data) {
        *o = clip_value(v, min, max);
    }
    Ok(())
}

/// `clipmul`: args `[x, min, max]`, bounds given per element.
pub(crate) fn clip_mul_kernel<T: ClipNumeric>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let min = input(ctx, args, 1, T::DTYPE)?;
    let max = input(ctx, args, 2, T::DTYPE)?;
    check_same_numel(args.op(), x, min)?;
    check_same_numel(args.op(), x, max)?;
    let (x_data, min_data, max_data) = (x.data::<T>()?, min.data::<T>()?, max.data::<T>()?);

    let out_data = alloc::<T>(ctx, out, x.shape())?;
    for (i, o) in out_data.iter_mut().enumerate() {
        *o = clip_value(x_data[i], min_data[i], max_data[i]);
    }
    Ok(())
}

/// `clip_grad`: args `[x, out_grad, min: Scalar, max: Scalar]`.
/// The gradient passes only strictly inside the bounds.
pub(crate) fn clip_grad_kernel<T: ClipNumeric>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let out_grad = input(ctx, args, 1, T::DTYPE)?;
    check_same_numel(args.op(), x, out_grad)?;
    let min: T = args.scalar(2)?.to();
    let max: T = args.scalar(3)?.to();
    let (x_data, grad_data) = (x.data::<T>()?, out_grad.data::<T>()?);

    let x_grad = alloc::<T>(ctx, out, x.shape())?;
    for ((dx, &v), &g) in x_grad.iter_mut().zip(x_data).zip(grad_data) {
        *dx = if v > min && v < max { g } else { T::zero() };
    }
    Ok(())
}
