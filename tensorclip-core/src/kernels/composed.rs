//! Gradient kernels composed from primitive kernels.

use log::debug;

use crate::context::DeviceContext;
use crate::error::ClipError;
use crate::kernels::{check_same_numel, dispatch, input, KernelArgs};
use crate::ops::traits::ClipNumeric;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// `clipmul_grad`: args `[x, min, max, out_grad]`.
///
/// Runs, each as its own registry dispatch:
///
/// 1. `min_mask = less_than(min, x)`
/// 2. `max_mask = less_than(x, max)`
/// 3. `in_range = equal(min_mask, max_mask)`
/// 4. `zero = full(shape(out_grad), 0, dtype(out_grad))`
/// 5. `x_grad = where(in_range, out_grad, zero)`
///
/// Step 3 compares the masks for equality, so an element where both masks
/// are false (`max <= x <= min`) also passes its gradient through.
/// Intermediates are dropped on return, including on failure.
pub(crate) fn clip_mul_grad_kernel<T: ClipNumeric>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    x_grad: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let min = input(ctx, args, 1, T::DTYPE)?;
    let max = input(ctx, args, 2, T::DTYPE)?;
    let out_grad = input(ctx, args, 3, T::DTYPE)?;
    for other in [min, max, out_grad] {
        check_same_numel(args.op(), x, other)?;
    }
    debug!(
        "clipmul_grad on {:?}: {} elements of {:?}",
        ctx.backend(),
        x.numel(),
        T::DTYPE
    );

    let backend = ctx.backend();
    let mut min_mask = DenseTensor::empty(DType::Bool, backend);
    dispatch(
        ctx,
        &KernelArgs::new("less_than").with_tensor(min).with_tensor(x),
        &mut min_mask,
    )?;

    let mut max_mask = DenseTensor::empty(DType::Bool, backend);
    dispatch(
        ctx,
        &KernelArgs::new("less_than").with_tensor(x).with_tensor(max),
        &mut max_mask,
    )?;

    let mut in_range = DenseTensor::empty(DType::Bool, backend);
    dispatch(
        ctx,
        &KernelArgs::new("equal")
            .with_tensor(&min_mask)
            .with_tensor(&max_mask),
        &mut in_range,
    )?;

    let mut zero = DenseTensor::empty(out_grad.dtype(), backend);
    dispatch(
        ctx,
        &KernelArgs::new("full")
            .with_shape(out_grad.shape())
            .with_scalar(Scalar::Int(0))
            .with_dtype(out_grad.dtype()),
        &mut zero,
    )?;

    dispatch(
        ctx,
        &KernelArgs::new("where")
            .with_tensor(&in_range)
            .with_tensor(out_grad)
            .with_tensor(&zero)
            .keyed_by(out_grad.dtype()),
        x_grad,
    )
}
