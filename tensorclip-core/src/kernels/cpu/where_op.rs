use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::Element;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// `where`: args `[condition, x, y]`, keyed by the dtype of `x`.
pub(crate) fn where_kernel<T: Element>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let condition = input(ctx, args, 0, DType::Bool)?;
    let x = input(ctx, args, 1, T::DTYPE)?;
    let y = input(ctx, args, 2, T::DTYPE)?;
    check_same_numel(args.op(), x, condition)?;
    check_same_numel(args.op(), x, y)?;
    let cond_data = condition.data::<bool>()?;
    let (x_data, y_data) = (x.data::<T>()?, y.data::<T>()?);

    let out_data = alloc::<T>(ctx, out, x.shape())?;
    for (i, o) in out_data.iter_mut().enumerate() {
        *o = if cond_data[i] { x_data[i] } else { y_data[i] };
    }
    Ok(())
}
