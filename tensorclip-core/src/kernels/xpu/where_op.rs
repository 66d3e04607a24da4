use tensorclip_backend_xpu::xdnn;

use super::finish_launch;
use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::XpuElement;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// `where` via the vendor `select`: args `[condition, x, y]`.
pub(crate) fn where_kernel<T: XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let condition = input(ctx, args, 0, DType::Bool)?;
    let x = input(ctx, args, 1, T::DTYPE)?;
    let y = input(ctx, args, 2, T::DTYPE)?;
    check_same_numel(args.op(), x, condition)?;
    check_same_numel(args.op(), x, y)?;
    let x_context = ctx.x_context()?;
    let cond_data = condition.data::<bool>()?;
    let (x_data, y_data) = (x.data::<T>()?, y.data::<T>()?);
    let n = x_data.len();

    let z = alloc::<T>(ctx, out, x.shape())?;
    let status = xdnn::select(
        x_context,
        cond_data,
        T::as_native(x_data),
        T::as_native(y_data),
        T::as_native_mut(z),
        n,
    );
    finish_launch(status, "select", out)
}
