use tensorclip_backend_xpu::xdnn;

use super::finish_launch;
use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::{ClipNumeric, XpuElement};
use crate::tensor::DenseTensor;

/// `clip_grad`: args `[x, out_grad, min: Scalar, max: Scalar]`.
///
/// The bounds are converted to `T` first and then to the native type, so an
/// f16 kernel compares against the f16-rounded bounds.
pub(crate) fn clip_grad_kernel<T: ClipNumeric + XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    x_grad: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let out_grad = input(ctx, args, 1, T::DTYPE)?;
    check_same_numel(args.op(), x, out_grad)?;
    let min: T = args.scalar(2)?.to();
    let max: T = args.scalar(3)?.to();
    let x_context = ctx.x_context()?;
    let (x_data, dy) = (x.data::<T>()?, out_grad.data::<T>()?);
    let n = x_data.len();

    let dx = alloc::<T>(ctx, x_grad, x.shape())?;
    let status = xdnn::clip_grad(
        x_context,
        T::as_native(x_data),
        T::as_native(dy),
        T::as_native_mut(dx),
        n,
        min.to_native(),
        max.to_native(),
    );
    finish_launch(status, "clip_grad", x_grad)
}
