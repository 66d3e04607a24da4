use tensorclip_backend_xpu::xdnn;

use super::finish_launch;
use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{input, KernelArgs};
use crate::ops::traits::{ClipNumeric, XpuElement};
use crate::tensor::DenseTensor;

/// `clip` on the XPU through the vendor `clamp`.
pub(crate) fn clip_kernel<T: ClipNumeric + XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let x = input(ctx, args, 0, T::DTYPE)?;
    let min: T = args.scalar(1)?.to();
    let max: T = args.scalar(2)?.to();
    let x_context = ctx.x_context()?;
    let x_data = x.data::<T>()?;
    let n = x_data.len();

    let y = alloc::<T>(ctx, out, x.shape())?;
    let status = xdnn::clamp(
        x_context,
        T::as_native(x_data),
        T::as_native_mut(y),
        n,
        min.to_native(),
        max.to_native(),
    );
    finish_launch(status, "clamp", out)
}
