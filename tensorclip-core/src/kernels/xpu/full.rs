use tensorclip_backend_xpu::xdnn;

use super::finish_launch;
use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::KernelArgs;
use crate::ops::traits::{ClipNumeric, XpuElement};
use crate::tensor::DenseTensor;

/// `full` via the vendor `constant`: args `[shape, value: Scalar, dtype]`.
pub(crate) fn full_kernel<T: ClipNumeric + XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    let shape = args.shape(0)?;
    let value: T = args.scalar(1)?.to();
    let dtype = args.dtype(2)?;
    if dtype != T::DTYPE {
        return Err(ClipError::DataTypeMismatch {
            expected: T::DTYPE,
            actual: dtype,
            operation: args.op().to_string(),
        });
    }
    let x_context = ctx.x_context()?;

    let y = alloc::<T>(ctx, out, shape)?;
    let n = y.len();
    let status = xdnn::constant(x_context, T::as_native_mut(y), n, value.to_native());
    finish_launch(status, "constant", out)
}
