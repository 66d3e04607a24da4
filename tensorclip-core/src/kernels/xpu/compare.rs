use tensorclip_backend_xpu::{xdnn, XContext};

use super::finish_launch;
use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::XpuElement;
use crate::tensor::DenseTensor;

type ComparePrimitive<N> = fn(&XContext, &[N], &[N], &mut [bool], usize) -> i32;

fn compare<T: XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
    primitive: ComparePrimitive<T::Native>,
    primitive_name: &str,
) -> Result<(), ClipError> {
    let a = input(ctx, args, 0, T::DTYPE)?;
    let b = input(ctx, args, 1, T::DTYPE)?;
    check_same_numel(args.op(), a, b)?;
    let x_context = ctx.x_context()?;
    let (a_data, b_data) = (a.data::<T>()?, b.data::<T>()?);
    let n = a_data.len();

    let z = alloc::<bool>(ctx, out, a.shape())?;
    let status = primitive(x_context, T::as_native(a_data), T::as_native(b_data), z, n);
    finish_launch(status, primitive_name, out)
}

pub(crate) fn less_than_kernel<T: XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    compare::<T>(ctx, args, out, xdnn::less_than::<T::Native>, "less_than")
}

pub(crate) fn equal_kernel<T: XpuElement>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    compare::<T>(ctx, args, out, xdnn::equal::<T::Native>, "equal")
}
