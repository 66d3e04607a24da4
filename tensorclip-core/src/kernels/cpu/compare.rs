use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::{check_same_numel, input, KernelArgs};
use crate::ops::traits::Element;
use crate::tensor::DenseTensor;

fn compare<T: Element>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
    predicate: fn(T, T) -> bool,
) -> Result<(), ClipError> {
    let a = input(ctx, args, 0, T::DTYPE)?;
    let b = input(ctx, args, 1, T::DTYPE)?;
    check_same_numel(args.op(), a, b)?;
    let (a_data, b_data) = (a.data::<T>()?, b.data::<T>()?);

    let out_data = alloc::<bool>(ctx, out, a.shape())?;
    for ((o, &va), &vb) in out_data.iter_mut().zip(a_data).zip(b_data) {
        *o = predicate(va, vb);
    }
    Ok(())
}

/// `less_than`: args `[a, b]`, Bool output.
pub(crate) fn less_than_kernel<T: Element>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    compare::<T>(ctx, args, out, |a, b| a < b)
}

/// `equal`: args `[a, b]`, Bool output. Floats compare exactly.
pub(crate) fn equal_kernel<T: Element>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'_>,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    compare::<T>(ctx, args, out, |a, b| a == b)
}
