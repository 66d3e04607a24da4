use crate::context::{alloc, DeviceContext};
use crate::error::ClipError;
use crate::kernels::KernelArgs;
use crate::ops::traits::ClipNumeric;
use crate::tensor::DenseTensor;

/// `full`: args `[shape, value: Scalar, dtype]`.
pub(crate) fn full_kernel<T: ClipNumeric>(
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
    alloc::<T>(ctx, out, shape)?.fill(value);
    Ok(())
}
