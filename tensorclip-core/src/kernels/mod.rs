//! Kernels and their registration.
//!
//! Every kernel has the [`KernelFn`] signature: it reads its inputs from
//! [`KernelArgs`], allocates the output slot through the device context and
//! fills it. The composed gradient kernel is built from other kernels and
//! dispatches them through the global registry.

use crate::context::DeviceContext;
use crate::error::ClipError;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// Registers `$kernel::<T>` under `$name` on `$backend` for each listed type.
/// The dtype part of the key comes from `T`'s [`Element::DTYPE`].
///
/// [`Element::DTYPE`]: crate::ops::traits::Element::DTYPE
macro_rules! register_kernel {
    ($registry:expr, $name:expr, $backend:expr, $kernel:ident, [$($t:ty),+ $(,)?]) => {
        $(
            $registry.register(
                $crate::kernels::KernelKey::new(
                    $name,
                    $backend,
                    $crate::device::DataLayout::All,
                    <$t as $crate::ops::traits::Element>::DTYPE,
                ),
                $kernel::<$t>,
            )?;
        )+
    };
}

pub mod composed;
pub mod cpu;
pub mod registry;
pub mod xpu;

pub use registry::{
    dispatch, global_registry, KernelArgs, KernelFn, KernelInput, KernelKey, KernelRegistry,
};

/// Tensor argument `index`, checked to live on the context's backend and to
/// hold `dtype`.
pub(crate) fn input<'a>(
    ctx: &dyn DeviceContext,
    args: &KernelArgs<'a>,
    index: usize,
    dtype: DType,
) -> Result<&'a DenseTensor, ClipError> {
    let tensor = args.tensor(index)?;
    if tensor.backend() != ctx.backend() {
        return Err(ClipError::DeviceMismatch {
            expected: ctx.backend(),
            actual: tensor.backend(),
            operation: args.op().to_string(),
        });
    }
    if tensor.dtype() != dtype {
        return Err(ClipError::DataTypeMismatch {
            expected: dtype,
            actual: tensor.dtype(),
            operation: args.op().to_string(),
        });
    }
    Ok(tensor)
}

/// Element-wise pairing requires equal element counts.
pub(crate) fn check_same_numel(
    op: &str,
    reference: &DenseTensor,
    other: &DenseTensor,
) -> Result<(), ClipError> {
    if reference.numel() != other.numel() {
        return Err(ClipError::ShapeMismatch {
            expected: reference.shape().to_vec(),
            actual: other.shape().to_vec(),
            operation: op.to_string(),
        });
    }
    Ok(())
}
