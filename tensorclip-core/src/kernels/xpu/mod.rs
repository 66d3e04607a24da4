//! XPU kernels. Each one reinterprets its buffers to the vendor-native
//! element type and delegates to a primitive of `tensorclip_backend_xpu::xdnn`.

mod clip;
mod clip_grad;
mod compare;
mod full;
mod where_op;

use half::f16;
use log::error;
use tensorclip_backend_xpu::{status_message, XPU_SUCCESS};

use crate::device::Backend;
use crate::error::ClipError;
use crate::kernels::composed::clip_mul_grad_kernel;
use crate::kernels::KernelRegistry;
use crate::tensor::DenseTensor;

use clip::clip_kernel;
use clip_grad::clip_grad_kernel;
use compare::{equal_kernel, less_than_kernel};
use full::full_kernel;
use where_op::where_kernel;

pub(crate) fn register_kernels(registry: &mut KernelRegistry) -> Result<(), ClipError> {
    let xpu = Backend::Xpu;
    register_kernel!(registry, "clip", xpu, clip_kernel, [f32, f16, i32, i64]);
    register_kernel!(registry, "clip_grad", xpu, clip_grad_kernel, [f32, f16, i32, i64]);
    register_kernel!(registry, "clipmul_grad", xpu, clip_mul_grad_kernel, [f32, f16, i32, i64]);

    register_kernel!(registry, "less_than", xpu, less_than_kernel, [f32, f16, i32, i64]);
    register_kernel!(registry, "equal", xpu, equal_kernel, [f32, f16, i32, i64, bool]);
    register_kernel!(registry, "full", xpu, full_kernel, [f32, f16, i32, i64]);
    register_kernel!(registry, "where", xpu, where_kernel, [f32, f16, i32, i64]);
    Ok(())
}

/// Turns a vendor status into a `ClipError::AcceleratorFailure`.
pub(crate) fn enforce_xdnn_success(status: i32, operation: &str) -> Result<(), ClipError> {
    if status == XPU_SUCCESS {
        return Ok(());
    }
    let message = status_message(status);
    error!(
        "XPU API return wrong value[{} {}] in '{}'",
        status, message, operation
    );
    Err(ClipError::AcceleratorFailure {
        operation: operation.to_string(),
        code: status,
        message: message.to_string(),
    })
}

/// Enforces `status` for a primitive that wrote into `out`. On failure the
/// output goes back to an unallocated slot and its device bytes are returned.
pub(crate) fn finish_launch(
    status: i32,
    operation: &str,
    out: &mut DenseTensor,
) -> Result<(), ClipError> {
    enforce_xdnn_success(status, operation).map_err(|err| {
        out.release();
        err
    })
}

#[cfg(test)]
#[path = "xpu_test.rs"]
mod tests;
