//! Native CPU kernels.

mod clip;
mod compare;
mod full;
mod where_op;

use crate::device::Backend;
use crate::error::ClipError;
use crate::kernels::composed::clip_mul_grad_kernel;
use crate::kernels::KernelRegistry;

use clip::{clip_grad_kernel, clip_kernel, clip_mul_kernel};
use compare::{equal_kernel, less_than_kernel};
use full::full_kernel;
use where_op::where_kernel;

pub(crate) fn register_kernels(registry: &mut KernelRegistry) -> Result<(), ClipError> {
    let cpu = Backend::Cpu;
    register_kernel!(registry, "clip", cpu, clip_kernel, [f32, f64, i32, i64]);
    register_kernel!(registry, "clip_grad", cpu, clip_grad_kernel, [f32, f64, i32, i64]);
    register_kernel!(registry, "clipmul", cpu, clip_mul_kernel, [f32, f64, i32, i64]);
    register_kernel!(registry, "clipmul_grad", cpu, clip_mul_grad_kernel, [f32, f64, i32, i64]);

    register_kernel!(registry, "less_than", cpu, less_than_kernel, [f32, f64, i32, i64]);
    register_kernel!(registry, "equal", cpu, equal_kernel, [f32, f64, i32, i64, bool]);
    register_kernel!(registry, "full", cpu, full_kernel, [f32, f64, i32, i64]);
    register_kernel!(registry, "where", cpu, where_kernel, [f32, f64, i32, i64]);
    Ok(())
}

#[cfg(test)]
#[path = "cpu_test.rs"]
mod tests;
