//! Clips a tensor on the CPU and the XPU and compares the two gradient paths.
//!
//! Run with `RUST_LOG=debug` to see allocations and kernel dispatches.

use tensorclip_backend_xpu::initialize_xpu_with_logging;
use tensorclip_core::{ops, ClipError, CpuContext, DType, DenseTensor, XpuDeviceContext};

fn main() -> Result<(), ClipError> {
    initialize_xpu_with_logging()?;

    println!("--- CPU ---");
    let cpu = CpuContext::new();
    let x = DenseTensor::new(vec![-1.0, 0.0, 1.5, 5.0, 10.0], vec![5])?;
    let y = ops::clip(&cpu, &x, 0.0f32, 3.0f32)?;
    println!("x           : {:?}", x.get_f32_data()?);
    println!("clip(x,0,3) : {:?}", y.get_f32_data()?);

    println!("--- XPU ---");
    let xpu = XpuDeviceContext::default_device()?;
    let x_dev = xpu.copy_from_host(&x)?;
    let grad = xpu.copy_from_host(&DenseTensor::new(vec![1.0; 5], vec![5])?)?;
    let min = ops::full(&xpu, &[5], 0.0f32, DType::F32)?;
    let max = ops::full(&xpu, &[5], 3.0f32, DType::F32)?;

    let vendor = ops::clip_grad(&xpu, &x_dev, &grad, 0.0f32, 3.0f32)?;
    let composed = ops::clip_mul_grad(&xpu, &x_dev, &min, &max, &grad)?;
    println!("clip_grad    : {:?}", xpu.copy_to_host(&vendor)?.get_f32_data()?);
    println!("clipmul_grad : {:?}", xpu.copy_to_host(&composed)?.get_f32_data()?);
    println!("launched     : {:?}", xpu.launched_ops());
    println!("device bytes : {}", xpu.memory_in_use());

    Ok(())
}
