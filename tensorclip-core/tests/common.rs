use std::sync::Once;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tensorclip_backend_xpu::XpuConfig;
use tensorclip_core::half::f16;
use tensorclip_core::{Backend, CpuContext, DType, DenseTensor, DeviceContext, XpuDeviceContext};

static INIT: Once = Once::new();

// Added allow(dead_code) because not every test crate uses every helper.
#[allow(dead_code)]
pub fn setup_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// An XPU context on device 0, optionally with a memory budget in bytes.
#[allow(dead_code)]
pub fn xpu_context(memory_limit: Option<usize>) -> XpuDeviceContext {
    setup_logger();
    let mut config = XpuConfig::default();
    if let Some(bytes) = memory_limit {
        config = config.with_memory_limit(bytes);
    }
    XpuDeviceContext::new(0, &config).expect("XPU context creation failed")
}

#[allow(dead_code)]
pub fn on_device(ctx: &XpuDeviceContext, host: DenseTensor) -> DenseTensor {
    ctx.copy_from_host(&host).expect("host to device copy failed")
}

/// Deterministic random values in `[low, high)`.
#[allow(dead_code)]
pub fn random_f32(seed: u64, len: usize, low: f32, high: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}

#[allow(dead_code)]
pub fn random_i64(seed: u64, len: usize, low: i64, high: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}

/// Shared inputs for the per-dtype tables: exact in every registered dtype,
/// with bounds `0` and `3`.
#[allow(dead_code)]
pub const TABLE_X: [f64; 5] = [-1.0, 0.0, 1.0, 5.0, 10.0];
#[allow(dead_code)]
pub const TABLE_MIN: f64 = 0.0;
#[allow(dead_code)]
pub const TABLE_MAX: f64 = 3.0;

/// A CPU tensor of `dtype` holding `values` (non-zero means `true` for Bool).
#[allow(dead_code)]
pub fn tensor_of(dtype: DType, values: &[f64]) -> DenseTensor {
    let shape = vec![values.len()];
    let tensor = match dtype {
        DType::F32 => DenseTensor::new(values.iter().map(|&v| v as f32).collect(), shape),
        DType::F64 => DenseTensor::new_f64(values.to_vec(), shape),
        DType::F16 => DenseTensor::new_f16(values.iter().map(|&v| f16::from_f64(v)).collect(), shape),
        DType::I32 => DenseTensor::new_i32(values.iter().map(|&v| v as i32).collect(), shape),
        DType::I64 => DenseTensor::new_i64(values.iter().map(|&v| v as i64).collect(), shape),
        DType::Bool => DenseTensor::new_bool(values.iter().map(|&v| v != 0.0).collect(), shape),
    };
    tensor.expect("table tensor creation failed")
}

/// The elements of a CPU tensor widened to f64 (Bool as 0/1).
#[allow(dead_code)]
pub fn values_of(tensor: &DenseTensor) -> Vec<f64> {
    match tensor.dtype() {
        DType::F32 => tensor.get_f32_data().unwrap().into_iter().map(f64::from).collect(),
        DType::F64 => tensor.get_f64_data().unwrap(),
        DType::F16 => tensor.get_f16_data().unwrap().into_iter().map(f64::from).collect(),
        DType::I32 => tensor.get_i32_data().unwrap().into_iter().map(f64::from).collect(),
        DType::I64 => tensor.get_i64_data().unwrap().into_iter().map(|v| v as f64).collect(),
        DType::Bool => tensor
            .get_bool_data()
            .unwrap()
            .into_iter()
            .map(|b| if b { 1.0 } else { 0.0 })
            .collect(),
    }
}

/// A backend the per-dtype tables run on.
#[allow(dead_code)]
pub enum Target {
    Cpu(CpuContext),
    Xpu(XpuDeviceContext),
}

#[allow(dead_code)]
impl Target {
    pub fn all() -> Vec<Target> {
        vec![Target::Cpu(CpuContext::new()), Target::Xpu(xpu_context(None))]
    }

    pub fn backend(&self) -> Backend {
        self.ctx().backend()
    }

    pub fn ctx(&self) -> &dyn DeviceContext {
        match self {
            Target::Cpu(ctx) => ctx,
            Target::Xpu(ctx) => ctx,
        }
    }

    /// `values` as a tensor of `dtype` living on this backend.
    pub fn tensor(&self, dtype: DType, values: &[f64]) -> DenseTensor {
        let host = tensor_of(dtype, values);
        match self {
            Target::Cpu(_) => host,
            Target::Xpu(ctx) => on_device(ctx, host),
        }
    }

    pub fn values(&self, tensor: &DenseTensor) -> Vec<f64> {
        match self {
            Target::Cpu(_) => values_of(tensor),
            Target::Xpu(ctx) => values_of(&ctx.copy_to_host(tensor).expect("device to host copy failed")),
        }
    }
}
