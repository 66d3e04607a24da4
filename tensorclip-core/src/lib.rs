//! Element-wise clip operators and their gradients over flat tensors, with
//! CPU and XPU kernels resolved through a process-wide kernel registry.

pub mod buffer;
pub mod context;
pub mod device;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod scalar;
pub mod tensor;
pub mod types;

pub use context::{CpuContext, DeviceContext, XpuDeviceContext};
pub use device::{Backend, DataLayout};
pub use error::ClipError;
pub use kernels::{dispatch, global_registry, KernelArgs, KernelKey, KernelRegistry};
pub use scalar::Scalar;
pub use tensor::DenseTensor;
pub use types::DType;

// Re-export the half-precision type used for F16 tensors.
pub use half;
