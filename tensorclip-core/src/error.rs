use crate::device::Backend;
use crate::kernels::KernelKey;
use crate::types::DType;
use tensorclip_backend_xpu::XpuBackendError;
use thiserror::Error;

/// Error type shared by tensors, contexts, the registry and the kernels.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ClipError {
    #[error("Allocation of {requested_bytes} bytes on {backend:?} failed: {reason}")]
    AllocationFailed {
        backend: Backend,
        requested_bytes: usize,
        reason: String,
    },

    #[error("Accelerator primitive '{operation}' failed with status {code} ({message})")]
    AcceleratorFailure {
        operation: String,
        code: i32,
        message: String,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Data type mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Unsupported dtype {dtype:?} for operation '{operation}'")]
    UnsupportedDType { dtype: DType, operation: String },

    #[error("No kernel registered for {0}")]
    KernelNotFound(KernelKey),

    #[error("Kernel {0} is already registered")]
    DuplicateKernel(KernelKey),

    #[error("Device mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DeviceMismatch {
        expected: Backend,
        actual: Backend,
        operation: String,
    },

    #[error("Invalid argument for '{operation}': {message}")]
    InvalidArgument { operation: String, message: String },

    #[error("Tensor has no storage yet (operation '{operation}')")]
    NotAllocated { operation: String },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("XPU backend error: {0}")]
    Backend(#[from] XpuBackendError),
}
