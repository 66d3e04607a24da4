use thiserror::Error;

/// Status returned by vendor primitives when the call completed.
pub const XPU_SUCCESS: i32 = 0;
/// A length or pointer argument did not satisfy the primitive's contract.
pub const XPUERR_INVALID_PARAM: i32 = 1;
/// The device could not provide scratch memory for the primitive.
pub const XPUERR_NOMEM: i32 = 2;
/// Generic runtime failure reported by the device.
pub const XPUERR_RUNTIME: i32 = 3;
/// Failure injected through `XContext::inject_fault`.
pub const XPUERR_INJECTED: i32 = 100;

/// Human readable description of a vendor status code.
pub fn status_message(code: i32) -> &'static str {
    match code {
        XPU_SUCCESS => "success",
        XPUERR_INVALID_PARAM => "invalid parameter",
        XPUERR_NOMEM => "device out of memory",
        XPUERR_RUNTIME => "device runtime error",
        XPUERR_INJECTED => "injected fault",
        _ => "unknown status",
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XpuBackendError {
    #[error("XPU backend is not initialized. Call initialize_xpu_with_logging() first.")]
    NotInitialized,
    #[error("No XPU devices found")]
    NoDevicesFound,
    #[error("Invalid XPU device ID: {0}")]
    InvalidDeviceId(u32),
    #[error("XPU device {device_id} out of memory: requested {requested} bytes, {in_use} in use, limit {limit}")]
    OutOfMemory {
        device_id: u32,
        requested: usize,
        in_use: usize,
        limit: usize,
    },
    #[error("Invalid XPU configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
    #[error("Logger initialization failed: {0}")]
    LoggerInitError(String),
}
