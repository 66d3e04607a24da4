//! XPU backend for tensorclip: device enumeration, contexts, streams, memory
//! accounting and the vendor elementwise primitives the kernels delegate to.
//!
//! Device memory is host addressable, so buffers handed to [`xdnn`] are plain
//! slices reinterpreted to the device's native element types.

pub mod alloc;
pub mod config;
pub mod context;
pub mod error;
pub mod native;
pub mod stream;
pub mod xdnn;

pub use alloc::{MemoryLease, XpuAllocator};
pub use config::XpuConfig;
pub use context::{
    initialize_xpu_with_logging, list_devices, list_devices_with, runtime_config, XContext,
    XpuContext, XpuDevice,
};
pub use error::{status_message, XpuBackendError, XPU_SUCCESS};
pub use native::{XpuFloat16, XpuNative};
pub use stream::{XpuStream, LAUNCH_LOG_CAPACITY};

#[cfg(test)]
mod tests;
