use log::debug;
use tensorclip_backend_xpu::{XContext, XpuConfig, XpuContext};

use super::{byte_size, Allocation, DeviceContext};
use crate::buffer::Buffer;
use crate::device::Backend;
use crate::error::ClipError;
use crate::tensor::DenseTensor;
use crate::types::DType;

/// XPU context: every buffer it hands out is charged against the device's
/// allocator for as long as the owning tensor lives.
#[derive(Debug)]
pub struct XpuDeviceContext {
    inner: XpuContext,
}

impl XpuDeviceContext {
    pub fn new(device_id: u32, config: &XpuConfig) -> Result<Self, ClipError> {
        Ok(XpuDeviceContext {
            inner: XpuContext::new(device_id, config)?,
        })
    }

    /// Device 0 with the process-wide runtime configuration.
    pub fn default_device() -> Result<Self, ClipError> {
        Ok(XpuDeviceContext {
            inner: XpuContext::default_device()?,
        })
    }

    pub fn inner(&self) -> &XpuContext {
        &self.inner
    }

    /// Bytes currently charged to the device.
    pub fn memory_in_use(&self) -> usize {
        self.inner.allocator().in_use()
    }

    /// Primitives launched on this context's stream, in issue order.
    pub fn launched_ops(&self) -> Vec<&'static str> {
        self.inner.x_context().stream().launched_ops()
    }

    pub fn synchronize(&self) -> Result<(), ClipError> {
        Ok(self.inner.synchronize()?)
    }

    /// Copies a CPU tensor to this device.
    pub fn copy_from_host(&self, host: &DenseTensor) -> Result<DenseTensor, ClipError> {
        if host.backend() != Backend::Cpu {
            return Err(ClipError::DeviceMismatch {
                expected: Backend::Cpu,
                actual: host.backend(),
                operation: "copy_from_host".to_string(),
            });
        }
        let buffer = source_buffer(host, "copy_from_host")?;
        let requested_bytes = byte_size(host.dtype(), host.numel(), Backend::Xpu)?;
        let lease = self
            .inner
            .allocator()
            .alloc(requested_bytes)
            .map_err(|e| ClipError::AllocationFailed {
                backend: Backend::Xpu,
                requested_bytes,
                reason: e.to_string(),
            })?;
        debug!(
            "Copying {} bytes host -> XPU:{}",
            requested_bytes,
            self.inner.device_id()
        );
        let mut device = DenseTensor::empty(host.dtype(), Backend::Xpu);
        device.install(host.shape().to_vec(), buffer.clone(), Some(lease));
        Ok(device)
    }

    /// Copies a tensor living on this device back to the host.
    pub fn copy_to_host(&self, device: &DenseTensor) -> Result<DenseTensor, ClipError> {
        if device.backend() != Backend::Xpu {
            return Err(ClipError::DeviceMismatch {
                expected: Backend::Xpu,
                actual: device.backend(),
                operation: "copy_to_host".to_string(),
            });
        }
        self.synchronize()?;
        let buffer = source_buffer(device, "copy_to_host")?;
        let mut host = DenseTensor::empty(device.dtype(), Backend::Cpu);
        host.install(device.shape().to_vec(), buffer.clone(), None);
        Ok(host)
    }
}

fn source_buffer<'a>(tensor: &'a DenseTensor, operation: &str) -> Result<&'a Buffer, ClipError> {
    tensor.buffer().ok_or_else(|| ClipError::NotAllocated {
        operation: operation.to_string(),
    })
}

impl DeviceContext for XpuDeviceContext {
    fn backend(&self) -> Backend {
        Backend::Xpu
    }

    fn allocate(&self, dtype: DType, numel: usize) -> Result<Allocation, ClipError> {
        let requested_bytes = byte_size(dtype, numel, Backend::Xpu)?;
        let lease = self
            .inner
            .allocator()
            .alloc(requested_bytes)
            .map_err(|e| ClipError::AllocationFailed {
                backend: Backend::Xpu,
                requested_bytes,
                reason: e.to_string(),
            })?;
        let buffer = Buffer::try_zeroed(dtype, numel).map_err(|e| ClipError::AllocationFailed {
            backend: Backend::Xpu,
            requested_bytes,
            reason: e.to_string(),
        })?;
        Ok(Allocation {
            buffer,
            lease: Some(lease),
        })
    }

    fn x_context(&self) -> Result<&XContext, ClipError> {
        Ok(self.inner.x_context())
    }
}
