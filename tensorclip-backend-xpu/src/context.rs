use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use log::{debug, error, info, warn};
use once_cell::sync::OnceCell;

use crate::alloc::XpuAllocator;
use crate::config::XpuConfig;
use crate::error::{XpuBackendError, XPU_SUCCESS};
use crate::stream::XpuStream;

// Runtime configuration captured the first time the backend is initialized.
static XPU_RUNTIME: OnceCell<XpuConfig> = OnceCell::new();

/// Initializes the XPU runtime and the logging system.
/// This function is idempotent and thread-safe.
///
/// The logging level can be controlled by the `RUST_LOG` environment variable
/// (e.g., `RUST_LOG=tensorclip_backend_xpu=debug`). The runtime configuration
/// is read from the environment on the first call (see [`XpuConfig::from_env`]).
pub fn initialize_xpu_with_logging() -> Result<&'static XpuConfig, XpuBackendError> {
    // Errors during logger init are reported but don't stop XPU init.
    static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();
    LOGGER_INITIALIZED.get_or_init(|| {
        match env_logger::builder().is_test(false).try_init() {
            Ok(_) => info!("tensorclip XPU backend logger initialized."),
            Err(e) => eprintln!(
                "Failed to initialize logger: {}. Logging might not work as expected.",
                e
            ),
        };
    });

    XPU_RUNTIME.get_or_try_init(|| {
        debug!("Attempting to initialize XPU runtime...");
        let config = XpuConfig::from_env().map_err(|e| {
            error!("XPU runtime initialization failed: {}", e);
            e
        })?;
        info!(
            "XPU runtime initialized: {} device(s), memory limit {:?}",
            config.device_count, config.memory_limit
        );
        Ok(config)
    })
}

/// Configuration the runtime was initialized with.
pub fn runtime_config() -> Result<&'static XpuConfig, XpuBackendError> {
    XPU_RUNTIME.get().ok_or(XpuBackendError::NotInitialized)
}

/// Represents an XPU device with its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpuDevice {
    pub id: u32,
    pub name: String,
    /// Memory budget of the device in bytes, `None` when unlimited.
    pub total_memory: Option<usize>,
}

/// Lists the devices described by `config`.
pub fn list_devices_with(config: &XpuConfig) -> Result<Vec<XpuDevice>, XpuBackendError> {
    if config.device_count == 0 {
        warn!("No XPU devices found.");
        return Err(XpuBackendError::NoDevicesFound);
    }
    info!("Found {} XPU device(s).", config.device_count);
    Ok((0..config.device_count)
        .map(|id| XpuDevice {
            id,
            name: format!("XPU:{}", id),
            total_memory: config.memory_limit,
        })
        .collect())
}

/// Lists all available XPU devices.
/// Ensures the runtime is initialized before listing devices.
pub fn list_devices() -> Result<Vec<XpuDevice>, XpuBackendError> {
    let config = initialize_xpu_with_logging()?;
    list_devices_with(config)
}

/// Raw vendor context handed to the elementwise primitives.
///
/// Holds the stream the primitives are launched on and an optional table of
/// injected failures used to exercise error paths.
#[derive(Debug)]
pub struct XContext {
    device_id: u32,
    stream: XpuStream,
    faults: Mutex<HashMap<String, i32>>,
}

impl XContext {
    pub fn new(device_id: u32, stream: XpuStream) -> Self {
        XContext {
            device_id,
            stream,
            faults: Mutex::new(HashMap::new()),
        }
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn stream(&self) -> &XpuStream {
        &self.stream
    }

    /// Makes every subsequent launch of `op` return `code` until cleared.
    pub fn inject_fault(&self, op: &str, code: i32) {
        warn!("XPU device {}: injecting status {} into '{}'", self.device_id, code, op);
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op.to_string(), code);
    }

    pub fn clear_faults(&self) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Enqueues `op` on the stream and returns the launch status.
    pub(crate) fn launch(&self, op: &'static str) -> i32 {
        let injected = self
            .faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(op)
            .copied();
        match injected {
            Some(code) if code != XPU_SUCCESS => code,
            _ => {
                self.stream.record(op);
                XPU_SUCCESS
            }
        }
    }
}

/// Device context: the vendor context plus the allocator of its device.
#[derive(Debug)]
pub struct XpuContext {
    device_id: u32,
    allocator: XpuAllocator,
    x_context: XContext,
}

impl XpuContext {
    /// Creates a context on `device_id` using the given configuration.
    ///
    /// # Errors
    /// `InvalidDeviceId` if the configuration does not expose that device.
    pub fn new(device_id: u32, config: &XpuConfig) -> Result<Self, XpuBackendError> {
        if device_id >= config.device_count {
            error!(
                "Cannot create XPU context: device {} not in 0..{}",
                device_id, config.device_count
            );
            return Err(XpuBackendError::InvalidDeviceId(device_id));
        }
        debug!("Creating new XPU context for device ID: {}", device_id);
        let context = XpuContext {
            device_id,
            allocator: XpuAllocator::new(device_id, config.memory_limit),
            x_context: XContext::new(device_id, XpuStream::new(config.non_blocking)),
        };
        info!("Successfully created XPU context for device ID: {}", device_id);
        Ok(context)
    }

    /// Creates a context on device 0 with the process-wide runtime configuration.
    pub fn default_device() -> Result<Self, XpuBackendError> {
        let config = initialize_xpu_with_logging()?;
        Self::new(0, config)
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn allocator(&self) -> &XpuAllocator {
        &self.allocator
    }

    /// Native handle passed to vendor primitives.
    pub fn x_context(&self) -> &XContext {
        &self.x_context
    }

    pub fn synchronize(&self) -> Result<(), XpuBackendError> {
        self.x_context.stream().synchronize()
    }
}
