//! Runtime configuration for the XPU backend.
//!
//! Values come from the environment so that test runs and deployments can
//! shape the device without code changes:
//!
//! - `TENSORCLIP_XPU_DEVICE_COUNT`: number of devices exposed (default 1).
//! - `TENSORCLIP_XPU_MEMORY_LIMIT`: per-device memory budget in bytes, with an
//!   optional `K`, `M` or `G` suffix (default unlimited).
//! - `TENSORCLIP_XPU_NON_BLOCKING`: `1`/`true` to create non-blocking streams.

use crate::error::XpuBackendError;

pub const ENV_DEVICE_COUNT: &str = "TENSORCLIP_XPU_DEVICE_COUNT";
pub const ENV_MEMORY_LIMIT: &str = "TENSORCLIP_XPU_MEMORY_LIMIT";
pub const ENV_NON_BLOCKING: &str = "TENSORCLIP_XPU_NON_BLOCKING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpuConfig {
    pub device_count: u32,
    /// Per-device allocation budget in bytes. `None` means unlimited.
    pub memory_limit: Option<usize>,
    pub non_blocking: bool,
}

impl Default for XpuConfig {
    fn default() -> Self {
        XpuConfig {
            device_count: 1,
            memory_limit: None,
            non_blocking: false,
        }
    }
}

impl XpuConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, XpuBackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup. Missing keys keep
    /// their default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, XpuBackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = XpuConfig::default();

        if let Some(raw) = lookup(ENV_DEVICE_COUNT) {
            config.device_count = raw.trim().parse::<u32>().map_err(|e| {
                XpuBackendError::InvalidConfig {
                    key: ENV_DEVICE_COUNT.to_string(),
                    message: format!("'{}' is not a device count: {}", raw, e),
                }
            })?;
        }
        if let Some(raw) = lookup(ENV_MEMORY_LIMIT) {
            config.memory_limit = Some(parse_memory_size(&raw)?);
        }
        if let Some(raw) = lookup(ENV_NON_BLOCKING) {
            config.non_blocking = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(XpuBackendError::InvalidConfig {
                        key: ENV_NON_BLOCKING.to_string(),
                        message: format!("'{}' is not a boolean", other),
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    pub fn with_device_count(mut self, count: u32) -> Self {
        self.device_count = count;
        self
    }
}

/// Parses a byte count such as `4096`, `64K`, `512M` or `2G`.
pub fn parse_memory_size(raw: &str) -> Result<usize, XpuBackendError> {
    let invalid = |message: String| XpuBackendError::InvalidConfig {
        key: ENV_MEMORY_LIMIT.to_string(),
        message,
    };
    let trimmed = raw.trim();
    let (digits, multiplier) = match trimmed.chars().last() {
        Some('K') | Some('k') => (&trimmed[..trimmed.len() - 1], 1usize << 10),
        Some('M') | Some('m') => (&trimmed[..trimmed.len() - 1], 1usize << 20),
        Some('G') | Some('g') => (&trimmed[..trimmed.len() - 1], 1usize << 30),
        Some(_) => (trimmed, 1usize),
        None => return Err(invalid("empty memory size".to_string())),
    };
    let value = digits
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(format!("'{}' is not a memory size: {}", raw, e)))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| invalid(format!("'{}' overflows usize", raw)))
}
