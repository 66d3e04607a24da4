//! XPU streams

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

use crate::error::XpuBackendError;

/// Number of launches a stream remembers; older entries are dropped.
pub const LAUNCH_LOG_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct LaunchLog {
    pending: usize,
    recent: VecDeque<&'static str>,
}

/// In-order work queue of a device context.
///
/// The device executes primitives as they are enqueued; the stream keeps the
/// most recent launches in order so callers can inspect what ran and in which
/// sequence.
#[derive(Debug)]
pub struct XpuStream {
    non_blocking: bool,
    log: Mutex<LaunchLog>,
}

impl XpuStream {
    pub fn new(non_blocking: bool) -> Self {
        XpuStream {
            non_blocking,
            log: Mutex::new(LaunchLog::default()),
        }
    }

    pub fn is_non_blocking(&self) -> bool {
        self.non_blocking
    }

    fn log(&self) -> MutexGuard<'_, LaunchLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn record(&self, op: &'static str) {
        trace!("XPU stream: launch {}", op);
        let mut log = self.log();
        if log.recent.len() == LAUNCH_LOG_CAPACITY {
            log.recent.pop_front();
        }
        log.recent.push_back(op);
        log.pending += 1;
    }

    /// Waits for all enqueued work. Execution is eager, so this retires the
    /// pending launches without touching the launch history.
    pub fn synchronize(&self) -> Result<(), XpuBackendError> {
        let retired = std::mem::take(&mut self.log().pending);
        debug!("XPU stream synchronized after {} launches", retired);
        Ok(())
    }

    /// Launches enqueued since the last [`XpuStream::synchronize`].
    pub fn pending_launches(&self) -> usize {
        self.log().pending
    }

    /// Names of the most recent primitives launched on this stream, oldest
    /// first. At most [`LAUNCH_LOG_CAPACITY`] entries are kept.
    pub fn launched_ops(&self) -> Vec<&'static str> {
        self.log().recent.iter().copied().collect()
    }

    pub fn clear_launch_log(&self) {
        self.log().recent.clear();
    }
}
