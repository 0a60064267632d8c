//! Firmware log poller exposed as an on/off option.
//!
//! Setting the option to `1` spawns a background thread that periodically
//! asks the firmware for pending log data and emits every non-empty reply
//! as a single `info!` line:
//!
//! ```text
//! FW_Log_Data:0A FF 01 02 
//! ```
//!
//! Setting it to `0` stops the thread and waits for it to exit. The thread
//! only holds a weak reference to the firmware channel, so it never keeps
//! the device alive; polls made while the channel is gone are skipped.

use crate::consts::fw_log;
use crate::error::{logger_already_started, logger_not_started, Error, Result};
use crate::hw_monitor::{FirmwareChannel, FwCommand};
use crate::option::DeviceOption;
use crate::range::OptionRange;
use log::{debug, info, trace, warn};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Poller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FwLoggerConfig {
    /// Op code of the log-retrieval command.
    pub op_code: u8,
    /// Delay before each poll.
    pub poll_interval: Duration,
    /// Requested payload size, sent as the command's first parameter.
    pub payload_size: u32,
}

impl Default for FwLoggerConfig {
    fn default() -> Self {
        Self {
            op_code: fw_log::DEFAULT_OP_CODE,
            poll_interval: fw_log::DEFAULT_POLL_INTERVAL,
            payload_size: fw_log::DEFAULT_PAYLOAD_SIZE,
        }
    }
}

/// Formats one byte as two upper-case hex digits.
pub fn hexify(byte: u8) -> String {
    format!("{:02X}", byte)
}

/// Formats a log payload as space-terminated hex bytes (`[1, 2]` -> `"01 02 "`).
pub fn format_log_payload(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for byte in data {
        let _ = write!(out, "{:02X} ", byte);
    }
    out
}

/// Full log line as emitted by the poller.
pub fn format_log_line(data: &[u8]) -> String {
    format!("{}{}", fw_log::LINE_TAG, format_log_payload(data))
}

/// Option toggling the firmware log poller.
pub struct FwLoggerOption {
    running: Arc<AtomicBool>,
    config: FwLoggerConfig,
    hw: Weak<dyn FirmwareChannel>,
    description: String,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl FwLoggerOption {
    pub fn new(
        hw: Weak<dyn FirmwareChannel>,
        config: FwLoggerConfig,
        description: impl Into<String>,
    ) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            config,
            hw,
            description: description.into(),
            worker: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &FwLoggerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawns the poller thread.
    ///
    /// Fails with [`Error::WrongApiCallSequence`] if it is already running.
    pub fn start(&self) -> Result<()> {
        // Held until the handle is stored so a concurrent `stop` always joins it.
        let mut worker = self.lock_worker();
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(logger_already_started());
        }

        let mut command = FwCommand::new(self.config.op_code);
        command.param1 = self.config.payload_size;
        let running = Arc::clone(&self.running);
        let hw = self.hw.clone();
        let interval = self.config.poll_interval;

        let spawned = thread::Builder::new()
            .name(fw_log::THREAD_NAME.to_string())
            .spawn(move || poll_loop(&running, &hw, &command, interval));
        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                debug!(
                    "FW logger started (op code 0x{:02X}, interval {:?})",
                    self.config.op_code, interval
                );
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(Error::Io(e))
            }
        }
    }

    /// Signals the poller to stop and waits until its thread has exited.
    ///
    /// Fails with [`Error::WrongApiCallSequence`] if it is not running.
    pub fn stop(&self) -> Result<()> {
        let mut worker = self.lock_worker();
        if self
            .running
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(logger_not_started());
        }

        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                warn!("FW logger thread panicked");
            }
        }
        debug!("FW logger stopped");
        Ok(())
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FwLoggerOption {
    fn drop(&mut self) {
        if self.is_running() {
            if let Err(e) = self.stop() {
                debug!("Ignoring FW logger stop error on drop: {}", e);
            }
        }
    }
}

impl DeviceOption for FwLoggerOption {
    fn set(&self, value: f32) -> Result<()> {
        if value >= 1.0 {
            self.start()
        } else {
            self.stop()
        }
    }

    fn query(&self) -> Result<f32> {
        Ok(if self.is_running() { 1.0 } else { 0.0 })
    }

    fn get_range(&self) -> Result<OptionRange> {
        Ok(OptionRange::toggle())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn get_description(&self) -> Option<&str> {
        Some(self.description.as_str())
    }
}

fn poll_loop(
    running: &AtomicBool,
    hw: &Weak<dyn FirmwareChannel>,
    command: &FwCommand,
    interval: Duration,
) {
    trace!("FW logger thread running");
    while running.load(Ordering::SeqCst) {
        thread::sleep(interval);

        let Some(channel) = hw.upgrade() else {
            trace!("Firmware channel gone, skipping FW log poll");
            continue;
        };
        match channel.send(command) {
            Ok(data) if data.is_empty() => {}
            Ok(data) => info!("{}", format_log_line(&data)),
            // Failed polls are dropped; the next interval retries.
            Err(e) => trace!("FW log poll failed: {}", e),
        }
    }
    trace!("FW logger thread exiting");
}
