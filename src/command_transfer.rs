//! Command/response transport carried over an extension-unit control.

use crate::consts::hw_monitor;
use crate::device::{ExtensionUnit, UvcEndpoint};
use crate::error::{Error, Result};
use crate::xu::XuScalar;
use log::trace;
use std::sync::{Arc, Mutex, PoisonError};

/// A raw request/response byte transport.
pub trait CommandTransfer: Send + Sync {
    /// Sends `data` and, if `require_response` is set, returns the reply.
    /// Without a response the returned vector is empty.
    fn send_receive(&self, data: &[u8], timeout_ms: u32, require_response: bool)
        -> Result<Vec<u8>>;
}

/// [`CommandTransfer`] implemented as a write/read pair on one XU control.
///
/// The request is written to the control; the reply is read back from the
/// same control as a fixed [`hw_monitor::BUFFER_SIZE`] byte block whose
/// payload length is stored in its last four bytes.
pub struct CommandTransferOverXu {
    endpoint: Arc<UvcEndpoint>,
    xu: ExtensionUnit,
    control: u8,
    // Keeps write/read pairs from interleaving.
    exchange: Mutex<()>,
}

impl CommandTransferOverXu {
    pub fn new(endpoint: Arc<UvcEndpoint>, xu: ExtensionUnit, control: u8) -> Self {
        Self {
            endpoint,
            xu,
            control,
            exchange: Mutex::new(()),
        }
    }
}

impl CommandTransfer for CommandTransferOverXu {
    fn send_receive(
        &self,
        data: &[u8],
        _timeout_ms: u32,
        require_response: bool,
    ) -> Result<Vec<u8>> {
        if data.len() > hw_monitor::BUFFER_SIZE {
            return Err(Error::OperationTooLarge {
                max: hw_monitor::BUFFER_SIZE,
                actual: data.len(),
            });
        }

        let _exchange = self.exchange.lock().unwrap_or_else(PoisonError::into_inner);
        self.endpoint.invoke_powered(|dev| {
            trace!(
                "XU {} ctrl 0x{:02X} command ({} bytes): {:02X?}",
                self.xu.unit,
                self.control,
                data.len(),
                data
            );
            dev.set_xu(&self.xu, self.control, data)?;
            if !require_response {
                return Ok(Vec::new());
            }

            let mut result = vec![0u8; hw_monitor::BUFFER_SIZE];
            dev.get_xu(&self.xu, self.control, &mut result)?;
            let payload = u32::from_le_slice(&result[hw_monitor::DATA_SIZE_OFFSET..])? as usize;
            let size = payload.saturating_add(hw_monitor::HEADER_SIZE);
            if size > hw_monitor::BUFFER_SIZE {
                return Err(Error::InvalidResponse(format!(
                    "declared response size {} exceeds buffer size {}",
                    size,
                    hw_monitor::BUFFER_SIZE
                )));
            }
            result.truncate(size);
            trace!("XU {} ctrl 0x{:02X} response: {:02X?}", self.xu.unit, self.control, result);
            Ok(result)
        })
    }
}
