//! Firmware command channel ("hardware monitor").

use crate::command_transfer::CommandTransfer;
use crate::consts::hw_monitor;
use crate::error::{Error, Result};
use log::trace;

/// A firmware command with up to four parameters and an optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FwCommand {
    pub op_code: u8,
    pub param1: u32,
    pub param2: u32,
    pub param3: u32,
    pub param4: u32,
    pub data: Vec<u8>,
    pub timeout_ms: u32,
    pub require_response: bool,
}

impl FwCommand {
    pub fn new(op_code: u8) -> Self {
        Self {
            op_code,
            param1: 0,
            param2: 0,
            param3: 0,
            param4: 0,
            data: Vec::new(),
            timeout_ms: hw_monitor::DEFAULT_TIMEOUT_MS,
            require_response: true,
        }
    }
}

/// Command/response access to the device firmware.
pub trait FirmwareChannel: Send + Sync {
    /// Sends `command` and returns the response payload.
    fn send(&self, command: &FwCommand) -> Result<Vec<u8>>;
}

/// [`FirmwareChannel`] framing commands over a [`CommandTransfer`].
pub struct HwMonitor<C> {
    transfer: C,
}

impl<C: CommandTransfer> HwMonitor<C> {
    pub fn new(transfer: C) -> Self {
        Self { transfer }
    }
}

impl<C: CommandTransfer> FirmwareChannel for HwMonitor<C> {
    fn send(&self, command: &FwCommand) -> Result<Vec<u8>> {
        let request = build_request(command)?;
        trace!(
            "HW monitor op 0x{:02X}: {} byte request",
            command.op_code,
            request.len()
        );
        let response =
            self.transfer
                .send_receive(&request, command.timeout_ms, command.require_response)?;
        if !command.require_response {
            return Ok(Vec::new());
        }
        parse_response(command.op_code, &response)
    }
}

/// Serializes `command` into a request frame.
///
/// Layout (little-endian): `len:u16 magic:u16 op:u32 p1..p4:u32 data`,
/// where `len` counts every byte after the magic.
pub fn build_request(command: &FwCommand) -> Result<Vec<u8>> {
    let total = hw_monitor::REQUEST_HEADER_SIZE + command.data.len();
    if total > hw_monitor::BUFFER_SIZE {
        return Err(Error::OperationTooLarge {
            max: hw_monitor::BUFFER_SIZE - hw_monitor::REQUEST_HEADER_SIZE,
            actual: command.data.len(),
        });
    }

    let mut frame = Vec::with_capacity(total);
    frame.extend_from_slice(&((total - 4) as u16).to_le_bytes());
    frame.extend_from_slice(&hw_monitor::MAGIC.to_le_bytes());
    frame.extend_from_slice(&u32::from(command.op_code).to_le_bytes());
    for param in [command.param1, command.param2, command.param3, command.param4] {
        frame.extend_from_slice(&param.to_le_bytes());
    }
    frame.extend_from_slice(&command.data);
    Ok(frame)
}

/// Checks the echoed op code and strips it from `response`.
pub fn parse_response(op_code: u8, response: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = match response.split_first_chunk::<{ hw_monitor::HEADER_SIZE }>() {
        Some(split) => split,
        None => {
            return Err(Error::InvalidResponse(format!(
                "response too short ({} bytes)",
                response.len()
            )))
        }
    };
    let echoed = u32::from_le_bytes(*header);
    if echoed != u32::from(op_code) {
        return Err(Error::InvalidResponse(format!(
            "op code mismatch (sent 0x{:02X}, device returned 0x{:08X})",
            op_code, echoed
        )));
    }
    Ok(payload.to_vec())
}
