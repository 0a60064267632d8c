//! Shared mocks for option tests.
//!
//! These mocks simulate a UVC device and a firmware channel in memory so the
//! option logic can be exercised without hardware.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uvc_options::limits::{HW_MONITOR_BUFFER_SIZE, HW_MONITOR_DATA_SIZE_OFFSET};
use uvc_options::{
    ControlRange, Error, ExtensionUnit, FirmwareChannel, FwCommand, OptionId, PowerState, PuRange,
    Result, UvcDevice, UvcEndpoint,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_xu() -> ExtensionUnit {
    ExtensionUnit {
        subdevice: 0,
        unit: 3,
        node: 2,
        guid: [
            0xC9, 0x60, 0x6C, 0xC9, 0x65, 0xBB, 0x4B, 0x22, 0x91, 0x3C, 0x49, 0x3C, 0x85, 0x90,
            0x46, 0x2E,
        ],
    }
}

/// Builds a full XU response block: echoed op code, payload, size trailer.
pub fn hw_response(op_code: u8, payload: &[u8]) -> Vec<u8> {
    let mut block = vec![0u8; HW_MONITOR_BUFFER_SIZE];
    block[..4].copy_from_slice(&u32::from(op_code).to_le_bytes());
    block[4..4 + payload.len()].copy_from_slice(payload);
    block[HW_MONITOR_DATA_SIZE_OFFSET..].copy_from_slice(&(payload.len() as u32).to_le_bytes());
    block
}

struct MockState {
    power: PowerState,
    power_transitions: Vec<PowerState>,
    unpowered_accesses: usize,
    pu_values: HashMap<OptionId, i32>,
    pu_ranges: HashMap<OptionId, PuRange>,
    xu_registers: HashMap<u8, Vec<u8>>,
    xu_ranges: HashMap<u8, ControlRange>,
    xu_responses: HashMap<u8, Vec<u8>>,
    xu_writes: Vec<(u8, Vec<u8>)>,
    fail_transfers: bool,
    fail_power_up: bool,
}

/// In-memory UVC device.
pub struct MockUvcDevice {
    state: Mutex<MockState>,
}

impl MockUvcDevice {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                power: PowerState::D3,
                power_transitions: Vec::new(),
                unpowered_accesses: 0,
                pu_values: HashMap::new(),
                pu_ranges: HashMap::new(),
                xu_registers: HashMap::new(),
                xu_ranges: HashMap::new(),
                xu_responses: HashMap::new(),
                xu_writes: Vec::new(),
                fail_transfers: false,
                fail_power_up: false,
            }),
        }
    }

    /// Starts the device in `power` instead of D3.
    pub fn with_power(self, power: PowerState) -> Self {
        self.state.lock().unwrap().power = power;
        self
    }

    pub fn with_pu(self, id: OptionId, value: i32, range: PuRange) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.pu_values.insert(id, value);
            state.pu_ranges.insert(id, range);
        }
        self
    }

    pub fn with_xu(self, ctrl: u8, value: Vec<u8>, range: ControlRange) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.xu_registers.insert(ctrl, value);
            state.xu_ranges.insert(ctrl, range);
        }
        self
    }

    /// Makes every `get_xu` on `ctrl` return `block` instead of the register.
    pub fn set_xu_response(&self, ctrl: u8, block: Vec<u8>) {
        self.state.lock().unwrap().xu_responses.insert(ctrl, block);
    }

    pub fn set_fail_transfers(&self, fail: bool) {
        self.state.lock().unwrap().fail_transfers = fail;
    }

    pub fn set_fail_power_up(&self, fail: bool) {
        self.state.lock().unwrap().fail_power_up = fail;
    }

    pub fn power_state(&self) -> PowerState {
        self.state.lock().unwrap().power
    }

    pub fn power_transitions(&self) -> Vec<PowerState> {
        self.state.lock().unwrap().power_transitions.clone()
    }

    pub fn unpowered_accesses(&self) -> usize {
        self.state.lock().unwrap().unpowered_accesses
    }

    pub fn xu_writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state.lock().unwrap().xu_writes.clone()
    }

    pub fn pu_value(&self, id: OptionId) -> Option<i32> {
        self.state.lock().unwrap().pu_values.get(&id).copied()
    }

    fn access(&self) -> std::sync::MutexGuard<'_, MockState> {
        let mut state = self.state.lock().unwrap();
        if state.power != PowerState::D0 {
            state.unpowered_accesses += 1;
        }
        state
    }
}

fn pu_error(option: OptionId) -> Error {
    Error::PuTransfer {
        option,
        message: "mock transfer failure".to_string(),
    }
}

fn xu_error(xu: &ExtensionUnit, control: u8) -> Error {
    Error::XuTransfer {
        unit: xu.unit,
        control,
        message: "mock transfer failure".to_string(),
    }
}

impl UvcDevice for MockUvcDevice {
    fn set_power_state(&self, state: PowerState) -> Result<()> {
        let mut inner = self.state.lock().unwrap();
        if state == PowerState::D0 && inner.fail_power_up {
            return Err(Error::PowerState {
                state,
                message: "mock power failure".to_string(),
            });
        }
        inner.power = state;
        inner.power_transitions.push(state);
        Ok(())
    }

    fn get_power_state(&self) -> PowerState {
        self.state.lock().unwrap().power
    }

    fn get_pu(&self, option: OptionId) -> Result<i32> {
        let state = self.access();
        if state.fail_transfers {
            return Err(pu_error(option));
        }
        state.pu_values.get(&option).copied().ok_or(pu_error(option))
    }

    fn set_pu(&self, option: OptionId, value: i32) -> Result<()> {
        let mut state = self.access();
        if state.fail_transfers || !state.pu_values.contains_key(&option) {
            return Err(pu_error(option));
        }
        state.pu_values.insert(option, value);
        Ok(())
    }

    fn get_pu_range(&self, option: OptionId) -> Result<PuRange> {
        let state = self.access();
        if state.fail_transfers {
            return Err(pu_error(option));
        }
        state.pu_ranges.get(&option).copied().ok_or(pu_error(option))
    }

    fn get_xu(&self, xu: &ExtensionUnit, ctrl: u8, data: &mut [u8]) -> Result<()> {
        let state = self.access();
        if state.fail_transfers {
            return Err(xu_error(xu, ctrl));
        }
        let source = state
            .xu_responses
            .get(&ctrl)
            .or_else(|| state.xu_registers.get(&ctrl))
            .ok_or(xu_error(xu, ctrl))?;
        data.fill(0);
        let len = source.len().min(data.len());
        data[..len].copy_from_slice(&source[..len]);
        Ok(())
    }

    fn set_xu(&self, xu: &ExtensionUnit, ctrl: u8, data: &[u8]) -> Result<()> {
        let mut state = self.access();
        if state.fail_transfers {
            return Err(xu_error(xu, ctrl));
        }
        state.xu_writes.push((ctrl, data.to_vec()));
        state.xu_registers.insert(ctrl, data.to_vec());
        Ok(())
    }

    fn get_xu_range(&self, xu: &ExtensionUnit, ctrl: u8, _len: usize) -> Result<ControlRange> {
        let state = self.access();
        if state.fail_transfers {
            return Err(xu_error(xu, ctrl));
        }
        state.xu_ranges.get(&ctrl).cloned().ok_or(xu_error(xu, ctrl))
    }
}

/// Wraps `device` in an endpoint, keeping a typed handle for inspection.
pub fn endpoint_for(device: MockUvcDevice) -> (Arc<MockUvcDevice>, Arc<UvcEndpoint>) {
    let device = Arc::new(device);
    let endpoint = Arc::new(UvcEndpoint::new(device.clone()));
    (device, endpoint)
}

/// Firmware channel returning a fixed reply and counting calls.
pub struct MockFirmware {
    calls: AtomicUsize,
    fail: AtomicBool,
    reply: Mutex<Vec<u8>>,
    last_command: Mutex<Option<FwCommand>>,
}

impl MockFirmware {
    pub fn new(reply: Vec<u8>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            reply: Mutex::new(reply),
            last_command: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_reply(&self, reply: Vec<u8>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn last_command(&self) -> Option<FwCommand> {
        self.last_command.lock().unwrap().clone()
    }
}

impl FirmwareChannel for MockFirmware {
    fn send(&self, command: &FwCommand) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_command.lock().unwrap() = Some(command.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Timeout);
        }
        Ok(self.reply.lock().unwrap().clone())
    }
}

/// Polls `condition` every few milliseconds until it holds or `timeout_ms` elapses.
pub fn wait_until(timeout_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + std::time::Duration::from_millis(timeout_ms);
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    condition()
}
