//! UVC device capability and the power-managed endpoint wrapping it.

use crate::error::{Error, Result};
use crate::option::OptionId;
use crate::xu::XuScalar;
use log::{debug, trace, warn};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// USB device power states used by the endpoint power manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Fully powered.
    D0,
    /// Suspended.
    D3,
}

/// Addresses a vendor extension unit on a UVC device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionUnit {
    /// Index of the sub-device (interface) exposing the unit.
    pub subdevice: u8,
    /// Unit id as reported in the UVC descriptors.
    pub unit: u8,
    /// Topology node of the unit.
    pub node: u8,
    /// Vendor GUID identifying the unit layout.
    pub guid: [u8; 16],
}

/// Raw range of a control as reported by GET_MIN/GET_MAX/GET_RES/GET_DEF.
///
/// Every bound is kept as the little-endian bytes the device returned;
/// interpretation (width, signedness) is up to the option reading it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlRange {
    pub min: Vec<u8>,
    pub max: Vec<u8>,
    pub step: Vec<u8>,
    pub def: Vec<u8>,
}

impl ControlRange {
    /// Builds a range from typed bounds (min, max, step, default).
    pub fn from_values<T: XuScalar>(min: T, max: T, step: T, def: T) -> Self {
        Self {
            min: min.to_le_vec(),
            max: max.to_le_vec(),
            step: step.to_le_vec(),
            def: def.to_le_vec(),
        }
    }

    /// Decodes all four bounds as `T`, in (min, max, step, default) order.
    pub fn decode<T: XuScalar>(&self) -> Result<(T, T, T, T)> {
        Ok((
            T::from_le_slice(&self.min)?,
            T::from_le_slice(&self.max)?,
            T::from_le_slice(&self.step)?,
            T::from_le_slice(&self.def)?,
        ))
    }
}

/// Range of a power-unit control, widened to `i32`.
///
/// Standard PU controls are 1, 2 or 4 bytes wide on the wire. Backends must
/// widen signed controls with sign extension (a 2-byte brightness minimum of
/// `0xFFC0` is `-64`, not `65472`); [`PuRange::from_control_range`] does this
/// for raw replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuRange {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub def: i32,
}

impl PuRange {
    pub fn new(min: i32, max: i32, step: i32, def: i32) -> Self {
        Self {
            min,
            max,
            step,
            def,
        }
    }

    /// Widens a raw range whose bounds are 1, 2 or 4 little-endian bytes each.
    pub fn from_control_range(raw: &ControlRange, signed: bool) -> Result<Self> {
        Ok(Self {
            min: widen(&raw.min, signed)?,
            max: widen(&raw.max, signed)?,
            step: widen(&raw.step, signed)?,
            def: widen(&raw.def, signed)?,
        })
    }
}

fn widen(bytes: &[u8], signed: bool) -> Result<i32> {
    Ok(match (bytes.len(), signed) {
        (1, true) => i32::from(i8::from_le_slice(bytes)?),
        (1, false) => i32::from(u8::from_le_slice(bytes)?),
        (2, true) => i32::from(i16::from_le_slice(bytes)?),
        (2, false) => i32::from(u16::from_le_slice(bytes)?),
        (4, _) => i32::from_le_slice(bytes)?,
        (len, _) => {
            return Err(Error::InvalidResponse(format!(
                "unsupported PU control width: {} bytes",
                len
            )))
        }
    })
}

/// Transport capability of a UVC device.
///
/// Implemented by platform backends (and by mocks in tests). Options never
/// call these methods directly; they go through [`UvcEndpoint::invoke_powered`].
pub trait UvcDevice: Send + Sync {
    fn set_power_state(&self, state: PowerState) -> Result<()>;
    /// Current power state; consulted before the first power scope opens.
    fn get_power_state(&self) -> PowerState;

    // --- Power-unit controls ---
    fn get_pu(&self, option: OptionId) -> Result<i32>;
    fn set_pu(&self, option: OptionId, value: i32) -> Result<()>;
    /// Range of a PU control, sign-extended to `i32` for signed controls.
    fn get_pu_range(&self, option: OptionId) -> Result<PuRange>;

    // --- Extension-unit controls ---
    /// Reads exactly `data.len()` bytes from control `ctrl` of `xu`.
    fn get_xu(&self, xu: &ExtensionUnit, ctrl: u8, data: &mut [u8]) -> Result<()>;
    /// Writes `data` to control `ctrl` of `xu`.
    fn set_xu(&self, xu: &ExtensionUnit, ctrl: u8, data: &[u8]) -> Result<()>;
    /// Reads the range of a `len`-byte control.
    fn get_xu_range(&self, xu: &ExtensionUnit, ctrl: u8, len: usize) -> Result<ControlRange>;
}

/// A UVC device together with its power user count.
///
/// Every hardware access by an option is wrapped in [`invoke_powered`](Self::invoke_powered),
/// which powers the device up for the first user and back down when the
/// last user is done. Power scopes do **not** serialize access to the device.
pub struct UvcEndpoint {
    device: Arc<dyn UvcDevice>,
    user_count: Mutex<usize>,
}

impl fmt::Debug for UvcEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UvcEndpoint")
            .field("user_count", &self.user_count())
            .finish_non_exhaustive()
    }
}

impl UvcEndpoint {
    pub fn new(device: Arc<dyn UvcDevice>) -> Self {
        Self {
            device,
            user_count: Mutex::new(0),
        }
    }

    /// The wrapped device.
    pub fn device(&self) -> &Arc<dyn UvcDevice> {
        &self.device
    }

    /// Number of live power scopes.
    pub fn user_count(&self) -> usize {
        *self.lock_count()
    }

    /// Runs `action` with the device guaranteed powered.
    ///
    /// Power is released on every exit path, including when `action` fails.
    /// Errors from `action` are returned unchanged.
    pub fn invoke_powered<F, R>(&self, action: F) -> Result<R>
    where
        F: FnOnce(&dyn UvcDevice) -> Result<R>,
    {
        let _power = self.acquire_power()?;
        action(self.device.as_ref())
    }

    /// Opens a power scope that lasts until the returned guard is dropped.
    pub fn acquire_power(&self) -> Result<PowerGuard<'_>> {
        let mut count = self.lock_count();
        if *count == 0 {
            if self.device.get_power_state() == PowerState::D0 {
                trace!("UVC device already in D0");
            } else {
                debug!("Powering up UVC device (D0)");
                self.device.set_power_state(PowerState::D0)?;
            }
        }
        *count += 1;
        trace!("Power acquired, user count = {}", *count);
        Ok(PowerGuard { endpoint: self })
    }

    fn release_power(&self) {
        let mut count = self.lock_count();
        *count = count.saturating_sub(1);
        trace!("Power released, user count = {}", *count);
        if *count == 0 {
            debug!("Suspending UVC device (D3)");
            if let Err(e) = self.device.set_power_state(PowerState::D3) {
                warn!("Failed to suspend UVC device: {}", e);
            }
        }
    }

    fn lock_count(&self) -> MutexGuard<'_, usize> {
        self.user_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the endpoint powered while alive.
#[must_use = "power is released as soon as the guard is dropped"]
pub struct PowerGuard<'a> {
    endpoint: &'a UvcEndpoint,
}

impl Drop for PowerGuard<'_> {
    fn drop(&mut self) {
        self.endpoint.release_power();
    }
}
