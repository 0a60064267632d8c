//! # uvc-options
//!
//! A uniform control layer over the configuration settings ("options") of a
//! UVC imaging device.
//!
//! Every setting, whatever backs it, implements the [`DeviceOption`] trait:
//! `set`, `query`, `get_range`, `is_enabled` and descriptions. Higher-level
//! code keeps the options of a device in an [`OptionTable`] keyed by
//! [`OptionId`] and never needs to know how a value actually reaches the
//! hardware.
//!
//! ## Features
//!
//! *   Power-unit controls ([`UvcPuOption`]), mapped onto standard UVC
//!     processing-unit controls such as brightness or exposure.
//! *   Extension-unit registers ([`UvcXuOption<T>`]), generic over the register
//!     width (`u8`, `i8`, `u16`, `i16`, `u32`, `i32`).
//! *   Struct-backed fields ([`StructFieldOption`]), reading and writing one
//!     member of a cached device-state struct through a shared
//!     [`StructInterface`].
//! *   Firmware log polling ([`FwLoggerOption`]), a background thread toggled
//!     through the option contract that logs firmware log payloads as hex.
//! *   Command transfer over an XU control ([`CommandTransferOverXu`]) and a
//!     framing [`HwMonitor`] on top of it, so firmware commands can travel
//!     over an extension unit.
//! *   Scoped device power: every hardware access runs inside
//!     [`UvcEndpoint::invoke_powered`], which powers the device up for the
//!     duration of the call and releases it on every exit path.
//!
//! ## Transport
//!
//! This crate does not talk to USB itself. A platform backend implements the
//! [`UvcDevice`] trait (power states, PU controls and XU controls) and is
//! wrapped in a [`UvcEndpoint`]. Errors reported by the backend are passed
//! through every option operation unchanged.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger itself. Firmware log lines are emitted at `info` level
//! with the `FW_Log_Data:` prefix; transfers are traced at `trace` level.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use uvc_options::{
//!     DeviceOption, FirmwareChannel, FwCommand, FwLoggerConfig, FwLoggerOption, OptionId,
//!     OptionTable, Result,
//! };
//!
//! struct Firmware;
//!
//! impl FirmwareChannel for Firmware {
//!     fn send(&self, _command: &FwCommand) -> Result<Vec<u8>> {
//!         Ok(vec![0x01, 0x02])
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let firmware: Arc<dyn FirmwareChannel> = Arc::new(Firmware);
//!     let mut options = OptionTable::new();
//!     options.register_option(
//!         OptionId::FwLogging,
//!         Arc::new(FwLoggerOption::new(
//!             Arc::downgrade(&firmware),
//!             FwLoggerConfig::default(),
//!             "Enable firmware log polling",
//!         )),
//!     );
//!
//!     let logging = options.get_option(OptionId::FwLogging)?;
//!     println!("Range: {:?}", logging.get_range()?);
//!     logging.set(1.0)?; // start polling
//!     std::thread::sleep(std::time::Duration::from_secs(1));
//!     logging.set(0.0)?; // stop and join the poller
//!     Ok(())
//! }
//! ```
//!
//! ## License
//!
//! This project is licensed under the WTFPL - see the [LICENSE](LICENSE) file for details.

// Make internal modules private, re-export public types
mod consts;
mod error;
pub mod command_transfer;
pub mod device;
pub mod fw_logger;
pub mod hw_monitor;
pub mod option;
pub mod pu;
pub mod range;
pub mod struct_field;
pub mod table;
pub mod xu;

pub use command_transfer::{CommandTransfer, CommandTransferOverXu};
pub use device::{
    ControlRange, ExtensionUnit, PowerGuard, PowerState, PuRange, UvcDevice, UvcEndpoint,
};
pub use error::{Error, Result};
pub use fw_logger::{FwLoggerConfig, FwLoggerOption};
pub use hw_monitor::{FirmwareChannel, FwCommand, HwMonitor};
pub use option::{DeviceOption, OptionId};
pub use pu::UvcPuOption;
pub use range::OptionRange;
pub use struct_field::{make_field_option, StructFieldOption, StructFields, StructInterface};
pub use table::OptionTable;
pub use xu::{UvcXuOption, XuScalar};

/// Protocol constants needed by backend implementations.
pub mod limits {
    /// Size of the XU buffer used by [`CommandTransferOverXu`](crate::CommandTransferOverXu).
    pub use crate::consts::hw_monitor::BUFFER_SIZE as HW_MONITOR_BUFFER_SIZE;
    /// Offset of the response payload size within that buffer.
    pub use crate::consts::hw_monitor::DATA_SIZE_OFFSET as HW_MONITOR_DATA_SIZE_OFFSET;
}
