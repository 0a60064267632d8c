use crate::option::OptionId;
use thiserror::Error;

/// Errors that can occur when using device options.
///
/// This enum covers the sequencing errors raised by the options themselves
/// as well as the transport errors reported by UVC devices and firmware
/// channels. Transport errors are passed through options unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// An API was called in an order the object does not allow
    /// (e.g. starting the firmware logger twice).
    #[error("Wrong API call sequence: {0}")]
    WrongApiCallSequence(String),
    /// General I/O error during device communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A power-unit control transfer was rejected by the device.
    #[error("Power-unit control {option} transfer failed: {message}")]
    PuTransfer {
        /// The control being accessed.
        option: OptionId,
        /// Backend-specific error details.
        message: String,
    },
    /// An extension-unit control transfer was rejected by the device.
    #[error("Extension unit {unit} control 0x{control:02X} transfer failed: {message}")]
    XuTransfer {
        /// The extension unit id.
        unit: u8,
        /// The control selector within the unit.
        control: u8,
        /// Backend-specific error details.
        message: String,
    },
    /// The device could not be moved into the requested power state.
    #[error("Failed to switch device power state to {state:?}: {message}")]
    PowerState {
        /// The state that was requested.
        state: crate::device::PowerState,
        /// Backend-specific error details.
        message: String,
    },
    /// Timeout waiting for device response.
    #[error("Timeout waiting for device response")]
    Timeout,
    /// Invalid or malformed response received from the device.
    #[error("Invalid response received from device: {0}")]
    InvalidResponse(String),
    /// Provided buffer is smaller than required for the operation.
    #[error("Provided buffer is too small (expected at least {expected}, got {actual})")]
    BufferTooSmall {
        /// Minimum required buffer size.
        expected: usize,
        /// Actual buffer size provided.
        actual: usize,
    },
    /// Requested operation exceeds device or protocol limits.
    #[error("Requested operation size is too large (max {max}, got {actual})")]
    OperationTooLarge {
        /// Maximum allowed size for this operation.
        max: usize,
        /// Actual size requested.
        actual: usize,
    },
    /// The requested option is not present in the option table.
    #[error("Option {0} is not supported by this device")]
    UnsupportedOption(OptionId),
}

/// Result type alias for option operations.
///
/// This is a convenience alias for `std::result::Result<T, Error>` used
/// throughout the crate to reduce boilerplate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn logger_already_started() -> Error {
    Error::WrongApiCallSequence("FW logger already started".to_string())
}
pub(crate) fn logger_not_started() -> Error {
    Error::WrongApiCallSequence("FW logger not started".to_string())
}
