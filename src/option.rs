//! The uniform option contract and setting identifiers.

use crate::error::Result;
use crate::range::OptionRange;
use std::fmt;

/// Identifies a user-visible device setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionId {
    BacklightCompensation,
    Brightness,
    Contrast,
    Exposure,
    Gain,
    Gamma,
    Hue,
    Saturation,
    Sharpness,
    WhiteBalance,
    EnableAutoExposure,
    EnableAutoWhiteBalance,
    PowerLineFrequency,
    AutoExposurePriority,
    // Vendor (extension unit / struct backed) settings
    LaserPower,
    EmitterEnabled,
    Accuracy,
    MotionRange,
    FilterOption,
    ConfidenceThreshold,
    FwLogging,
}

impl OptionId {
    /// Human-readable name of the setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionId::BacklightCompensation => "Backlight Compensation",
            OptionId::Brightness => "Brightness",
            OptionId::Contrast => "Contrast",
            OptionId::Exposure => "Exposure",
            OptionId::Gain => "Gain",
            OptionId::Gamma => "Gamma",
            OptionId::Hue => "Hue",
            OptionId::Saturation => "Saturation",
            OptionId::Sharpness => "Sharpness",
            OptionId::WhiteBalance => "White Balance",
            OptionId::EnableAutoExposure => "Enable Auto Exposure",
            OptionId::EnableAutoWhiteBalance => "Enable Auto White Balance",
            OptionId::PowerLineFrequency => "Power Line Frequency",
            OptionId::AutoExposurePriority => "Auto Exposure Priority",
            OptionId::LaserPower => "Laser Power",
            OptionId::EmitterEnabled => "Emitter Enabled",
            OptionId::Accuracy => "Accuracy",
            OptionId::MotionRange => "Motion Range",
            OptionId::FilterOption => "Filter Option",
            OptionId::ConfidenceThreshold => "Confidence Threshold",
            OptionId::FwLogging => "FW Logging",
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single configurable device setting.
///
/// Every backing store (power-unit controls, extension-unit registers,
/// cached struct fields, the firmware log poller) implements this trait,
/// so setting tables can drive them without knowing the backing kind.
///
/// Values travel as `f32` regardless of the native width of the backing
/// store. No range checking is done here; out-of-range writes are rejected
/// (or clamped) by the backing store itself.
pub trait DeviceOption: Send + Sync {
    /// Writes a new value to the backing store.
    fn set(&self, value: f32) -> Result<()>;

    /// Reads the current value from the backing store.
    fn query(&self) -> Result<f32>;

    /// Returns the legal domain. Hardware-backed options may query the device.
    fn get_range(&self) -> Result<OptionRange>;

    /// Whether the setting is currently usable.
    fn is_enabled(&self) -> bool;

    /// Static description of the setting, if any.
    fn get_description(&self) -> Option<&str>;

    /// Label for a specific value (e.g. for enum-valued settings).
    fn get_value_description(&self, _value: f32) -> Option<&str> {
        None
    }
}
