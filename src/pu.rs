//! Options backed by standard UVC power-unit (processing unit) controls.

use crate::consts::power_line;
use crate::device::UvcEndpoint;
use crate::error::Result;
use crate::option::{DeviceOption, OptionId};
use crate::range::OptionRange;
use log::trace;
use std::sync::Arc;

/// An option mapped onto a standard power-unit control of a UVC endpoint.
pub struct UvcPuOption {
    endpoint: Arc<UvcEndpoint>,
    id: OptionId,
}

impl UvcPuOption {
    pub fn new(endpoint: Arc<UvcEndpoint>, id: OptionId) -> Self {
        Self { endpoint, id }
    }

    /// The control this option drives.
    pub fn id(&self) -> OptionId {
        self.id
    }
}

impl DeviceOption for UvcPuOption {
    fn set(&self, value: f32) -> Result<()> {
        trace!("PU {} <- {}", self.id, value);
        self.endpoint
            .invoke_powered(|dev| dev.set_pu(self.id, value as i32))
    }

    fn query(&self) -> Result<f32> {
        let value = self.endpoint.invoke_powered(|dev| dev.get_pu(self.id))?;
        trace!("PU {} -> {}", self.id, value);
        Ok(value as f32)
    }

    fn get_range(&self) -> Result<OptionRange> {
        let range = self
            .endpoint
            .invoke_powered(|dev| dev.get_pu_range(self.id))?;
        trace!("PU {} range {:?}", self.id, range);
        Ok(OptionRange::new(
            range.min as f32,
            range.max as f32,
            range.step as f32,
            range.def as f32,
        ))
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn get_description(&self) -> Option<&str> {
        Some(match self.id {
            OptionId::BacklightCompensation => "Enable / disable backlight compensation",
            OptionId::Brightness => "UVC image brightness",
            OptionId::Contrast => "UVC image contrast",
            OptionId::Exposure => {
                "Controls exposure time of color camera. Setting any value will disable auto exposure"
            }
            OptionId::Gain => "UVC image gain",
            OptionId::Gamma => "UVC image gamma setting",
            OptionId::Hue => "UVC image hue",
            OptionId::Saturation => "UVC image saturation setting",
            OptionId::Sharpness => "UVC image sharpness setting",
            OptionId::WhiteBalance => {
                "Controls white balance of color image. Setting any value will disable auto white balance"
            }
            OptionId::EnableAutoExposure => "Enable / disable auto-exposure",
            OptionId::EnableAutoWhiteBalance => "Enable / disable auto-white-balance",
            OptionId::PowerLineFrequency => "Power Line Frequency",
            OptionId::AutoExposurePriority => {
                "Limit exposure time when auto-exposure is ON to preserve constant fps rate"
            }
            other => other.as_str(),
        })
    }

    fn get_value_description(&self, value: f32) -> Option<&str> {
        match self.id {
            OptionId::PowerLineFrequency => match value as i32 {
                power_line::DISABLED => Some("Disabled"),
                power_line::HZ_50 => Some("50Hz"),
                power_line::HZ_60 => Some("60Hz"),
                power_line::AUTO => Some("Auto"),
                _ => None,
            },
            OptionId::BacklightCompensation
            | OptionId::EnableAutoExposure
            | OptionId::EnableAutoWhiteBalance
            | OptionId::AutoExposurePriority => match value as i32 {
                0 => Some("Off"),
                1 => Some("On"),
                _ => None,
            },
            _ => None,
        }
    }
}
