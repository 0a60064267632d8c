//! Per-device table of options keyed by [`OptionId`].

use crate::error::{Error, Result};
use crate::option::{DeviceOption, OptionId};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The options a device exposes, built once when the device is opened.
#[derive(Default)]
pub struct OptionTable {
    options: BTreeMap<OptionId, Arc<dyn DeviceOption>>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `option` under `id`, replacing any previous entry.
    pub fn register_option(&mut self, id: OptionId, option: Arc<dyn DeviceOption>) {
        if self.options.insert(id, option).is_some() {
            warn!("Option {} registered twice, replacing previous entry", id);
        } else {
            debug!("Registered option {}", id);
        }
    }

    pub fn supports_option(&self, id: OptionId) -> bool {
        self.options.contains_key(&id)
    }

    /// Looks up an option, failing with [`Error::UnsupportedOption`] if absent.
    pub fn get_option(&self, id: OptionId) -> Result<&Arc<dyn DeviceOption>> {
        self.options.get(&id).ok_or(Error::UnsupportedOption(id))
    }

    /// Iterates over all registered options in id order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &Arc<dyn DeviceOption>)> + '_ {
        self.options.iter().map(|(id, option)| (*id, option))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
