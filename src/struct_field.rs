//! Options backed by fields of a cached device-state struct.

use crate::error::Result;
use crate::option::DeviceOption;
use crate::range::OptionRange;
use log::{debug, trace};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A device-state struct whose fields can be addressed by identifier.
///
/// Implementations provide the lookup table from [`Field`](Self::Field)
/// to the actual struct member, usually as a `match`:
///
/// ```
/// use uvc_options::StructFields;
///
/// #[derive(Clone, Default)]
/// struct DepthControls {
///     score_threshold: u32,
///     texture_difference: u32,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum DepthField {
///     ScoreThreshold,
///     TextureDifference,
/// }
///
/// impl StructFields for DepthControls {
///     type Field = DepthField;
///
///     fn get_field(&self, field: DepthField) -> f32 {
///         match field {
///             DepthField::ScoreThreshold => self.score_threshold as f32,
///             DepthField::TextureDifference => self.texture_difference as f32,
///         }
///     }
///
///     fn set_field(&mut self, field: DepthField, value: f32) {
///         match field {
///             DepthField::ScoreThreshold => self.score_threshold = value as u32,
///             DepthField::TextureDifference => self.texture_difference = value as u32,
///         }
///     }
/// }
/// ```
pub trait StructFields: Clone + Send {
    type Field: Copy + Debug + Send + Sync + 'static;

    fn get_field(&self, field: Self::Field) -> f32;
    fn set_field(&mut self, field: Self::Field, value: f32);
}

/// Read/write access to a device-state struct cached in memory.
///
/// The struct is read through `reader` on first access and then served
/// from the cache. Writes update a copy of the cached struct and push the
/// whole struct through `writer`; the cache only changes when that write
/// succeeds.
pub struct StructInterface<T, R, W> {
    cache: Mutex<Option<T>>,
    reader: R,
    writer: W,
}

impl<T, R, W> StructInterface<T, R, W>
where
    T: StructFields,
    R: Fn() -> Result<T> + Send + Sync,
    W: Fn(&T) -> Result<()> + Send + Sync,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            cache: Mutex::new(None),
            reader,
            writer,
        }
    }

    /// Reads one field, loading the struct from the device if not cached.
    pub fn get(&self, field: T::Field) -> Result<f32> {
        let mut cache = self.lock_cache();
        let value = self.load(&mut cache)?.get_field(field);
        trace!("Struct field {:?} -> {}", field, value);
        Ok(value)
    }

    /// Updates one field and writes the whole struct back to the device.
    pub fn set(&self, field: T::Field, value: f32) -> Result<()> {
        let mut cache = self.lock_cache();
        let mut updated = self.load(&mut cache)?.clone();
        updated.set_field(field, value);
        trace!("Struct field {:?} <- {}", field, value);
        (self.writer)(&updated)?;
        *cache = Some(updated);
        Ok(())
    }

    /// Drops the cached struct so the next access reads it again.
    pub fn invalidate(&self) {
        debug!("Invalidating cached device struct");
        *self.lock_cache() = None;
    }

    fn load<'a>(&self, cache: &'a mut Option<T>) -> Result<&'a T> {
        let value = match cache.take() {
            Some(value) => value,
            None => {
                debug!("Reading device struct");
                (self.reader)()?
            }
        };
        Ok(cache.insert(value))
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<T>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An option bound to one field of a shared [`StructInterface`].
pub struct StructFieldOption<T: StructFields, R, W> {
    interface: Arc<StructInterface<T, R, W>>,
    field: T::Field,
    range: OptionRange,
}

impl<T, R, W> StructFieldOption<T, R, W>
where
    T: StructFields,
    R: Fn() -> Result<T> + Send + Sync,
    W: Fn(&T) -> Result<()> + Send + Sync,
{
    pub fn new(interface: Arc<StructInterface<T, R, W>>, field: T::Field, range: OptionRange) -> Self {
        Self {
            interface,
            field,
            range,
        }
    }
}

impl<T, R, W> DeviceOption for StructFieldOption<T, R, W>
where
    T: StructFields,
    R: Fn() -> Result<T> + Send + Sync,
    W: Fn(&T) -> Result<()> + Send + Sync,
{
    fn set(&self, value: f32) -> Result<()> {
        self.interface.set(self.field, value)
    }

    fn query(&self) -> Result<f32> {
        self.interface.get(self.field)
    }

    fn get_range(&self) -> Result<OptionRange> {
        Ok(self.range)
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn get_description(&self) -> Option<&str> {
        None
    }
}

/// Creates a shared option for `field` of the struct behind `interface`.
pub fn make_field_option<T, R, W>(
    interface: Arc<StructInterface<T, R, W>>,
    field: T::Field,
    range: OptionRange,
) -> Arc<StructFieldOption<T, R, W>>
where
    T: StructFields,
    R: Fn() -> Result<T> + Send + Sync,
    W: Fn(&T) -> Result<()> + Send + Sync,
{
    Arc::new(StructFieldOption::new(interface, field, range))
}
