//! Options backed by vendor extension-unit (XU) registers.

use crate::device::{ExtensionUnit, UvcEndpoint};
use crate::error::{Error, Result};
use crate::option::DeviceOption;
use crate::range::OptionRange;
use log::trace;
use std::marker::PhantomData;
use std::sync::Arc;

/// A scalar type an XU register can hold.
///
/// Values are marshaled as `SIZE` little-endian bytes. Conversion from
/// `f32` uses `as` semantics: fractional parts are truncated toward zero
/// and out-of-range values saturate at the bounds of the type. Conversion
/// to `f32` may lose precision for 32-bit registers.
pub trait XuScalar: Copy + Send + Sync + 'static {
    /// Width of the register in bytes.
    const SIZE: usize;

    fn from_f32(value: f32) -> Self;
    fn to_f32(self) -> f32;
    fn to_le_vec(self) -> Vec<u8>;
    /// Decodes the first `SIZE` bytes of `bytes`.
    fn from_le_slice(bytes: &[u8]) -> Result<Self>;
}

macro_rules! impl_xu_scalar {
    ($($t:ty),*) => {
        $(
            impl XuScalar for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_f32(value: f32) -> Self {
                    value as $t
                }

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                fn to_le_vec(self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }

                fn from_le_slice(bytes: &[u8]) -> Result<Self> {
                    let raw = bytes
                        .get(..Self::SIZE)
                        .ok_or(Error::BufferTooSmall {
                            expected: Self::SIZE,
                            actual: bytes.len(),
                        })?;
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(raw);
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_xu_scalar!(u8, i8, u16, i16, u32, i32);

/// An option stored in a `T`-sized extension-unit register.
pub struct UvcXuOption<T: XuScalar> {
    endpoint: Arc<UvcEndpoint>,
    xu: ExtensionUnit,
    control: u8,
    description: String,
    _width: PhantomData<T>,
}

impl<T: XuScalar> UvcXuOption<T> {
    pub fn new(
        endpoint: Arc<UvcEndpoint>,
        xu: ExtensionUnit,
        control: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            xu,
            control,
            description: description.into(),
            _width: PhantomData,
        }
    }

    /// Control selector within the extension unit.
    pub fn control(&self) -> u8 {
        self.control
    }
}

impl<T: XuScalar> DeviceOption for UvcXuOption<T> {
    fn set(&self, value: f32) -> Result<()> {
        let raw = T::from_f32(value).to_le_vec();
        trace!(
            "XU {} ctrl 0x{:02X} <- {} ({:02X?})",
            self.xu.unit,
            self.control,
            value,
            raw
        );
        self.endpoint
            .invoke_powered(|dev| dev.set_xu(&self.xu, self.control, &raw))
    }

    fn query(&self) -> Result<f32> {
        self.endpoint.invoke_powered(|dev| {
            let mut raw = vec![0u8; T::SIZE];
            dev.get_xu(&self.xu, self.control, &mut raw)?;
            trace!(
                "XU {} ctrl 0x{:02X} -> {:02X?}",
                self.xu.unit,
                self.control,
                raw
            );
            Ok(T::from_le_slice(&raw)?.to_f32())
        })
    }

    fn get_range(&self) -> Result<OptionRange> {
        let range = self
            .endpoint
            .invoke_powered(|dev| dev.get_xu_range(&self.xu, self.control, T::SIZE))?;
        let (min, max, step, def) = range.decode::<T>()?;
        Ok(OptionRange::new(
            min.to_f32(),
            max.to_f32(),
            step.to_f32(),
            def.to_f32(),
        ))
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn get_description(&self) -> Option<&str> {
        Some(self.description.as_str())
    }
}
