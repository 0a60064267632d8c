//! Legal value domain of an option.

/// Describes the legal domain of a setting: bounds, increment and default.
///
/// Ranges are returned by value and never change once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionRange {
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
    /// Increment between consecutive legal values.
    pub step: f32,
    /// Value the device powers up with.
    pub def: f32,
}

impl OptionRange {
    pub const fn new(min: f32, max: f32, step: f32, def: f32) -> Self {
        Self {
            min,
            max,
            step,
            def,
        }
    }

    /// Range of a boolean toggle exposed through the float contract: `{0, 1, 1, 0}`.
    pub const fn toggle() -> Self {
        Self::new(0.0, 1.0, 1.0, 0.0)
    }

    /// Returns `true` if `min <= def <= max`.
    pub fn is_consistent(&self) -> bool {
        self.min <= self.def && self.def <= self.max
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}
