use crate::coords::{ColorRgba, Transform2};

/// Per-graphic draw configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawConfig {
    pub transform: Transform2,
    /// Draw layer. Lower layers are painted first. Never inherited.
    pub layer: u16,
    /// Multiplied component-wise into every vertex color.
    pub color_multiplier: ColorRgba,
}

impl DrawConfig {
    pub const IDENTITY: DrawConfig = DrawConfig {
        transform: Transform2::IDENTITY,
        layer: 0,
        color_multiplier: ColorRgba::white(),
    };
}

impl Default for DrawConfig {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Registry construction parameters.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Upper bound on slots ever created. `None` = unbounded.
    pub max_slots: Option<usize>,

    /// Slot map capacity reserved up front.
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_slots: None,
            initial_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Bounded registry; `initial_capacity` is clamped to the bound.
    pub fn bounded(max_slots: usize) -> Self {
        Self {
            max_slots: Some(max_slots),
            initial_capacity: max_slots.min(Self::default().initial_capacity),
        }
    }
}
