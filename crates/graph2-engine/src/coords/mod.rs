//! Coordinate, color and transform types shared by the graphic registry and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Shape points are stored in local space; the effective `Transform2` maps them
//! into logical pixels and the vertex shader converts to NDC.

mod color;
mod transform;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use transform::Transform2;
pub use vec2::Vec2;
pub use viewport::Viewport;
