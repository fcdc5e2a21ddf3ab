//! GPU rendering of registry graphics.
//!
//! [`GraphicsBatch`] is the [`Backend`](crate::graph::Backend) the registry
//! draws into; [`GraphicsRenderer`] uploads the batch and issues one pass.
//!
//! Convention:
//! - positions are logical pixels after the per-vertex transform (top-left origin, +Y down)
//! - the vertex shader converts to NDC using a viewport uniform

mod batch;
mod ctx;
mod graphics;
mod key;

pub use batch::{GraphicsBatch, GraphicsVertex};
pub use ctx::{RenderCtx, RenderTarget};
pub use graphics::GraphicsRenderer;
pub use key::SortKey;
