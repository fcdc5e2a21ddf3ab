//! Handle-indirected graphic registry.
//!
//! Responsibilities:
//! - issue process-unique identifiers and generation-checked handles
//! - own every graphic's `DrawConfig` and `ShapePayload` in one `Registry`
//! - maintain the acyclic attachment relation and resolve effective configs
//! - dispatch resolved shapes to a rendering `Backend`
//! - provide scoped facades (`Graphic`, `TriangleGraphic`, ...) over a `Scene`

mod attach;
mod config;
mod dispatch;
mod error;
mod graphic;
mod handle;
mod id;
mod registry;
mod scene;

pub mod shapes;

pub use config::{DrawConfig, RegistryConfig};
pub use dispatch::{Backend, DrawReport, Submission};
pub use error::{GraphError, GraphResult};
pub use graphic::{Graphic, LineGraphic, RectGraphic, TriangleGraphic};
pub use handle::Handle;
pub use id::Identifier;
pub use registry::Registry;
pub use scene::Scene;
pub use shapes::{Line, Point, Rect, ShapeKind, ShapeMut, ShapePayload, Triangle};
