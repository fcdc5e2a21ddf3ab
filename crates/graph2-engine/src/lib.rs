//! Handle-indirected 2-D graphic registry with a wgpu backend.
//!
//! - [`graph`]: identifiers, handles, the registry, config attachment and draw dispatch
//! - [`render`]: the batch backend and its wgpu renderer
//! - [`window`], [`device`], [`core`]: the single-window runtime that presents frames

pub mod coords;
pub mod graph;

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod window;
