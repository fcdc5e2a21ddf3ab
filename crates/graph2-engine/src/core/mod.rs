//! Contract between the window runtime and applications.
//!
//! The runtime owns the window and GPU; an [`App`] sees them only through
//! [`FrameCtx`] once per redraw.

mod clock;
mod ctx;

use winit::event::WindowEvent;

pub use clock::{FrameClock, FrameTime};
pub use ctx::FrameCtx;

/// Returned by app callbacks to keep running or shut down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by the [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Sees every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
