//! Draw dispatch: resolve the effective configuration and hand the payload to a backend.

use super::shapes::{Point, ShapeKind, ShapePayload};
use super::{DrawConfig, GraphError, GraphResult, Handle, Registry};

/// One shape handed to the backend.
///
/// `vertices` are in local space; `config` is the effective configuration and
/// has not been applied to them, so backends can batch by transform and layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Submission<'a> {
    pub kind: ShapeKind,
    pub vertices: &'a [Point],
    /// `Some` only for lines.
    pub line_thickness: Option<f32>,
    pub config: &'a DrawConfig,
}

/// Rendering backend capability: rasterize colored vertices with a transform, layer and tint.
pub trait Backend {
    fn submit(&mut self, submission: Submission<'_>);
}

impl<B: Backend + ?Sized> Backend for &mut B {
    #[inline]
    fn submit(&mut self, submission: Submission<'_>) {
        (**self).submit(submission);
    }
}

/// Outcome of [`Registry::draw_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawReport {
    /// Handles that were dispatched (config-only handles included).
    pub drawn: usize,
    /// Handles rejected as stale, in encounter order. Callers should prune these.
    pub stale: Vec<Handle>,
}

impl DrawReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty()
    }
}

impl Registry {
    /// Draws one handle. Read-only with respect to the registry.
    ///
    /// Config-only (`ShapeKind::Empty`) handles succeed without a backend call.
    pub fn draw<B: Backend + ?Sized>(&self, handle: Handle, backend: &mut B) -> GraphResult<()> {
        if !self.is_live(handle) {
            return Err(GraphError::StaleHandle(handle));
        }

        let effective = self.resolve(handle)?;
        let payload = self.payload_ref(handle)?;

        let line_thickness = match payload {
            ShapePayload::Empty => return Ok(()),
            ShapePayload::Triangle(_) | ShapePayload::Rect(_) => None,
            ShapePayload::Line(line) => Some(line.thickness()),
        };

        backend.submit(Submission {
            kind: payload.kind(),
            vertices: payload.points(),
            line_thickness,
            config: &effective,
        });
        Ok(())
    }

    /// Draws every handle in order. Stale handles are logged and skipped; the pass never aborts.
    pub fn draw_all<I, B>(&self, handles: I, backend: &mut B) -> DrawReport
    where
        I: IntoIterator<Item = Handle>,
        B: Backend + ?Sized,
    {
        let mut report = DrawReport::default();
        for handle in handles {
            match self.draw(handle, backend) {
                Ok(()) => report.drawn += 1,
                Err(err) => {
                    log::warn!("skipping draw: {err}");
                    report.stale.push(handle);
                }
            }
        }
        report
    }
}
