use std::cell::{Ref, RefCell, RefMut};

use super::graphic::{Graphic, LineGraphic, RectGraphic, TriangleGraphic};
use super::{
    Backend, DrawReport, GraphError, GraphResult, Handle, Registry, RegistryConfig, ShapeKind,
};

/// Explicit owner of the graphic registry for one frame loop.
///
/// Construct once at startup and pass by reference; every facade borrows it.
/// Access is single-threaded: registry borrows are dynamic (`RefCell`). Facade
/// calls made while a conflicting guard is alive fail with
/// [`GraphError::RegistryBusy`]; a facade dropped at such a moment has its
/// release queued and applied by the next registry access.
#[derive(Debug, Default)]
pub struct Scene {
    registry: RefCell<Registry>,
    /// Releases deferred because the registry was borrowed at drop time.
    pending_release: RefCell<Vec<Handle>>,
}

impl Scene {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            registry: RefCell::new(Registry::new(config)),
            pending_release: RefCell::new(Vec::new()),
        }
    }

    /// Shared registry borrow.
    ///
    /// # Panics
    /// Panics if a mutable guard is outstanding.
    pub fn registry(&self) -> Ref<'_, Registry> {
        self.flush_pending();
        self.registry.borrow()
    }

    /// Exclusive registry borrow.
    ///
    /// # Panics
    /// Panics if any guard is outstanding.
    pub fn registry_mut(&self) -> RefMut<'_, Registry> {
        let mut registry = self.registry.borrow_mut();
        self.release_pending(&mut registry);
        registry
    }

    /// Shared borrow, or `RegistryBusy` while a mutable guard is alive.
    pub fn try_registry(&self) -> GraphResult<Ref<'_, Registry>> {
        self.flush_pending();
        self.registry.try_borrow().map_err(|_| GraphError::RegistryBusy)
    }

    /// Exclusive borrow, or `RegistryBusy` while any guard is alive.
    pub fn try_registry_mut(&self) -> GraphResult<RefMut<'_, Registry>> {
        let mut registry = self.registry.try_borrow_mut().map_err(|_| GraphError::RegistryBusy)?;
        self.release_pending(&mut registry);
        Ok(registry)
    }

    /// Number of releases waiting for the registry to become free.
    pub fn pending_release_count(&self) -> usize {
        self.pending_release.borrow().len()
    }

    /// Releases `handle` now, or queues it if the registry is borrowed.
    pub(super) fn release_or_defer(&self, handle: Handle) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                self.release_pending(&mut registry);
                if let Err(err) = registry.release(handle) {
                    log::error!("failed to release {handle}: {err}");
                }
            }
            Err(_) => {
                log::debug!("registry borrowed while dropping {handle}; release deferred");
                self.pending_release.borrow_mut().push(handle);
            }
        }
    }

    fn flush_pending(&self) {
        if self.pending_release.borrow().is_empty() {
            return;
        }
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            self.release_pending(&mut registry);
        }
    }

    fn release_pending(&self, registry: &mut Registry) {
        let pending = std::mem::take(&mut *self.pending_release.borrow_mut());
        for handle in pending {
            if let Err(err) = registry.release(handle) {
                log::error!("deferred release of {handle} failed: {err}");
            }
        }
    }

    /// Config-only graphic: no geometry, used as a shared attachment source.
    pub fn graphic(&self) -> GraphResult<Graphic<'_>> {
        Graphic::acquire(self, ShapeKind::Empty)
    }

    pub fn triangle(&self) -> GraphResult<TriangleGraphic<'_>> {
        Graphic::acquire(self, ShapeKind::Triangle).map(TriangleGraphic::from_graphic)
    }

    pub fn rect(&self) -> GraphResult<RectGraphic<'_>> {
        Graphic::acquire(self, ShapeKind::Rect).map(RectGraphic::from_graphic)
    }

    pub fn line(&self) -> GraphResult<LineGraphic<'_>> {
        Graphic::acquire(self, ShapeKind::Line).map(LineGraphic::from_graphic)
    }

    /// `count` triangles, all-or-nothing.
    pub fn create_triangle_group(&self, count: usize) -> GraphResult<Vec<TriangleGraphic<'_>>> {
        self.create_group(ShapeKind::Triangle, count, TriangleGraphic::from_graphic)
    }

    /// `count` rects, all-or-nothing.
    pub fn create_rect_group(&self, count: usize) -> GraphResult<Vec<RectGraphic<'_>>> {
        self.create_group(ShapeKind::Rect, count, RectGraphic::from_graphic)
    }

    /// `count` lines, all-or-nothing.
    pub fn create_line_group(&self, count: usize) -> GraphResult<Vec<LineGraphic<'_>>> {
        self.create_group(ShapeKind::Line, count, LineGraphic::from_graphic)
    }

    /// Draws `handles` in order; see [`Registry::draw_all`].
    pub fn draw_all<I, B>(&self, handles: I, backend: &mut B) -> GraphResult<DrawReport>
    where
        I: IntoIterator<Item = Handle>,
        B: Backend + ?Sized,
    {
        Ok(self.try_registry()?.draw_all(handles, backend))
    }

    fn create_group<'s, G>(
        &'s self,
        kind: ShapeKind,
        count: usize,
        wrap: fn(Graphic<'s>) -> G,
    ) -> GraphResult<Vec<G>> {
        let handles = self.try_registry_mut()?.acquire_many(kind, count)?;
        Ok(handles
            .into_iter()
            .map(|handle| wrap(Graphic::from_parts(self, handle)))
            .collect())
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        let pending = std::mem::take(self.pending_release.get_mut());
        let registry = self.registry.get_mut();
        for handle in pending {
            if let Err(err) = registry.release(handle) {
                log::error!("deferred release of {handle} failed at teardown: {err}");
            }
        }
    }
}
