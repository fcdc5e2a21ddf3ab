//! Scoped graphic objects.
//!
//! A graphic acquires a registry slot on construction and releases it on drop.
//! Typed accessors return guards into the slot; every access re-checks liveness.

use std::cell::{Ref, RefMut};
use std::ops::Deref;

use super::shapes::{Line, Rect, ShapeKind, ShapeMut, Triangle};
use super::{Backend, DrawConfig, GraphError, GraphResult, Handle, Scene};

/// Config-only graphic, and the base of every typed graphic.
#[derive(Debug)]
pub struct Graphic<'s> {
    scene: &'s Scene,
    handle: Handle,
}

impl<'s> Graphic<'s> {
    pub(super) fn acquire(scene: &'s Scene, kind: ShapeKind) -> GraphResult<Self> {
        let handle = scene.try_registry_mut()?.acquire(kind)?;
        Ok(Self::from_parts(scene, handle))
    }

    #[inline]
    pub(super) fn from_parts(scene: &'s Scene, handle: Handle) -> Self {
        Self { scene, handle }
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    #[inline]
    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    /// `false` also while the registry is mutably borrowed.
    pub fn is_live(&self) -> bool {
        self.scene
            .try_registry()
            .is_ok_and(|registry| registry.is_live(self.handle))
    }

    /// Mutable guard on this graphic's own (not effective) configuration.
    pub fn config(&self) -> GraphResult<RefMut<'_, DrawConfig>> {
        let handle = self.handle;
        let registry = self.scene.try_registry_mut()?;
        registry.config_ref(handle)?;
        RefMut::filter_map(registry, |r| r.config(handle).ok())
            .map_err(|_| GraphError::StaleHandle(handle))
    }

    pub fn config_readonly(&self) -> GraphResult<Ref<'_, DrawConfig>> {
        let handle = self.handle;
        Ref::filter_map(self.scene.try_registry()?, |r| r.config_ref(handle).ok())
            .map_err(|_| GraphError::StaleHandle(handle))
    }

    /// Effective configuration after walking the attachment chain.
    pub fn effective_config(&self) -> GraphResult<DrawConfig> {
        self.scene.try_registry()?.resolve(self.handle)
    }

    /// Derive this graphic's configuration from `source`.
    pub fn attach_config(&self, source: &Graphic<'_>) -> GraphResult<()> {
        self.scene.try_registry_mut()?.attach(self.handle, source.handle)
    }

    pub fn detach_config(&self) -> GraphResult<()> {
        self.scene.try_registry_mut()?.detach(self.handle)
    }

    pub fn draw<B: Backend + ?Sized>(&self, backend: &mut B) -> GraphResult<()> {
        self.scene.try_registry()?.draw(self.handle, backend)
    }

    /// Guard on the payload, projected through `project` after a kind check.
    fn shape<T: ?Sized>(
        &self,
        kind: ShapeKind,
        project: impl FnOnce(ShapeMut<'_>) -> Option<&mut T>,
    ) -> GraphResult<RefMut<'_, T>> {
        let handle = self.handle;
        let registry = self.scene.try_registry_mut()?;
        registry.expect_kind(handle, kind)?;
        RefMut::filter_map(registry, |r| r.payload(handle).ok().and_then(project))
            .map_err(|_| GraphError::StaleHandle(handle))
    }
}

impl Drop for Graphic<'_> {
    fn drop(&mut self) {
        self.scene.release_or_defer(self.handle);
    }
}

macro_rules! typed_graphic {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $accessor:ident, $shape:ty, $into:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name<'s> {
            graphic: Graphic<'s>,
        }

        impl<'s> $name<'s> {
            #[inline]
            pub(super) fn from_graphic(graphic: Graphic<'s>) -> Self {
                Self { graphic }
            }

            /// Mutable guard into the registry slot.
            pub fn $accessor(&self) -> GraphResult<RefMut<'_, $shape>> {
                self.graphic.shape($kind, |shape| shape.$into())
            }
        }

        impl<'s> Deref for $name<'s> {
            type Target = Graphic<'s>;
            #[inline]
            fn deref(&self) -> &Graphic<'s> {
                &self.graphic
            }
        }
    };
}

typed_graphic!(
    /// Graphic whose slot holds a [`Triangle`].
    TriangleGraphic, ShapeKind::Triangle, triangle, Triangle, into_triangle
);
typed_graphic!(
    /// Graphic whose slot holds a [`Rect`].
    RectGraphic, ShapeKind::Rect, rect, Rect, into_rect
);
typed_graphic!(
    /// Graphic whose slot holds a [`Line`].
    LineGraphic, ShapeKind::Line, line, Line, into_line
);

#[cfg(test)]
mod tests {
    use crate::coords::{ColorRgba, Transform2, Vec2};
    use crate::graph::dispatch::tests::Recorder;
    use crate::graph::{GraphError, Handle, RegistryConfig, Scene, ShapeKind};

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn drop_releases_slot() {
        let scene = Scene::default();
        let handle: Handle;
        {
            let tri = scene.triangle().unwrap();
            handle = tri.handle();
            assert!(tri.is_live());
            assert_eq!(scene.registry().live_count(), 1);
        }
        assert!(!scene.registry().is_live(handle));
        assert_eq!(scene.registry().live_count(), 0);
    }

    #[test]
    fn early_return_still_releases() {
        fn build(scene: &Scene) -> Result<(), GraphError> {
            let _keep = scene.rect()?;
            let doomed = scene.line()?;
            doomed.attach_config(&doomed)?;
            Ok(())
        }

        let scene = Scene::default();
        assert!(matches!(build(&scene), Err(GraphError::SelfAttachment(_))));
        assert_eq!(scene.registry().live_count(), 0);
    }

    #[test]
    fn handle_copy_goes_stale_after_drop() {
        let scene = Scene::default();
        let copy = scene.rect().unwrap().handle();
        assert_eq!(
            scene.registry_mut().config(copy).err(),
            Some(GraphError::StaleHandle(copy))
        );
    }

    #[test]
    fn drop_while_guard_held_still_releases() {
        let scene = Scene::default();
        let kept = scene.rect().unwrap();
        let dropped = scene.triangle().unwrap();
        let handle = dropped.handle();
        {
            let _guard = kept.config_readonly().unwrap();
            drop(dropped);
            assert_eq!(scene.pending_release_count(), 1);
        }
        assert!(!scene.registry().is_live(handle));
        assert_eq!(scene.registry().live_count(), 1);
        assert_eq!(scene.pending_release_count(), 0);
    }

    #[test]
    fn scene_teardown_applies_deferred_release() {
        let scene = Scene::default();
        let graphic = scene.graphic().unwrap();
        let guard = scene.registry();
        drop(graphic);
        assert_eq!(scene.pending_release_count(), 1);
        drop(guard);
        drop(scene);
    }

    // ── busy registry ─────────────────────────────────────────────────────

    #[test]
    fn config_while_other_guard_held_is_busy() {
        let scene = Scene::default();
        let a = scene.rect().unwrap();
        let b = scene.rect().unwrap();

        let _guard = a.config().unwrap();
        assert_eq!(b.config().err(), Some(GraphError::RegistryBusy));
        assert_eq!(b.config_readonly().err(), Some(GraphError::RegistryBusy));
        assert_eq!(b.attach_config(&a), Err(GraphError::RegistryBusy));
        assert_eq!(b.detach_config(), Err(GraphError::RegistryBusy));
        assert_eq!(b.effective_config(), Err(GraphError::RegistryBusy));
        assert!(b.rect().is_err());
        assert!(scene.triangle().is_err());
        assert!(scene.create_line_group(2).is_err());
    }

    #[test]
    fn shared_guards_coexist() {
        let scene = Scene::default();
        let a = scene.rect().unwrap();
        let b = scene.rect().unwrap();

        let ga = a.config_readonly().unwrap();
        let gb = b.config_readonly().unwrap();
        assert_eq!(*ga, *gb);
        assert_eq!(b.effective_config(), Ok(*gb));
    }

    #[test]
    fn busy_registry_recovers_after_guard_drops() {
        let scene = Scene::default();
        let a = scene.line().unwrap();
        {
            let _guard = a.line().unwrap();
            assert_eq!(a.config().err(), Some(GraphError::RegistryBusy));
        }
        a.config().unwrap().layer = 7;
        assert_eq!(a.config_readonly().unwrap().layer, 7);
    }

    // ── typed accessors ───────────────────────────────────────────────────

    #[test]
    fn accessors_write_through_to_registry() {
        let scene = Scene::default();
        let tri = scene.triangle().unwrap();
        tri.triangle().unwrap().set_positions([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ]);
        tri.config().unwrap().layer = 4;

        let registry = scene.registry();
        assert_eq!(registry.payload_ref(tri.handle()).unwrap().points()[1].position, Vec2::new(1.0, 0.0));
        assert_eq!(registry.config_ref(tri.handle()).unwrap().layer, 4);
    }

    #[test]
    fn line_accessor_controls_length() {
        let scene = Scene::default();
        let line = scene.line().unwrap();
        {
            let mut l = line.line().unwrap();
            l.reserve(8);
            l.resize(3);
            l.set_thickness(2.5);
        }
        assert_eq!(line.line().unwrap().len(), 3);
        assert_eq!(line.line().unwrap().thickness(), 2.5);
    }

    #[test]
    fn config_readonly_matches_config() {
        let scene = Scene::default();
        let rect = scene.rect().unwrap();
        rect.config().unwrap().color_multiplier = ColorRgba::red();
        assert_eq!(rect.config_readonly().unwrap().color_multiplier, ColorRgba::red());
    }

    // ── attachment through facades ────────────────────────────────────────

    #[test]
    fn shared_parent_transform_and_independent_layers() {
        let scene = Scene::default();
        let parent = scene.graphic().unwrap();
        let group = scene.create_rect_group(3).unwrap();

        parent.config().unwrap().transform = Transform2::translate(Vec2::new(5.0, 0.0));
        for (i, rect) in group.iter().enumerate() {
            rect.attach_config(&parent).unwrap();
            rect.config().unwrap().layer = i as u16;
        }

        for (i, rect) in group.iter().enumerate() {
            let effective = rect.effective_config().unwrap();
            assert_eq!(effective.transform, Transform2::translate(Vec2::new(5.0, 0.0)));
            assert_eq!(effective.layer, i as u16);
        }

        let mut rec = Recorder::default();
        let report = scene
            .draw_all(
                group.iter().map(|g| g.handle()).chain(core::iter::once(parent.handle())),
                &mut rec,
            )
            .unwrap();
        assert_eq!(report.drawn, 4);
        assert_eq!(rec.calls.len(), 3);
    }

    #[test]
    fn dropping_source_detaches_dependents() {
        let scene = Scene::default();
        let tri = scene.triangle().unwrap();
        {
            let parent = scene.graphic().unwrap();
            parent.config().unwrap().color_multiplier = ColorRgba::black();
            tri.attach_config(&parent).unwrap();
            assert_eq!(tri.effective_config().unwrap().color_multiplier, ColorRgba::black());
        }
        assert_eq!(tri.effective_config().unwrap(), *tri.config_readonly().unwrap());
        assert_eq!(scene.registry().source_of(tri.handle()).unwrap(), None);
    }

    #[test]
    fn detach_config_restores_own_config() {
        let scene = Scene::default();
        let parent = scene.graphic().unwrap();
        let rect = scene.rect().unwrap();
        parent.config().unwrap().transform = Transform2::scale(4.0);
        rect.attach_config(&parent).unwrap();
        rect.detach_config().unwrap();
        assert_eq!(rect.effective_config().unwrap().transform, Transform2::IDENTITY);
        // Second detach is a no-op.
        assert_eq!(rect.detach_config(), Ok(()));
    }

    #[test]
    fn graphic_draw_dispatches() {
        let scene = Scene::default();
        let tri = scene.triangle().unwrap();
        let mut rec = Recorder::default();
        tri.draw(&mut rec).unwrap();
        assert_eq!(rec.calls[0].0, ShapeKind::Triangle);
    }

    // ── groups ────────────────────────────────────────────────────────────

    #[test]
    fn group_returns_ordered_live_graphics() {
        let scene = Scene::default();
        let group = scene.create_triangle_group(4).unwrap();
        assert_eq!(group.len(), 4);
        assert!(group.iter().all(|g| g.is_live()));
        assert!(group.windows(2).all(|w| w[0].handle().id() < w[1].handle().id()));
        drop(group);
        assert_eq!(scene.registry().live_count(), 0);
    }

    #[test]
    fn group_exhaustion_leaves_nothing_allocated() {
        let scene = Scene::new(RegistryConfig::bounded(3));

        // Create and free three slots so their identifiers are known.
        let attempted: Vec<Handle> = scene
            .create_line_group(3)
            .unwrap()
            .iter()
            .map(|g| g.handle())
            .collect();

        let err = scene.create_line_group(5).unwrap_err();
        assert_eq!(err, GraphError::AllocationExhausted { requested: 5, available: 3 });

        let registry = scene.registry();
        assert_eq!(registry.live_count(), 0);
        for handle in attempted {
            assert!(!registry.is_live(handle));
            assert!(registry.live_handle(handle.id()).is_none());
        }
    }

    #[test]
    fn zero_sized_group_is_empty() {
        let scene = Scene::new(RegistryConfig::bounded(0));
        assert!(scene.create_rect_group(0).unwrap().is_empty());
        assert!(scene.create_rect_group(1).is_err());
    }
}
