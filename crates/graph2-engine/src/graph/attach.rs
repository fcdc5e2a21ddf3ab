//! Attachment edges: a dependent derives its effective `DrawConfig` from a source.
//!
//! Each handle has at most one outgoing edge; any number of dependents may
//! share a source. The relation is kept acyclic, so resolution always reaches
//! a terminal source.

use super::{DrawConfig, GraphError, GraphResult, Handle, Identifier, Registry};

impl Registry {
    /// Makes `dependent` derive its configuration from `source`, replacing any
    /// previous source of `dependent`.
    ///
    /// Fails without touching the graph if either handle is stale, if
    /// `dependent == source`, or if `source` already (transitively) derives
    /// from `dependent`.
    pub fn attach(&mut self, dependent: Handle, source: Handle) -> GraphResult<()> {
        self.slot(dependent)?;
        self.slot(source)?;

        if dependent.id() == source.id() {
            return Err(GraphError::SelfAttachment(dependent));
        }

        let mut cursor = Some(source.id());
        while let Some(id) = cursor {
            if id == dependent.id() {
                return Err(GraphError::CycleDetected { dependent, source });
            }
            cursor = self.slots.get(&id).and_then(|slot| slot.source);
        }

        self.unlink_source(dependent.id());
        self.slot_mut(dependent)?.source = Some(source.id());
        self.slot_mut(source)?.dependents.push(dependent.id());

        log::trace!("attached {dependent} -> {source}");
        Ok(())
    }

    /// Removes `dependent`'s outgoing edge. No-op if it has none.
    pub fn detach(&mut self, dependent: Handle) -> GraphResult<()> {
        self.slot(dependent)?;
        if self.unlink_source(dependent.id()) {
            log::trace!("detached {dependent}");
        }
        Ok(())
    }

    /// The handle `handle` currently derives from, if any.
    pub fn source_of(&self, handle: Handle) -> GraphResult<Option<Handle>> {
        Ok(self
            .slot(handle)?
            .source
            .and_then(|id| self.live_handle(id)))
    }

    /// Handles deriving directly from `handle`, in attachment order.
    pub fn dependents_of(&self, handle: Handle) -> GraphResult<Vec<Handle>> {
        Ok(self
            .slot(handle)?
            .dependents
            .iter()
            .filter_map(|&id| self.live_handle(id))
            .collect())
    }

    /// Effective configuration of `handle`.
    ///
    /// Walks outgoing edges to the terminal source, then folds back down:
    /// - transform: each ancestor's transform is applied before its dependent's
    /// - color multiplier: component-wise product along the chain
    /// - layer: always `handle`'s own
    pub fn resolve(&self, handle: Handle) -> GraphResult<DrawConfig> {
        let own = self.config_ref(handle)?;

        // chain[0] is the direct source, chain.last() the terminal one.
        let mut chain: Vec<&DrawConfig> = Vec::new();
        let mut cursor = self.slot(handle)?.source;
        while let Some(id) = cursor {
            let Some(slot) = self.slots.get(&id) else { break };
            let Some(data) = slot.data.as_ref() else { break };
            chain.push(&data.config);
            cursor = slot.source;

            if chain.len() > self.slots.len() {
                debug_assert!(false, "attachment cycle reached from {handle}");
                log::error!("attachment cycle reached from {handle}; truncating resolution");
                break;
            }
        }

        let Some((&terminal, ancestors)) = chain.split_last() else {
            return Ok(*own);
        };

        let mut effective = *terminal;
        for config in ancestors.iter().rev().copied().chain(core::iter::once(own)) {
            effective.transform = effective.transform.then(config.transform);
            effective.color_multiplier = effective.color_multiplier * config.color_multiplier;
        }
        effective.layer = own.layer;
        Ok(effective)
    }

    /// Drops `id`'s outgoing edge on both ends. Returns whether one existed.
    fn unlink_source(&mut self, id: Identifier) -> bool {
        let Some(source_id) = self.slots.get_mut(&id).and_then(|slot| slot.source.take()) else {
            return false;
        };
        if let Some(source_slot) = self.slots.get_mut(&source_id) {
            source_slot.dependents.retain(|&d| d != id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{ColorRgba, Transform2, Vec2};
    use crate::graph::{DrawConfig, GraphError, Handle, Registry, RegistryConfig, ShapeKind};

    fn registry_with(n: usize) -> (Registry, Vec<Handle>) {
        let mut reg = Registry::new(RegistryConfig::default());
        let handles = reg.acquire_many(ShapeKind::Triangle, n).unwrap();
        (reg, handles)
    }

    // ── attach / detach ───────────────────────────────────────────────────

    #[test]
    fn attach_sets_edge_on_both_ends() {
        let (mut reg, h) = registry_with(2);
        reg.attach(h[0], h[1]).unwrap();

        assert_eq!(reg.source_of(h[0]).unwrap(), Some(h[1]));
        assert_eq!(reg.dependents_of(h[1]).unwrap(), vec![h[0]]);
        assert_eq!(reg.source_of(h[1]).unwrap(), None);
    }

    #[test]
    fn attach_replaces_previous_source() {
        let (mut reg, h) = registry_with(3);
        reg.attach(h[0], h[1]).unwrap();
        reg.attach(h[0], h[2]).unwrap();

        assert_eq!(reg.source_of(h[0]).unwrap(), Some(h[2]));
        assert!(reg.dependents_of(h[1]).unwrap().is_empty());
        assert_eq!(reg.dependents_of(h[2]).unwrap(), vec![h[0]]);
    }

    #[test]
    fn reattaching_same_edge_is_idempotent() {
        let (mut reg, h) = registry_with(2);
        reg.attach(h[0], h[1]).unwrap();
        reg.attach(h[0], h[1]).unwrap();
        assert_eq!(reg.dependents_of(h[1]).unwrap(), vec![h[0]]);
    }

    #[test]
    fn many_dependents_share_a_source() {
        let (mut reg, h) = registry_with(4);
        for &d in &h[1..] {
            reg.attach(d, h[0]).unwrap();
        }
        assert_eq!(reg.dependents_of(h[0]).unwrap(), h[1..].to_vec());
    }

    #[test]
    fn self_attachment_rejected() {
        let (mut reg, h) = registry_with(1);
        assert_eq!(reg.attach(h[0], h[0]), Err(GraphError::SelfAttachment(h[0])));
        assert_eq!(reg.source_of(h[0]).unwrap(), None);
    }

    #[test]
    fn two_cycle_rejected_and_graph_unchanged() {
        let (mut reg, h) = registry_with(2);
        let (a, b) = (h[0], h[1]);
        reg.attach(a, b).unwrap();

        assert_eq!(
            reg.attach(b, a),
            Err(GraphError::CycleDetected { dependent: b, source: a })
        );
        assert_eq!(reg.source_of(a).unwrap(), Some(b));
        assert_eq!(reg.source_of(b).unwrap(), None);
        assert!(reg.dependents_of(a).unwrap().is_empty());
    }

    #[test]
    fn long_cycle_rejected_and_prior_edge_kept() {
        let (mut reg, h) = registry_with(4);
        // a -> b -> c -> d
        reg.attach(h[0], h[1]).unwrap();
        reg.attach(h[1], h[2]).unwrap();
        reg.attach(h[2], h[3]).unwrap();

        // Closing c's chain back to a must fail and keep c -> d.
        assert!(matches!(reg.attach(h[2], h[0]), Err(GraphError::CycleDetected { .. })));
        assert_eq!(reg.source_of(h[2]).unwrap(), Some(h[3]));
        assert!(matches!(reg.attach(h[3], h[0]), Err(GraphError::CycleDetected { .. })));
        assert_eq!(reg.source_of(h[3]).unwrap(), None);
    }

    #[test]
    fn attach_with_stale_handle_rejected() {
        let (mut reg, h) = registry_with(2);
        reg.release(h[1]).unwrap();
        assert_eq!(reg.attach(h[0], h[1]), Err(GraphError::StaleHandle(h[1])));
        assert_eq!(reg.attach(h[1], h[0]), Err(GraphError::StaleHandle(h[1])));
        assert_eq!(reg.source_of(h[0]).unwrap(), None);
    }

    #[test]
    fn detach_without_edge_is_noop() {
        let (mut reg, h) = registry_with(1);
        assert_eq!(reg.detach(h[0]), Ok(()));
    }

    #[test]
    fn detach_removes_edge() {
        let (mut reg, h) = registry_with(2);
        reg.attach(h[0], h[1]).unwrap();
        reg.detach(h[0]).unwrap();
        assert_eq!(reg.source_of(h[0]).unwrap(), None);
        assert!(reg.dependents_of(h[1]).unwrap().is_empty());
    }

    // ── release severs edges ──────────────────────────────────────────────

    #[test]
    fn releasing_source_severs_all_dependents() {
        let (mut reg, h) = registry_with(3);
        reg.config(h[0]).unwrap().color_multiplier = ColorRgba::new(0.5, 0.5, 0.5, 1.0);
        reg.config(h[1]).unwrap().color_multiplier = ColorRgba::red();
        reg.attach(h[1], h[0]).unwrap();
        reg.attach(h[2], h[0]).unwrap();

        reg.release(h[0]).unwrap();

        for &d in &h[1..] {
            assert_eq!(reg.source_of(d).unwrap(), None);
            assert_eq!(reg.resolve(d).unwrap(), *reg.config_ref(d).unwrap());
        }

        // The recycled slot starts with no edges.
        let fresh = reg.acquire(ShapeKind::Empty).unwrap();
        assert_eq!(fresh.id(), h[0].id());
        assert!(reg.dependents_of(fresh).unwrap().is_empty());
    }

    #[test]
    fn releasing_dependent_removes_incoming_entry() {
        let (mut reg, h) = registry_with(2);
        reg.attach(h[0], h[1]).unwrap();
        reg.release(h[0]).unwrap();
        assert!(reg.dependents_of(h[1]).unwrap().is_empty());
    }

    #[test]
    fn releasing_middle_of_chain_cuts_inheritance() {
        let (mut reg, h) = registry_with(3);
        let (a, b, c) = (h[0], h[1], h[2]);
        reg.config(a).unwrap().color_multiplier = ColorRgba::new(0.5, 1.0, 1.0, 1.0);
        reg.config(b).unwrap().transform = Transform2::scale(3.0);
        reg.config(c).unwrap().transform = Transform2::translate(Vec2::new(9.0, 0.0));
        reg.config(c).unwrap().color_multiplier = ColorRgba::black();
        reg.attach(a, b).unwrap();
        reg.attach(b, c).unwrap();

        reg.release(b).unwrap();

        assert_eq!(reg.source_of(a).unwrap(), None);
        assert_eq!(reg.resolve(a).unwrap(), *reg.config_ref(a).unwrap());
        assert!(reg.dependents_of(c).unwrap().is_empty());
        assert_eq!(reg.resolve(c).unwrap(), *reg.config_ref(c).unwrap());
    }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn terminal_resolves_to_own_config() {
        let (mut reg, h) = registry_with(1);
        let config = DrawConfig {
            transform: Transform2::rotate(0.7).then(Transform2::translate(Vec2::new(3.0, 1.0))),
            layer: 12,
            color_multiplier: ColorRgba::new(0.1, 0.2, 0.3, 0.4),
        };
        *reg.config(h[0]).unwrap() = config;
        assert_eq!(reg.resolve(h[0]).unwrap(), config);
    }

    #[test]
    fn chain_multiplies_colors_and_keeps_own_layer() {
        let (mut reg, h) = registry_with(3);
        let (a, b, c) = (h[0], h[1], h[2]);

        *reg.config(a).unwrap() = DrawConfig {
            layer: 1,
            color_multiplier: ColorRgba::new(0.5, 1.0, 1.0, 1.0),
            ..DrawConfig::IDENTITY
        };
        *reg.config(b).unwrap() = DrawConfig {
            layer: 7,
            color_multiplier: ColorRgba::new(1.0, 0.5, 1.0, 0.5),
            ..DrawConfig::IDENTITY
        };
        *reg.config(c).unwrap() = DrawConfig {
            layer: 9,
            color_multiplier: ColorRgba::new(0.5, 1.0, 0.25, 1.0),
            ..DrawConfig::IDENTITY
        };
        reg.attach(a, b).unwrap();
        reg.attach(b, c).unwrap();

        let effective = reg.resolve(a).unwrap();
        assert_eq!(effective.color_multiplier, ColorRgba::new(0.25, 0.5, 0.25, 0.5));
        assert_eq!(effective.layer, 1);
        assert_eq!(reg.resolve(b).unwrap().layer, 7);
    }

    #[test]
    fn chain_applies_source_transform_first() {
        let (mut reg, h) = registry_with(3);
        let (a, b, c) = (h[0], h[1], h[2]);
        reg.config(c).unwrap().transform = Transform2::scale(2.0);
        reg.config(b).unwrap().transform = Transform2::translate(Vec2::new(10.0, 0.0));
        reg.config(a).unwrap().transform = Transform2::scale(3.0);
        reg.attach(a, b).unwrap();
        reg.attach(b, c).unwrap();

        // (1, 1) -> scale 2 -> (2, 2) -> +10 -> (12, 2) -> scale 3 -> (36, 6)
        let t = reg.resolve(a).unwrap().transform;
        assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(36.0, 6.0));
    }

    #[test]
    fn dependent_inherits_source_scale() {
        let mut reg = Registry::default();
        let t1 = reg.acquire(ShapeKind::Triangle).unwrap();
        {
            let tri = reg.triangle_mut(t1).unwrap();
            tri.set_positions([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
            tri.set_color(ColorRgba::red());
        }
        let t2 = reg.acquire(ShapeKind::Rect).unwrap();
        reg.attach(t2, t1).unwrap();
        reg.config(t1).unwrap().transform = Transform2::scale(2.0);

        let expected = Transform2::scale(2.0).then(reg.config_ref(t2).unwrap().transform);
        let resolved = reg.resolve(t2).unwrap().transform;
        assert!(resolved.approx_eq(expected, 1e-6));
        assert!(resolved.approx_eq(Transform2::scale(2.0), 1e-6));
    }

    #[test]
    fn resolve_reflects_current_state() {
        let (mut reg, h) = registry_with(2);
        reg.attach(h[0], h[1]).unwrap();
        reg.config(h[1]).unwrap().color_multiplier = ColorRgba::black();
        assert_eq!(reg.resolve(h[0]).unwrap().color_multiplier, ColorRgba::black());

        reg.config(h[1]).unwrap().color_multiplier = ColorRgba::white();
        assert_eq!(reg.resolve(h[0]).unwrap().color_multiplier, ColorRgba::white());
    }

    #[test]
    fn resolve_stale_handle_fails() {
        let (mut reg, h) = registry_with(1);
        reg.release(h[0]).unwrap();
        assert_eq!(reg.resolve(h[0]), Err(GraphError::StaleHandle(h[0])));
    }
}
