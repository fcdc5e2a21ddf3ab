use std::collections::HashMap;

use super::shapes::{Line, Rect, ShapeKind, ShapeMut, ShapePayload, Triangle};
use super::{DrawConfig, GraphError, GraphResult, Handle, Identifier, RegistryConfig};

/// Contents of an allocated slot.
#[derive(Debug, Clone)]
pub(super) struct SlotData {
    pub(super) config: DrawConfig,
    pub(super) payload: ShapePayload,
}

/// Registry slot.
///
/// `data` is `Some` while allocated. Attachment edges are stored on both ends:
/// `source` is the single outgoing edge, `dependents` the incoming ones.
/// Edges only ever connect allocated slots.
#[derive(Debug)]
pub(super) struct Slot {
    pub(super) generation: u64,
    pub(super) data: Option<SlotData>,
    pub(super) source: Option<Identifier>,
    pub(super) dependents: Vec<Identifier>,
}

/// Owner of every graphic's `DrawConfig` and `ShapePayload`.
///
/// All access goes through a generation check: a handle whose generation does
/// not match its slot is rejected with [`GraphError::StaleHandle`].
///
/// Attachment operations live in `graph::attach`, draw dispatch in
/// `graph::dispatch`.
#[derive(Debug)]
pub struct Registry {
    pub(super) slots: HashMap<Identifier, Slot>,
    /// Free slot ids, reused last-in-first-out.
    free: Vec<Identifier>,
    live: usize,
    max_slots: Option<usize>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            slots: HashMap::with_capacity(config.initial_capacity),
            free: Vec::new(),
            live: 0,
            max_slots: config.max_slots,
        }
    }

    /// Number of allocated slots.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of slots ever created (allocated + free).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// How many more `acquire` calls can succeed right now.
    pub fn available(&self) -> usize {
        let growable = match self.max_slots {
            Some(max) => max.saturating_sub(self.slots.len()),
            None => usize::MAX - self.free.len(),
        };
        self.free.len() + growable
    }

    /// Allocates a slot holding the zero payload of `kind` and an identity config.
    pub fn acquire(&mut self, kind: ShapeKind) -> GraphResult<Handle> {
        let data = SlotData {
            config: DrawConfig::IDENTITY,
            payload: ShapePayload::zero(kind),
        };

        let handle = if let Some(id) = self.free.pop() {
            // Free-list entries always name existing slots.
            let slot = self
                .slots
                .get_mut(&id)
                .ok_or(GraphError::AllocationExhausted { requested: 1, available: 0 })?;
            slot.data = Some(data);
            Handle::new(id, slot.generation)
        } else {
            if self.max_slots.is_some_and(|max| self.slots.len() >= max) {
                return Err(GraphError::AllocationExhausted { requested: 1, available: 0 });
            }
            let id = Identifier::next();
            self.slots.insert(
                id,
                Slot {
                    generation: 0,
                    data: Some(data),
                    source: None,
                    dependents: Vec::new(),
                },
            );
            Handle::new(id, 0)
        };

        self.live += 1;
        log::trace!("acquired {handle} ({kind:?})");
        Ok(handle)
    }

    /// Acquires `count` slots of `kind`, or none at all.
    ///
    /// On exhaustion every slot acquired by this call is released again before
    /// the error is returned.
    pub fn acquire_many(&mut self, kind: ShapeKind, count: usize) -> GraphResult<Vec<Handle>> {
        let mut acquired = Vec::with_capacity(count);

        for _ in 0..count {
            match self.acquire(kind) {
                Ok(handle) => acquired.push(handle),
                Err(_) => {
                    let available = acquired.len();
                    for handle in acquired {
                        if let Err(err) = self.release(handle) {
                            log::error!("rollback of {handle} failed: {err}");
                        }
                    }
                    return Err(GraphError::AllocationExhausted { requested: count, available });
                }
            }
        }

        Ok(acquired)
    }

    /// Frees the slot behind `handle` and severs every attachment edge touching it.
    ///
    /// The slot's generation is bumped, so `handle` and all its copies go stale.
    pub fn release(&mut self, handle: Handle) -> GraphResult<()> {
        let slot = self
            .slots
            .get_mut(&handle.id())
            .ok_or(GraphError::StaleHandle(handle))?;

        if slot.data.is_none() {
            return if slot.generation == handle.generation().wrapping_add(1) {
                Err(GraphError::DoubleRelease(handle))
            } else {
                Err(GraphError::StaleHandle(handle))
            };
        }
        if slot.generation != handle.generation() {
            return Err(GraphError::StaleHandle(handle));
        }

        slot.data = None;
        slot.generation = slot.generation.wrapping_add(1);
        let source = slot.source.take();
        let dependents = std::mem::take(&mut slot.dependents);

        if let Some(source_id) = source {
            if let Some(source_slot) = self.slots.get_mut(&source_id) {
                source_slot.dependents.retain(|&d| d != handle.id());
            }
        }
        for dependent_id in dependents {
            if let Some(dependent_slot) = self.slots.get_mut(&dependent_id) {
                dependent_slot.source = None;
            }
        }

        self.free.push(handle.id());
        self.live -= 1;
        log::trace!("released {handle}");
        Ok(())
    }

    /// Non-failing liveness check.
    #[inline]
    pub fn is_live(&self, handle: Handle) -> bool {
        self.data(handle).is_ok()
    }

    pub fn config(&mut self, handle: Handle) -> GraphResult<&mut DrawConfig> {
        Ok(&mut self.data_mut(handle)?.config)
    }

    pub fn config_ref(&self, handle: Handle) -> GraphResult<&DrawConfig> {
        Ok(&self.data(handle)?.config)
    }

    /// Mutable payload access. The returned view cannot change the shape kind.
    pub fn payload(&mut self, handle: Handle) -> GraphResult<ShapeMut<'_>> {
        Ok(self.data_mut(handle)?.payload.as_mut())
    }

    pub fn payload_ref(&self, handle: Handle) -> GraphResult<&ShapePayload> {
        Ok(&self.data(handle)?.payload)
    }

    /// Fails with `ShapeMismatch` unless the live slot holds a `kind` payload.
    pub fn expect_kind(&self, handle: Handle, kind: ShapeKind) -> GraphResult<()> {
        let found = self.data(handle)?.payload.kind();
        if found == kind {
            Ok(())
        } else {
            Err(GraphError::ShapeMismatch { handle, expected: kind, found })
        }
    }

    pub fn triangle_mut(&mut self, handle: Handle) -> GraphResult<&mut Triangle> {
        self.expect_kind(handle, ShapeKind::Triangle)?;
        self.payload(handle)?
            .into_triangle()
            .ok_or(GraphError::StaleHandle(handle))
    }

    pub fn rect_mut(&mut self, handle: Handle) -> GraphResult<&mut Rect> {
        self.expect_kind(handle, ShapeKind::Rect)?;
        self.payload(handle)?
            .into_rect()
            .ok_or(GraphError::StaleHandle(handle))
    }

    pub fn line_mut(&mut self, handle: Handle) -> GraphResult<&mut Line> {
        self.expect_kind(handle, ShapeKind::Line)?;
        self.payload(handle)?
            .into_line()
            .ok_or(GraphError::StaleHandle(handle))
    }

    /// Live handle for a slot id, if allocated.
    pub(super) fn live_handle(&self, id: Identifier) -> Option<Handle> {
        let slot = self.slots.get(&id)?;
        slot.data.as_ref().map(|_| Handle::new(id, slot.generation))
    }

    pub(super) fn slot(&self, handle: Handle) -> GraphResult<&Slot> {
        match self.slots.get(&handle.id()) {
            Some(slot) if slot.generation == handle.generation() && slot.data.is_some() => Ok(slot),
            _ => Err(GraphError::StaleHandle(handle)),
        }
    }

    pub(super) fn slot_mut(&mut self, handle: Handle) -> GraphResult<&mut Slot> {
        match self.slots.get_mut(&handle.id()) {
            Some(slot) if slot.generation == handle.generation() && slot.data.is_some() => Ok(slot),
            _ => Err(GraphError::StaleHandle(handle)),
        }
    }

    fn data(&self, handle: Handle) -> GraphResult<&SlotData> {
        self.slot(handle)?
            .data
            .as_ref()
            .ok_or(GraphError::StaleHandle(handle))
    }

    fn data_mut(&mut self, handle: Handle) -> GraphResult<&mut SlotData> {
        self.slot_mut(handle)?
            .data
            .as_mut()
            .ok_or(GraphError::StaleHandle(handle))
    }
}
