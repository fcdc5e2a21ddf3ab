use core::fmt;

use super::Identifier;

/// Lease on a registry slot: identifier plus the slot generation at acquisition.
///
/// Handles are plain values; copying one does not extend the lease. A handle
/// is live only while its generation matches the slot's current generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Handle {
    id: Identifier,
    generation: u64,
}

impl Handle {
    #[inline]
    pub(crate) const fn new(id: Identifier, generation: u64) -> Self {
        Self { id, generation }
    }

    #[inline]
    pub const fn id(self) -> Identifier {
        self.id
    }

    #[inline]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.generation)
    }
}
