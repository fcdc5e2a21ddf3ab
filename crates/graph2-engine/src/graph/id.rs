use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IDENTIFIER: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique slot identifier.
///
/// Issued in strictly increasing order and never reissued, even across
/// registries. Exhausting the 64-bit space is treated as unreachable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Identifier(u64);

impl Identifier {
    /// Issues the next identifier. Safe to call from any thread.
    #[inline]
    pub fn next() -> Self {
        Self(NEXT_IDENTIFIER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn next_is_strictly_increasing() {
        let a = Identifier::next();
        let b = Identifier::next();
        let c = Identifier::next();
        assert!(a < b && b < c);
    }

    #[test]
    fn next_is_unique_across_threads() {
        let per_thread = 1_000;
        let ids: Vec<Identifier> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..4)
                .map(|_| s.spawn(move || (0..per_thread).map(|_| Identifier::next()).collect::<Vec<_>>()))
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn display_format() {
        assert_eq!(Identifier(42).to_string(), "#42");
    }
}
