use std::fmt;

use super::{Handle, ShapeKind};

/// Recoverable registry and attachment failures.
///
/// Every variant leaves the registry unchanged.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GraphError {
    /// The handle's generation does not match its slot (released, or never issued here).
    StaleHandle(Handle),
    /// The handle was the last lease on a slot that is already free.
    DoubleRelease(Handle),
    /// A handle cannot derive its configuration from itself.
    SelfAttachment(Handle),
    /// The requested edge would close a loop in the attachment chain.
    CycleDetected { dependent: Handle, source: Handle },
    /// Not enough slots for the request; `available` is how many could be acquired.
    AllocationExhausted { requested: usize, available: usize },
    /// The slot is live but holds a different shape kind.
    ShapeMismatch { handle: Handle, expected: ShapeKind, found: ShapeKind },
    /// A registry guard from an earlier call is still alive.
    RegistryBusy,
}

pub type GraphResult<T> = Result<T, GraphError>;

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::StaleHandle(h) => write!(f, "stale handle {h}"),
            GraphError::DoubleRelease(h) => write!(f, "handle {h} was already released"),
            GraphError::SelfAttachment(h) => write!(f, "handle {h} cannot attach to itself"),
            GraphError::CycleDetected { dependent, source } => {
                write!(f, "attaching {dependent} to {source} would create a cycle")
            }
            GraphError::AllocationExhausted { requested, available } => write!(
                f,
                "registry exhausted: requested {requested} slot(s), only {available} available"
            ),
            GraphError::ShapeMismatch { handle, expected, found } => {
                write!(f, "handle {handle} holds a {found:?} payload, expected {expected:?}")
            }
            GraphError::RegistryBusy => write!(f, "registry is borrowed by an outstanding guard"),
        }
    }
}

impl std::error::Error for GraphError {}
