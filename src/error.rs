//! Error types for the container primitives.
//!
//! Queue operations report failures through [`QueueError`]. The two kinds
//! differ in recoverability:
//!
//! - [`QueueError::Invalid`]: the container was never initialized through its
//!   constructor. This is a usage bug and retrying will not help.
//! - [`QueueError::Empty`]: the operation needed an element and none was
//!   present. Callers drive polling and drain loops off this value.
//!
//! The semaphore's blocking `acquire` and `release` have no error channel.
//! Only the non-blocking [`Semaphore::try_acquire`](crate::Semaphore::try_acquire)
//! reports [`TryAcquireError`].

/// Error returned by [`PriorityQueue`](crate::PriorityQueue) and
/// [`Queue`](crate::Queue) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum QueueError {
    /// The operation targeted a container whose storage was never initialized.
    #[error("invalid queue")]
    Invalid,
    /// The operation required at least one element but the container is empty.
    #[error("empty queue")]
    Empty,
}

impl QueueError {
    /// Returns true if the caller can expect a retry to succeed once the
    /// container changes state.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Error returned when a non-blocking acquire cannot be satisfied right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no semaphore permits available: requested {requested}, available {available}")]
pub struct TryAcquireError {
    /// Permits the caller asked for.
    pub requested: usize,
    /// Permits free at the time of the attempt.
    pub available: usize,
}
