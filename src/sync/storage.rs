//! Explicit initialized/uninitialized storage state shared by the queues.

use crate::error::QueueError;

/// Backing storage of a queue.
///
/// A container built through its constructor holds [`Storage::Ready`]. One
/// obtained through `Default` holds [`Storage::Uninit`] and never leaves that
/// state, so every insertion into it fails with [`QueueError::Invalid`].
#[derive(Debug, Default)]
pub(crate) enum Storage<S> {
    /// Never allocated by a constructor.
    #[default]
    Uninit,
    /// Valid, possibly empty, backing collection.
    Ready(S),
}

impl<S> Storage<S> {
    /// Borrows the backing collection mutably, or fails if uninitialized.
    pub(crate) fn ready_mut(&mut self) -> Result<&mut S, QueueError> {
        match self {
            Self::Ready(items) => Ok(items),
            Self::Uninit => Err(QueueError::Invalid),
        }
    }

    /// Borrows the backing collection if it exists.
    pub(crate) const fn ready(&self) -> Option<&S> {
        match self {
            Self::Ready(items) => Some(items),
            Self::Uninit => None,
        }
    }

    pub(crate) const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
