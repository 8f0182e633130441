//! Thread-safe FIFO queue.
//!
//! [`Queue`] hands elements back in insertion order. It shares the operation
//! set and error conditions of [`PriorityQueue`](super::PriorityQueue), and
//! like it never blocks: an empty queue is reported, not waited on.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

use super::storage::Storage;
use crate::error::QueueError;
use crate::tracing_compat::{debug, trace};

/// A thread-safe first-in first-out queue.
///
/// Construct with [`Queue::new`]. A queue obtained through [`Default`] is
/// uninitialized: inserting into it, or asking it for elements, fails with
/// [`QueueError::Invalid`], and [`Queue::pop`] reports it as empty.
pub struct Queue<T> {
    items: Mutex<Storage<VecDeque<T>>>,
}

impl<T> Queue<T> {
    /// Creates an empty queue with room for `hint` elements.
    #[must_use]
    pub fn new(hint: usize) -> Self {
        debug!(hint, "queue created");
        Self {
            items: Mutex::new(Storage::Ready(VecDeque::with_capacity(hint))),
        }
    }

    /// Appends `item` to the back of the queue.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        self.items.lock().ready_mut()?.push_back(item);
        Ok(())
    }

    /// Appends every item, in iteration order, under one lock acquisition.
    ///
    /// An empty input is a no-op, even on an uninitialized queue. After the
    /// first item the iterator is driven while the lock is held, so it must
    /// not call back into this queue.
    pub fn put<I>(&self, items: I) -> Result<(), QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return Ok(());
        }
        let mut storage = self.items.lock();
        let queue = storage.ready_mut()?;
        queue.extend(items);
        trace!(len = queue.len(), "queue put");
        Ok(())
    }

    /// Removes and returns the oldest element.
    ///
    /// An uninitialized queue holds nothing and reports [`QueueError::Empty`].
    pub fn pop(&self) -> Result<T, QueueError> {
        self.items
            .lock()
            .ready_mut()
            .ok()
            .and_then(VecDeque::pop_front)
            .ok_or(QueueError::Empty)
    }

    /// Removes up to `n` of the oldest elements, in insertion order.
    ///
    /// `get(0)` returns an empty vector without looking at the queue.
    pub fn get(&self, n: usize) -> Result<Vec<T>, QueueError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut storage = self.items.lock();
        let queue = storage.ready_mut()?;
        let take = n.min(queue.len());
        let out: Vec<T> = queue.drain(..take).collect();
        trace!(requested = n, returned = out.len(), "queue get");
        Ok(out)
    }

    /// Removes every element, returned in insertion order.
    pub fn drain(&self) -> Result<Vec<T>, QueueError> {
        let mut storage = self.items.lock();
        Ok(storage.ready_mut()?.drain(..).collect())
    }

    /// Returns a clone of the oldest element without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.peek_with(T::clone)
    }

    /// Runs `f` on the oldest element while the lock is held.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.items.lock().ready().and_then(VecDeque::front).map(f)
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().ready().map_or(0, VecDeque::len)
    }

    /// Returns true if no elements are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the allocated capacity of the backing buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.lock().ready().map_or(0, VecDeque::capacity)
    }

    /// Returns true if the queue was built through [`Queue::new`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.items.lock().is_ready()
    }
}

impl<T> Default for Queue<T> {
    /// Returns an uninitialized queue that rejects every insertion.
    fn default() -> Self {
        Self {
            items: Mutex::new(Storage::Uninit),
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.items.lock();
        f.debug_struct("Queue")
            .field("valid", &storage.is_ready())
            .field("len", &storage.ready().map_or(0, VecDeque::len))
            .finish()
    }
}
