//! Thread-safe binary min-heap.
//!
//! [`PriorityQueue`] serves the element with the smallest priority value
//! first. Callers hand over a payload together with its priority; the queue
//! wraps both in a node it owns exclusively, and the node tracks its own slot
//! in the backing array. The payload type needs no capabilities of its own.
//!
//! Every operation holds a single mutex for its whole duration. Nothing in
//! this module ever blocks waiting for elements: an empty queue is reported
//! through [`QueueError::Empty`] or a `None` result.
//!
//! # Ordering
//!
//! Elements with equal priority come out in an unspecified order. Rebalancing
//! may reorder them freely.
//!
//! # Example
//!
//! ```
//! use xtypes::PriorityQueue;
//!
//! let pq = PriorityQueue::new(4);
//! pq.push("low", 10).unwrap();
//! pq.push("high", 1).unwrap();
//! assert_eq!(pq.pop().unwrap(), "high");
//! assert_eq!(pq.pop().unwrap(), "low");
//! ```

use parking_lot::Mutex;
use std::fmt;

use super::storage::Storage;
use crate::error::QueueError;
use crate::tracing_compat::{debug, trace};

/// A payload plus its ordering key and current slot in the heap array.
struct Node<T, P> {
    priority: P,
    /// Slot this node currently occupies. Kept in sync on every swap.
    index: usize,
    item: T,
}

/// Array-backed min-heap of nodes.
struct Heap<T, P> {
    nodes: Vec<Node<T, P>>,
}

impl<T, P: Ord> Heap<T, P> {
    fn with_capacity(hint: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(hint),
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn peek(&self) -> Option<&Node<T, P>> {
        self.nodes.first()
    }

    fn push(&mut self, item: T, priority: P) {
        let index = self.nodes.len();
        self.nodes.push(Node {
            priority,
            index,
            item,
        });
        self.sift_up(index);
    }

    /// Removes the root. The removed node is moved out of the array before
    /// returning, so no slot keeps holding it.
    fn pop(&mut self) -> Option<Node<T, P>> {
        let last = self.nodes.len().checked_sub(1)?;
        self.swap(0, last);
        let node = self.nodes.pop()?;
        debug_assert_eq!(node.index, last, "popped node lost track of its slot");
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(node)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.nodes[i].priority < self.nodes[j].priority
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
        self.nodes[i].index = i;
        self.nodes[j].index = j;
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(child, parent) {
                break;
            }
            self.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smaller, parent) {
                break;
            }
            self.swap(parent, smaller);
            parent = smaller;
        }
    }
}

/// A thread-safe priority queue serving the lowest priority value first.
///
/// Construct with [`PriorityQueue::new`]. A queue obtained through
/// [`Default`] is uninitialized: `len` reports zero, `pop` reports
/// [`QueueError::Empty`], and inserting or requesting elements fails with
/// [`QueueError::Invalid`].
pub struct PriorityQueue<T, P = i64> {
    heap: Mutex<Storage<Heap<T, P>>>,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    /// Creates an empty queue with room for `hint` elements.
    ///
    /// The hint only pre-sizes storage; the queue grows past it as needed.
    #[must_use]
    pub fn new(hint: usize) -> Self {
        debug!(hint, "priority queue created");
        Self {
            heap: Mutex::new(Storage::Ready(Heap::with_capacity(hint))),
        }
    }

    /// Inserts `item` with the given priority.
    pub fn push(&self, item: T, priority: P) -> Result<(), QueueError> {
        let mut storage = self.heap.lock();
        let heap = ready_or_log(&mut storage, "push")?;
        heap.push(item, priority);
        Ok(())
    }

    /// Inserts every `(item, priority)` pair under one lock acquisition.
    ///
    /// An empty input is a no-op, even on an uninitialized queue. After the
    /// first pair the iterator is driven while the lock is held, so it must
    /// not call back into this queue.
    pub fn put<I>(&self, items: I) -> Result<(), QueueError>
    where
        I: IntoIterator<Item = (T, P)>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return Ok(());
        }
        let mut storage = self.heap.lock();
        let heap = ready_or_log(&mut storage, "put")?;
        heap.nodes.reserve(items.size_hint().0);
        for (item, priority) in items {
            heap.push(item, priority);
        }
        trace!(len = heap.len(), "priority queue put");
        Ok(())
    }

    /// Removes and returns the element with the smallest priority.
    ///
    /// An uninitialized queue holds nothing and reports [`QueueError::Empty`].
    pub fn pop(&self) -> Result<T, QueueError> {
        self.heap
            .lock()
            .ready_mut()
            .ok()
            .and_then(Heap::pop)
            .map(|node| node.item)
            .ok_or(QueueError::Empty)
    }

    /// Removes up to `n` elements in ascending priority order.
    ///
    /// Returns fewer than `n` elements when the queue runs out, and an empty
    /// vector when `n` is zero, without looking at the queue.
    pub fn get(&self, n: usize) -> Result<Vec<T>, QueueError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut storage = self.heap.lock();
        let heap = ready_or_log(&mut storage, "get")?;
        let mut out = Vec::with_capacity(n.min(heap.len()));
        while out.len() < n {
            let Some(node) = heap.pop() else { break };
            out.push(node.item);
        }
        trace!(requested = n, returned = out.len(), "priority queue get");
        Ok(out)
    }

    /// Removes every element, returned in ascending priority order.
    pub fn drain(&self) -> Result<Vec<T>, QueueError> {
        let mut storage = self.heap.lock();
        let heap = ready_or_log(&mut storage, "drain")?;
        let mut out = Vec::with_capacity(heap.len());
        while let Some(node) = heap.pop() {
            out.push(node.item);
        }
        Ok(out)
    }

    /// Returns a clone of the smallest-priority element without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.peek_with(T::clone)
    }

    /// Runs `f` on the smallest-priority element while the lock is held.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let storage = self.heap.lock();
        storage.ready().and_then(Heap::peek).map(|node| f(&node.item))
    }

    /// Returns the smallest priority currently queued.
    #[must_use]
    pub fn peek_priority(&self) -> Option<P>
    where
        P: Clone,
    {
        let storage = self.heap.lock();
        storage
            .ready()
            .and_then(Heap::peek)
            .map(|node| node.priority.clone())
    }
}

impl<T, P> PriorityQueue<T, P> {
    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.lock().ready().map_or(0, |heap| heap.nodes.len())
    }

    /// Returns true if no elements are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the allocated capacity of the backing array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.heap
            .lock()
            .ready()
            .map_or(0, |heap| heap.nodes.capacity())
    }

    /// Returns true if the queue was built through [`PriorityQueue::new`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.heap.lock().is_ready()
    }
}

#[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
fn ready_or_log<'a, S>(
    storage: &'a mut Storage<S>,
    op: &'static str,
) -> Result<&'a mut S, QueueError> {
    storage.ready_mut().inspect_err(|_| {
        trace!(op, "rejected operation on uninitialized priority queue");
    })
}

impl<T, P> Default for PriorityQueue<T, P> {
    /// Returns an uninitialized queue that rejects every insertion.
    fn default() -> Self {
        Self {
            heap: Mutex::new(Storage::Uninit),
        }
    }
}

impl<T, P> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.heap.lock();
        f.debug_struct("PriorityQueue")
            .field("valid", &storage.is_ready())
            .field("len", &storage.ready().map_or(0, |heap| heap.nodes.len()))
            .finish()
    }
}
