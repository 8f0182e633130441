//! Thread-safe container primitives.
//!
//! # Primitives
//!
//! - [`PriorityQueue`]: binary min-heap, smallest priority value first
//! - [`Queue`]: first-in first-out queue
//! - [`Semaphore`]: counting semaphore with blocking acquire
//!
//! The two queues guard their whole state with one mutex held for the full
//! duration of every operation, and never block waiting for elements. The
//! semaphore is the only primitive that suspends its caller.

mod priority_queue;
mod queue;
mod semaphore;
mod storage;

pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use semaphore::{Semaphore, SemaphorePermit};
