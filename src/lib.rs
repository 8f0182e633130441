//! Thread-safe container primitives.
//!
//! `xtypes` provides three small concurrent building blocks:
//!
//! - [`PriorityQueue`]: a lock-guarded binary min-heap
//! - [`Queue`]: a lock-guarded FIFO queue
//! - [`Semaphore`]: a bounded counting semaphore with blocking acquire
//!
//! Every container is `Send + Sync` for `Send` payloads and is meant to be
//! shared behind an `Arc`.
//!
//! # Errors
//!
//! Queue operations return [`QueueError`]. `Invalid` means the queue was never
//! initialized through its constructor (it came from `Default`); `Empty` means
//! an element was required and none was present.
//!
//! # Features
//!
//! - `tracing-integration` (default): emit structured logs through `tracing`
//! - `cli`: build the `xtypes` demo binary
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use xtypes::{Queue, QueueError};
//!
//! let queue = Arc::new(Queue::new(16));
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || queue.put(0..10))
//! };
//! producer.join().unwrap().unwrap();
//!
//! assert_eq!(queue.get(3).unwrap(), vec![0, 1, 2]);
//! assert_eq!(queue.len(), 7);
//! assert_eq!(Queue::<u8>::default().pop(), Err(QueueError::Invalid));
//! ```

pub mod error;
pub mod sync;

#[cfg(feature = "cli")]
pub mod cli;

mod tracing_compat;

#[cfg(test)]
mod test_utils;

pub use error::{QueueError, TryAcquireError};
pub use sync::{PriorityQueue, Queue, Semaphore, SemaphorePermit};
