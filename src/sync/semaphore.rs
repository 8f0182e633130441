//! Blocking counting semaphore.
//!
//! A [`Semaphore`] has a fixed capacity and tracks how many permits are
//! currently held (its occupancy). [`Semaphore::acquire`] blocks the calling
//! thread until the requested permits fit under the capacity;
//! [`Semaphore::release`] never blocks.
//!
//! # Release clamping
//!
//! Releasing more permits than are held does not fail. Occupancy is clamped
//! at zero and the excess is dropped, which means a double release goes
//! unnoticed.
//!
//! # Example
//!
//! ```
//! use xtypes::Semaphore;
//!
//! let sem = Semaphore::new(2);
//! sem.acquire(1);
//! {
//!     let _permit = sem.permit(1);
//!     assert_eq!(sem.occupancy(), 2);
//! }
//! sem.release(1);
//! assert_eq!(sem.occupancy(), 0);
//! ```

use parking_lot::{Condvar, Mutex};

use crate::error::TryAcquireError;
use crate::tracing_compat::{debug, trace, warn};

/// A counting semaphore with blocking acquire and non-blocking release.
///
/// Waiters are woken in no particular order.
#[derive(Debug)]
pub struct Semaphore {
    /// Permits currently held.
    occupancy: Mutex<usize>,
    /// Signalled whenever occupancy drops.
    released: Condvar,
    capacity: usize,
}

impl Semaphore {
    /// Creates a semaphore with `capacity` permits, none of them held.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "semaphore created");
        Self {
            occupancy: Mutex::new(0),
            released: Condvar::new(),
            capacity,
        }
    }

    /// Returns the fixed number of permits.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of permits currently held.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        *self.occupancy.lock()
    }

    /// Returns the number of permits that can be acquired right now.
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.capacity - *self.occupancy.lock()
    }

    /// Acquires `count` permits, blocking until they fit under the capacity.
    ///
    /// The permits are taken all at once. A request larger than the capacity
    /// can never be satisfied and blocks forever.
    pub fn acquire(&self, count: usize) {
        if count > self.capacity {
            warn!(
                count,
                capacity = self.capacity,
                "acquire exceeds semaphore capacity and will never complete"
            );
        }

        let mut occupancy = self.occupancy.lock();
        if !self.fits(*occupancy, count) {
            debug!(
                count,
                occupancy = *occupancy,
                capacity = self.capacity,
                "acquire blocked"
            );
            while !self.fits(*occupancy, count) {
                self.released.wait(&mut occupancy);
            }
        }
        *occupancy += count;
        trace!(count, occupancy = *occupancy, "permits acquired");
    }

    /// Acquires `count` permits only if they are available immediately.
    pub fn try_acquire(&self, count: usize) -> Result<(), TryAcquireError> {
        let mut occupancy = self.occupancy.lock();
        if self.fits(*occupancy, count) {
            *occupancy += count;
            drop(occupancy);
            Ok(())
        } else {
            Err(TryAcquireError {
                requested: count,
                available: self.capacity - *occupancy,
            })
        }
    }

    /// Acquires `count` permits and returns a guard that releases them on drop.
    pub fn permit(&self, count: usize) -> SemaphorePermit<'_> {
        self.acquire(count);
        SemaphorePermit {
            semaphore: self,
            count,
        }
    }

    /// Releases `count` permits and wakes blocked acquirers.
    ///
    /// Never blocks. Releasing more than is held clamps occupancy at zero.
    pub fn release(&self, count: usize) {
        if count == 0 {
            return;
        }
        let mut occupancy = self.occupancy.lock();
        if *occupancy == 0 {
            drop(occupancy);
            warn!(count, "release on idle semaphore ignored");
            return;
        }
        if count > *occupancy {
            warn!(
                count,
                occupancy = *occupancy,
                "release exceeds held permits, clamping to zero"
            );
        }
        *occupancy = occupancy.saturating_sub(count);
        trace!(count, occupancy = *occupancy, "permits released");
        drop(occupancy);
        // Waiters ask for different counts, so any of them may fit now.
        self.released.notify_all();
    }

    const fn fits(&self, occupancy: usize, count: usize) -> bool {
        match occupancy.checked_add(count) {
            Some(total) => total <= self.capacity,
            None => false,
        }
    }
}

/// Permits held on a [`Semaphore`], released when dropped.
#[derive(Debug)]
#[must_use = "permit will be immediately released if not held"]
pub struct SemaphorePermit<'a> {
    semaphore: &'a Semaphore,
    count: usize,
}

impl SemaphorePermit<'_> {
    /// Returns the number of permits held.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Keeps the permits acquired without releasing them.
    pub fn forget(self) {
        let _ = std::mem::ManuallyDrop::new(self);
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.semaphore.release(self.count);
    }
}
