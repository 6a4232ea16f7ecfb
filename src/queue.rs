//! The raw, non-generic ring: a fixed-capacity MPMC FIFO of opaque
//! pointer-sized payloads.
//!
//! This is deliberately not generic over a payload type `T`. The queue
//! moves `usize`-sized values and never dereferences them; it is the
//! caller's job (or the typed wrapper's, see [`crate::typed`]) to decide
//! what those integers mean and who owns whatever they point to.
//!
//! The enqueue/dequeue protocol below implements a generalized
//! Michael & Scott-style bounded queue: two monotonic cursors (`rear`,
//! `front`) and a ring of double-wide `(payload, stamp)` slots, where every
//! successful slot transition is a single atomic compare-and-swap and
//! threads cooperatively help advance the *other* cursor whenever they
//! observe it lagging a visibly committed slot. Splitting a slot's payload
//! and stamp into two separate atomics is not a valid optimization here: it
//! reopens the ABA window the stamp exists to close.

use crate::backend::{AtomicUsize, Ordering};
use crate::error::{EnqueueError, QueueError};
use crate::slot::{Slot, SlotState, ABSENT};
use crossbeam_utils::CachePadded;

pub use crate::slot::ABSENT as ABSENT_PAYLOAD;

/// A bounded, lock-free MPMC ring queue of pointer-sized payloads.
///
/// `depth` is fixed at construction and never rounded or resized. `0` is
/// not a legal depth (see [`Queue::create`]).
pub struct Queue {
    depth: usize,
    rear: CachePadded<AtomicUsize>,
    front: CachePadded<AtomicUsize>,
    slots: Box<[Slot]>,
}

// The queue's own header and ring are only ever mutated through atomics;
// the payload `usize`s it carries are caller-defined and `Send`-neutral.
unsafe impl Send for Queue {}
unsafe impl Sync for Queue {}

impl Queue {
    /// Creates a new queue with exactly `depth` slots.
    ///
    /// # Panics
    ///
    /// Panics if `depth == 0`. A queue of capacity zero can only ever be
    /// full and empty at once, which is a contract violation rather than a
    /// recoverable condition.
    pub fn create(depth: usize) -> Result<Self, QueueError> {
        assert!(depth > 0, "queue depth must be at least 1");

        let mut slots = Vec::new();
        slots.try_reserve_exact(depth).map_err(|_| {
            log::error!("failed to reserve {depth} slots for a new queue");
            QueueError::allocation_failed()
        })?;
        for _ in 0..depth {
            slots.push(Slot::new());
        }

        log::debug!("created lock-free ring queue with depth {depth}");
        Ok(Self {
            depth,
            rear: CachePadded::new(AtomicUsize::new(0)),
            front: CachePadded::new(AtomicUsize::new(0)),
            slots: slots.into_boxed_slice(),
        })
    }

    /// Releases the queue's backing storage.
    ///
    /// # Preconditions
    ///
    /// No other thread may be calling [`Queue::enqueue`] or
    /// [`Queue::dequeue`] concurrently with, or after, this call. This is
    /// equivalent to simply dropping the queue; it exists to mirror the
    /// explicit `create`/`destroy` pairing of the library surface this
    /// crate implements.
    pub fn destroy(self) {
        drop(self);
    }

    /// The fixed capacity the queue was created with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.depth
    }

    /// A snapshot of whether the queue is empty. May be stale by the time
    /// the caller observes it under concurrent use.
    pub fn is_empty(&self) -> bool {
        self.rear.load(Ordering::SeqCst) == self.front.load(Ordering::SeqCst)
    }

    /// A snapshot of whether the queue is full. May be stale by the time
    /// the caller observes it under concurrent use.
    pub fn is_full(&self) -> bool {
        self.rear.load(Ordering::SeqCst) == self.front.load(Ordering::SeqCst) + self.depth
    }

    /// A snapshot of the number of enqueued payloads. May be stale by the
    /// time the caller observes it under concurrent use.
    pub fn len(&self) -> usize {
        self.rear.load(Ordering::SeqCst) - self.front.load(Ordering::SeqCst)
    }

    #[inline]
    fn slot(&self, logical_index: usize) -> &Slot {
        &self.slots[logical_index % self.depth]
    }

    /// Attempts to append `payload` to the tail of the queue.
    ///
    /// Returns [`EnqueueError`] if and only if the queue was observed full
    /// at some point during the call; no state is modified on that path.
    ///
    /// # Panics (debug only)
    ///
    /// Panics in debug builds if `payload` is the reserved [`ABSENT_PAYLOAD`]
    /// sentinel value; enqueueing it would collapse the empty/occupied
    /// distinction the protocol relies on.
    pub fn enqueue(&self, payload: usize) -> Result<(), EnqueueError> {
        debug_assert_ne!(
            payload, ABSENT,
            "ABSENT is a reserved sentinel and cannot be enqueued"
        );

        loop {
            let rear_s = self.rear.load(Ordering::SeqCst);
            let old = self.slot(rear_s).load(Ordering::SeqCst);
            let front_s = self.front.load(Ordering::SeqCst);
            if rear_s != self.rear.load(Ordering::SeqCst) {
                // The snapshot crossed a cursor move; it may be inconsistent.
                continue;
            }

            if rear_s == front_s + self.depth {
                // The ring appears full. Re-read the head to see whether a
                // consumer already drained it but hasn't advanced `front`.
                let head = self.slot(front_s).load(Ordering::SeqCst);
                if head.payload != ABSENT && front_s == self.front.load(Ordering::SeqCst) {
                    return Err(EnqueueError);
                }
                let _ = self.front.compare_exchange(
                    front_s,
                    front_s + 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                continue;
            }

            if old.payload == ABSENT {
                let new = SlotState { payload, stamp: old.stamp.wrapping_add(1) };
                if self
                    .slot(rear_s)
                    .compare_exchange(old, new, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    let _ = self.rear.compare_exchange(
                        rear_s,
                        rear_s + 1,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                    return Ok(());
                }
            } else {
                // Another producer committed this slot but hasn't advanced
                // `rear` yet. Re-read before helping: it may already be gone.
                let current = self.slot(rear_s).load(Ordering::SeqCst);
                if current.payload != ABSENT {
                    let _ = self.rear.compare_exchange(
                        rear_s,
                        rear_s + 1,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                }
            }
        }
    }

    /// Removes and returns the head payload, or the reserved
    /// [`ABSENT_PAYLOAD`] value if the queue was observed empty at some
    /// point during the call.
    pub fn dequeue(&self) -> usize {
        loop {
            let front_s = self.front.load(Ordering::SeqCst);
            let old = self.slot(front_s).load(Ordering::SeqCst);
            let rear_s = self.rear.load(Ordering::SeqCst);
            if front_s != self.front.load(Ordering::SeqCst) {
                continue;
            }

            if front_s == rear_s {
                // The ring appears empty. Re-read the tail to see whether a
                // producer already filled it but hasn't advanced `rear`.
                let tail = self.slot(rear_s).load(Ordering::SeqCst);
                if tail.payload == ABSENT && rear_s == self.rear.load(Ordering::SeqCst) {
                    return ABSENT;
                }
                let _ = self.rear.compare_exchange(
                    rear_s,
                    rear_s + 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                continue;
            }

            if old.payload != ABSENT {
                let new = SlotState { payload: ABSENT, stamp: old.stamp.wrapping_add(1) };
                if self
                    .slot(front_s)
                    .compare_exchange(old, new, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    let _ = self.front.compare_exchange(
                        front_s,
                        front_s + 1,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                    return old.payload;
                }
            } else {
                // Another consumer drained this slot but hasn't advanced
                // `front` yet. Re-read before helping: it may already be gone.
                let current = self.slot(front_s).load(Ordering::SeqCst);
                if current.payload == ABSENT {
                    let _ = self.front.compare_exchange(
                        front_s,
                        front_s + 1,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                }
            }
        }
    }
}
