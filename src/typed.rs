//! Ergonomic, typed handles over the raw pointer-sized [`Queue`].
//!
//! The raw queue moves bare `usize` payloads and never touches what they
//! mean. [`PtrQueue<T>`] is a thin layer on top that boxes caller values so
//! ordinary Rust code can move `T`s through the queue without hand-rolling
//! `Box::into_raw`/`Box::from_raw` at every call site. It mirrors the
//! `Producer<T>`/`Consumer<T>` handles the teacher crate exposed over its
//! own `Arc`-shared buffer.

use crate::error::EnqueueError;
use crate::queue::Queue;
use crate::slot::ABSENT;
use std::marker::PhantomData;
use std::sync::Arc;

/// A raw [`Queue`] paired with the type it is being used to transport.
///
/// Boxes every value handed to [`PtrQueue::send`] and reconstitutes it in
/// [`PtrQueue::recv`]. Because `Box::into_raw` never returns a null
/// pointer for a live allocation, values sent through a `PtrQueue` always
/// satisfy the raw queue's `payload != ABSENT` precondition automatically.
pub struct PtrQueue<T> {
    inner: Queue,
    _marker: PhantomData<T>,
}

impl<T> PtrQueue<T> {
    /// Creates a new typed queue with exactly `depth` slots.
    pub fn new(depth: usize) -> Result<Self, crate::error::QueueError> {
        Ok(Self { inner: Queue::create(depth)?, _marker: PhantomData })
    }

    fn send(&self, value: T) -> Result<(), T> {
        let ptr = Box::into_raw(Box::new(value)) as usize;
        match self.inner.enqueue(ptr) {
            Ok(()) => Ok(()),
            Err(EnqueueError) => {
                // SAFETY: this pointer was produced by the `Box::into_raw`
                // above and was never handed to the queue successfully, so
                // nothing else can have taken ownership of it.
                let value = unsafe { *Box::from_raw(ptr as *mut T) };
                Err(value)
            }
        }
    }

    fn recv(&self) -> Option<T> {
        let ptr = self.inner.dequeue();
        if ptr == ABSENT {
            return None;
        }
        // SAFETY: `ptr` was produced by a prior successful `send` on this
        // same queue via `Box::into_raw`, and the queue hands each payload
        // out to exactly one dequeuer.
        Some(unsafe { *Box::from_raw(ptr as *mut T) })
    }

    /// Returns the capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns true if the queue is empty.
    ///
    /// Note: this is a snapshot view and may change immediately after the call.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the queue is full.
    ///
    /// Note: this is a snapshot view and may change immediately after the call.
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Returns the approximate number of items in the queue.
    ///
    /// Note: this is a snapshot view and may change immediately after the call.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> Drop for PtrQueue<T> {
    fn drop(&mut self) {
        // The raw queue never frees a payload it didn't install itself, so
        // whatever is still enqueued at teardown would otherwise leak.
        // Preconditions mirror `Queue::destroy`: no concurrent caller.
        let mut drained = 0usize;
        loop {
            let ptr = self.inner.dequeue();
            if ptr == ABSENT {
                break;
            }
            // SAFETY: same invariant as `recv` above.
            unsafe {
                drop(Box::from_raw(ptr as *mut T));
            }
            drained += 1;
        }
        if drained > 0 {
            log::debug!("dropped {drained} residual payload(s) on queue teardown");
        }
    }
}

/// A cheaply cloneable producer handle over a shared [`PtrQueue`].
pub struct Producer<T> {
    queue: Arc<PtrQueue<T>>,
}

impl<T> Producer<T> {
    pub fn new(queue: Arc<PtrQueue<T>>) -> Self {
        Self { queue }
    }

    /// Sends `item` to the queue, returning it back if the queue is full.
    pub fn send(&self, item: T) -> Result<(), T> {
        self.queue.send(item)
    }

    /// Calls [`Producer::send`] from async code. The underlying operation
    /// never blocks or suspends; this exists purely so callers in async
    /// contexts don't need a `spawn_blocking` hop to reach a synchronous,
    /// non-blocking call.
    pub async fn send_async(&self, item: T) -> Result<(), T> {
        self.send(item)
    }

    /// Returns true if the queue is full.
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Returns the capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self { queue: Arc::clone(&self.queue) }
    }
}

/// A cheaply cloneable consumer handle over a shared [`PtrQueue`].
pub struct Consumer<T> {
    queue: Arc<PtrQueue<T>>,
}

impl<T> Consumer<T> {
    pub fn new(queue: Arc<PtrQueue<T>>) -> Self {
        Self { queue }
    }

    /// Removes and returns the head item, or `None` if the queue is empty.
    pub fn recv(&self) -> Option<T> {
        self.queue.recv()
    }

    /// Calls [`Consumer::recv`] from async code; see [`Producer::send_async`].
    pub async fn recv_async(&self) -> Option<T> {
        self.recv()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the approximate number of items in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self { queue: Arc::clone(&self.queue) }
    }
}
