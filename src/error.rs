//! Error types returned by the queue's fallible operations.
//!
//! Both are small enough, and local enough to this crate, that hand-written
//! `Display`/`Error` impls are clearer than pulling in a derive macro for a
//! single variant each.

use std::fmt;

/// Construction failed because backing storage could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueError {
    kind: QueueErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueErrorKind {
    AllocationFailed,
}

impl QueueError {
    pub(crate) fn allocation_failed() -> Self {
        Self { kind: QueueErrorKind::AllocationFailed }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            QueueErrorKind::AllocationFailed => {
                f.write_str("failed to allocate backing storage for the queue")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// `enqueue` could not accept the payload because the queue was full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueError;

impl fmt::Display for EnqueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is full")
    }
}

impl std::error::Error for EnqueueError {}
