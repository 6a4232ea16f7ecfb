//! A bounded, lock-free multi-producer/multi-consumer ring queue.
//!
//! The core is a fixed-capacity ring with two monotonically advancing
//! cursors (`rear` for producers, `front` for consumers) and a ring of
//! slots, each a `(payload, stamp)` pair updated through a single atomic
//! compare-and-swap. Producers and consumers cooperatively help advance
//! the *other* cursor whenever they observe it lagging behind a visibly
//! committed slot; this is what keeps full/empty reports accurate despite
//! cursors trailing the slots they describe. See [`Queue`] for the raw,
//! pointer-sized API, or [`PtrQueue`]/[`Producer`]/[`Consumer`] for a typed
//! wrapper that boxes ordinary Rust values on the caller's behalf.
//!
//! Capacity is fixed at construction and never grows. There is no
//! blocking: every operation returns immediately, reporting `QueueFull` or
//! emptiness rather than waiting.

mod backend;
mod error;
mod queue;
mod slot;
mod typed;

pub use error::{EnqueueError, QueueError};
pub use queue::{Queue, ABSENT_PAYLOAD};
pub use typed::{Consumer, PtrQueue, Producer};
