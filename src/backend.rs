//! Atomic primitives shared by the cursors and the slot word.
//!
//! Swapped for `loom`'s model-checked equivalents under `cfg(loom)` so the
//! cursor-helping protocol can be exhaustively checked for small depths.
//! `loom` has no notion of a 128-bit atomic, so the slot word itself keeps a
//! separate, `loom`-only representation; see [`crate::slot`].

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicUsize, Ordering};
