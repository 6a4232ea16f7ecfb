//! The ring's slot word: a `(payload, stamp)` pair updated only through a
//! single atomic read-modify-write.
//!
//! `payload` is the caller's opaque pointer-sized value; `stamp` is a
//! monotonically increasing counter that is the queue's sole ABA guard
//! (see the module-level docs in `queue.rs` for why splitting this pair
//! into two narrower atomics is unsound). On non-`loom` builds the pair is
//! packed into a single `u128` and updated with `portable_atomic::AtomicU128`,
//! mirroring the `__uint128_t` / `__sync_bool_compare_and_swap` pairing this
//! queue's protocol was distilled from. `loom` has no 128-bit atomic, so the
//! `cfg(loom)` build instead guards the pair with a `loom::sync::Mutex`; that
//! substitution only matters for the model-checked tests and never ships in
//! the real `AtomicU128`-backed build.

pub const ABSENT: usize = 0;

/// The logical contents of one slot: a payload and its ABA-guarding stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SlotState {
    pub payload: usize,
    pub stamp: usize,
}

impl SlotState {
    const fn empty() -> Self {
        Self { payload: ABSENT, stamp: 0 }
    }
}

#[cfg(not(loom))]
mod imp {
    use super::{SlotState, ABSENT};
    use portable_atomic::AtomicU128;
    use std::sync::atomic::Ordering;

    #[inline]
    fn pack(state: SlotState) -> u128 {
        ((state.payload as u64 as u128) << 64) | (state.stamp as u64 as u128)
    }

    #[inline]
    fn unpack(word: u128) -> SlotState {
        SlotState {
            payload: (word >> 64) as u64 as usize,
            stamp: word as u64 as usize,
        }
    }

    /// A single cache-line-sized atomic `(payload, stamp)` word.
    #[repr(align(64))]
    pub(crate) struct Slot {
        word: AtomicU128,
    }

    impl Slot {
        pub(crate) fn new() -> Self {
            debug_assert_eq!(ABSENT, 0);
            Self { word: AtomicU128::new(pack(SlotState::empty())) }
        }

        #[inline]
        pub(crate) fn load(&self, order: Ordering) -> SlotState {
            unpack(self.word.load(order))
        }

        #[inline]
        pub(crate) fn compare_exchange(
            &self,
            current: SlotState,
            new: SlotState,
            success: Ordering,
            failure: Ordering,
        ) -> Result<SlotState, SlotState> {
            self.word
                .compare_exchange(pack(current), pack(new), success, failure)
                .map(unpack)
                .map_err(unpack)
        }
    }
}

#[cfg(loom)]
mod imp {
    use super::SlotState;
    use loom::sync::Mutex;

    /// A `loom`-only stand-in for the hardware double-wide CAS: a mutex
    /// guarding the same logical `(payload, stamp)` pair. This exists only
    /// so the cursor-helping control flow can be exhaustively interleaved
    /// by the model checker; it is never compiled into the real crate.
    pub(crate) struct Slot {
        state: Mutex<SlotState>,
    }

    impl Slot {
        pub(crate) fn new() -> Self {
            Self { state: Mutex::new(SlotState::empty()) }
        }

        #[inline]
        pub(crate) fn load(&self, _order: loom::sync::atomic::Ordering) -> SlotState {
            *self.state.lock().unwrap()
        }

        #[inline]
        pub(crate) fn compare_exchange(
            &self,
            current: SlotState,
            new: SlotState,
            _success: loom::sync::atomic::Ordering,
            _failure: loom::sync::atomic::Ordering,
        ) -> Result<SlotState, SlotState> {
            let mut guard = self.state.lock().unwrap();
            if *guard == current {
                *guard = new;
                Ok(current)
            } else {
                Err(*guard)
            }
        }
    }
}

pub(crate) use imp::Slot;
