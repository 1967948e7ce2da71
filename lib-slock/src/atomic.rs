//! The two atomic instructions the spin locks are built from.
//!
//! Orderings are sequentially consistent throughout: these stand in for
//! x86 `lock cmpxchg` and `lock xadd`, which are full barriers.

use std::sync::atomic::{AtomicU16, AtomicU32, Ordering::SeqCst};

/// Compare-and-swap on a 16-bit word. Returns true when `target` held
/// `expected` and was swapped to `desired`.
#[inline]
pub fn cas16(target: &AtomicU16, expected: u16, desired: u16) -> bool {
    target
        .compare_exchange(expected, desired, SeqCst, SeqCst)
        .is_ok()
}

/// Fetch-and-add of one on a 32-bit counter, returning the previous value.
#[inline]
pub fn fetch_inc(target: &AtomicU32) -> u32 {
    target.fetch_add(1, SeqCst)
}
