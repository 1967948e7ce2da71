//! Classic mutual-exclusion locks behind one capability interface.
//!
//! Every lock is driven through [`lock::RawLock`]: `acquire(tid)` and
//! `release(tid)` with dense thread ids in `[0, capacity)`. All of them
//! busy-spin while waiting, except the futex baseline, which sleeps in
//! the kernel.

pub mod atomic;
pub mod lock;

pub mod array_queue;
pub mod bakery;
pub mod filter;
pub mod futex;
pub mod spin;
pub mod ticket;

pub mod sync_cell;

#[cfg(test)]
mod unit_test;
