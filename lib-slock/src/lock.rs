use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::{
    array_queue::ArrayQueueLock, bakery::BakeryLock, filter::FilterLock, futex::FutexLock,
    spin::SpinLock, ticket::TicketLock,
};

/// Capability interface shared by every lock in this crate.
///
/// `tid` is the caller's identity: a dense integer in `[0, capacity)` for
/// the bounded locks, stable for the lifetime of the worker, and never held
/// by two live workers at once. A thread must only release a lock it
/// currently holds, under the identity it acquired with; the bounded locks
/// assert this where it is cheap to check.
#[enum_dispatch]
pub trait RawLock: Send + Sync {
    /// Blocks until the calling thread has exclusive entry. Every variant
    /// busy-spins while waiting except [`FutexLock`], which may sleep.
    fn acquire(&self, tid: usize);

    /// Relinquishes exclusive entry.
    fn release(&self, tid: usize);
}

#[enum_dispatch(RawLock)]
#[derive(Debug)]
pub enum LockType {
    Futex(FutexLock),
    Filter(FilterLock),
    Bakery(BakeryLock),
    Spin(SpinLock),
    Ticket(TicketLock),
    ArrayQueue(ArrayQueueLock),
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Futex(_) => write!(f, "Futex"),
            Self::Filter(_) => write!(f, "Filter"),
            Self::Bakery(_) => write!(f, "Bakery"),
            Self::Spin(_) => write!(f, "Spin"),
            Self::Ticket(_) => write!(f, "Ticket"),
            Self::ArrayQueue(_) => write!(f, "ArrayQueue"),
        }
    }
}
