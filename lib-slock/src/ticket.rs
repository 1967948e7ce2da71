use std::hint::spin_loop;
use std::sync::atomic::{
    AtomicU32,
    Ordering::{Acquire, Relaxed, Release},
};

use crate::atomic;
use crate::lock::RawLock;

/// FIFO lock: draw a ticket, wait until it is the one being served.
///
/// Threads are served in the exact order their tickets were issued, so a
/// waiter's spin count is bounded by the number of tickets ahead of it.
#[derive(Debug, Default)]
pub struct TicketLock {
    next_ticket: AtomicU32,
    serving: AtomicU32,
}

impl TicketLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawLock for TicketLock {
    fn acquire(&self, _tid: usize) {
        let ticket = atomic::fetch_inc(&self.next_ticket);
        while self.serving.load(Acquire) != ticket {
            spin_loop();
        }
    }

    fn release(&self, _tid: usize) {
        // Only the holder writes `serving`, so a load/store pair suffices;
        // the Release store publishes the critical section to the next
        // ticket holder.
        let next = self.serving.load(Relaxed).wrapping_add(1);
        self.serving.store(next, Release);
    }
}
