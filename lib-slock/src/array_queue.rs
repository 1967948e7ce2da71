use std::hint::spin_loop;
use std::sync::atomic::{
    AtomicBool, AtomicU32, AtomicUsize,
    Ordering::{Acquire, Relaxed, Release},
};

use crossbeam::utils::CachePadded;

use crate::atomic;
use crate::lock::RawLock;

/// Anderson's array queue lock: the same FIFO order as
/// [`TicketLock`](crate::ticket::TicketLock), but each waiter spins on its
/// own padded slot instead of one shared serving counter, so a release
/// invalidates a single waiter's cache line.
///
/// Capacity must be at least the number of threads that may contend at
/// once; overflowing it corrupts slot ownership. That is a configuration
/// error, not a runtime-checked condition.
#[derive(Debug)]
pub struct ArrayQueueLock {
    next_slot: AtomicU32,
    slots: Box<[CachePadded<AtomicBool>]>,
    // owned[tid] is written and read only by thread tid.
    owned: Box<[AtomicUsize]>,
}

impl ArrayQueueLock {
    pub fn with_capacity(max_threads: usize) -> Self {
        assert!(max_threads > 0, "capacity must be at least one thread");
        let mut slots = Vec::with_capacity(max_threads);
        slots.push(CachePadded::new(AtomicBool::new(true)));
        for _ in 1..max_threads {
            slots.push(CachePadded::new(AtomicBool::new(false)));
        }
        let owned = (0..max_threads).map(|_| AtomicUsize::new(0)).collect();
        ArrayQueueLock {
            next_slot: AtomicU32::new(0),
            slots: slots.into_boxed_slice(),
            owned,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl RawLock for ArrayQueueLock {
    fn acquire(&self, tid: usize) {
        debug_assert!(tid < self.capacity());
        let slot = atomic::fetch_inc(&self.next_slot) as usize % self.capacity();
        self.owned[tid].store(slot, Relaxed);
        while !self.slots[slot].load(Acquire) {
            spin_loop();
        }
    }

    fn release(&self, tid: usize) {
        let slot = self.owned[tid].load(Relaxed);
        let next = (slot + 1) % self.capacity();
        // Own slot goes inactive before the successor goes active, so a
        // capacity-one queue ends with its only slot active.
        self.slots[slot].store(false, Release);
        self.slots[next].store(true, Release);
    }
}
