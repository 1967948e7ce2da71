use std::hint::spin_loop;
use std::sync::atomic::AtomicU16;

use crate::atomic;
use crate::lock::RawLock;

const UNLOCKED: u16 = 0;
const LOCKED: u16 = 1;

/// Two-state test-and-set lock built directly on [`atomic::cas16`].
///
/// No fairness guarantee: under contention an arbitrary spinner wins, and
/// the same thread may win repeatedly.
#[derive(Debug, Default)]
pub struct SpinLock {
    state: AtomicU16,
}

impl SpinLock {
    pub fn new() -> Self {
        SpinLock {
            state: AtomicU16::new(UNLOCKED),
        }
    }
}

impl RawLock for SpinLock {
    fn acquire(&self, _tid: usize) {
        while !atomic::cas16(&self.state, UNLOCKED, LOCKED) {
            spin_loop();
        }
    }

    fn release(&self, _tid: usize) {
        // A plain store would do; CAS keeps the lock on a single primitive.
        atomic::cas16(&self.state, LOCKED, UNLOCKED);
    }
}
