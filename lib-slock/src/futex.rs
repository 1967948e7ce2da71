use std::hint::spin_loop;
use std::sync::atomic::{
    AtomicU32,
    Ordering::{Acquire, Relaxed, Release},
};

use atomic_wait::{wait, wake_one};

use crate::lock::RawLock;

const UNLOCKED: u32 = 0;
const LOCKED: u32 = 1;
// Locked with at least one sleeping waiter.
const CONTENDED: u32 = 2;

/// Baseline reference lock over the platform's native blocking primitive.
///
/// The one lock in this crate whose waiters sleep in the kernel instead of
/// spinning: a short spin first, then a futex wait on the contended state.
/// The thread id is accepted for interface uniformity and ignored.
#[derive(Debug, Default)]
pub struct FutexLock {
    state: AtomicU32,
}

impl FutexLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn try_lock(&self) -> bool {
        self.state
            .compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed)
            .is_ok()
    }

    #[cold]
    fn lock_contended(&self) {
        let mut state = self.spin();

        // If the holder left while we spun, try to take the lock without
        // marking it contended.
        if state == UNLOCKED {
            match self
                .state
                .compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed)
            {
                Ok(_) => return,
                Err(s) => state = s,
            }
        }

        loop {
            // Swapping UNLOCKED to CONTENDED takes the lock; the skip when
            // already CONTENDED avoids a redundant write.
            if state != CONTENDED && self.state.swap(CONTENDED, Acquire) == UNLOCKED {
                return;
            }
            wait(&self.state, CONTENDED);
            state = self.spin();
        }
    }

    fn spin(&self) -> u32 {
        let mut budget = 100;
        loop {
            let state = self.state.load(Relaxed);
            if state != LOCKED || budget == 0 {
                return state;
            }
            spin_loop();
            budget -= 1;
        }
    }
}

impl RawLock for FutexLock {
    fn acquire(&self, _tid: usize) {
        if !self.try_lock() {
            self.lock_contended();
        }
    }

    fn release(&self, _tid: usize) {
        if self.state.swap(UNLOCKED, Release) == CONTENDED {
            // One waiter is enough: whoever wakes re-marks the state
            // CONTENDED, so the remaining sleepers get woken in turn.
            wake_one(&self.state);
        }
    }
}
