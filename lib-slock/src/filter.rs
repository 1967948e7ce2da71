use std::hint::spin_loop;
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};

use crate::lock::RawLock;

/// Peterson's algorithm generalized to `n` threads: `n - 1` filter levels,
/// each guaranteed to hold back at least one contender, so at most one
/// thread leaves the top level.
///
/// Starvation-free but not FIFO; fairness degrades as capacity grows.
#[derive(Debug)]
pub struct FilterLock {
    levels: Box<[AtomicUsize]>,
    victims: Box<[AtomicUsize]>,
}

impl FilterLock {
    pub fn with_capacity(max_threads: usize) -> Self {
        assert!(max_threads > 0, "capacity must be at least one thread");
        let mut levels = Vec::with_capacity(max_threads);
        let mut victims = Vec::with_capacity(max_threads);
        for _ in 0..max_threads {
            levels.push(AtomicUsize::new(0));
            victims.push(AtomicUsize::new(0));
        }
        FilterLock {
            levels: levels.into_boxed_slice(),
            victims: victims.into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.levels.len()
    }
}

impl RawLock for FilterLock {
    fn acquire(&self, tid: usize) {
        debug_assert!(tid < self.capacity());
        let n = self.capacity();
        for i in 1..n {
            // Publish our level before naming ourselves victim; both writes
            // must be visible before we re-read anyone else's state, or the
            // exclusion argument breaks.
            self.levels[tid].store(i, SeqCst);
            self.victims[i].store(tid, SeqCst);
            // Wait here while we stay the victim and someone else is at
            // level i or above.
            while self.victims[i].load(SeqCst) == tid
                && (0..n).any(|k| k != tid && self.levels[k].load(SeqCst) >= i)
            {
                spin_loop();
            }
        }
    }

    fn release(&self, tid: usize) {
        // Only the top level may release; anything else is an unmatched
        // release and would silently corrupt the filter state.
        assert_eq!(
            self.levels[tid].load(SeqCst),
            self.capacity() - 1,
            "release without a held acquire (tid {tid})"
        );
        self.levels[tid].store(0, SeqCst);
    }
}
