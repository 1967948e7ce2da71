use std::hint::spin_loop;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering::SeqCst};

use crate::lock::RawLock;

/// Lamport's bakery algorithm: take a number, wait for every smaller one.
///
/// The running maximum is read and written as two separate operations on
/// purpose. Two threads labelling at the same time may draw the same
/// number, and the `(label, tid)` tie-break in the wait loop absorbs the
/// duplicate; turning the increment into a fetch-and-add would change the
/// algorithm. Bounded waiting follows from labels being non-decreasing.
#[derive(Debug)]
pub struct BakeryLock {
    choosing: Box<[AtomicBool]>,
    labels: Box<[AtomicU32]>,
    max_label: AtomicU32,
}

impl BakeryLock {
    pub fn with_capacity(max_threads: usize) -> Self {
        assert!(max_threads > 0, "capacity must be at least one thread");
        let mut choosing = Vec::with_capacity(max_threads);
        let mut labels = Vec::with_capacity(max_threads);
        for _ in 0..max_threads {
            choosing.push(AtomicBool::new(false));
            labels.push(AtomicU32::new(0));
        }
        BakeryLock {
            choosing: choosing.into_boxed_slice(),
            labels: labels.into_boxed_slice(),
            max_label: AtomicU32::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.choosing.len()
    }
}

impl RawLock for BakeryLock {
    fn acquire(&self, tid: usize) {
        debug_assert!(tid < self.capacity());
        self.choosing[tid].store(true, SeqCst);
        let label = self.max_label.load(SeqCst).wrapping_add(1);
        self.max_label.store(label, SeqCst);
        self.labels[tid].store(label, SeqCst);
        loop {
            let someone_ahead = (0..self.capacity()).any(|k| {
                if k == tid || !self.choosing[k].load(SeqCst) {
                    return false;
                }
                let other = self.labels[k].load(SeqCst);
                // Lexicographic order on (label, tid); label 0 means the
                // thread has not taken a number.
                other != 0 && (other, k) < (label, tid)
            });
            if !someone_ahead {
                break;
            }
            spin_loop();
        }
    }

    fn release(&self, tid: usize) {
        // The label is left stale: a cleared `choosing` flag already drops
        // this thread out of everyone's ordering checks.
        self.choosing[tid].store(false, SeqCst);
    }
}
