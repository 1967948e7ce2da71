use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use serial_test::serial;

use crate::array_queue::ArrayQueueLock;
use crate::bakery::BakeryLock;
use crate::filter::FilterLock;
use crate::futex::FutexLock;
use crate::lock::{LockType, RawLock};
use crate::spin::SpinLock;
use crate::sync_cell::SyncCell;
use crate::ticket::TicketLock;

const THREADS: usize = 4;
const ITERATIONS: u64 = 1000;

fn all_locks(max_threads: usize) -> Vec<LockType> {
    vec![
        FutexLock::new().into(),
        FilterLock::with_capacity(max_threads).into(),
        BakeryLock::with_capacity(max_threads).into(),
        SpinLock::new().into(),
        TicketLock::new().into(),
        ArrayQueueLock::with_capacity(max_threads).into(),
    ]
}

/// The oracle counters: one up, one down, in lockstep under the lock.
struct Counters {
    var1: SyncCell<u64>,
    var2: SyncCell<u64>,
}

impl Counters {
    fn new(threads: usize, iterations: u64) -> Self {
        Counters {
            var1: SyncCell::new(0),
            var2: SyncCell::new(threads as u64 * iterations + 1),
        }
    }

    /// Caller must hold the lock under test.
    unsafe fn bump(&self) {
        *self.var1.get() += 1;
        *self.var2.get() -= 1;
    }
}

fn contend(lock: LockType, threads: usize, iterations: u64) {
    let lock = Arc::new(lock);
    let counters = Arc::new(Counters::new(threads, iterations));
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|tid| {
            let lock = lock.clone();
            let counters = counters.clone();
            let barrier = barrier.clone();
            thread::Builder::new()
                .name(format!("worker-{tid}"))
                .spawn(move || {
                    barrier.wait();
                    for _ in 0..iterations {
                        lock.acquire(tid);
                        unsafe { counters.bump() };
                        lock.release(tid);
                    }
                })
                .expect("failed to spawn worker")
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    unsafe {
        assert_eq!(
            *counters.var1.get(),
            threads as u64 * iterations,
            "{lock} lost updates on var1"
        );
        assert_eq!(*counters.var2.get(), 1, "{lock} lost updates on var2");
    }
}

#[test]
#[serial]
fn futex_counter() {
    contend(FutexLock::new().into(), THREADS, ITERATIONS);
}

#[test]
#[serial]
fn filter_counter() {
    contend(FilterLock::with_capacity(THREADS).into(), THREADS, ITERATIONS);
}

#[test]
#[serial]
fn bakery_counter() {
    contend(BakeryLock::with_capacity(THREADS).into(), THREADS, ITERATIONS);
}

#[test]
#[serial]
fn spin_counter() {
    contend(SpinLock::new().into(), THREADS, ITERATIONS);
}

#[test]
#[serial]
fn ticket_counter() {
    contend(TicketLock::new().into(), THREADS, ITERATIONS);
}

#[test]
#[serial]
fn array_queue_counter() {
    contend(
        ArrayQueueLock::with_capacity(THREADS).into(),
        THREADS,
        ITERATIONS,
    );
}

// A fresh lock must grant the very first acquire without contention.
#[test]
fn single_thread_smoke() {
    for lock in all_locks(1) {
        contend(lock, 1, 1);
    }
}

/// Holds the lock, releases staggered waiters into it in a known arrival
/// order, and checks they are served in exactly that order. The service
/// log itself is guarded by the lock under test.
fn assert_fifo(lock: LockType) {
    const WAITERS: usize = 3;

    let lock = Arc::new(lock);
    let order = Arc::new(SyncCell::new(Vec::new()));

    lock.acquire(0);

    let handles: Vec<_> = (1..=WAITERS)
        .map(|tid| {
            let lock = lock.clone();
            let order = order.clone();
            let handle = thread::spawn(move || {
                lock.acquire(tid);
                unsafe { (*order.get()).push(tid) };
                lock.release(tid);
            });
            // Let this waiter draw its ticket before the next one starts.
            thread::sleep(Duration::from_millis(100));
            handle
        })
        .collect();

    lock.release(0);
    for handle in handles {
        handle.join().unwrap();
    }

    unsafe {
        assert_eq!(*order.get(), (1..=WAITERS).collect::<Vec<_>>());
    }
}

#[test]
#[serial]
fn ticket_is_fifo() {
    assert_fifo(TicketLock::new().into());
}

#[test]
#[serial]
fn array_queue_is_fifo() {
    assert_fifo(ArrayQueueLock::with_capacity(4).into());
}

#[test]
#[should_panic(expected = "release without a held acquire")]
fn filter_rejects_unmatched_release() {
    let lock = FilterLock::with_capacity(2);
    lock.release(0);
}
