use std::sync::{Arc, Barrier};
use std::thread::{self, available_parallelism};

use core_affinity::{set_for_current, CoreId};
use criterion::measurement::WallTime;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};

use libslock::array_queue::ArrayQueueLock;
use libslock::bakery::BakeryLock;
use libslock::filter::FilterLock;
use libslock::futex::FutexLock;
use libslock::lock::{LockType, RawLock};
use libslock::spin::SpinLock;
use libslock::sync_cell::SyncCell;
use libslock::ticket::TicketLock;

const ITERATION: u64 = 1000;

pub fn lock_bench(bencher: &mut Criterion) {
    let cpu_count = available_parallelism().unwrap().get();

    let mut group = bencher.benchmark_group("Classic Locks");

    for &thread_count in [2, 4].iter() {
        bench_target(
            &mut group,
            "futex",
            || FutexLock::new().into(),
            cpu_count,
            thread_count,
        );
        bench_target(
            &mut group,
            "filter",
            move || FilterLock::with_capacity(thread_count).into(),
            cpu_count,
            thread_count,
        );
        bench_target(
            &mut group,
            "bakery",
            move || BakeryLock::with_capacity(thread_count).into(),
            cpu_count,
            thread_count,
        );
        bench_target(
            &mut group,
            "spin",
            || SpinLock::new().into(),
            cpu_count,
            thread_count,
        );
        bench_target(
            &mut group,
            "ticket",
            || TicketLock::new().into(),
            cpu_count,
            thread_count,
        );
        bench_target(
            &mut group,
            "array-queue",
            move || ArrayQueueLock::with_capacity(thread_count).into(),
            cpu_count,
            thread_count,
        );
    }

    group.finish();
}

fn bench_target<F>(
    group: &mut BenchmarkGroup<WallTime>,
    name: &str,
    make_lock: F,
    cpu_count: usize,
    thread_count: usize,
) where
    F: Fn() -> LockType,
{
    group.bench_with_input(BenchmarkId::new(name, thread_count), &cpu_count, |b, _| {
        b.iter(|| contended_counter(Arc::new(make_lock()), cpu_count, thread_count, ITERATION));
    });
}

fn contended_counter(lock: Arc<LockType>, cpu_count: usize, thread_count: usize, iterations: u64) {
    let counter = Arc::new(SyncCell::new(0u64));
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|id| {
            let lock = lock.clone();
            let counter = counter.clone();
            let barrier = barrier.clone();
            thread::Builder::new()
                .name(id.to_string())
                .spawn(move || {
                    set_for_current(CoreId {
                        id: id % cpu_count,
                    });
                    barrier.wait();
                    for _ in 0..iterations {
                        lock.acquire(id);
                        unsafe { *counter.get() += 1 };
                        lock.release(id);
                    }
                })
                .expect("Failed to spawn thread")
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        unsafe { *counter.get() },
        thread_count as u64 * iterations
    );
}

criterion_group!(benches, lock_bench);
criterion_main!(benches);
