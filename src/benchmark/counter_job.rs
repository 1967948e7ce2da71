use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use debug_print::debug_println;
use libslock::lock::{LockType, RawLock};
use libslock::sync_cell::SyncCell;
use quanta::Clock;

use super::helper::create_writer;
use super::{LockBenchInfo, Record};

/// The lock-protected oracle: two counters that move in lockstep, one up
/// and one down, every time the critical section runs.
struct SharedCounters {
    var1: SyncCell<u64>,
    var2: SyncCell<u64>,
}

impl SharedCounters {
    fn new(num_thread: usize, iterations: u64) -> Self {
        SharedCounters {
            var1: SyncCell::new(0),
            var2: SyncCell::new(num_thread as u64 * iterations + 1),
        }
    }

    /// Caller must hold the lock guarding these counters.
    unsafe fn run_critical_section(&self) {
        *self.var1.get() += 1;
        *self.var2.get() -= 1;
    }
}

pub fn counter_contention(info: LockBenchInfo) {
    println!("Start counter contention for {}", info.target);

    let lock = Arc::new(info.target.to_locktype(info.num_thread));
    let counters = Arc::new(SharedCounters::new(info.num_thread, info.iterations));
    let barrier = Arc::new(Barrier::new(info.num_thread));

    let handles = (0..info.num_thread)
        .map(|id| {
            let lock = lock.clone();
            let counters = counters.clone();
            let barrier = barrier.clone();
            let (num_thread, num_cpu, iterations) =
                (info.num_thread, info.num_cpu, info.iterations);
            thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || {
                    thread_job(id, num_thread, num_cpu, iterations, lock, counters, barrier)
                })
                .expect("Failed to spawn thread")
        })
        .collect::<Vec<_>>();

    let mut results = Vec::new();
    for handle in handles {
        match handle.join() {
            Ok(record) => results.push(record),
            Err(_) => eprintln!("Error joining worker thread"),
        }
    }

    // Every thread has been joined, so reading the counters is safe.
    let expected = info.num_thread as u64 * info.iterations;
    let (var1, var2) = unsafe { (*counters.var1.get(), *counters.var2.get()) };
    assert_eq!(
        var1, expected,
        "{}: mutual exclusion violated on var1",
        info.target
    );
    assert_eq!(var2, 1, "{}: mutual exclusion violated on var2", info.target);

    if info.verbose {
        for record in &results {
            println!(
                "{}: thread {} took {:?}",
                info.target, record.id, record.job_length
            );
        }
    }

    write_results(info.output_path, &info.target.to_string(), info.num_thread, &results);

    let total: Duration = results.iter().map(|r| r.job_length).sum();
    println!(
        "Var1: {}\tVar2: {}\n{}: time taken (us): {}",
        var1,
        var2,
        info.target,
        total.as_micros()
    );
}

fn thread_job(
    id: usize,
    num_thread: usize,
    num_cpu: usize,
    iterations: u64,
    lock: Arc<LockType>,
    counters: Arc<SharedCounters>,
    barrier: Arc<Barrier>,
) -> Record {
    core_affinity::set_for_current(core_affinity::CoreId { id: id % num_cpu });
    debug_println!("thread {} starting", id);

    // Wait for all other worker threads to launch before proceeding.
    barrier.wait();

    let timer = Clock::new();
    let begin = timer.now();

    for _ in 0..iterations {
        lock.acquire(id);
        unsafe { counters.run_critical_section() };
        lock.release(id);
    }

    let job_length = timer.now().duration_since(begin);

    Record {
        id,
        cpu_id: id % num_cpu,
        thread_num: num_thread,
        cpu_num: num_cpu,
        iterations,
        job_length,
        locktype: lock.to_string(),
    }
}

fn write_results(output_path: &Path, name: &str, num_thread: usize, results: &[Record]) {
    let path = output_path.join(format!("counter_{}_{}.csv", name, num_thread));
    let mut writer = create_writer(&path).expect("Failed to create csv writer");
    for record in results {
        writer.serialize(record).expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush csv writer");
}
