use std::thread::available_parallelism;

use clap::*;
use libslock::{
    array_queue::ArrayQueueLock, bakery::BakeryLock, filter::FilterLock, futex::FutexLock,
    lock::LockType, spin::SpinLock, ticket::TicketLock,
};
use strum::{Display, EnumIter};

#[derive(Debug, Parser)]
#[clap(name = "lock counter benchmark", version)]
/// Contention benchmark for the classic mutual-exclusion locks
pub struct App {
    /// Locks to benchmark; all of them when omitted
    #[arg(value_enum)]
    pub lock_targets: Option<Vec<LockTarget>>,
    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, EnumIter, Display)]
pub enum LockTarget {
    /// Futex-backed blocking lock (baseline)
    Futex,
    /// Filter lock (generalized Peterson)
    Filter,
    /// Lamport's bakery lock
    Bakery,
    /// Test-and-set spin lock
    Spin,
    /// Ticket lock
    Ticket,
    /// Array queue lock
    ArrayQueue,
}

impl LockTarget {
    /// Builds the lock this target names. The bounded locks size their
    /// bookkeeping arrays to `max_threads`.
    pub fn to_locktype(&self, max_threads: usize) -> LockType {
        match self {
            LockTarget::Futex => FutexLock::new().into(),
            LockTarget::Filter => FilterLock::with_capacity(max_threads).into(),
            LockTarget::Bakery => BakeryLock::with_capacity(max_threads).into(),
            LockTarget::Spin => SpinLock::new().into(),
            LockTarget::Ticket => TicketLock::new().into(),
            LockTarget::ArrayQueue => ArrayQueueLock::with_capacity(max_threads).into(),
        }
    }
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    #[arg(num_args(0..), value_delimiter = ',', value_terminator("."), long, short, default_values_t = [available_parallelism().unwrap().get()].to_vec())]
    pub threads: Vec<usize>,
    #[arg(num_args(0..), value_delimiter = ',', value_terminator("."), long, short, default_values_t = [available_parallelism().unwrap().get()].to_vec())]
    pub cpus: Vec<usize>,
    /// Acquire/release cycles each worker performs
    #[arg(long, short, default_value_t = 1_000_000)]
    pub iterations: u64,
    #[arg(long, short, default_value = "output")]
    pub output_path: String,
    #[arg(long, short)]
    pub verbose: bool,
}
