use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_with::{serde_as, DurationNanoSeconds};
use strum::IntoEnumIterator;

use crate::command_parser::{GlobalOpts, LockTarget};

use self::counter_job::counter_contention;

mod counter_job;
mod helper;

pub fn benchmark(
    num_cpu: usize,
    num_thread: usize,
    targets: &Option<Vec<LockTarget>>,
    options: &GlobalOpts,
) {
    let targets = match targets {
        Some(t) => t.clone(),
        None => LockTarget::iter().collect(),
    };

    for target in targets {
        counter_contention(LockBenchInfo {
            target,
            num_thread,
            num_cpu,
            iterations: options.iterations,
            output_path: Path::new(&options.output_path),
            verbose: options.verbose,
        });
    }
}

pub struct LockBenchInfo<'a> {
    pub target: LockTarget,
    pub num_thread: usize,
    pub num_cpu: usize,
    pub iterations: u64,
    pub output_path: &'a Path,
    pub verbose: bool,
}

/// One csv row per worker thread.
#[serde_as]
#[derive(Serialize, Debug)]
pub struct Record {
    pub id: usize,
    pub cpu_id: usize,
    pub thread_num: usize,
    pub cpu_num: usize,
    pub iterations: u64,
    #[serde_as(as = "DurationNanoSeconds")]
    pub job_length: Duration,
    pub locktype: String,
}
