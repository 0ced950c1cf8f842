use std::hint::black_box;
use std::num::NonZeroUsize;
use std::thread;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{elapsed, Clock, NANOS_PER_SEC};
use crate::error::{HarnessError, Result};
use crate::workload::{ParameterBlock, Workload};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Quick,
    Full,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub profile: Profile,
    pub seed: u64,
    /// Overrides every benchmark's cycle count when set.
    pub cycles: Option<u32>,
    /// Also measure a bounded pool with this many workers when set.
    pub pool_workers: Option<NonZeroUsize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Full,
            seed: 0,
            cycles: None,
            pool_workers: None,
        }
    }
}

/// Wall-clock duration of one (workload, strategy) run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingResult {
    pub elapsed_nanoseconds: i64,
}

impl TimingResult {
    pub fn seconds(&self) -> f64 {
        self.elapsed_nanoseconds as f64 / NANOS_PER_SEC as f64
    }
}

/// A way of invoking a workload `cycles` times.
///
/// Implementations return only once every invocation has finished.
pub trait ExecutionStrategy {
    fn name(&self) -> &'static str;

    fn execute(&self, workload: &dyn Workload, params: &ParameterBlock, cycles: u32) -> Result<()>;
}

/// Back-to-back invocations on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl ExecutionStrategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn execute(&self, workload: &dyn Workload, params: &ParameterBlock, cycles: u32) -> Result<()> {
        for _ in 0..cycles {
            black_box(workload.run(black_box(params)));
        }
        Ok(())
    }
}

/// One OS thread per cycle, all spawned before any is joined.
///
/// Peak thread count equals `cycles`; there is no pooling. `stack_size`
/// overrides the platform default stack of every worker.
#[derive(Clone, Copy, Debug, Default)]
pub struct FanOut {
    pub stack_size: Option<usize>,
}

impl FanOut {
    pub fn with_stack_size(stack_size: usize) -> Self {
        Self {
            stack_size: Some(stack_size),
        }
    }

    fn builder(&self) -> thread::Builder {
        let builder = thread::Builder::new();
        match self.stack_size {
            Some(size) => builder.stack_size(size),
            None => builder,
        }
    }
}

impl ExecutionStrategy for FanOut {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn execute(&self, workload: &dyn Workload, params: &ParameterBlock, cycles: u32) -> Result<()> {
        spawn_and_join(workload, params, cycles, |_| self.builder())
    }
}

/// Spawns one worker per cycle from `builder(index)` and joins all of them.
///
/// Spawning stops at the first failure; only the workers created before it
/// are joined.
fn spawn_and_join<B>(
    workload: &dyn Workload,
    params: &ParameterBlock,
    cycles: u32,
    builder: B,
) -> Result<()>
where
    B: Fn(u32) -> thread::Builder,
{
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(cycles as usize);
        let mut spawn_error = None;

        for index in 0..cycles {
            let spawned = builder(index).spawn_scoped(scope, move || {
                black_box(workload.run(black_box(params)));
            });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    spawn_error = Some(HarnessError::ThreadSpawn { index, source });
                    break;
                }
            }
        }

        // Join everything that was actually created, even on failure, so a
        // panicking worker cannot escape the scope.
        let mut panicked = None;
        for (index, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(index as u32);
            }
        }

        if let Some(err) = spawn_error {
            return Err(err);
        }
        match panicked {
            Some(index) => Err(HarnessError::WorkerPanicked { index }),
            None => Ok(()),
        }
    })
}

/// `cycles` invocations spread over a fixed-size rayon pool.
///
/// The pool threads are created once in [`Pool::new`], outside any timed run.
#[derive(Debug)]
pub struct Pool {
    pool: rayon::ThreadPool,
}

impl Pool {
    pub fn new(workers: NonZeroUsize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .thread_name(|i| format!("kspt-pool-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl ExecutionStrategy for Pool {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn execute(&self, workload: &dyn Workload, params: &ParameterBlock, cycles: u32) -> Result<()> {
        self.pool.install(|| {
            (0..cycles).into_par_iter().for_each(|_| {
                black_box(workload.run(black_box(params)));
            })
        });
        Ok(())
    }
}

/// Times a single strategy run: one timestamp before, one after.
pub fn time_strategy(
    clock: &dyn Clock,
    strategy: &dyn ExecutionStrategy,
    workload: &dyn Workload,
    params: &ParameterBlock,
    cycles: u32,
) -> Result<TimingResult> {
    let start = clock.now()?;
    strategy.execute(workload, params, cycles)?;
    let end = clock.now()?;

    let elapsed_nanoseconds = elapsed(start, end);
    if elapsed_nanoseconds < 0 {
        warn!(
            strategy = strategy.name(),
            elapsed_nanoseconds, "clock went backwards during measurement"
        );
    }
    debug!(
        strategy = strategy.name(),
        cycles,
        elapsed_nanoseconds,
        "strategy finished"
    );

    Ok(TimingResult {
        elapsed_nanoseconds,
    })
}

pub fn run_sequential(
    clock: &dyn Clock,
    workload: &dyn Workload,
    params: &ParameterBlock,
    cycles: u32,
) -> Result<TimingResult> {
    time_strategy(clock, &Sequential, workload, params, cycles)
}

pub fn run_parallel(
    clock: &dyn Clock,
    workload: &dyn Workload,
    params: &ParameterBlock,
    cycles: u32,
) -> Result<TimingResult> {
    time_strategy(clock, &FanOut::default(), workload, params, cycles)
}
