use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::clock::Clock;
use crate::error::Result;
use crate::harness::{time_strategy, FanOut, Pool, Sequential, TimingResult};
use crate::workload::{ParameterBlock, Workload};

/// One workload to measure, with the parameters and cycle count it runs with.
pub struct BenchmarkSpec {
    pub title: String,
    pub workload: Box<dyn Workload>,
    pub parameters: ParameterBlock,
    pub cycles: u32,
}

impl BenchmarkSpec {
    pub fn new<W>(title: &str, workload: W, a: i64, b: i64, cycles: u32) -> Self
    where
        W: Workload + 'static,
    {
        Self {
            title: title.to_string(),
            workload: Box::new(workload),
            parameters: ParameterBlock::new(title, a, b, cycles),
            cycles,
        }
    }

    pub fn set_cycles(&mut self, cycles: u32) {
        self.cycles = cycles;
        self.parameters.cycles = cycles;
    }
}

impl std::fmt::Debug for BenchmarkSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkSpec")
            .field("title", &self.title)
            .field("parameters", &self.parameters)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

/// Timings for one benchmark, keyed by strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkOutcome {
    pub title: String,
    pub parameters: ParameterBlock,
    pub cycles: u32,
    pub sequential: TimingResult,
    pub parallel: TimingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<TimingResult>,
}

pub struct Driver {
    clock: Box<dyn Clock>,
    pool: Option<Pool>,
}

impl Driver {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            pool: None,
        }
    }

    /// Also measure a bounded pool of `workers` threads after the fan-out run.
    ///
    /// The pool is built here, so its thread start-up is never timed.
    pub fn with_pool(mut self, workers: NonZeroUsize) -> Result<Self> {
        self.pool = Some(Pool::new(workers)?);
        Ok(self)
    }

    pub fn clock_name(&self) -> &'static str {
        self.clock.name()
    }

    /// Measures `spec` sequentially, then with one thread per cycle.
    pub fn run_benchmark(&self, spec: BenchmarkSpec) -> Result<BenchmarkOutcome> {
        let span = info_span!("benchmark", title = %spec.title, cycles = spec.cycles);
        let _enter = span.enter();

        let clock = self.clock.as_ref();
        let workload = spec.workload.as_ref();
        let params = &spec.parameters;

        let sequential = time_strategy(clock, &Sequential, workload, params, spec.cycles)?;
        let parallel = time_strategy(clock, &FanOut::default(), workload, params, spec.cycles)?;
        let pool = match &self.pool {
            Some(pool) => Some(time_strategy(clock, pool, workload, params, spec.cycles)?),
            None => None,
        };

        info!(
            sequential_ns = sequential.elapsed_nanoseconds,
            parallel_ns = parallel.elapsed_nanoseconds,
            "benchmark finished"
        );

        Ok(BenchmarkOutcome {
            title: spec.title,
            parameters: spec.parameters,
            cycles: spec.cycles,
            sequential,
            parallel,
            pool,
        })
    }

    /// Runs every spec in order, stopping at the first failure.
    pub fn run_all(&self, specs: Vec<BenchmarkSpec>) -> Result<Vec<BenchmarkOutcome>> {
        specs
            .into_iter()
            .map(|spec| self.run_benchmark(spec))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{MonotonicClock, Timestamp};
    use crate::error::HarnessError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};

    struct Recorder {
        threads: Arc<Mutex<Vec<ThreadId>>>,
    }

    impl Workload for Recorder {
        fn run(&self, _params: &ParameterBlock) -> i64 {
            self.threads.lock().unwrap().push(thread::current().id());
            42
        }
    }

    struct FailingClock {
        reads: AtomicUsize,
        fail_at: usize,
    }

    impl Clock for FailingClock {
        fn now(&self) -> Result<Timestamp> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            if n == self.fail_at {
                return Err(HarnessError::Clock("gone".into()));
            }
            Ok(Timestamp::from_nanos(n as i64))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn sequential_is_measured_before_parallel() {
        let threads = Arc::new(Mutex::new(Vec::new()));
        let spec = BenchmarkSpec::new(
            "answer",
            Recorder {
                threads: threads.clone(),
            },
            0,
            0,
            4,
        );
        let driver = Driver::new(Box::new(MonotonicClock::new()));
        let outcome = driver.run_benchmark(spec).unwrap();

        assert_eq!(outcome.title, "answer");
        assert_eq!(outcome.cycles, 4);
        assert!(outcome.pool.is_none());

        let threads = threads.lock().unwrap();
        let me = thread::current().id();
        assert_eq!(threads.len(), 8);
        assert!(threads[..4].iter().all(|id| *id == me));
        assert!(threads[4..].iter().all(|id| *id != me));
    }

    #[test]
    fn pool_is_measured_when_requested() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let spec = BenchmarkSpec::new(
            "count",
            move |_: &ParameterBlock| {
                counter.fetch_add(1, Ordering::SeqCst);
                0
            },
            0,
            0,
            5,
        );
        let driver = Driver::new(Box::new(MonotonicClock::new()))
            .with_pool(NonZeroUsize::new(2).unwrap())
            .unwrap();
        let outcome = driver.run_benchmark(spec).unwrap();
        assert!(outcome.pool.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 15);
    }

    #[test]
    fn run_all_keeps_submission_order() {
        let specs = vec![
            BenchmarkSpec::new("first", |_: &ParameterBlock| 1, 0, 0, 1),
            BenchmarkSpec::new("second", |_: &ParameterBlock| 2, 0, 0, 2),
        ];
        let driver = Driver::new(Box::new(MonotonicClock::new()));
        let outcomes = driver.run_all(specs).unwrap();
        let titles: Vec<&str> = outcomes.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn clock_failure_aborts_remaining_benchmarks() {
        let ran = Arc::new(AtomicUsize::new(0));
        let (r1, r2) = (ran.clone(), ran.clone());
        let specs = vec![
            BenchmarkSpec::new(
                "first",
                move |_: &ParameterBlock| {
                    r1.fetch_add(1, Ordering::SeqCst);
                    0
                },
                0,
                0,
                1,
            ),
            BenchmarkSpec::new(
                "second",
                move |_: &ParameterBlock| {
                    r2.fetch_add(100, Ordering::SeqCst);
                    0
                },
                0,
                0,
                1,
            ),
        ];
        // Reads 0..=3 serve the first benchmark; the fifth read fails.
        let driver = Driver::new(Box::new(FailingClock {
            reads: AtomicUsize::new(0),
            fail_at: 4,
        }));
        let err = driver.run_all(specs).unwrap_err();
        assert!(matches!(err, HarnessError::Clock(_)));
        assert_eq!(ran.load(Ordering::SeqCst), 2);
    }
}
