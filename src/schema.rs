use serde::{Deserialize, Serialize};

use crate::driver::BenchmarkOutcome;
use crate::harness::TimingResult;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub tool_version: String,
    pub profile: String,
    pub clock: String,
    pub seed: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub title: String,
    pub strategy: String,
    pub cycles: u32,
    pub a: i64,
    pub b: i64,

    pub elapsed_ns: i64,
    pub seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub run: RunMeta,
    pub measurements: Vec<Measurement>,
}

impl ProfileReport {
    pub fn new(run: RunMeta, outcomes: &[BenchmarkOutcome]) -> Self {
        let measurements = outcomes.iter().flat_map(measurements_for).collect();
        Self { run, measurements }
    }
}

/// One measurement per strategy that ran, sequential first.
fn measurements_for(outcome: &BenchmarkOutcome) -> Vec<Measurement> {
    let mut timings = vec![
        ("sequential", outcome.sequential),
        ("parallel", outcome.parallel),
    ];
    if let Some(pool) = outcome.pool {
        timings.push(("pool", pool));
    }

    timings
        .into_iter()
        .map(|(strategy, t): (&str, TimingResult)| Measurement {
            title: outcome.title.clone(),
            strategy: strategy.to_string(),
            cycles: outcome.cycles,
            a: outcome.parameters.a,
            b: outcome.parameters.b,
            elapsed_ns: t.elapsed_nanoseconds,
            seconds: t.seconds(),
        })
        .collect()
}
