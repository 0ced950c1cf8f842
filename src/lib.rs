use clap::ValueEnum;

pub mod clock;
pub mod driver;
pub mod error;
pub mod harness;
pub mod logging;
pub mod report;
pub mod schema;
pub mod workload;
pub mod workloads;

pub use error::{HarnessError, Result};

/// Workload selection for a run.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum WorkloadKind {
    /// Run every workload in the catalog.
    #[default]
    All,
    /// Prime-count sieve.
    Sieve,
    /// Iterative factorial.
    Factorial,
    /// Iterative Fibonacci.
    Fibonacci,
    /// Randomized bubble sort.
    BubbleSort,
}

impl WorkloadKind {
    pub fn includes(self, other: WorkloadKind) -> bool {
        self == WorkloadKind::All || self == other
    }
}
