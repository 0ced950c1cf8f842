use std::io;

use thiserror::Error;

/// Result alias used across the harness.
pub type Result<T> = core::result::Result<T, HarnessError>;

/// Fatal conditions that abort a benchmark run.
///
/// Workload-level allocation failures are not represented here: a workload
/// reports them by returning `0`.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The clock could not produce a timestamp.
    #[error("clock failure: {0}")]
    Clock(String),
    /// The OS refused to create the worker thread for cycle `index`.
    #[error("failed to spawn worker thread {index}: {source}")]
    ThreadSpawn {
        index: u32,
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked before returning its result.
    #[error("worker thread {index} panicked")]
    WorkerPanicked { index: u32 },
    /// The bounded worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::time::SystemTimeError> for HarnessError {
    fn from(value: std::time::SystemTimeError) -> Self {
        Self::Clock(value.to_string())
    }
}
