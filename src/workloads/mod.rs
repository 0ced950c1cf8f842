//! Example payloads and the default benchmark list.

pub mod bubble_sort;
pub mod factorial;
pub mod fibonacci;
pub mod sieve;

use crate::driver::BenchmarkSpec;
use crate::harness::{BenchConfig, Profile};
use crate::WorkloadKind;

use bubble_sort::BubbleSort;
use factorial::Factorial;
use fibonacci::Fibonacci;
use sieve::PrimeSieve;

/// Benchmarks selected by `kind`, in submission order.
pub fn catalog(cfg: &BenchConfig, kind: WorkloadKind) -> Vec<BenchmarkSpec> {
    let quick = cfg.profile == Profile::Quick;
    let seed = cfg.seed as i64;

    let mut specs = Vec::new();
    if kind.includes(WorkloadKind::Sieve) {
        // Full profile marks ~10 MB per invocation.
        let limit = if quick { 100_000 } else { 10_000_000 };
        specs.push(BenchmarkSpec::new("Prime Sieve", PrimeSieve, limit, 0, 16));
    }
    if kind.includes(WorkloadKind::Factorial) {
        specs.push(BenchmarkSpec::new("Factorial", Factorial, 20, 0, 50));
    }
    if kind.includes(WorkloadKind::Fibonacci) {
        specs.push(BenchmarkSpec::new("Fibonacci", Fibonacci, 90, 0, 16));
    }
    if kind.includes(WorkloadKind::BubbleSort) {
        let len = if quick { 500 } else { 5_000 };
        specs.push(BenchmarkSpec::new("Bubble Sort", BubbleSort, len, seed, 16));
    }

    if let Some(cycles) = cfg.cycles {
        for spec in &mut specs {
            spec.set_cycles(cycles);
        }
    }
    specs
}
