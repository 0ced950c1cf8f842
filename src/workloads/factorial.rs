use crate::workload::{ParameterBlock, Workload};

/// Iterative `a!` in wrapping 64-bit arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Factorial;

impl Workload for Factorial {
    fn run(&self, params: &ParameterBlock) -> i64 {
        factorial(params.a)
    }
}

pub fn factorial(n: i64) -> i64 {
    let mut acc: u64 = 1;
    let mut k: u64 = 1;
    while (k as i64) <= n {
        acc = acc.wrapping_mul(k);
        k += 1;
    }
    acc as i64
}
