use crate::workload::{ParameterBlock, Workload};

/// Iterative Fibonacci number `F(a)` in wrapping 64-bit arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fibonacci;

impl Workload for Fibonacci {
    fn run(&self, params: &ParameterBlock) -> i64 {
        fibonacci(params.a)
    }
}

pub fn fibonacci(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let (mut prev, mut cur): (u64, u64) = (0, 1);
    for _ in 1..n {
        let next = prev.wrapping_add(cur);
        prev = cur;
        cur = next;
    }
    cur as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_values() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
        assert_eq!(fibonacci(2), 1);
        assert_eq!(fibonacci(10), 55);
        assert_eq!(fibonacci(90), 2_880_067_194_370_816_120);
    }

    #[test]
    fn runs_from_parameter_block() {
        let params = ParameterBlock::new("Fibonacci", 20, 0, 1);
        assert_eq!(Fibonacci.run(&params), 6_765);
    }
}
