//! The unit of work being timed and the parameters it reads.

use serde::{Deserialize, Serialize};

/// Inputs shared by every invocation of one benchmark run.
///
/// `a` and `b` carry whatever integers the workload needs (sieve limit,
/// element count, seed). The block is only ever lent out by shared reference,
/// so concurrent invocations cannot change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBlock {
    pub a: i64,
    pub b: i64,
    pub cycles: u32,
    pub title: String,
}

impl ParameterBlock {
    pub fn new(title: impl Into<String>, a: i64, b: i64, cycles: u32) -> Self {
        Self {
            a,
            b,
            cycles,
            title: title.into(),
        }
    }
}

/// A benchmarked unit.
///
/// Invocations may run concurrently on separate threads. An implementation
/// must keep all scratch memory local to a single call and must not rely on
/// state shared with other calls. A failed allocation is reported by
/// returning `0`.
pub trait Workload: Sync {
    fn run(&self, params: &ParameterBlock) -> i64;
}

impl<F> Workload for F
where
    F: Fn(&ParameterBlock) -> i64 + Sync,
{
    fn run(&self, params: &ParameterBlock) -> i64 {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_workloads() {
        let params = ParameterBlock::new("sum", 40, 2, 1);
        let sum = |p: &ParameterBlock| p.a + p.b;
        assert_eq!(sum.run(&params), 42);
    }

    #[test]
    fn boxed_workloads_dispatch() {
        let params = ParameterBlock::new("const", 0, 0, 1);
        let w: Box<dyn Workload> = Box::new(|_: &ParameterBlock| 7);
        assert_eq!(w.run(&params), 7);
    }
}
