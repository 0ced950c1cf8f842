use crate::workload::{ParameterBlock, Workload};

/// Counts the primes in `[0, a]` with a sieve of Eratosthenes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimeSieve;

impl Workload for PrimeSieve {
    fn run(&self, params: &ParameterBlock) -> i64 {
        count_primes(params.a)
    }
}

pub fn count_primes(limit: i64) -> i64 {
    if limit < 2 {
        return 0;
    }
    let Ok(limit) = usize::try_from(limit) else {
        return 0;
    };

    let mut marks: Vec<bool> = Vec::new();
    if marks.try_reserve_exact(limit + 1).is_err() {
        return 0;
    }
    marks.resize(limit + 1, true);
    marks[0] = false;
    marks[1] = false;

    let mut n = 2;
    while n * n <= limit {
        if marks[n] {
            for multiple in (n * n..=limit).step_by(n) {
                marks[multiple] = false;
            }
        }
        n += 1;
    }

    marks.iter().filter(|&&prime| prime).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_primes_up_to_thirty() {
        let params = ParameterBlock::new("Prime Sieve", 30, 0, 1);
        assert_eq!(PrimeSieve.run(&params), 10);
    }

    #[test]
    fn small_limits() {
        assert_eq!(count_primes(-5), 0);
        assert_eq!(count_primes(0), 0);
        assert_eq!(count_primes(1), 0);
        assert_eq!(count_primes(2), 1);
        assert_eq!(count_primes(3), 2);
        assert_eq!(count_primes(4), 2);
    }

    #[test]
    fn known_prime_counts() {
        assert_eq!(count_primes(100), 25);
        assert_eq!(count_primes(1_000), 168);
        assert_eq!(count_primes(1_000_000), 78_498);
    }
}
