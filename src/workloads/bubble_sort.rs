use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::workload::{ParameterBlock, Workload};

/// Upper bound (exclusive) for generated values.
const VALUE_RANGE: u32 = 1_000_000;

/// Bubble sorts `a` pseudo-random integers and returns the number of swaps.
///
/// Each call seeds its own generator from `b`, so concurrent calls share no
/// generator state and all sort the same sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleSort;

impl Workload for BubbleSort {
    fn run(&self, params: &ParameterBlock) -> i64 {
        let Ok(len) = usize::try_from(params.a) else {
            return 0;
        };
        let mut values: Vec<u32> = Vec::new();
        if values.try_reserve_exact(len).is_err() {
            return 0;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(params.b as u64);
        values.extend((0..len).map(|_| rng.random_range(0..VALUE_RANGE)));

        bubble_sort(&mut values) as i64
    }
}

/// Sorts in place, returning the number of swaps performed.
pub fn bubble_sort(values: &mut [u32]) -> u64 {
    let mut swaps = 0;
    let mut end = values.len();
    while end > 1 {
        let mut last_swap = 0;
        for i in 1..end {
            if values[i - 1] > values[i] {
                values.swap(i - 1, i);
                swaps += 1;
                last_swap = i;
            }
        }
        end = last_swap;
    }
    swaps
}
