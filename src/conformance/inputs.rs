//! @acp:module "Conformance Inputs"
//! @acp:summary "Fixed, scenario and random inputs for differential runs"
//! @acp:domain math
//! @acp:layer utility

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range random inputs are drawn from by default: `[2^32 - 1, 2^64 - 1]`
pub const RANDOM_RANGE: RangeInclusive<u64> = (u32::MAX as u64)..=u64::MAX;

/// `2^n - n` for `n` in 16..=32
pub fn fixed_inputs() -> Vec<u64> {
    (16..=32u32).map(|n| (1u64 << n) - n as u64).collect()
}

/// Inputs with known factor sets
pub fn known_scenarios() -> Vec<(u64, Vec<u64>)> {
    vec![
        (77, vec![7, 11]),
        (2381, vec![2381]),
        (45732, vec![2, 3, 37, 103]),
        (231897, vec![3, 17, 4547]),
        (32523423, vec![3, 1019, 10639]),
    ]
}

/// `count` inputs drawn uniformly from [`RANDOM_RANGE`]
///
/// Large prime inputs need up to 2^32 / 3 trial divisions each.
pub fn random_inputs(count: usize, seed: Option<u64>) -> Vec<u64> {
    random_inputs_in(count, seed, RANDOM_RANGE)
}

/// `count` inputs drawn uniformly from `range`. A fixed seed gives a
/// reproducible sequence.
pub fn random_inputs_in(count: usize, seed: Option<u64>, range: RangeInclusive<u64>) -> Vec<u64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    (0..count).map(|_| rng.random_range(range.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_inputs() {
        let inputs = fixed_inputs();
        assert_eq!(inputs.len(), 17);
        assert_eq!(inputs[0], 65_520);
        assert_eq!(inputs[16], 4_294_967_264);
    }

    #[test]
    fn test_seeded_random_inputs_are_reproducible() {
        let a = random_inputs(5, Some(42));
        let b = random_inputs(5, Some(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|n| RANDOM_RANGE.contains(n)));
    }

    #[test]
    fn test_random_inputs_in_range() {
        let inputs = random_inputs_in(100, None, 3..=1_000);
        assert_eq!(inputs.len(), 100);
        assert!(inputs.iter().all(|n| (3..=1_000).contains(n)));
    }
}
