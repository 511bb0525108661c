//! @acp:module "Conformance"
//! @acp:summary "Differential testing across factorization variants"
//! @acp:domain math
//! @acp:layer service
//!
//! Several independently configured variants of the kernel are run on the same
//! inputs and their factor sets compared for equality. The first registered
//! implementation is treated as ground truth.

mod inputs;
mod variants;

pub use inputs::{fixed_inputs, known_scenarios, random_inputs, random_inputs_in, RANDOM_RANGE};
pub use variants::{
    standard_implementations, BoundedVariant, ConcurrentVariant, MemoizedVariant,
    ThreadLocalVariant, UncachedVariant,
};

use serde::{Deserialize, Serialize};

use crate::error::{PrimesError, Result};
use crate::factor::{multiplicity, sorted, FactorSet};
use crate::oracle::compute_primality;

/// @acp:summary "One independently built variant of the factorization kernel"
pub trait Implementation: Send + Sync {
    fn name(&self) -> &str;

    fn find_prime_factors(&self, number: u64) -> FactorSet;

    /// Factor a batch of inputs, in input order
    fn find_prime_factors_batch(&self, numbers: &[u64]) -> Vec<FactorSet> {
        numbers.iter().map(|n| self.find_prime_factors(*n)).collect()
    }
}

/// @acp:summary "Outcome of a successful differential run"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialReport {
    /// Implementation names, ground truth first
    pub implementations: Vec<String>,
    /// Inputs with their agreed factor sets, ascending
    pub results: Vec<AgreedResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreedResult {
    pub input: u64,
    pub factors: Vec<u64>,
}

/// @acp:summary "Compares implementations input by input"
pub struct Differential {
    implementations: Vec<Box<dyn Implementation>>,
    report: DifferentialReport,
}

impl Differential {
    /// Requires at least two implementations
    pub fn new(implementations: Vec<Box<dyn Implementation>>) -> Result<Self> {
        if implementations.len() < 2 {
            return Err(PrimesError::NotEnoughImplementations(implementations.len()));
        }
        let names = implementations.iter().map(|i| i.name().to_string()).collect();
        Ok(Self {
            implementations,
            report: DifferentialReport {
                implementations: names,
                results: Vec::new(),
            },
        })
    }

    /// Run every implementation on `number` and return the agreed set
    pub fn check(&mut self, number: u64) -> Result<FactorSet> {
        let (first, rest) = self
            .implementations
            .split_first()
            .ok_or(PrimesError::NotEnoughImplementations(0))?;

        let expected = first.find_prime_factors(number);
        for implementation in rest {
            let actual = implementation.find_prime_factors(number);
            if actual != expected {
                return Err(mismatch(implementation.name(), number, &expected, &actual));
            }
        }

        tracing::debug!(number, factors = ?sorted(&expected), "implementations agree");
        self.report.results.push(AgreedResult {
            input: number,
            factors: sorted(&expected),
        });
        Ok(expected)
    }

    /// Check a whole batch, letting each implementation factor it in one call
    pub fn check_batch(&mut self, numbers: &[u64]) -> Result<Vec<FactorSet>> {
        let (first, rest) = self
            .implementations
            .split_first()
            .ok_or(PrimesError::NotEnoughImplementations(0))?;

        let expected = first.find_prime_factors_batch(numbers);
        check_batch_length(&**first, numbers, &expected)?;
        for implementation in rest {
            let actual = implementation.find_prime_factors_batch(numbers);
            check_batch_length(&**implementation, numbers, &actual)?;
            for ((number, want), got) in numbers.iter().zip(&expected).zip(&actual) {
                if want != got {
                    return Err(mismatch(implementation.name(), *number, want, got));
                }
            }
        }

        self.report
            .results
            .extend(numbers.iter().zip(&expected).map(|(n, f)| AgreedResult {
                input: *n,
                factors: sorted(f),
            }));
        Ok(expected)
    }

    pub fn implementation_names(&self) -> &[String] {
        &self.report.implementations
    }

    pub fn finish(mut self) -> DifferentialReport {
        self.report.results.sort_by_key(|r| r.input);
        self.report.results.dedup_by_key(|r| r.input);
        self.report
    }
}

fn check_batch_length(
    implementation: &dyn Implementation,
    numbers: &[u64],
    results: &[FactorSet],
) -> Result<()> {
    if results.len() != numbers.len() {
        return Err(PrimesError::BatchLength {
            implementation: implementation.name().to_string(),
            expected: numbers.len(),
            actual: results.len(),
        });
    }
    Ok(())
}

fn mismatch(name: &str, input: u64, expected: &FactorSet, actual: &FactorSet) -> PrimesError {
    PrimesError::Mismatch {
        implementation: name.to_string(),
        input,
        expected: sorted(expected),
        actual: sorted(actual),
    }
}

/// @acp:summary "Run all implementations over all inputs"
pub fn run_differential(
    implementations: Vec<Box<dyn Implementation>>,
    inputs: &[u64],
) -> Result<DifferentialReport> {
    let mut differential = Differential::new(implementations)?;
    for number in inputs {
        differential.check(*number)?;
    }
    Ok(differential.finish())
}

/// @acp:summary "Check that a factor set is a complete factorization of `number`"
///
/// Every element must be prime and divide `number`, and dividing out each
/// element as often as it divides must leave 1. Only meaningful for
/// `number > 2`.
pub fn verify_factorization(number: u64, factors: &FactorSet) -> Result<()> {
    let mut remaining = number;
    for prime in sorted(factors) {
        if !compute_primality(prime) {
            return Err(PrimesError::Other(format!(
                "{} is not prime (factor of {})",
                prime, number
            )));
        }
        let times = multiplicity(remaining, prime);
        if times == 0 {
            return Err(PrimesError::Other(format!(
                "{} does not divide {}",
                prime, number
            )));
        }
        remaining /= prime.pow(times);
    }

    if remaining != 1 {
        return Err(PrimesError::Other(format!(
            "factors of {} are incomplete, {} remains",
            number, remaining
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, &'static [u64]);

    impl Implementation for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn find_prime_factors(&self, _number: u64) -> FactorSet {
            self.1.iter().copied().collect()
        }
    }

    #[test]
    fn test_single_implementation_rejected() {
        let single: Vec<Box<dyn Implementation>> = vec![Box::new(UncachedVariant)];
        let result = Differential::new(single);
        assert!(matches!(
            result,
            Err(PrimesError::NotEnoughImplementations(1))
        ));
    }

    #[test]
    fn test_mismatch_names_offender() {
        let implementations: Vec<Box<dyn Implementation>> = vec![
            Box::new(Fixed("truth", &[7, 11])),
            Box::new(Fixed("agrees", &[11, 7])),
            Box::new(Fixed("broken", &[77])),
        ];
        let err = run_differential(implementations, &[77]).unwrap_err();
        match err {
            PrimesError::Mismatch {
                implementation,
                input,
                expected,
                actual,
            } => {
                assert_eq!(implementation, "broken");
                assert_eq!(input, 77);
                assert_eq!(expected, vec![7, 11]);
                assert_eq!(actual, vec![77]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    /// Loses the last result of every batch
    struct ShortBatch;

    impl Implementation for ShortBatch {
        fn name(&self) -> &str {
            "short-batch"
        }

        fn find_prime_factors(&self, number: u64) -> FactorSet {
            UncachedVariant.find_prime_factors(number)
        }

        fn find_prime_factors_batch(&self, numbers: &[u64]) -> Vec<FactorSet> {
            let mut results: Vec<FactorSet> =
                numbers.iter().map(|n| self.find_prime_factors(*n)).collect();
            results.pop();
            results
        }
    }

    #[test]
    fn test_short_batch_is_rejected() {
        let implementations: Vec<Box<dyn Implementation>> =
            vec![Box::new(UncachedVariant), Box::new(ShortBatch)];
        let mut differential = Differential::new(implementations).unwrap();

        let err = differential.check_batch(&[77, 2381, 45732]).unwrap_err();
        assert!(matches!(
            err,
            PrimesError::BatchLength { ref implementation, expected: 3, actual: 2 }
                if implementation == "short-batch"
        ));
        assert!(differential.finish().results.is_empty());
    }

    #[test]
    fn test_short_ground_truth_batch_is_rejected() {
        let implementations: Vec<Box<dyn Implementation>> =
            vec![Box::new(ShortBatch), Box::new(UncachedVariant)];
        let mut differential = Differential::new(implementations).unwrap();

        assert!(matches!(
            differential.check_batch(&[77, 2381]),
            Err(PrimesError::BatchLength { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_report_is_sorted_and_deduplicated() {
        let report = run_differential(standard_implementations(64).unwrap(), &[231897, 77, 77])
            .unwrap();
        let inputs: Vec<u64> = report.results.iter().map(|r| r.input).collect();
        assert_eq!(inputs, vec![77, 231897]);
        assert_eq!(report.results[1].factors, vec![3, 17, 4547]);
        assert_eq!(report.implementations[0], "memoized");
    }

    #[test]
    fn test_verify_factorization() {
        let good: FactorSet = [2, 3, 37, 103].into_iter().collect();
        assert!(verify_factorization(45732, &good).is_ok());

        let incomplete: FactorSet = [2, 3, 37].into_iter().collect();
        assert!(verify_factorization(45732, &incomplete).is_err());

        let composite: FactorSet = [6, 37, 103].into_iter().collect();
        assert!(verify_factorization(45732, &composite).is_err());

        let non_divisor: FactorSet = [2, 3, 5, 37, 103].into_iter().collect();
        assert!(verify_factorization(45732, &non_divisor).is_err());
    }
}
