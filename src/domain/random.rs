//! Random draws used by the generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// A source of uniformly distributed draws.
///
/// This abstraction allows you to plug in a real random source or a scripted
/// source in tests. Generators only ever talk to this trait.
pub trait RandSource {
    /// Returns an integer in `[min, max]`, both inclusive.
    fn random_int(&mut self, min: i64, max: i64) -> DomainResult<i64>;

    /// Returns a real in `[min, max)`. Returns `min` when the range is empty.
    fn random_real(&mut self, min: f64, max: f64) -> DomainResult<f64>;
}

/// `RandSource` backed by a `StdRng`.
///
/// `new()` seeds from OS entropy; `seeded()` gives reproducible sequences, so the
/// same seed always yields the same snowflake.
#[derive(Debug, Clone)]
pub struct RandomNumberService {
    rng: StdRng,
}

impl Default for RandomNumberService {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomNumberService {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandSource for RandomNumberService {
    fn random_int(&mut self, min: i64, max: i64) -> DomainResult<i64> {
        check_int_range(min, max)?;
        Ok(self.rng.random_range(min..=max))
    }

    fn random_real(&mut self, min: f64, max: f64) -> DomainResult<f64> {
        check_real_range(min, max)?;
        if min == max {
            return Ok(min);
        }
        Ok(self.rng.random_range(min..max))
    }
}

/// Rejects `min > max`.
pub fn check_int_range(min: i64, max: i64) -> DomainResult<()> {
    if min > max {
        return Err(DomainError::InvalidRange {
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

/// Rejects `min > max` and non-finite bounds.
pub fn check_real_range(min: f64, max: f64) -> DomainResult<()> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(DomainError::InvalidRange { min, max });
    }
    Ok(())
}

/// All `d` with `n % d == 0` and `d <= n / 2`, ascending.
///
/// These are the pattern counts that tile `n` branches evenly while still
/// repeating at least once. A prime `n` only yields `[1]`.
#[instrument(level = "trace")]
pub fn common_denominators(n: u32) -> Vec<u32> {
    (1..=n / 2).filter(|d| n % d == 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_denominators_small_numbers() {
        assert_eq!(common_denominators(0), Vec::<u32>::new());
        assert_eq!(common_denominators(1), Vec::<u32>::new());
        assert_eq!(common_denominators(2), vec![1]);
        assert_eq!(common_denominators(8), vec![1, 2, 4]);
        assert_eq!(common_denominators(9), vec![1, 3]);
    }

    #[test]
    fn test_random_int_single_value_range() {
        let mut rng = RandomNumberService::seeded(7);
        for _ in 0..20 {
            assert_eq!(rng.random_int(4, 4).unwrap(), 4);
        }
    }

    #[test]
    fn test_random_real_rejects_nan() {
        let mut rng = RandomNumberService::seeded(7);
        assert!(rng.random_real(f64::NAN, 1.0).is_err());
        assert!(rng.random_real(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_random_real_empty_range_returns_min() {
        let mut rng = RandomNumberService::seeded(7);
        assert_eq!(rng.random_real(0.25, 0.25).unwrap(), 0.25);
    }
}
