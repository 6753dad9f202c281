//! Snowflake structure builder: branch count, pattern count, tiling.

use std::f64::consts::TAU;

use tracing::{debug, instrument};

use crate::domain::branch::BranchGenerator;
use crate::domain::entities::{check_branch_count, Canvas, Snowflake, MAX_BRANCH_COUNT, MIN_BRANCH_COUNT};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::random::{common_denominators, RandSource};

/// Generate a snowflake on the default canvas.
pub fn generate_snowflake<R: RandSource + ?Sized>(rng: &mut R) -> DomainResult<Snowflake> {
    SnowflakeBuilder::new(Canvas::default()).build(rng)
}

/// Builds snowflakes for a given canvas.
#[derive(Debug, Clone, Default)]
pub struct SnowflakeBuilder {
    canvas: Canvas,
}

impl SnowflakeBuilder {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Draw a branch count in `[5, 10]` and build the snowflake.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn build<R: RandSource + ?Sized>(&self, rng: &mut R) -> DomainResult<Snowflake> {
        let branch_count = rng.random_int(
            i64::from(MIN_BRANCH_COUNT),
            i64::from(MAX_BRANCH_COUNT),
        )? as u32;
        self.build_with_branch_count(rng, branch_count)
    }

    /// Build a snowflake with a fixed branch count.
    ///
    /// Only a divisor of the branch count is ever chosen as the number of distinct
    /// patterns, so the patterns tile the circle evenly.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn build_with_branch_count<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
        branch_count: u32,
    ) -> DomainResult<Snowflake> {
        check_branch_count(branch_count)?;
        let pattern_count = pick_pattern_count(rng, branch_count)?;
        let scope_angle = TAU / f64::from(branch_count);
        debug!(
            "branch_count={} pattern_count={} scope={:.2}deg",
            branch_count,
            pattern_count,
            scope_angle.to_degrees()
        );

        let generator = BranchGenerator::new(scope_angle)?;
        let mut patterns = Vec::with_capacity(pattern_count as usize);
        for _ in 0..pattern_count {
            patterns.push(generator.generate(rng)?);
        }

        Snowflake::from_patterns(self.canvas, patterns, branch_count)
    }
}

/// Uniformly pick one of the common denominators of `branch_count`.
pub fn pick_pattern_count<R: RandSource + ?Sized>(rng: &mut R, branch_count: u32) -> DomainResult<u32> {
    let candidates = common_denominators(branch_count);
    if candidates.is_empty() {
        return Err(DomainError::degenerate(format!(
            "no pattern count tiles {branch_count} branches"
        )));
    }
    let pick = rng.random_int(0, candidates.len() as i64 - 1)? as usize;
    Ok(candidates[pick])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::random::RandomNumberService;
    use crate::util::testing::ScriptedRandom;

    #[test]
    fn test_pick_pattern_count_returns_divisor() {
        let mut rng = RandomNumberService::seeded(3);
        for n in MIN_BRANCH_COUNT..=MAX_BRANCH_COUNT {
            for _ in 0..20 {
                let count = pick_pattern_count(&mut rng, n).unwrap();
                assert_eq!(n % count, 0);
                assert!(count <= n / 2);
            }
        }
    }

    #[test]
    fn test_build_with_branch_count_rejects_out_of_range() {
        let builder = SnowflakeBuilder::default();
        let mut rng = ScriptedRandom::default();
        assert!(builder.build_with_branch_count(&mut rng, 4).is_err());
        assert!(builder.build_with_branch_count(&mut rng, 11).is_err());
    }

    #[test]
    fn test_build_keeps_canvas() {
        let canvas = Canvas::new(300.0, 200.0).unwrap();
        let mut rng = RandomNumberService::seeded(11);
        let flake = SnowflakeBuilder::new(canvas).build(&mut rng).unwrap();
        assert_eq!(*flake.canvas(), canvas);
        assert_eq!(flake.centre().x, 150.0);
        assert_eq!(flake.centre().y, 100.0);
    }
}
