//! Branch generation: length, sub-branch count and the sub-branch chain.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::entities::{Branch, SubBranch};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::random::RandSource;
use crate::domain::sub_branch::{BranchConstraints, SubBranchGenerator};

/// Shortest raw branch length.
pub const MIN_BRANCH_LENGTH: u32 = 100;
/// Longest raw branch length.
pub const MAX_BRANCH_LENGTH: u32 = 150;

/// Cumulative odds (percent) of each sub-branch count:
/// 1 → 10%, 2 → 55%, 3 → 35%.
pub const SUB_BRANCH_COUNT_ODDS: [(u32, i64); 3] = [(1, 10), (2, 65), (3, 100)];

/// Map a roll in `[1, 100]` onto the sub-branch count table.
pub fn sub_branch_count_for_roll(roll: i64) -> u32 {
    SUB_BRANCH_COUNT_ODDS
        .iter()
        .find(|(_, threshold)| roll <= *threshold)
        .map(|(count, _)| *count)
        .unwrap_or(SUB_BRANCH_COUNT_ODDS[SUB_BRANCH_COUNT_ODDS.len() - 1].0)
}

/// Builds branches that fit within a given angular scope.
#[derive(Debug, Clone)]
pub struct BranchGenerator {
    scope_angle: f64,
}

impl BranchGenerator {
    pub fn new(scope_angle: f64) -> DomainResult<Self> {
        if !(scope_angle.is_finite() && scope_angle > 0.0) {
            return Err(DomainError::degenerate(format!(
                "scope angle must be positive, got {scope_angle}"
            )));
        }
        Ok(Self { scope_angle })
    }

    pub fn scope_angle(&self) -> f64 {
        self.scope_angle
    }

    /// Generate one branch.
    ///
    /// Sub-branches are built innermost first (highest index down to 1), each one
    /// seeing those already built, and pushed to the front so the stored order
    /// is outermost first.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn generate<R: RandSource + ?Sized>(&self, rng: &mut R) -> DomainResult<Branch> {
        let length = rng.random_int(
            i64::from(MIN_BRANCH_LENGTH),
            i64::from(MAX_BRANCH_LENGTH),
        )? as u32;
        let sub_branch_count = sub_branch_count_for_roll(rng.random_int(1, 100)?);
        debug!("branch length={} sub_branches={}", length, sub_branch_count);

        let generator = SubBranchGenerator::new(BranchConstraints {
            scope_angle: self.scope_angle,
            length,
            sub_branch_count,
        });

        let mut built: VecDeque<SubBranch> = VecDeque::with_capacity(sub_branch_count as usize);
        for index in (1..=sub_branch_count).rev() {
            let sub_branch = generator.generate(rng, index, built.make_contiguous())?;
            built.push_front(sub_branch);
        }

        Ok(Branch::new(self.scope_angle, length, built.into()))
    }
}
