//! Sub-branch generation: one mirrored offshoot pair at a time.

use tracing::{instrument, trace};

use crate::domain::entities::SubBranch;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::random::RandSource;

/// Narrowest half-angle an offshoot may have, in degrees.
pub const MIN_SUB_BRANCH_ANGLE_DEG: f64 = 5.0;
/// Widest half-angle an offshoot may have, in degrees.
pub const MAX_SUB_BRANCH_ANGLE_DEG: f64 = 80.0;

/// Shortest offshoot drawn when angular room is plentiful.
pub const MIN_SUB_BRANCH_LENGTH: u32 = 5;
/// Longest offshoot drawn when angular room is plentiful.
pub const MAX_SUB_BRANCH_LENGTH: u32 = 30;

/// What a sub-branch needs to know about the branch it grows on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchConstraints {
    /// Angular budget of the parent branch, in radians
    pub scope_angle: f64,
    /// Raw length of the parent branch
    pub length: u32,
    /// Total number of sub-branches the parent will carry
    pub sub_branch_count: u32,
}

impl BranchConstraints {
    /// Distance from the snowflake centre to the root of sub-branch `index`.
    ///
    /// The branch is split into `count + 1` equal segments; index 1 sits one
    /// segment below the tip.
    pub fn root_distance(&self, index: u32) -> f64 {
        let length = f64::from(self.length);
        length - length / f64::from(self.sub_branch_count + 1) * f64::from(index)
    }

    /// Longest offshoot at `index` and `angle` that stays inside the scope.
    ///
    /// `None` when the offshoot diverges from the centreline more slowly than the
    /// scope boundary does, in which case it can never reach it.
    pub fn length_ceiling(&self, index: u32, angle: f64) -> Option<f64> {
        let half_scope = self.scope_angle / 2.0;
        if angle <= half_scope {
            return None;
        }
        let clearance = self.root_distance(index) * half_scope.sin();
        Some(clearance / (angle - half_scope).sin())
    }
}

/// Produces sub-branches for a single branch.
#[derive(Debug, Clone)]
pub struct SubBranchGenerator {
    constraints: BranchConstraints,
}

impl SubBranchGenerator {
    pub fn new(constraints: BranchConstraints) -> Self {
        Self { constraints }
    }

    /// Generate sub-branch `index` given the ones already built on this branch.
    ///
    /// The caller owns ordering; nothing is appended here.
    #[instrument(level = "trace", skip(self, rng, built))]
    pub fn generate<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
        index: u32,
        built: &[SubBranch],
    ) -> DomainResult<SubBranch> {
        if index == 0 {
            return Err(DomainError::degenerate("sub-branch index starts at 1"));
        }
        let angle = self.draw_angle(rng, index, built)?;
        let length = self.draw_length(rng, index, angle)?;
        trace!(
            "sub-branch {}: angle={:.2}deg length={}",
            index,
            angle.to_degrees(),
            length
        );
        Ok(SubBranch::new(index, angle, length))
    }

    fn draw_angle<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
        index: u32,
        built: &[SubBranch],
    ) -> DomainResult<f64> {
        let (low, high) = angle_window(index, built);
        rng.random_real(low, high)
    }

    fn draw_length<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
        index: u32,
        angle: f64,
    ) -> DomainResult<u32> {
        let (low, high) = match self.constraints.length_ceiling(index, angle) {
            None => (
                i64::from(MIN_SUB_BRANCH_LENGTH),
                i64::from(MAX_SUB_BRANCH_LENGTH),
            ),
            Some(ceiling) => {
                let high = ceiling.min(f64::from(MAX_SUB_BRANCH_LENGTH)).floor() as i64;
                let low = i64::from(MIN_SUB_BRANCH_LENGTH).min((ceiling / 3.0).floor() as i64);
                (low, high)
            }
        };
        let length = rng.random_int(low, high)?;
        u32::try_from(length).map_err(|_| DomainError::InvalidRange {
            min: low as f64,
            max: high as f64,
        })
    }
}

/// Angle draw window `[low, high)` for sub-branch `index`.
///
/// `high` starts at the maximum angle and drops to the narrowest sub-branch
/// already built, so the fan only ever narrows. Higher indices (further
/// inward) get a window covering a smaller slice of the remaining range.
pub fn angle_window(index: u32, built: &[SubBranch]) -> (f64, f64) {
    let smallest = MIN_SUB_BRANCH_ANGLE_DEG.to_radians();
    let largest = built
        .iter()
        .map(SubBranch::angle)
        .fold(MAX_SUB_BRANCH_ANGLE_DEG.to_radians(), f64::min);
    let range = largest - smallest;
    (largest - range / f64::from(index.max(1)), largest)
}
