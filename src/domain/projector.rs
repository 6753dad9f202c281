//! Projection of the polar branch structure onto Cartesian line segments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::{check_branch_count, check_dimensions, Point, Snowflake};
use crate::domain::error::{DomainError, DomainResult};

/// A straight stroke between two points, relative to the snowflake centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance_to(self.to)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// How raw branch lengths are normalised to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scaling {
    /// `proportion = (max_branch_length / min(width, height)) / 2`
    #[default]
    Proportional,
    /// `proportion = min(width, height) / (2 * max_branch_length)`: the longest
    /// arm reaches the edge of the surface.
    #[serde(alias = "fit")]
    FitToCanvas,
}

impl Scaling {
    pub fn proportion(self, max_branch_length: f64, width: f64, height: f64) -> f64 {
        let side = width.min(height);
        match self {
            Scaling::Proportional => (max_branch_length / side) / 2.0,
            Scaling::FitToCanvas => side / (2.0 * max_branch_length),
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scaling::Proportional => write!(f, "proportional"),
            Scaling::FitToCanvas => write!(f, "fit-to-canvas"),
        }
    }
}

impl FromStr for Scaling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proportional" => Ok(Scaling::Proportional),
            "fit-to-canvas" | "fit" => Ok(Scaling::FitToCanvas),
            other => Err(format!("unknown scaling: {other}")),
        }
    }
}

/// Projects snowflakes onto a surface of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryProjector {
    width: f64,
    height: f64,
    scaling: Scaling,
}

impl GeometryProjector {
    pub fn new(width: f64, height: f64) -> DomainResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            scaling: Scaling::default(),
        })
    }

    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Scale factor applied to every branch and sub-branch length.
    pub fn proportion(&self, snowflake: &Snowflake) -> DomainResult<f64> {
        let max_length = snowflake.max_branch_length();
        if max_length == 0 {
            return Err(DomainError::degenerate("longest branch has zero length"));
        }
        Ok(self
            .scaling
            .proportion(f64::from(max_length), self.width, self.height))
    }

    /// Project every branch and sub-branch into segments.
    ///
    /// Emits, per branch in placement order, the centre-to-tip segment followed by
    /// the left and right offshoot of each sub-branch. Coordinates are relative
    /// to the snowflake centre and are not rounded.
    #[instrument(level = "debug", skip(self, snowflake))]
    pub fn project(&self, snowflake: &Snowflake) -> DomainResult<Vec<LineSegment>> {
        check_branch_count(snowflake.branch_count())?;
        let proportion = self.proportion(snowflake)?;
        debug!(
            "projecting {} branches at {}x{} proportion={}",
            snowflake.branch_count(),
            self.width,
            self.height,
            proportion
        );

        let mut segments = Vec::new();
        for (i, branch) in snowflake.branches().enumerate() {
            let angle = snowflake.placement_angle(i);
            let reach = f64::from(branch.length()) * proportion;
            segments.push(LineSegment::new(Point::ORIGIN, Point::polar(angle, reach)));

            let spacing = reach / (branch.sub_branches().len() + 1) as f64;
            for sub_branch in branch.sub_branches() {
                let root = Point::polar(angle, reach - spacing * f64::from(sub_branch.index()));
                let offshoot = f64::from(sub_branch.length()) * proportion;
                segments.push(LineSegment::new(
                    root,
                    root.offset(angle - sub_branch.angle(), offshoot),
                ));
                segments.push(LineSegment::new(
                    root,
                    root.offset(angle + sub_branch.angle(), offshoot),
                ));
            }
        }
        Ok(segments)
    }
}

/// Project `snowflake` onto a `width` x `height` surface with the default scaling.
pub fn project_to_segments(
    snowflake: &Snowflake,
    width: f64,
    height: f64,
) -> DomainResult<Vec<LineSegment>> {
    GeometryProjector::new(width, height)?.project(snowflake)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;
    use crate::domain::entities::{Branch, Canvas, SubBranch};

    fn snowflake() -> Snowflake {
        let scope = TAU / 6.0;
        let pattern = Branch::new(
            scope,
            120,
            vec![
                SubBranch::new(1, 20f64.to_radians(), 12),
                SubBranch::new(2, 50f64.to_radians(), 20),
            ],
        );
        Snowflake::from_patterns(Canvas::default(), vec![pattern], 6).unwrap()
    }

    #[test]
    fn test_project_emits_branch_then_offshoot_pairs() {
        let segments = project_to_segments(&snowflake(), 100.0, 100.0).unwrap();
        assert_eq!(segments.len(), 6 * (1 + 2 * 2));
        assert_eq!(segments[0].from, Point::ORIGIN);
        assert_eq!(segments[1].from, segments[2].from);
    }

    #[test]
    fn test_offshoots_mirror_around_branch() {
        let segments = project_to_segments(&snowflake(), 100.0, 100.0).unwrap();
        // first branch points straight up, so mirrored offshoots differ only in x sign
        let (left, right) = (segments[1], segments[2]);
        assert!((left.to.x - left.from.x + (right.to.x - right.from.x)).abs() < 1e-12);
        assert!((left.to.y - right.to.y).abs() < 1e-12);
        assert!((left.length() - right.length()).abs() < 1e-12);
    }

    #[test]
    fn test_sub_branch_roots_sit_on_branch() {
        let segments = project_to_segments(&snowflake(), 100.0, 100.0).unwrap();
        let reach = 120.0 * 0.6;
        // index 1 of 2: one third down from the tip
        assert!((segments[1].from.distance_to(Point::ORIGIN) - reach * 2.0 / 3.0).abs() < 1e-9);
        // index 2 of 2: two thirds down from the tip
        assert!((segments[3].from.distance_to(Point::ORIGIN) - reach / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_from_str() {
        assert_eq!("fit".parse::<Scaling>().unwrap(), Scaling::FitToCanvas);
        assert_eq!(
            "Proportional".parse::<Scaling>().unwrap(),
            Scaling::Proportional
        );
        assert!("stretch".parse::<Scaling>().is_err());
    }

    #[test]
    fn test_projector_rejects_degenerate_surface() {
        assert!(matches!(
            GeometryProjector::new(0.0, 100.0),
            Err(DomainError::DegenerateGeometry(_))
        ));
        assert!(project_to_segments(&snowflake(), 100.0, -5.0).is_err());
    }
}
