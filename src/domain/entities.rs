//! Domain entities: core data structures

use std::f64::consts::TAU;
use std::fmt;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::projector::GeometryProjector;
use crate::domain::LineSegment;

/// Fewest arms a snowflake may have.
pub const MIN_BRANCH_COUNT: u32 = 5;
/// Most arms a snowflake may have.
pub const MAX_BRANCH_COUNT: u32 = 10;

/// Canvas used when the caller does not name one.
pub const DEFAULT_CANVAS_SIZE: f64 = 150.0;

/// A point in surface-local coordinates. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from the origin along `angle`, measured clockwise from 12 o'clock.
    pub fn polar(angle: f64, distance: f64) -> Self {
        Self::ORIGIN.offset(angle, distance)
    }

    /// Point reached by travelling `distance` from `self` along `angle`.
    pub fn offset(self, angle: f64, distance: f64) -> Self {
        Self {
            x: self.x + angle.sin() * distance,
            y: self.y - angle.cos() * distance,
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Width and height of the target drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    width: f64,
    height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> DomainResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Centre of the canvas, where every snowflake is rooted.
    pub fn centre(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Rejects zero, negative and non-finite surface sizes.
pub fn check_dimensions(width: f64, height: f64) -> DomainResult<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(DomainError::degenerate(format!("width must be positive, got {width}")));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(DomainError::degenerate(format!("height must be positive, got {height}")));
    }
    Ok(())
}

/// A mirrored pair of offshoots rooted along a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct SubBranch {
    /// Position on the branch, 1 being the outermost
    index: u32,
    /// Half-angle between each offshoot and the branch centreline, in radians
    angle: f64,
    /// Raw (unscaled) offshoot length
    length: u32,
}

impl SubBranch {
    pub fn new(index: u32, angle: f64, length: u32) -> Self {
        Self {
            index,
            angle,
            length,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn length(&self) -> u32 {
        self.length
    }
}

impl fmt::Display for SubBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sub-branch {}: angle {:.1}°, length {}",
            self.index,
            self.angle.to_degrees(),
            self.length
        )
    }
}

/// One arm pattern of a snowflake.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Angular budget in radians, already net of spacing to neighbours
    scope_angle: f64,
    /// Raw (unscaled) branch length
    length: u32,
    /// Outermost first
    sub_branches: Vec<SubBranch>,
}

impl Branch {
    pub fn new(scope_angle: f64, length: u32, sub_branches: Vec<SubBranch>) -> Self {
        Self {
            scope_angle,
            length,
            sub_branches,
        }
    }

    pub fn scope_angle(&self) -> f64 {
        self.scope_angle
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn sub_branches(&self) -> &[SubBranch] {
        &self.sub_branches
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "branch: length {}, scope {:.1}°, {} sub-branches",
            self.length,
            self.scope_angle.to_degrees(),
            self.sub_branches.len()
        )
    }
}

/// A complete snowflake.
///
/// Distinct branch patterns live in an arena; the branch sequence holds arena
/// indices, so slots sharing a pattern alias it instead of copying it.
#[derive(Debug, Clone)]
pub struct Snowflake {
    canvas: Canvas,
    centre: Point,
    patterns: Arena<Branch>,
    slots: Vec<Index>,
}

impl Snowflake {
    /// Tile `patterns` around `branch_count` slots: `slot[i] = patterns[i % patterns.len()]`.
    pub fn from_patterns(
        canvas: Canvas,
        patterns: Vec<Branch>,
        branch_count: u32,
    ) -> DomainResult<Self> {
        check_branch_count(branch_count)?;
        let pattern_count = patterns.len();
        if pattern_count == 0 {
            return Err(DomainError::degenerate("snowflake needs at least one branch pattern"));
        }
        if branch_count as usize % pattern_count != 0 {
            return Err(DomainError::degenerate(format!(
                "{pattern_count} patterns do not tile {branch_count} branches"
            )));
        }

        let mut arena = Arena::with_capacity(pattern_count);
        let indices: Vec<Index> = patterns.into_iter().map(|b| arena.insert(b)).collect();
        let slots = (0..branch_count as usize)
            .map(|i| indices[i % pattern_count])
            .collect();

        Self::from_slots(canvas, arena, slots)
    }

    /// Build from an explicit pattern store and slot assignment.
    pub fn from_slots(canvas: Canvas, patterns: Arena<Branch>, slots: Vec<Index>) -> DomainResult<Self> {
        let branch_count = u32::try_from(slots.len())
            .map_err(|_| DomainError::degenerate("too many branch slots"))?;
        check_branch_count(branch_count)?;
        if let Some(pos) = slots.iter().position(|idx| !patterns.contains(*idx)) {
            return Err(DomainError::degenerate(format!(
                "branch slot {pos} points at no pattern"
            )));
        }
        Ok(Self {
            centre: canvas.centre(),
            canvas,
            patterns,
            slots,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn centre(&self) -> Point {
        self.centre
    }

    pub fn branch_count(&self) -> u32 {
        // bounded by MAX_BRANCH_COUNT at construction
        self.slots.len() as u32
    }

    /// Number of structurally distinct branches.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Arena index of the pattern at each slot, in placement order.
    pub fn slots(&self) -> &[Index] {
        &self.slots
    }

    /// Distinct patterns with their arena indices.
    pub fn patterns(&self) -> impl Iterator<Item = (Index, &Branch)> {
        self.patterns.iter()
    }

    /// Branches in placement order; aliased slots yield the same reference.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> + '_ {
        self.slots.iter().filter_map(move |idx| self.patterns.get(*idx))
    }

    pub fn max_branch_length(&self) -> u32 {
        self.branches().map(Branch::length).max().unwrap_or(0)
    }

    /// Placement angle of slot `i`, clockwise from 12 o'clock.
    pub fn placement_angle(&self, i: usize) -> f64 {
        TAU / f64::from(self.branch_count()) * i as f64
    }

    /// Re-render against the snowflake's own canvas. Geometry is not touched.
    pub fn segments(&self) -> DomainResult<Vec<LineSegment>> {
        GeometryProjector::new(self.canvas.width(), self.canvas.height())?.project(self)
    }
}

/// Rejects branch counts outside `[MIN_BRANCH_COUNT, MAX_BRANCH_COUNT]`.
pub fn check_branch_count(branch_count: u32) -> DomainResult<()> {
    if !(MIN_BRANCH_COUNT..=MAX_BRANCH_COUNT).contains(&branch_count) {
        return Err(DomainError::degenerate(format!(
            "branch count {branch_count} outside [{MIN_BRANCH_COUNT}, {MAX_BRANCH_COUNT}]"
        )));
    }
    Ok(())
}
