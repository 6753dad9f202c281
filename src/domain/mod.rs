//! Domain layer: snowflake entities, generators and projection
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod branch;
pub mod builder;
pub mod entities;
pub mod error;
pub mod projector;
pub mod random;
pub mod sub_branch;

pub use branch::BranchGenerator;
pub use builder::{generate_snowflake, SnowflakeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use projector::{project_to_segments, GeometryProjector, LineSegment, Scaling};
pub use random::{common_denominators, RandSource, RandomNumberService};
pub use sub_branch::{BranchConstraints, SubBranchGenerator};
