//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, RenderSurface)
//! but are themselves concrete structs, not traits.

mod snowflake;

pub use snowflake::{RenderedSnowflake, SnowflakeService};
