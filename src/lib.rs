//! flakegen: procedural snowflake generation
//!
//! A snowflake is a set of 5 to 10 radially placed branches whose shapes are
//! drawn from a smaller set of patterns, each branch carrying 1 to 3 angled
//! sub-branches. Generation is pure and driven by a [`domain::RandSource`];
//! projection turns a snowflake into line segments centred on the origin.
//!
//! # Architecture
//!
//! - `domain`: entities, generators, projection
//! - `application`: services orchestrating generation and rendering
//! - `infrastructure`: filesystem and SVG surface implementations, DI container
//! - `cli`: argument parsing and command dispatch
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{generate_snowflake, project_to_segments, Snowflake};
