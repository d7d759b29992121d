//! # RPS Maze Use Case Layer
//!
//! Application-specific orchestration.
//! This layer drives the domain services with time and input coming from
//! the presentation layer, and hands the resulting events back.

pub mod error;
pub mod world;

pub use maze_domain;

pub use error::WorldError;
pub use world::{World, WorldSettings, DEFAULT_PICKUP_RADIUS};
