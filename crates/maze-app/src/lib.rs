//! RPS Maze application layer
//!
//! Wires the in-memory adapters into a World, drives it with a headless
//! demo maze and exposes the CLI commands.

pub mod commands;
pub mod output;
pub mod scenario;
pub mod settings;

pub use scenario::{DemoWorld, Scenario, PLAYER_ID};
pub use settings::world_settings;
