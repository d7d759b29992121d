//! Domain Models - The vocabulary of the maze
//!
//! Every name here should match how players talk about the game:
//! keys, doors, players.

pub mod agent;
pub mod barrier;
pub mod inventory;
pub mod key_item;
pub mod token;
