//! # RPS Maze Adapter Layer
//!
//! Implementations of the domain ports (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `repository/` - In-memory registries for agents, barriers and key items
//! - `random` - `rand`-backed random source
//! - `network` - Stub multiplayer manager
//! - `journal` - Bounded history of game events
//! - `reporter` - Game events as tracing lines

pub mod journal;
pub mod network;
pub mod random;
pub mod reporter;
pub mod repository;

pub use journal::{EventJournal, JournalEntry, JournalEventType, JournalStats};
pub use network::StubNetwork;
pub use random::StdRandom;
pub use repository::in_memory::{
    InMemoryAgentRepository, InMemoryBarrierRepository, InMemoryKeyItemRepository,
};
