//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits replace the game's global registries (players,
//! doors, keys). The domain says what it needs; the adapter decides
//! how it's stored.
//!
//! ```text
//! Domain Layer            │  Adapter Layer
//! ────────────────────────┼────────────────────────
//! trait AgentRepository   │  InMemoryAgentRepository
//!   fn save()             │
//!   fn find_by_id()       │
//! ```

pub mod agent_repository;
pub mod world_repository;
