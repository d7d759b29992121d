//! # RPS Maze Domain Layer
//!
//! The rules of the maze: who may pass which door, and what happens
//! when two players stand next to each other for too long.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Trait definitions (not implementations)       ││
//! │  │  port/      - Randomness and network hooks                  ││
//! │  │  service/   - Access, proximity, combat, coordination       ││
//! │  │  event      - What happened, for the presentation layer     ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! Rendering, physics and networking live outside. The domain only sees
//! positions and elapsed time coming in, and [`GameEvent`]s going out.

pub mod event;
pub mod model;
pub mod port;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    agent::{Agent, AgentId, ControlMode, Position},
    barrier::{Arity, Barrier, BarrierError, BarrierId, BarrierState},
    inventory::Inventory,
    key_item::{KeyItem, KeyItemId},
    token::KeyType,
};

pub use repository::{
    agent_repository::{AgentRepository, RepositoryError},
    world_repository::{BarrierRepository, KeyItemRepository},
};

pub use port::{
    network::{BattleReport, NetworkPort, NoopNetwork, PlayerUpdate},
    random::{RandomSource, SequenceRandom},
};

pub use service::access_resolver::{AccessDecision, AccessOutcome, AccessResolver};
pub use service::combat::{CombatError, CombatPhase, CombatResult, CombatRules, SessionId};
pub use service::coordinator::SessionCoordinator;
pub use service::proximity::{AgentPair, ProximityDetector, ProximitySettings};

pub use event::GameEvent;
