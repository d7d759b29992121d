//! Agent - A player moving through the maze
//!
//! Agent is an Entity (has identity). Two agents with the same
//! AgentId are the same player, whatever keys they hold right now.
//!
//! The position is owned by the presentation layer; the core only
//! receives it through explicit position updates.

use super::inventory::{Inventory, DEFAULT_CAPACITY};
use super::token::KeyType;

/// Unique identifier for an Agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who decides this agent's moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// Moves and duel choices come from a person
    Human,
    /// Moves and duel choices are made by the game
    Automated,
}

impl ControlMode {
    pub fn is_automated(&self) -> bool {
        matches!(self, ControlMode::Automated)
    }
}

/// A point in world space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Agent - A mobile key holder
#[derive(Debug, Clone)]
pub struct Agent {
    /// Unique identifier (Entity identity)
    id: AgentId,
    /// Keys currently held
    inventory: Inventory,
    /// Human or automated
    control: ControlMode,
    /// False once eliminated
    alive: bool,
    /// Last position reported by the presentation layer
    position: Position,
    /// Movement is frozen while the agent is in a duel
    frozen: bool,
}

impl Agent {
    /// Create a new Agent with an empty inventory of default capacity
    pub fn new(id: AgentId, control: ControlMode) -> Self {
        Self {
            id,
            inventory: Inventory::new(DEFAULT_CAPACITY),
            control,
            alive: true,
            position: Position::default(),
            frozen: false,
        }
    }

    /// Builder: set the inventory capacity (keeps held keys that still fit)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.inventory = Inventory::with_keys(capacity, self.inventory.keys().to_vec());
        self
    }

    /// Builder: add a key
    pub fn with_key(mut self, key: KeyType) -> Self {
        self.inventory.add(key);
        self
    }

    /// Builder: add keys
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyType>) -> Self {
        for key in keys {
            self.inventory.add(key);
        }
        self
    }

    /// Builder: set the starting position
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn keys(&self) -> &[KeyType] {
        self.inventory.keys()
    }

    pub fn control(&self) -> ControlMode {
        self.control
    }

    pub fn is_automated(&self) -> bool {
        self.control.is_automated()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    // ========== Mutations ==========

    /// Apply a position update. Ignored while frozen or eliminated.
    pub fn move_to(&mut self, position: Position) -> bool {
        if self.frozen || !self.alive {
            return false;
        }
        self.position = position;
        true
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    pub fn eliminate(&mut self) {
        self.alive = false;
        self.frozen = false;
    }
}

impl PartialEq for Agent {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for Agent {}
