//! KeyItem - A key lying in the maze, waiting to be picked up

use super::agent::Position;
use super::token::KeyType;

/// Unique identifier for a KeyItem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyItemId(String);

impl KeyItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for KeyItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A collectible key placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct KeyItem {
    id: KeyItemId,
    key_type: KeyType,
    position: Position,
}

impl KeyItem {
    pub fn new(id: KeyItemId, key_type: KeyType, position: Position) -> Self {
        Self {
            id,
            key_type,
            position,
        }
    }

    pub fn id(&self) -> &KeyItemId {
        &self.id
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Strictly closer than `radius`
    pub fn in_reach(&self, position: &Position, radius: f32) -> bool {
        self.position.distance_to(position) < radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_is_strict() {
        let item = KeyItem::new(KeyItemId::new("key-1"), KeyType::Paper, Position::new(0.0, 0.0));
        assert!(item.in_reach(&Position::new(31.0, 0.0), 32.0));
        assert!(!item.in_reach(&Position::new(32.0, 0.0), 32.0));
    }
}
