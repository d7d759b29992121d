//! Barrier - A door that only opens for keys that beat its requirements
//!
//! Barrier is an Entity. Its life is a perpetual cycle:
//!
//! ```text
//!  ┌────────┐ unlock() ┌──────────┐ change_requirements() ┌────────┐
//!  │ LOCKED │─────────▶│ UNLOCKED │──────────────────────▶│ LOCKED │ ...
//!  └────────┘          └──────────┘  (new random set)     └────────┘
//! ```
//!
//! There is no terminal state; doors are reusable forever.

use super::agent::Position;
use super::token::KeyType;
use crate::port::random::RandomSource;

/// Unique identifier for a Barrier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BarrierId(String);

impl BarrierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BarrierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many keys a barrier demands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Single,
    Double,
    Triple,
}

impl Arity {
    pub fn count(&self) -> usize {
        match self {
            Arity::Single => 1,
            Arity::Double => 2,
            Arity::Triple => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Arity::Single => "single",
            Arity::Double => "double",
            Arity::Triple => "triple",
        }
    }
}

impl core::fmt::Display for Arity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lock state of a barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierState {
    /// Solid; collision enabled
    Locked,
    /// Passable for one instant, until requirements rotate
    Unlocked,
}

/// Barrier - A typed gate
#[derive(Debug, Clone)]
pub struct Barrier {
    id: BarrierId,
    arity: Arity,
    /// Required key kinds, fixed order, `len == arity.count()`
    requirements: Vec<KeyType>,
    state: BarrierState,
    position: Position,
}

impl Barrier {
    /// Create a locked barrier with an initial requirement set
    pub fn new(
        id: BarrierId,
        arity: Arity,
        requirements: Vec<KeyType>,
    ) -> Result<Self, BarrierError> {
        if requirements.len() != arity.count() {
            return Err(BarrierError::ArityMismatch {
                arity,
                actual: requirements.len(),
            });
        }
        Ok(Self {
            id,
            arity,
            requirements,
            state: BarrierState::Locked,
            position: Position::default(),
        })
    }

    /// Create a locked barrier with random distinct requirements
    pub fn random(id: BarrierId, arity: Arity, rng: &mut dyn RandomSource) -> Self {
        Self {
            id,
            arity,
            requirements: KeyType::random_distinct(rng, arity.count()),
            state: BarrierState::Locked,
            position: Position::default(),
        }
    }

    /// Builder: place the barrier in the world
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> &BarrierId {
        &self.id
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn requirements(&self) -> &[KeyType] {
        &self.requirements
    }

    pub fn state(&self) -> BarrierState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == BarrierState::Locked
    }

    /// Collision is disabled only while unlocked
    pub fn is_passable(&self) -> bool {
        self.state == BarrierState::Unlocked
    }

    pub fn position(&self) -> Position {
        self.position
    }

    // ========== State Transitions ==========

    /// LOCKED -> UNLOCKED
    pub fn unlock(&mut self) -> Result<(), BarrierError> {
        match self.state {
            BarrierState::Locked => {
                self.state = BarrierState::Unlocked;
                Ok(())
            }
            BarrierState::Unlocked => Err(BarrierError::AlreadyUnlocked {
                id: self.id.clone(),
            }),
        }
    }

    /// UNLOCKED -> LOCKED with a fresh random requirement set of the same arity
    ///
    /// Returns the new requirements.
    pub fn change_requirements(
        &mut self,
        rng: &mut dyn RandomSource,
    ) -> Result<&[KeyType], BarrierError> {
        if self.state != BarrierState::Unlocked {
            return Err(BarrierError::NotUnlocked {
                id: self.id.clone(),
            });
        }
        self.requirements = KeyType::random_distinct(rng, self.arity.count());
        debug_assert_eq!(self.requirements.len(), self.arity.count());
        self.state = BarrierState::Locked;
        Ok(&self.requirements)
    }
}

impl PartialEq for Barrier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Barrier {}

/// Errors that can occur during Barrier operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarrierError {
    /// Requirement count does not match the arity
    ArityMismatch { arity: Arity, actual: usize },
    /// unlock() on an unlocked barrier
    AlreadyUnlocked { id: BarrierId },
    /// change_requirements() on a locked barrier
    NotUnlocked { id: BarrierId },
}

impl core::fmt::Display for BarrierError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BarrierError::ArityMismatch { arity, actual } => {
                write!(
                    f,
                    "A {} barrier needs {} requirements, got {}",
                    arity,
                    arity.count(),
                    actual
                )
            }
            BarrierError::AlreadyUnlocked { id } => {
                write!(f, "Barrier {} is already unlocked", id)
            }
            BarrierError::NotUnlocked { id } => {
                write!(f, "Barrier {} is not unlocked", id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::random::SequenceRandom;

    #[test]
    fn test_arity_mismatch_rejected() {
        let result = Barrier::new(
            BarrierId::new("door-1"),
            Arity::Double,
            vec![KeyType::Rock],
        );
        assert!(matches!(
            result,
            Err(BarrierError::ArityMismatch { actual: 1, .. })
        ));
    }

    #[test]
    fn test_barrier_cycle() {
        let mut rng = SequenceRandom::new([2, 0]);
        let mut barrier = Barrier::new(
            BarrierId::new("door-2"),
            Arity::Double,
            vec![KeyType::Rock, KeyType::Rock],
        )
        .unwrap();

        assert!(barrier.is_locked());
        assert!(barrier.change_requirements(&mut rng).is_err());

        barrier.unlock().unwrap();
        assert!(barrier.is_passable());
        assert!(barrier.unlock().is_err());

        let requirements = barrier.change_requirements(&mut rng).unwrap().to_vec();
        assert_eq!(requirements.len(), 2);
        assert_ne!(requirements[0], requirements[1]);
        assert!(barrier.is_locked());
    }

    #[test]
    fn test_rotation_always_matches_arity_without_duplicates() {
        let mut rng = SequenceRandom::new([0, 1, 2, 2, 1, 0, 1, 1, 1]);
        for arity in [Arity::Single, Arity::Double, Arity::Triple] {
            let mut barrier = Barrier::random(BarrierId::new("d"), arity, &mut rng);
            for _ in 0..5 {
                barrier.unlock().unwrap();
                let reqs = barrier.change_requirements(&mut rng).unwrap().to_vec();
                assert_eq!(reqs.len(), arity.count());
                for (i, r) in reqs.iter().enumerate() {
                    assert!(!reqs[i + 1..].contains(r));
                }
            }
        }
    }
}
