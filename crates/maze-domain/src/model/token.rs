//! KeyType - The three kinds of key in the maze
//!
//! KeyType is a Value Object. Keys are compared by kind only;
//! two rock keys are interchangeable.
//!
//! The same cyclic "beats" relation decides both door access and duels:
//!
//! ```text
//!   Rock ──beats──▶ Scissors ──beats──▶ Paper ──beats──▶ Rock
//! ```

use crate::port::random::RandomSource;

/// The kind of a key (rock / paper / scissors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyType {
    Rock,
    Paper,
    Scissors,
}

impl KeyType {
    /// All key types, in a fixed order
    pub fn all() -> &'static [KeyType] {
        &[KeyType::Rock, KeyType::Paper, KeyType::Scissors]
    }

    /// The one key type this type beats
    pub fn victim(self) -> KeyType {
        match self {
            KeyType::Rock => KeyType::Scissors,
            KeyType::Paper => KeyType::Rock,
            KeyType::Scissors => KeyType::Paper,
        }
    }

    /// The one key type that beats this type
    pub fn nemesis(self) -> KeyType {
        match self {
            KeyType::Rock => KeyType::Paper,
            KeyType::Paper => KeyType::Scissors,
            KeyType::Scissors => KeyType::Rock,
        }
    }

    /// Dominance relation: irreflexive, antisymmetric, total over distinct pairs
    pub fn beats(self, other: KeyType) -> bool {
        self.victim() == other
    }

    /// Pick a key type uniformly at random
    pub fn random(rng: &mut dyn RandomSource) -> KeyType {
        let all = Self::all();
        all[rng.index(all.len())]
    }

    /// Pick `count` distinct key types uniformly at random (partial Fisher-Yates)
    ///
    /// `count` is clamped to the number of key types.
    pub fn random_distinct(rng: &mut dyn RandomSource, count: usize) -> Vec<KeyType> {
        let mut pool = Self::all().to_vec();
        let count = count.min(pool.len());
        for i in 0..count {
            let j = i + rng.index(pool.len() - i);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            KeyType::Rock => "rock",
            KeyType::Paper => "paper",
            KeyType::Scissors => "scissors",
        }
    }

    /// Parse a key type name (case-insensitive, single-letter shorthand accepted)
    pub fn parse(name: &str) -> Option<KeyType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Some(KeyType::Rock),
            "paper" | "p" => Some(KeyType::Paper),
            "scissors" | "s" => Some(KeyType::Scissors),
            _ => None,
        }
    }
}

impl core::fmt::Display for KeyType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
