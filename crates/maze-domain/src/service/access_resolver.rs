//! Access Resolver - Can these keys open that door?
//!
//! A key opens a requirement slot when it BEATS the required kind,
//! not when it matches it. Every slot needs its own key: a key
//! spent on one slot cannot be reused for another.
//!
//! Matching is greedy. Slots are visited in their fixed order and each
//! takes the first unused key that beats it. Since exactly one kind
//! beats any given kind, greedy matching never misses a solution.

use crate::model::agent::Agent;
use crate::model::barrier::{Arity, Barrier};
use crate::model::inventory::Inventory;
use crate::model::token::KeyType;
use crate::port::random::RandomSource;

/// The verdict for one inventory against one requirement set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access granted; these inventory indices are consumed, one per slot
    Granted { consumed: Vec<usize> },
    Denied,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }
}

/// What happened when an agent walked into a barrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Keys were spent, the barrier opened and rotated its requirements
    Opened {
        consumed: Vec<KeyType>,
        new_requirements: Vec<KeyType>,
    },
    /// Nothing changed
    Denied,
    /// The barrier was not locked (nothing to open)
    NotLocked,
}

/// AccessResolver - Stateless domain service
pub struct AccessResolver;

impl AccessResolver {
    pub fn new() -> Self {
        Self
    }

    /// Decide without touching anything
    pub fn check(
        &self,
        inventory: &Inventory,
        arity: Arity,
        requirements: &[KeyType],
    ) -> AccessDecision {
        let keys = inventory.keys();

        if arity != Arity::Single && keys.len() < arity.count() {
            return AccessDecision::Denied;
        }

        let mut used = vec![false; keys.len()];
        let mut consumed = Vec::with_capacity(requirements.len());

        for required in requirements {
            let slot = keys
                .iter()
                .enumerate()
                .find(|(i, key)| !used[*i] && key.beats(*required))
                .map(|(i, _)| i);

            match slot {
                Some(index) => {
                    used[index] = true;
                    consumed.push(index);
                }
                None => return AccessDecision::Denied,
            }
        }

        AccessDecision::Granted { consumed }
    }

    /// Check, and on success spend the keys and cycle the barrier
    ///
    /// On denial neither the agent nor the barrier changes.
    pub fn open(
        &self,
        agent: &mut Agent,
        barrier: &mut Barrier,
        rng: &mut dyn RandomSource,
    ) -> AccessOutcome {
        if !barrier.is_locked() {
            return AccessOutcome::NotLocked;
        }

        let decision = self.check(agent.inventory(), barrier.arity(), barrier.requirements());
        let consumed = match decision {
            AccessDecision::Granted { consumed } => consumed,
            AccessDecision::Denied => return AccessOutcome::Denied,
        };

        let spent = agent.inventory_mut().remove_indices(&consumed);

        // Locked was checked above, so neither transition can fail.
        if barrier.unlock().is_err() {
            return AccessOutcome::NotLocked;
        }
        let new_requirements = match barrier.change_requirements(rng) {
            Ok(requirements) => requirements.to_vec(),
            Err(_) => barrier.requirements().to_vec(),
        };

        AccessOutcome::Opened {
            consumed: spent,
            new_requirements,
        }
    }
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::agent::{AgentId, ControlMode};
    use crate::model::barrier::BarrierId;
    use crate::port::random::SequenceRandom;
    use KeyType::{Paper, Rock, Scissors};

    fn inventory(keys: &[KeyType]) -> Inventory {
        Inventory::with_keys(3, keys.iter().copied())
    }

    #[test]
    fn test_single_needs_beating_not_matching() {
        let resolver = AccessResolver::new();

        assert_eq!(
            resolver.check(&inventory(&[Rock]), Arity::Single, &[Rock]),
            AccessDecision::Denied
        );
        assert_eq!(
            resolver.check(&inventory(&[Scissors, Paper]), Arity::Single, &[Rock]),
            AccessDecision::Granted { consumed: vec![1] }
        );
    }

    #[test]
    fn test_one_key_per_slot() {
        let resolver = AccessResolver::new();
        // One rock beats one scissors, but two slots need two rocks.
        assert_eq!(
            resolver.check(&inventory(&[Rock, Rock]), Arity::Double, &[Scissors, Scissors]),
            AccessDecision::Granted { consumed: vec![0, 1] }
        );
        assert_eq!(
            resolver.check(&inventory(&[Rock, Paper]), Arity::Double, &[Scissors, Scissors]),
            AccessDecision::Denied
        );
    }

    #[test]
    fn test_double_grants_and_empties_inventory() {
        let resolver = AccessResolver::new();
        let mut agent = Agent::new(AgentId::new("p1"), ControlMode::Human).with_keys([Rock, Paper]);
        let mut barrier =
            Barrier::new(BarrierId::new("door"), Arity::Double, vec![Scissors, Rock]).unwrap();
        let mut rng = SequenceRandom::new([0, 0]);

        let outcome = resolver.open(&mut agent, &mut barrier, &mut rng);

        match outcome {
            AccessOutcome::Opened {
                consumed,
                new_requirements,
            } => {
                assert_eq!(consumed, vec![Rock, Paper]);
                assert_eq!(new_requirements.len(), 2);
            }
            other => panic!("expected Opened, got {:?}", other),
        }
        assert!(agent.inventory().is_empty());
        assert!(barrier.is_locked());
    }

    #[test]
    fn test_short_inventory_cannot_open_triple() {
        let resolver = AccessResolver::new();
        assert_eq!(
            resolver.check(&inventory(&[Paper, Scissors]), Arity::Triple, &[Rock, Paper, Scissors]),
            AccessDecision::Denied
        );
    }

    #[test]
    fn test_denial_changes_nothing() {
        let resolver = AccessResolver::new();
        let mut agent =
            Agent::new(AgentId::new("p1"), ControlMode::Human).with_keys([Paper, Paper]);
        let mut barrier = Barrier::new(
            BarrierId::new("door"),
            Arity::Double,
            vec![Rock, Paper],
        )
        .unwrap();
        let mut rng = SequenceRandom::default();

        assert_eq!(resolver.open(&mut agent, &mut barrier, &mut rng), AccessOutcome::Denied);
        assert_eq!(agent.keys(), &[Paper, Paper]);
        assert_eq!(barrier.requirements(), &[Rock, Paper]);
        assert!(barrier.is_locked());
    }

    #[test]
    fn test_unlocked_barrier_is_not_reopened() {
        let resolver = AccessResolver::new();
        let mut agent = Agent::new(AgentId::new("p1"), ControlMode::Human).with_key(Paper);
        let mut barrier = Barrier::new(BarrierId::new("door"), Arity::Single, vec![Rock]).unwrap();
        barrier.unlock().unwrap();
        let mut rng = SequenceRandom::default();

        assert_eq!(resolver.open(&mut agent, &mut barrier, &mut rng), AccessOutcome::NotLocked);
        assert_eq!(agent.keys(), &[Paper]);
    }
}
