//! Game Events - What the core tells the presentation layer
//!
//! These are used for rendering, sounds, logging and network mirroring.
//! The core itself doesn't "do" anything with them - it just reports
//! what happened, in the order it happened.

use crate::model::agent::AgentId;
use crate::model::barrier::BarrierId;
use crate::model::key_item::KeyItemId;
use crate::model::token::KeyType;
use crate::service::combat::{CombatResult, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// An agent picked up a key lying in the maze
    KeyCollected {
        agent_id: AgentId,
        item_id: KeyItemId,
        key_type: KeyType,
    },
    /// An agent touched a barrier it cannot open
    AccessDenied {
        agent_id: AgentId,
        barrier_id: BarrierId,
    },
    /// Keys were spent and the barrier opened (collision off)
    BarrierUnlocked {
        barrier_id: BarrierId,
        agent_id: AgentId,
        consumed: Vec<KeyType>,
    },
    /// The barrier rotated its requirements and locked again (collision on)
    BarrierRelocked {
        barrier_id: BarrierId,
        requirements: Vec<KeyType>,
    },
    /// Two agents came within (or left) trigger distance; informational only
    ProximityWarning {
        first: AgentId,
        second: AgentId,
        near: bool,
    },
    /// A duel began; both agents are frozen
    CombatStarted {
        session_id: SessionId,
        first: AgentId,
        second: AgentId,
    },
    /// Show the move prompt to this (human) participant
    ChoicePending {
        session_id: SessionId,
        agent_id: AgentId,
    },
    /// A participant locked in a move (the move itself stays hidden)
    ChoiceMade {
        session_id: SessionId,
        agent_id: AgentId,
    },
    /// Both moves are in and the outcome has been applied
    CombatResolved {
        session_id: SessionId,
        winner: Option<AgentId>,
        loser: Option<AgentId>,
        result: CombatResult,
    },
    /// The winner handed one key back to the loser
    KeySwappedBack {
        session_id: SessionId,
        from: AgentId,
        to: AgentId,
        key_type: KeyType,
    },
    /// The agent is gone for good; remove its sprite
    AgentEliminated { agent_id: AgentId },
    /// Cooldown over; movement released
    CombatEnded { session_id: SessionId },
    /// The duel was cancelled before it could finish
    CombatAborted {
        session_id: SessionId,
        reason: String,
    },
}

impl GameEvent {
    /// Short machine-friendly name of the event
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::KeyCollected { .. } => "key_collected",
            GameEvent::AccessDenied { .. } => "access_denied",
            GameEvent::BarrierUnlocked { .. } => "barrier_unlocked",
            GameEvent::BarrierRelocked { .. } => "barrier_relocked",
            GameEvent::ProximityWarning { .. } => "proximity_warning",
            GameEvent::CombatStarted { .. } => "combat_started",
            GameEvent::ChoicePending { .. } => "choice_pending",
            GameEvent::ChoiceMade { .. } => "choice_made",
            GameEvent::CombatResolved { .. } => "combat_resolved",
            GameEvent::KeySwappedBack { .. } => "key_swapped_back",
            GameEvent::AgentEliminated { .. } => "agent_eliminated",
            GameEvent::CombatEnded { .. } => "combat_ended",
            GameEvent::CombatAborted { .. } => "combat_aborted",
        }
    }

    /// The agent this event is mainly about, if any
    pub fn agent(&self) -> Option<&AgentId> {
        match self {
            GameEvent::KeyCollected { agent_id, .. }
            | GameEvent::AccessDenied { agent_id, .. }
            | GameEvent::BarrierUnlocked { agent_id, .. }
            | GameEvent::ChoicePending { agent_id, .. }
            | GameEvent::ChoiceMade { agent_id, .. }
            | GameEvent::AgentEliminated { agent_id } => Some(agent_id),
            GameEvent::ProximityWarning { first, .. } | GameEvent::CombatStarted { first, .. } => {
                Some(first)
            }
            GameEvent::CombatResolved { winner, .. } => winner.as_ref(),
            GameEvent::KeySwappedBack { from, .. } => Some(from),
            GameEvent::BarrierRelocked { .. }
            | GameEvent::CombatEnded { .. }
            | GameEvent::CombatAborted { .. } => None,
        }
    }
}

impl core::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameEvent::KeyCollected {
                agent_id, key_type, ..
            } => write!(f, "{} picked up a {} key", agent_id, key_type),
            GameEvent::AccessDenied {
                agent_id,
                barrier_id,
            } => write!(f, "{} cannot open {}", agent_id, barrier_id),
            GameEvent::BarrierUnlocked {
                barrier_id,
                agent_id,
                consumed,
            } => write!(
                f,
                "{} opened {} using {}",
                agent_id,
                barrier_id,
                join_keys(consumed)
            ),
            GameEvent::BarrierRelocked {
                barrier_id,
                requirements,
            } => write!(
                f,
                "{} locked again, now requires {}",
                barrier_id,
                join_keys(requirements)
            ),
            GameEvent::ProximityWarning {
                first,
                second,
                near,
            } => {
                if *near {
                    write!(f, "{} and {} are close", first, second)
                } else {
                    write!(f, "{} and {} moved apart", first, second)
                }
            }
            GameEvent::CombatStarted {
                session_id,
                first,
                second,
            } => write!(f, "Duel {}: {} vs {}", session_id, first, second),
            GameEvent::ChoicePending {
                session_id,
                agent_id,
            } => write!(f, "Duel {}: waiting for {} to choose", session_id, agent_id),
            GameEvent::ChoiceMade {
                session_id,
                agent_id,
            } => write!(f, "Duel {}: {} has chosen", session_id, agent_id),
            GameEvent::CombatResolved {
                session_id,
                winner,
                loser,
                result,
            } => match (winner, loser) {
                (Some(w), Some(l)) => {
                    write!(f, "Duel {}: {} beat {} ({})", session_id, w, l, result)
                }
                _ => write!(f, "Duel {}: {}", session_id, result),
            },
            GameEvent::KeySwappedBack {
                from, to, key_type, ..
            } => write!(f, "{} gives a {} key back to {}", from, key_type, to),
            GameEvent::AgentEliminated { agent_id } => write!(f, "{} is eliminated", agent_id),
            GameEvent::CombatEnded { session_id } => write!(f, "Duel {} ended", session_id),
            GameEvent::CombatAborted { session_id, reason } => {
                write!(f, "Duel {} aborted: {}", session_id, reason)
            }
        }
    }
}

fn join_keys(keys: &[KeyType]) -> String {
    keys.iter()
        .map(|k| k.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_display() {
        let event = GameEvent::BarrierUnlocked {
            barrier_id: BarrierId::new("door-1"),
            agent_id: AgentId::new("player1"),
            consumed: vec![KeyType::Rock, KeyType::Paper],
        };
        assert_eq!(event.kind(), "barrier_unlocked");
        assert_eq!(event.to_string(), "player1 opened door-1 using rock, paper");
        assert_eq!(event.agent().map(|a| a.as_str()), Some("player1"));
    }

    #[test]
    fn test_tie_display() {
        let event = GameEvent::CombatResolved {
            session_id: SessionId::new(4),
            winner: None,
            loser: None,
            result: CombatResult::Tie,
        };
        assert_eq!(event.to_string(), "Duel #4: tie");
    }
}
