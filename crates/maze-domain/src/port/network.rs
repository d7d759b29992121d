//! Network Port - Mirroring game state to other instances
//!
//! There is no real protocol yet. The world calls these hooks so a
//! future multiplayer adapter can plug in, and it must behave exactly
//! the same when every call is a no-op.

use crate::model::agent::{AgentId, Position};
use crate::model::token::KeyType;

/// Snapshot of one agent, sent on every tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerUpdate {
    pub agent_id: AgentId,
    pub position: Position,
    pub keys: Vec<KeyType>,
}

/// Summary of a resolved duel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub session_id: u64,
    pub winner: Option<AgentId>,
    pub loser: Option<AgentId>,
    pub result: &'static str,
}

/// Network Port Trait
pub trait NetworkPort {
    fn connect(&mut self, server_url: &str) -> bool;

    fn disconnect(&mut self);

    fn join_room(&mut self, room_id: &str, player_id: &str) -> bool;

    fn leave_room(&mut self);

    fn send_player_update(&mut self, update: &PlayerUpdate) -> bool;

    fn broadcast_battle_result(&mut self, report: &BattleReport) -> bool;
}

/// No-op network for tests and offline play
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNetwork;

impl NetworkPort for NoopNetwork {
    fn connect(&mut self, _server_url: &str) -> bool {
        true
    }

    fn disconnect(&mut self) {}

    fn join_room(&mut self, _room_id: &str, _player_id: &str) -> bool {
        true
    }

    fn leave_room(&mut self) {}

    fn send_player_update(&mut self, _update: &PlayerUpdate) -> bool {
        true
    }

    fn broadcast_battle_result(&mut self, _report: &BattleReport) -> bool {
        true
    }
}
