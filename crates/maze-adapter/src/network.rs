//! Stub multiplayer manager
//!
//! Tracks connection and room state so the game flow can be exercised
//! end to end, but nothing ever leaves the process. Sends succeed only
//! when connected and inside a room.

use maze_domain::port::network::{BattleReport, NetworkPort, PlayerUpdate};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct StubNetwork {
    server_url: Option<String>,
    room_id: Option<String>,
    player_id: Option<String>,
    sent_updates: u64,
    sent_battles: u64,
}

impl StubNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.server_url.is_some()
    }

    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Player updates accepted so far
    pub fn sent_updates(&self) -> u64 {
        self.sent_updates
    }

    /// Battle results accepted so far
    pub fn sent_battles(&self) -> u64 {
        self.sent_battles
    }

    fn can_send(&self) -> bool {
        self.is_connected() && self.room_id.is_some()
    }
}

impl NetworkPort for StubNetwork {
    fn connect(&mut self, server_url: &str) -> bool {
        self.server_url = Some(server_url.to_string());
        info!(server = server_url, "Connected (stub)");
        true
    }

    fn disconnect(&mut self) {
        if self.is_connected() {
            info!(room = ?self.room_id, "Disconnected (stub)");
        }
        self.server_url = None;
        self.room_id = None;
        self.player_id = None;
    }

    fn join_room(&mut self, room_id: &str, player_id: &str) -> bool {
        if !self.is_connected() {
            debug!(room = room_id, "Cannot join room, not connected");
            return false;
        }
        self.room_id = Some(room_id.to_string());
        self.player_id = Some(player_id.to_string());
        info!(room = room_id, player = player_id, "Joined room (stub)");
        true
    }

    fn leave_room(&mut self) {
        if let Some(room) = self.room_id.take() {
            info!(room = %room, "Left room (stub)");
        }
        self.player_id = None;
    }

    fn send_player_update(&mut self, update: &PlayerUpdate) -> bool {
        if !self.can_send() {
            return false;
        }
        self.sent_updates += 1;
        debug!(agent = %update.agent_id, keys = update.keys.len(), "Player update (stub)");
        true
    }

    fn broadcast_battle_result(&mut self, report: &BattleReport) -> bool {
        if !self.can_send() {
            debug!(session = report.session_id, "Cannot broadcast, not in a room");
            return false;
        }
        self.sent_battles += 1;
        info!(
            session = report.session_id,
            result = report.result,
            "Battle result broadcast (stub)"
        );
        true
    }
}
