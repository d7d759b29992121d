//! EventJournal - Bounded history of what happened in the maze

use chrono::Utc;
use maze_domain::event::GameEvent;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One recorded event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Wall-clock time of recording (RFC 3339)
    pub timestamp: String,
    /// Simulated world time
    pub world_time_ms: u64,
    pub event_type: JournalEventType,
    pub agent_id: Option<String>,
    pub session_id: Option<u64>,
    pub message: String,
}

/// Kinds of journal entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEventType {
    KeyCollected,
    AccessDenied,
    BarrierUnlocked,
    BarrierRelocked,
    ProximityWarning,
    CombatStarted,
    ChoicePending,
    ChoiceMade,
    CombatResolved,
    KeySwappedBack,
    AgentEliminated,
    CombatEnded,
    CombatAborted,
}

impl From<&GameEvent> for JournalEventType {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::KeyCollected { .. } => JournalEventType::KeyCollected,
            GameEvent::AccessDenied { .. } => JournalEventType::AccessDenied,
            GameEvent::BarrierUnlocked { .. } => JournalEventType::BarrierUnlocked,
            GameEvent::BarrierRelocked { .. } => JournalEventType::BarrierRelocked,
            GameEvent::ProximityWarning { .. } => JournalEventType::ProximityWarning,
            GameEvent::CombatStarted { .. } => JournalEventType::CombatStarted,
            GameEvent::ChoicePending { .. } => JournalEventType::ChoicePending,
            GameEvent::ChoiceMade { .. } => JournalEventType::ChoiceMade,
            GameEvent::CombatResolved { .. } => JournalEventType::CombatResolved,
            GameEvent::KeySwappedBack { .. } => JournalEventType::KeySwappedBack,
            GameEvent::AgentEliminated { .. } => JournalEventType::AgentEliminated,
            GameEvent::CombatEnded { .. } => JournalEventType::CombatEnded,
            GameEvent::CombatAborted { .. } => JournalEventType::CombatAborted,
        }
    }
}

fn session_of(event: &GameEvent) -> Option<u64> {
    match event {
        GameEvent::CombatStarted { session_id, .. }
        | GameEvent::ChoicePending { session_id, .. }
        | GameEvent::ChoiceMade { session_id, .. }
        | GameEvent::CombatResolved { session_id, .. }
        | GameEvent::KeySwappedBack { session_id, .. }
        | GameEvent::CombatEnded { session_id }
        | GameEvent::CombatAborted { session_id, .. } => Some(session_id.value()),
        _ => None,
    }
}

/// Event journal
#[derive(Debug)]
pub struct EventJournal {
    entries: VecDeque<JournalEntry>,
    max_entries: usize,
}

impl EventJournal {
    /// Create a journal keeping at most `max_entries`
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
        }
    }

    /// Append an entry, dropping the oldest when full
    pub fn log(&mut self, entry: JournalEntry) {
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Record a game event
    pub fn record(&mut self, world_time_ms: u64, event: &GameEvent) {
        self.log(JournalEntry {
            timestamp: Utc::now().to_rfc3339(),
            world_time_ms,
            event_type: JournalEventType::from(event),
            agent_id: event.agent().map(|id| id.to_string()),
            session_id: session_of(event),
            message: event.to_string(),
        });
    }

    pub fn record_all(&mut self, world_time_ms: u64, events: &[GameEvent]) {
        for event in events {
            self.record(world_time_ms, event);
        }
    }

    /// Most recent entries first
    pub fn get_recent(&self, limit: usize) -> Vec<&JournalEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Most recent entries of one kind first
    pub fn get_recent_of(&self, event_type: JournalEventType, limit: usize) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.event_type == event_type)
            .take(limit)
            .collect()
    }

    pub fn get_stats(&self) -> JournalStats {
        let count = |kind: JournalEventType| {
            self.entries
                .iter()
                .filter(|e| e.event_type == kind)
                .count()
        };

        JournalStats {
            total_entries: self.entries.len(),
            combats: count(JournalEventType::CombatResolved),
            eliminations: count(JournalEventType::AgentEliminated),
            denials: count(JournalEventType::AccessDenied),
            doors_opened: count(JournalEventType::BarrierUnlocked),
            keys_collected: count(JournalEventType::KeyCollected),
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Journal statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: usize,
    pub combats: usize,
    pub eliminations: usize,
    pub denials: usize,
    pub doors_opened: usize,
    pub keys_collected: usize,
}

impl Default for EventJournal {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_domain::model::agent::AgentId;
    use maze_domain::model::barrier::BarrierId;
    use maze_domain::service::combat::{CombatResult, SessionId};

    fn denied(agent: &str) -> GameEvent {
        GameEvent::AccessDenied {
            agent_id: AgentId::new(agent),
            barrier_id: BarrierId::new("door-1"),
        }
    }

    #[test]
    fn test_record_event() {
        let mut journal = EventJournal::new(100);

        journal.record(1600, &denied("player1"));

        let recent = journal.get_recent(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].event_type, JournalEventType::AccessDenied);
        assert_eq!(recent[0].agent_id.as_deref(), Some("player1"));
        assert_eq!(recent[0].world_time_ms, 1600);
        assert_eq!(recent[0].message, "player1 cannot open door-1");
    }

    #[test]
    fn test_max_entries_limit() {
        let mut journal = EventJournal::new(3);
        for name in ["a", "b", "c", "d"] {
            journal.record(0, &denied(name));
        }

        assert_eq!(journal.len(), 3);
        let agents: Vec<_> = journal
            .get_recent(10)
            .iter()
            .filter_map(|e| e.agent_id.clone())
            .collect();
        assert_eq!(agents, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_stats() {
        let mut journal = EventJournal::default();
        journal.record_all(
            5000,
            &[
                denied("ai1"),
                GameEvent::CombatResolved {
                    session_id: SessionId::new(1),
                    winner: Some(AgentId::new("ai1")),
                    loser: Some(AgentId::new("ai2")),
                    result: CombatResult::Eliminated,
                },
                GameEvent::AgentEliminated {
                    agent_id: AgentId::new("ai2"),
                },
            ],
        );

        let stats = journal.get_stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.combats, 1);
        assert_eq!(stats.eliminations, 1);
        assert_eq!(stats.denials, 1);
        assert_eq!(
            journal.get_recent_of(JournalEventType::CombatResolved, 5)[0].session_id,
            Some(1)
        );
    }

    #[test]
    fn test_export_json() {
        let mut journal = EventJournal::new(100);
        journal.record(0, &denied("player1"));
        journal.record(16, &GameEvent::CombatEnded {
            session_id: SessionId::new(2),
        });

        let json = journal.export_json();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["eventType"], "access_denied");
        assert_eq!(entries[1]["sessionId"], 2);
    }
}
