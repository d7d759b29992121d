//! Game events as tracing lines
//!
//! The domain only reports events; this is where they become log output.

use maze_domain::event::GameEvent;
use tracing::{debug, info, warn, Level};

/// Severity an event is logged at
pub fn level_of(event: &GameEvent) -> Level {
    match event {
        GameEvent::ProximityWarning { .. }
        | GameEvent::ChoiceMade { .. }
        | GameEvent::BarrierRelocked { .. } => Level::DEBUG,
        GameEvent::CombatAborted { .. } => Level::WARN,
        _ => Level::INFO,
    }
}

/// Emit one event with structured fields
pub fn log_event(world_time_ms: u64, event: &GameEvent) {
    let agent = event.agent().map(|a| a.as_str()).unwrap_or("-");
    let kind = event.kind();

    match level_of(event) {
        Level::DEBUG => debug!(t = world_time_ms, kind, agent, "{}", event),
        Level::WARN => warn!(t = world_time_ms, kind, agent, "{}", event),
        _ => info!(t = world_time_ms, kind, agent, "{}", event),
    }
}

pub fn log_events(world_time_ms: u64, events: &[GameEvent]) {
    for event in events {
        log_event(world_time_ms, event);
    }
}
