//! Proximity Detector - Who has been standing next to whom, and for how long
//!
//! Every unordered pair of live agents has a dwell accumulator. While the
//! pair is within `distance` it grows by the tick's elapsed time; the
//! instant they part it drops to zero. Reaching `dwell_ms` fires a
//! duel trigger for that pair and resets its accumulator.
//!
//! The detector only reads positions. It never touches inventories,
//! barriers or the session flag; the caller tells it when to stand still.

use std::collections::BTreeMap;

use crate::model::agent::{Agent, AgentId};

/// Default trigger distance in pixels
pub const DEFAULT_TRIGGER_DISTANCE: f32 = 64.0;
/// Default dwell time before a duel starts
pub const DEFAULT_DWELL_MS: u64 = 3000;

/// Thresholds for the detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximitySettings {
    /// Pair is "close" when distance <= this
    pub distance: f32,
    /// Continuous closeness needed to trigger
    pub dwell_ms: u64,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_TRIGGER_DISTANCE,
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }
}

/// Unordered agent pair; `first < second` always
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentPair {
    first: AgentId,
    second: AgentId,
}

impl AgentPair {
    pub fn new(a: AgentId, b: AgentId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &AgentId {
        &self.first
    }

    pub fn second(&self) -> &AgentId {
        &self.second
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        &self.first == id || &self.second == id
    }
}

#[derive(Debug, Clone, Default)]
struct Tracker {
    dwell_ms: u64,
    near: bool,
}

/// What one observation produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityReport {
    /// Pairs whose dwell reached the threshold this tick, in pair order
    pub triggered: Vec<AgentPair>,
    /// Pairs whose closeness flipped this tick (`true` = just came close)
    pub warnings: Vec<(AgentPair, bool)>,
}

/// ProximityDetector - Per-pair dwell accumulators
#[derive(Debug, Clone, Default)]
pub struct ProximityDetector {
    settings: ProximitySettings,
    trackers: BTreeMap<AgentPair, Tracker>,
}

impl ProximityDetector {
    pub fn new(settings: ProximitySettings) -> Self {
        Self {
            settings,
            trackers: BTreeMap::new(),
        }
    }

    pub fn settings(&self) -> &ProximitySettings {
        &self.settings
    }

    /// Accumulate one tick for every pair of live agents
    ///
    /// All pairs are evaluated before anything is reported, so the
    /// caller sees the complete set of triggers for the tick.
    pub fn observe(&mut self, agents: &[Agent], elapsed_ms: u64) -> ProximityReport {
        let mut report = ProximityReport::default();
        let live: Vec<&Agent> = agents.iter().filter(|a| a.is_alive()).collect();

        for (i, a) in live.iter().enumerate() {
            for b in &live[i + 1..] {
                let pair = AgentPair::new(a.id().clone(), b.id().clone());
                let distance = a.position().distance_to(&b.position());
                let close = distance <= self.settings.distance;
                let tracker = self.trackers.entry(pair.clone()).or_default();

                if close {
                    tracker.dwell_ms = tracker.dwell_ms.saturating_add(elapsed_ms);
                } else {
                    tracker.dwell_ms = 0;
                }

                if close != tracker.near {
                    tracker.near = close;
                    report.warnings.push((pair.clone(), close));
                }

                if close && tracker.dwell_ms >= self.settings.dwell_ms {
                    tracker.dwell_ms = 0;
                    report.triggered.push(pair);
                }
            }
        }

        report.triggered.sort();
        report
    }

    /// Current accumulator for a pair (0 if never observed)
    pub fn dwell_ms(&self, a: &AgentId, b: &AgentId) -> u64 {
        self.trackers
            .get(&AgentPair::new(a.clone(), b.clone()))
            .map(|t| t.dwell_ms)
            .unwrap_or(0)
    }

    /// Stop tracking every pair involving this agent
    pub fn forget(&mut self, id: &AgentId) {
        self.trackers.retain(|pair, _| !pair.contains(id));
    }

    /// Number of tracked pairs
    pub fn tracked_pairs(&self) -> usize {
        self.trackers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::agent::{ControlMode, Position};

    fn agent(id: &str, x: f32) -> Agent {
        Agent::new(AgentId::new(id), ControlMode::Automated).at(Position::new(x, 0.0))
    }

    #[test]
    fn test_accumulates_then_triggers() {
        let mut detector = ProximityDetector::new(ProximitySettings::default());
        let agents = vec![agent("a", 0.0), agent("b", 64.0)];

        for _ in 0..2 {
            let report = detector.observe(&agents, 1000);
            assert!(report.triggered.is_empty());
        }
        assert_eq!(detector.dwell_ms(&AgentId::new("a"), &AgentId::new("b")), 2000);

        let report = detector.observe(&agents, 1000);
        assert_eq!(
            report.triggered,
            vec![AgentPair::new(AgentId::new("b"), AgentId::new("a"))]
        );
        assert_eq!(detector.dwell_ms(&AgentId::new("a"), &AgentId::new("b")), 0);
    }

    #[test]
    fn test_reset_when_apart() {
        let mut detector = ProximityDetector::new(ProximitySettings::default());
        let close = vec![agent("a", 0.0), agent("b", 10.0)];
        let apart = vec![agent("a", 0.0), agent("b", 65.0)];

        detector.observe(&close, 2500);
        let report = detector.observe(&apart, 16);
        assert!(report.triggered.is_empty());
        assert_eq!(detector.dwell_ms(&AgentId::new("a"), &AgentId::new("b")), 0);

        // Needs a full dwell again after the reset
        detector.observe(&close, 2500);
        assert!(detector.observe(&close, 400).triggered.is_empty());
        assert_eq!(detector.observe(&close, 100).triggered.len(), 1);
    }

    #[test]
    fn test_warnings_toggle() {
        let mut detector = ProximityDetector::new(ProximitySettings::default());
        let close = vec![agent("a", 0.0), agent("b", 10.0)];
        let apart = vec![agent("a", 0.0), agent("b", 100.0)];

        assert_eq!(detector.observe(&close, 16).warnings.len(), 1);
        assert!(detector.observe(&close, 16).warnings.is_empty());
        let report = detector.observe(&apart, 16);
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.warnings[0].1);
    }

    #[test]
    fn test_many_simultaneous_triggers_are_ordered() {
        let mut detector = ProximityDetector::new(ProximitySettings {
            distance: 64.0,
            dwell_ms: 100,
        });
        let agents = vec![agent("c", 0.0), agent("a", 1.0), agent("b", 2.0)];

        let report = detector.observe(&agents, 100);
        assert_eq!(report.triggered.len(), 3);
        assert_eq!(report.triggered[0].first().as_str(), "a");
        assert_eq!(report.triggered[0].second().as_str(), "b");
    }

    #[test]
    fn test_eliminated_agents_are_ignored() {
        let mut detector = ProximityDetector::new(ProximitySettings::default());
        let mut dead = agent("b", 0.0);
        dead.eliminate();
        let agents = vec![agent("a", 0.0), dead];

        detector.observe(&agents, 5000);
        assert_eq!(detector.tracked_pairs(), 0);
    }

    #[test]
    fn test_forget() {
        let mut detector = ProximityDetector::new(ProximitySettings::default());
        let agents = vec![agent("a", 0.0), agent("b", 0.0), agent("c", 500.0)];
        detector.observe(&agents, 16);
        assert_eq!(detector.tracked_pairs(), 3);

        detector.forget(&AgentId::new("b"));
        assert_eq!(detector.tracked_pairs(), 1);
    }
}
