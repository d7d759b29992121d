//! World - One running maze
//!
//! The World is the application loop's single entry point. The
//! presentation layer feeds it elapsed time, positions, door overlaps and
//! human moves; it answers with the [`GameEvent`]s to render.
//!
//! ```text
//!  tick(delta)
//!    ├── 1. advance the clock, fire due duel tasks (auto-move, swap-back, cooldown)
//!    ├── 2. proximity (skipped while a duel is active) → maybe start one duel
//!    ├── 3. key pickups
//!    └── 4. mirror positions to the network
//! ```
//!
//! Everything runs to completion on the caller's thread. Deferred work is
//! simulated time in the coordinator's scheduler, never a blocking wait.

use maze_domain::event::GameEvent;
use maze_domain::model::agent::{Agent, AgentId, Position};
use maze_domain::model::barrier::{Barrier, BarrierId};
use maze_domain::model::inventory::DEFAULT_CAPACITY;
use maze_domain::model::key_item::KeyItem;
use maze_domain::model::token::KeyType;
use maze_domain::port::network::{BattleReport, NetworkPort, PlayerUpdate};
use maze_domain::port::random::RandomSource;
use maze_domain::repository::agent_repository::AgentRepository;
use maze_domain::repository::world_repository::{BarrierRepository, KeyItemRepository};
use maze_domain::service::access_resolver::{AccessOutcome, AccessResolver};
use maze_domain::service::combat::{CombatPhase, CombatRules, CombatSession};
use maze_domain::service::coordinator::SessionCoordinator;
use maze_domain::service::proximity::{ProximityDetector, ProximitySettings};
use tracing::{debug, info, warn};

use crate::error::WorldError;

/// Default pickup radius in pixels (one tile)
pub const DEFAULT_PICKUP_RADIUS: f32 = 32.0;

/// Tunables for one world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    /// Keys an agent can carry
    pub inventory_capacity: usize,
    /// A key item is collected when an agent is strictly closer than this
    pub pickup_radius: f32,
    pub proximity: ProximitySettings,
    pub combat: CombatRules,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            inventory_capacity: DEFAULT_CAPACITY,
            pickup_radius: DEFAULT_PICKUP_RADIUS,
            proximity: ProximitySettings::default(),
            combat: CombatRules::default(),
        }
    }
}

/// World - Repositories plus the services that act on them
pub struct World<A, B, K, R, N> {
    settings: WorldSettings,
    agents: A,
    barriers: B,
    items: K,
    rng: R,
    network: N,
    access: AccessResolver,
    detector: ProximityDetector,
    coordinator: SessionCoordinator,
    now_ms: u64,
}

impl<A, B, K, R, N> World<A, B, K, R, N>
where
    A: AgentRepository,
    B: BarrierRepository,
    K: KeyItemRepository,
    R: RandomSource,
    N: NetworkPort,
{
    pub fn new(
        settings: WorldSettings,
        agents: A,
        barriers: B,
        items: K,
        rng: R,
        network: N,
    ) -> Self {
        Self {
            settings,
            agents,
            barriers,
            items,
            rng,
            network,
            access: AccessResolver::new(),
            detector: ProximityDetector::new(settings.proximity),
            coordinator: SessionCoordinator::new(settings.combat),
            now_ms: 0,
        }
    }

    // ========== Getters ==========

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Simulated time since the world started
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_combat_active(&self) -> bool {
        self.coordinator.is_active()
    }

    pub fn combat_phase(&self) -> CombatPhase {
        self.coordinator.phase()
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.coordinator.session()
    }

    /// Human participants of the active duel who still owe a move
    pub fn pending_choices(&self) -> Vec<AgentId> {
        if self.coordinator.phase() != CombatPhase::AwaitingChoices {
            return Vec::new();
        }
        self.coordinator
            .session()
            .map(|session| {
                session
                    .participants()
                    .iter()
                    .filter(|p| p.choice.is_none() && !p.control.is_automated())
                    .map(|p| p.agent_id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn agent(&self, id: &AgentId) -> Result<Option<Agent>, WorldError> {
        Ok(self.agents.find_by_id(id)?)
    }

    pub fn agents(&self) -> Result<Vec<Agent>, WorldError> {
        Ok(self.agents.list_all()?)
    }

    pub fn barrier(&self, id: &BarrierId) -> Result<Option<Barrier>, WorldError> {
        Ok(self.barriers.find_by_id(id)?)
    }

    pub fn barriers(&self) -> Result<Vec<Barrier>, WorldError> {
        Ok(self.barriers.list_all()?)
    }

    pub fn key_items(&self) -> Result<Vec<KeyItem>, WorldError> {
        Ok(self.items.list_all()?)
    }

    /// Continuous closeness of a pair so far
    pub fn dwell_ms(&self, a: &AgentId, b: &AgentId) -> u64 {
        self.detector.dwell_ms(a, b)
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    // ========== Setup ==========

    /// Register an agent, capped to the world's inventory capacity
    ///
    /// An agent arriving with no keys gets one random starting key.
    pub fn spawn_agent(&mut self, agent: Agent) -> Result<Agent, WorldError> {
        let mut agent = agent.with_capacity(self.settings.inventory_capacity);
        if agent.inventory().is_empty() {
            let key = KeyType::random(&mut self.rng);
            agent.inventory_mut().add(key);
        }
        self.agents.save(&agent)?;
        info!(agent = %agent.id(), keys = ?agent.keys(), "Agent spawned");
        Ok(agent)
    }

    pub fn add_barrier(&mut self, barrier: Barrier) -> Result<(), WorldError> {
        debug!(
            barrier = %barrier.id(),
            arity = barrier.arity().display_name(),
            requirements = ?barrier.requirements(),
            "Barrier placed"
        );
        self.barriers.save(&barrier)?;
        Ok(())
    }

    pub fn add_key_item(&mut self, item: KeyItem) -> Result<(), WorldError> {
        debug!(item = %item.id(), key = %item.key_type(), "Key placed");
        self.items.save(&item)?;
        Ok(())
    }

    /// Despawn an agent (disconnect)
    ///
    /// A duel involving the agent is aborted and the other participant
    /// released.
    pub fn remove_agent(&mut self, id: &AgentId) -> Result<Vec<GameEvent>, WorldError> {
        let mut events = Vec::new();
        if self
            .coordinator
            .abort_for(&mut self.agents, id, "participant left the game", &mut events)?
        {
            warn!(agent = %id, "Duel aborted, participant left");
        }

        if self.agents.unregister(id)? {
            info!(agent = %id, "Agent removed");
        }
        self.detector.forget(id);
        Ok(events)
    }

    // ========== Inputs ==========

    /// Position reported by the presentation layer
    ///
    /// Returns false (and changes nothing) for unknown, frozen or
    /// eliminated agents.
    pub fn update_position(
        &mut self,
        id: &AgentId,
        position: Position,
    ) -> Result<bool, WorldError> {
        let Some(mut agent) = self.agents.find_by_id(id)? else {
            return Ok(false);
        };
        if !agent.move_to(position) {
            return Ok(false);
        }
        self.agents.save(&agent)?;
        Ok(true)
    }

    /// An agent touched a barrier
    ///
    /// Unknown ids, frozen agents and unlocked barriers produce no events.
    pub fn barrier_overlap(
        &mut self,
        agent_id: &AgentId,
        barrier_id: &BarrierId,
    ) -> Result<Vec<GameEvent>, WorldError> {
        let mut events = Vec::new();

        let (Some(mut agent), Some(mut barrier)) = (
            self.agents.find_by_id(agent_id)?,
            self.barriers.find_by_id(barrier_id)?,
        ) else {
            debug!(agent = %agent_id, barrier = %barrier_id, "Overlap with unknown entity");
            return Ok(events);
        };
        if !agent.is_alive() || agent.is_frozen() {
            return Ok(events);
        }

        match self.access.open(&mut agent, &mut barrier, &mut self.rng) {
            AccessOutcome::Opened {
                consumed,
                new_requirements,
            } => {
                self.agents.save(&agent)?;
                self.barriers.save(&barrier)?;
                info!(
                    agent = %agent_id,
                    barrier = %barrier_id,
                    consumed = ?consumed,
                    next = ?new_requirements,
                    "Barrier opened"
                );
                events.push(GameEvent::BarrierUnlocked {
                    barrier_id: barrier_id.clone(),
                    agent_id: agent_id.clone(),
                    consumed,
                });
                events.push(GameEvent::BarrierRelocked {
                    barrier_id: barrier_id.clone(),
                    requirements: new_requirements,
                });
            }
            AccessOutcome::Denied => {
                debug!(agent = %agent_id, barrier = %barrier_id, "Access denied");
                events.push(GameEvent::AccessDenied {
                    agent_id: agent_id.clone(),
                    barrier_id: barrier_id.clone(),
                });
            }
            AccessOutcome::NotLocked => {}
        }

        Ok(events)
    }

    /// A human participant picked a move
    ///
    /// Returns no events when the move was ignored.
    pub fn submit_choice(
        &mut self,
        agent_id: &AgentId,
        choice: KeyType,
    ) -> Result<Vec<GameEvent>, WorldError> {
        let mut events = Vec::new();
        let accepted = self.coordinator.submit_choice(
            &mut self.agents,
            agent_id,
            choice,
            self.now_ms,
            &mut self.rng,
            &mut events,
        )?;
        if !accepted {
            debug!(agent = %agent_id, "Move ignored");
        }
        self.settle(&events);
        Ok(events)
    }

    // ========== Loop ==========

    /// Advance the world by `delta_ms`
    pub fn tick(&mut self, delta_ms: u64) -> Result<Vec<GameEvent>, WorldError> {
        self.now_ms += delta_ms;
        let mut events = Vec::new();

        self.coordinator
            .run_due(&mut self.agents, self.now_ms, &mut self.rng, &mut events)?;

        if !self.coordinator.is_active() {
            self.detect_proximity(delta_ms, &mut events)?;
        }

        self.collect_keys(&mut events)?;
        self.mirror_positions()?;
        self.settle(&events);
        Ok(events)
    }

    fn detect_proximity(
        &mut self,
        delta_ms: u64,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), WorldError> {
        let agents = self.agents.list_all()?;
        let report = self.detector.observe(&agents, delta_ms);

        for (pair, near) in report.warnings {
            events.push(GameEvent::ProximityWarning {
                first: pair.first().clone(),
                second: pair.second().clone(),
                near,
            });
        }

        // All triggered pairs were reset; only the first gets its duel.
        if let Some(pair) = report.triggered.first() {
            if report.triggered.len() > 1 {
                debug!(dropped = report.triggered.len() - 1, "Simultaneous triggers dropped");
            }
            let started = self.coordinator.try_start_combat(
                &mut self.agents,
                pair.first(),
                pair.second(),
                self.now_ms,
                &mut self.rng,
                events,
            )?;
            if started {
                info!(first = %pair.first(), second = %pair.second(), "Duel started");
            }
        }
        Ok(())
    }

    fn collect_keys(&mut self, events: &mut Vec<GameEvent>) -> Result<(), WorldError> {
        let items = self.items.list_all()?;
        if items.is_empty() {
            return Ok(());
        }

        let radius = self.settings.pickup_radius;
        let mut agents = self.agents.list_all()?;

        for item in items {
            let Some(agent) = agents.iter_mut().find(|a| {
                a.is_alive()
                    && !a.is_frozen()
                    && !a.inventory().is_full()
                    && item.in_reach(&a.position(), radius)
            }) else {
                continue;
            };

            agent.inventory_mut().add(item.key_type());
            self.agents.save(agent)?;
            self.items.remove(item.id())?;
            info!(agent = %agent.id(), key = %item.key_type(), "Key collected");

            events.push(GameEvent::KeyCollected {
                agent_id: agent.id().clone(),
                item_id: item.id().clone(),
                key_type: item.key_type(),
            });
        }
        Ok(())
    }

    fn mirror_positions(&mut self) -> Result<(), WorldError> {
        for agent in self.agents.list_all()? {
            let update = PlayerUpdate {
                agent_id: agent.id().clone(),
                position: agent.position(),
                keys: agent.keys().to_vec(),
            };
            self.network.send_player_update(&update);
        }
        Ok(())
    }

    /// Follow-up bookkeeping for events the coordinator produced
    fn settle(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::CombatResolved {
                    session_id,
                    winner,
                    loser,
                    result,
                } => {
                    info!(session = %session_id, result = %result, "Duel resolved");
                    let report = BattleReport {
                        session_id: session_id.value(),
                        winner: winner.clone(),
                        loser: loser.clone(),
                        result: result.label(),
                    };
                    self.network.broadcast_battle_result(&report);
                }
                GameEvent::AgentEliminated { agent_id } => {
                    info!(agent = %agent_id, "Agent eliminated");
                    self.detector.forget(agent_id);
                }
                _ => {}
            }
        }
    }
}
