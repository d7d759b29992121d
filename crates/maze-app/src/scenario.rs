//! Headless demo maze
//!
//! Stands in for the presentation layer: it moves sprites, notices when
//! an agent touches a door, and feeds both into the World.
//!
//! ```text
//!  step(delta)
//!    ├── move walkers (wanderers retarget every 2 s, the player follows a route)
//!    ├── report new door contacts → World::barrier_overlap
//!    └── World::tick
//! ```

use std::collections::{BTreeMap, BTreeSet};

use maze_adapter::{
    InMemoryAgentRepository, InMemoryBarrierRepository, InMemoryKeyItemRepository, StdRandom,
    StubNetwork,
};
use maze_domain::event::GameEvent;
use maze_domain::model::agent::{Agent, AgentId, ControlMode, Position};
use maze_domain::model::barrier::{Arity, Barrier, BarrierId};
use maze_domain::model::key_item::{KeyItem, KeyItemId};
use maze_domain::model::token::KeyType;
use maze_domain::port::network::NetworkPort;
use maze_usecase::{World, WorldError};
use shared::{GameConfig, MazeError};

use crate::settings::world_settings;

pub type DemoWorld = World<
    InMemoryAgentRepository,
    InMemoryBarrierRepository,
    InMemoryKeyItemRepository,
    StdRandom,
    StubNetwork,
>;

/// The human player's id
pub const PLAYER_ID: &str = "player1";
/// Pixels per second
pub const PLAYER_SPEED: f32 = 150.0;
pub const MAZE_WIDTH_TILES: u32 = 25;
pub const MAZE_HEIGHT_TILES: u32 = 19;

const WANDER_INTERVAL_MS: u64 = 2000;
const WANDER_SPREAD: f32 = 100.0;
const ARRIVE_DISTANCE: f32 = 10.0;

fn world_err(err: WorldError) -> MazeError {
    MazeError::World(err.to_string())
}

/// Move from `from` toward `to` by at most `max_step`
///
/// Stops (returns `from`) once within arrival distance.
pub fn step_toward(from: Position, to: Position, max_step: f32) -> Position {
    let distance = from.distance_to(&to);
    if distance <= ARRIVE_DISTANCE {
        return from;
    }
    if distance <= max_step {
        return to;
    }
    let ratio = max_step / distance;
    Position::new(from.x + (to.x - from.x) * ratio, from.y + (to.y - from.y) * ratio)
}

#[derive(Debug, Clone)]
enum Plan {
    /// Pick a new nearby target every few seconds
    Wander { timer_ms: u64 },
    /// Walk a fixed loop of waypoints
    Route { waypoints: Vec<Position>, next: usize },
}

#[derive(Debug, Clone)]
struct Walker {
    speed: f32,
    target: Position,
    plan: Plan,
}

impl Walker {
    fn retarget(
        &mut self,
        delta_ms: u64,
        position: Position,
        motion: &mut StdRandom,
        bounds: (Position, Position),
    ) {
        match &mut self.plan {
            Plan::Wander { timer_ms } => {
                *timer_ms += delta_ms;
                if *timer_ms >= WANDER_INTERVAL_MS {
                    *timer_ms = 0;
                    let (min, max) = bounds;
                    self.target = Position::new(
                        (position.x + motion.offset(WANDER_SPREAD)).clamp(min.x, max.x),
                        (position.y + motion.offset(WANDER_SPREAD)).clamp(min.y, max.y),
                    );
                }
            }
            Plan::Route { waypoints, next } => {
                if waypoints.is_empty() {
                    return;
                }
                if position.distance_to(&self.target) <= ARRIVE_DISTANCE {
                    *next = (*next + 1) % waypoints.len();
                    self.target = waypoints[*next];
                }
            }
        }
    }
}

/// Scenario - A World plus the sprites that walk around in it
pub struct Scenario {
    world: DemoWorld,
    motion: StdRandom,
    walkers: BTreeMap<AgentId, Walker>,
    contacts: BTreeSet<(AgentId, BarrierId)>,
    overlap_radius: f32,
    bounds: (Position, Position),
}

impl Scenario {
    /// An empty maze sized by the config
    pub fn new(config: &GameConfig, seed: Option<u64>) -> Self {
        let mut network = StubNetwork::new();
        if let Some(url) = &config.network.server_url {
            if network.connect(url) {
                if let Some(room) = &config.network.room_id {
                    network.join_room(room, PLAYER_ID);
                }
            }
        }

        let world = World::new(
            world_settings(config),
            InMemoryAgentRepository::new(),
            InMemoryBarrierRepository::new(),
            InMemoryKeyItemRepository::new(),
            StdRandom::new(seed),
            network,
        );

        // Movement gets its own stream so steering never shifts the duel dice
        let motion = StdRandom::new(seed.map(|s| s ^ 0x9E37_79B9_7F4A_7C15));

        let tile = config.tile_size as f32;
        let bounds = (
            Position::new(tile, tile),
            Position::new(
                (MAZE_WIDTH_TILES as f32 - 1.0) * tile,
                (MAZE_HEIGHT_TILES as f32 - 1.0) * tile,
            ),
        );

        Self {
            world,
            motion,
            walkers: BTreeMap::new(),
            contacts: BTreeSet::new(),
            overlap_radius: config.overlap_radius,
            bounds,
        }
    }

    /// Opening layout: one player, two AIs, three doors, three keys
    pub fn demo(config: &GameConfig, seed: Option<u64>) -> shared::Result<Self> {
        let mut scenario = Self::new(config, seed);
        let route = vec![
            Position::new(300.0, 150.0),
            Position::new(400.0, 200.0),
            Position::new(450.0, 250.0),
            Position::new(500.0, 300.0),
            Position::new(550.0, 350.0),
            Position::new(600.0, 400.0),
            Position::new(64.0, 64.0),
        ];

        scenario.add_route(
            Agent::new(AgentId::new(PLAYER_ID), ControlMode::Human).at(Position::new(64.0, 64.0)),
            route,
        )?;
        scenario.add_wanderer(
            Agent::new(AgentId::new("ai1"), ControlMode::Automated).at(Position::new(128.0, 128.0)),
        )?;
        scenario.add_wanderer(
            Agent::new(AgentId::new("ai2"), ControlMode::Automated).at(Position::new(192.0, 192.0)),
        )?;

        let barriers = [
            ("door-single", Arity::Single, vec![KeyType::Rock], (400.0, 200.0)),
            ("door-double", Arity::Double, vec![KeyType::Rock, KeyType::Paper], (500.0, 300.0)),
            (
                "door-triple",
                Arity::Triple,
                vec![KeyType::Rock, KeyType::Paper, KeyType::Scissors],
                (600.0, 400.0),
            ),
        ];
        for (id, arity, requirements, (x, y)) in barriers {
            let barrier = Barrier::new(BarrierId::new(id), arity, requirements)
                .map_err(|e| MazeError::Config(e.to_string()))?
                .at(Position::new(x, y));
            scenario.world.add_barrier(barrier).map_err(world_err)?;
        }

        let keys = [
            ("key-rock", KeyType::Rock, (300.0, 150.0)),
            ("key-paper", KeyType::Paper, (450.0, 250.0)),
            ("key-scissors", KeyType::Scissors, (550.0, 350.0)),
        ];
        for (id, key_type, (x, y)) in keys {
            scenario
                .world
                .add_key_item(KeyItem::new(KeyItemId::new(id), key_type, Position::new(x, y)))
                .map_err(world_err)?;
        }

        Ok(scenario)
    }

    // ========== Getters ==========

    pub fn world(&self) -> &DemoWorld {
        &self.world
    }

    pub fn bounds(&self) -> (Position, Position) {
        self.bounds
    }

    /// Agents still in the game
    pub fn survivors(&self) -> shared::Result<Vec<Agent>> {
        self.world.agents().map_err(world_err)
    }

    // ========== Setup ==========

    /// Spawn an automated agent that roams around its start
    pub fn add_wanderer(&mut self, agent: Agent) -> shared::Result<Agent> {
        let agent = self.world.spawn_agent(agent).map_err(world_err)?;
        self.walkers.insert(
            agent.id().clone(),
            Walker {
                speed: PLAYER_SPEED * 0.5,
                target: agent.position(),
                plan: Plan::Wander { timer_ms: 0 },
            },
        );
        Ok(agent)
    }

    /// Spawn an agent that walks a fixed loop of waypoints
    pub fn add_route(&mut self, agent: Agent, waypoints: Vec<Position>) -> shared::Result<Agent> {
        let agent = self.world.spawn_agent(agent).map_err(world_err)?;
        let target = waypoints.first().copied().unwrap_or(agent.position());
        self.walkers.insert(
            agent.id().clone(),
            Walker {
                speed: PLAYER_SPEED,
                target,
                plan: Plan::Route { waypoints, next: 0 },
            },
        );
        Ok(agent)
    }

    pub fn add_barrier(&mut self, barrier: Barrier) -> shared::Result<()> {
        self.world.add_barrier(barrier).map_err(world_err)
    }

    pub fn add_key_item(&mut self, item: KeyItem) -> shared::Result<()> {
        self.world.add_key_item(item).map_err(world_err)
    }

    // ========== Loop ==========

    /// One frame: move, touch doors, tick the world
    pub fn step(&mut self, delta_ms: u64) -> shared::Result<Vec<GameEvent>> {
        self.move_walkers(delta_ms)?;
        let mut events = self.detect_overlaps()?;
        events.extend(self.world.tick(delta_ms).map_err(world_err)?);

        for event in &events {
            if let GameEvent::AgentEliminated { agent_id } = event {
                self.walkers.remove(agent_id);
            }
        }
        Ok(events)
    }

    pub fn submit_choice(
        &mut self,
        agent_id: &AgentId,
        choice: KeyType,
    ) -> shared::Result<Vec<GameEvent>> {
        let events = self.world.submit_choice(agent_id, choice).map_err(world_err)?;
        for event in &events {
            if let GameEvent::AgentEliminated { agent_id } = event {
                self.walkers.remove(agent_id);
            }
        }
        Ok(events)
    }

    pub fn remove_agent(&mut self, agent_id: &AgentId) -> shared::Result<Vec<GameEvent>> {
        self.walkers.remove(agent_id);
        self.contacts.retain(|(agent, _)| agent != agent_id);
        self.world.remove_agent(agent_id).map_err(world_err)
    }

    fn move_walkers(&mut self, delta_ms: u64) -> shared::Result<()> {
        let seconds = delta_ms as f32 / 1000.0;
        for agent in self.world.agents().map_err(world_err)? {
            if agent.is_frozen() || !agent.is_alive() {
                continue;
            }
            let Some(walker) = self.walkers.get_mut(agent.id()) else {
                continue;
            };

            walker.retarget(delta_ms, agent.position(), &mut self.motion, self.bounds);
            let next = step_toward(agent.position(), walker.target, walker.speed * seconds);
            if next != agent.position() {
                self.world
                    .update_position(agent.id(), next)
                    .map_err(world_err)?;
            }
        }
        Ok(())
    }

    /// Report each agent/door contact once, on entry
    fn detect_overlaps(&mut self) -> shared::Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        let barriers = self.world.barriers().map_err(world_err)?;
        let agents = self.world.agents().map_err(world_err)?;
        let mut touching = BTreeSet::new();

        for agent in agents.iter().filter(|a| a.is_alive() && !a.is_frozen()) {
            for barrier in barriers.iter().filter(|b| b.is_locked()) {
                if agent.position().distance_to(&barrier.position()) >= self.overlap_radius {
                    continue;
                }
                let contact = (agent.id().clone(), barrier.id().clone());
                if !self.contacts.contains(&contact) {
                    events.extend(
                        self.world
                            .barrier_overlap(agent.id(), barrier.id())
                            .map_err(world_err)?,
                    );
                }
                touching.insert(contact);
            }
        }

        self.contacts = touching;
        Ok(events)
    }
}
