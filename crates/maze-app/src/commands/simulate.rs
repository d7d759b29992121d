//! rps-maze simulate command
//!
//! Runs the demo maze headless: the player walks a fixed route, the two
//! AIs wander, and every event is logged and journaled.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use dialoguer::Select;
use maze_adapter::reporter::log_events;
use maze_adapter::{EventJournal, JournalStats, StdRandom};
use maze_domain::event::GameEvent;
use maze_domain::model::agent::AgentId;
use maze_domain::model::token::KeyType;
use shared::GameConfig;
use tracing::info;
use uuid::Uuid;

use crate::output::{print_info, print_summary, print_warning};
use crate::scenario::Scenario;

#[derive(Debug, Args)]
pub struct SimulateCommand {
    /// Config file (JSON or YAML); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Frames to run
    #[arg(short, long, default_value_t = 3750)]
    pub ticks: u64,

    /// Seed for a reproducible run (overrides rngSeed in the config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prompt for the player's duel moves instead of picking at random
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the event journal as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Pace frames at wall-clock speed
    #[arg(long)]
    pub realtime: bool,
}

/// What a finished run produced
#[derive(Debug)]
pub struct RunReport {
    pub run_id: String,
    pub world_time_ms: u64,
    pub frames: u64,
    pub survivors: usize,
    pub stats: JournalStats,
}

impl SimulateCommand {
    pub async fn run(&self) -> anyhow::Result<RunReport> {
        let config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        let seed = self.seed.or(config.rng_seed);
        let run_id = Uuid::new_v4().to_string();

        let mut scenario = Scenario::demo(&config, seed)?;
        let mut journal = EventJournal::default();
        let mut chooser = StdRandom::new(seed.map(|s| s.wrapping_add(1)));
        let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));

        info!(run = %run_id, seed = ?seed, ticks = self.ticks, "Simulation started");
        if !self.json {
            print_info(&format!("Run {} ({} frames of {} ms)", run_id, self.ticks, config.tick_ms));
        }

        let mut frames = 0;
        while frames < self.ticks {
            if self.realtime {
                ticker.tick().await;
            }
            frames += 1;

            let events = scenario.step(config.tick_ms)?;
            self.record(&scenario, &mut journal, &events);

            for agent_id in scenario.world().pending_choices() {
                let choice = self.choose(&agent_id, &mut chooser)?;
                let events = scenario.submit_choice(&agent_id, choice)?;
                self.record(&scenario, &mut journal, &events);
            }

            if scenario.survivors()?.len() <= 1 {
                info!(frame = frames, "One agent left standing");
                break;
            }
        }

        let survivors = scenario.survivors()?;
        let world_time_ms = scenario.world().now_ms();
        let stats = journal.get_stats();
        info!(run = %run_id, world_time_ms, survivors = survivors.len(), "Simulation finished");

        if self.json {
            let output = serde_json::json!({
                "runId": run_id,
                "worldTimeMs": world_time_ms,
                "stats": stats,
                "events": journal.export_json(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            if survivors.len() <= 1 {
                print_warning("Only one agent survived");
            }
            print_summary(&run_id, world_time_ms, &survivors, &stats);
        }

        Ok(RunReport {
            run_id,
            world_time_ms,
            frames,
            survivors: survivors.len(),
            stats,
        })
    }

    fn record(&self, scenario: &Scenario, journal: &mut EventJournal, events: &[GameEvent]) {
        let now = scenario.world().now_ms();
        log_events(now, events);
        journal.record_all(now, events);
    }

    fn choose(&self, agent_id: &AgentId, chooser: &mut StdRandom) -> anyhow::Result<KeyType> {
        if !self.interactive {
            return Ok(KeyType::random(chooser));
        }

        let names: Vec<&str> = KeyType::all().iter().map(|k| k.display_name()).collect();
        let index = Select::new()
            .with_prompt(format!("{} is in a duel, choose your move", agent_id))
            .items(&names)
            .default(0)
            .interact()?;
        Ok(KeyType::all()[index])
    }
}
