//! Configuration types for RPS Maze

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::MazeError;

/// File name written by `rps-maze init`
pub const DEFAULT_CONFIG_FILE: &str = "rps-maze.json";

/// Game configuration (rps-maze.json / rps-maze.yaml)
///
/// Every field is optional in the file; missing fields take the
/// defaults of the original game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Keys an agent can carry
    pub inventory_capacity: usize,

    /// Maze tile size in pixels
    pub tile_size: u32,

    /// A key item is collected when an agent is closer than this
    pub pickup_radius: f32,

    /// A barrier overlap is reported when an agent is closer than this
    pub overlap_radius: f32,

    pub proximity: ProximityConfig,

    pub combat: CombatConfig,

    /// Fixed simulation step
    pub tick_ms: u64,

    /// Seed for reproducible runs; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,

    pub network: NetworkConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: 3,
            tile_size: 32,
            pickup_radius: 32.0,
            overlap_radius: 32.0,
            proximity: ProximityConfig::default(),
            combat: CombatConfig::default(),
            tick_ms: 16,
            rng_seed: None,
            network: NetworkConfig::default(),
        }
    }
}

/// Duel trigger thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProximityConfig {
    /// Trigger distance in pixels
    pub distance: f32,
    /// Continuous closeness needed to start a duel
    pub dwell_ms: u64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            distance: 64.0,
            dwell_ms: 3000,
        }
    }
}

/// Duel timing and house rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatConfig {
    pub auto_choice_min_ms: u64,
    pub auto_choice_max_ms: u64,
    pub cooldown_ms: u64,
    pub swap_back: bool,
    pub swap_back_delay_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            auto_choice_min_ms: 1000,
            auto_choice_max_ms: 3000,
            cooldown_ms: 3000,
            swap_back: true,
            swap_back_delay_ms: 1000,
        }
    }
}

/// Stub multiplayer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl GameConfig {
    /// Load configuration from a JSON or YAML file (by extension)
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.inventory_capacity == 0 {
            return Err(MazeError::Config(
                "inventoryCapacity must be at least 1".to_string(),
            ));
        }
        if self.combat.auto_choice_min_ms > self.combat.auto_choice_max_ms {
            return Err(MazeError::Config(format!(
                "combat.autoChoiceMinMs ({}) is greater than combat.autoChoiceMaxMs ({})",
                self.combat.auto_choice_min_ms, self.combat.auto_choice_max_ms
            )));
        }
        if self.tick_ms == 0 {
            return Err(MazeError::Config("tickMs must be at least 1".to_string()));
        }
        if self.proximity.distance < 0.0 || self.pickup_radius < 0.0 || self.overlap_radius < 0.0 {
            return Err(MazeError::Config("distances must not be negative".to_string()));
        }
        Ok(())
    }

    /// Pretty JSON, as written by `init`
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write a default config into `dir`, returning its path
    ///
    /// An existing file is left untouched and reported as an error.
    pub fn write_default(dir: &Path) -> crate::Result<PathBuf> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Err(MazeError::Config(format!(
                "{} already exists",
                path.display()
            )));
        }
        std::fs::create_dir_all(dir)?;
        std::fs::write(&path, Self::default().to_json_pretty()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "inventoryCapacity": 1,
            "proximity": { "dwellMs": 500 },
            "combat": { "swapBack": false },
            "rngSeed": 7
        }"#;

        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.inventory_capacity, 1);
        assert_eq!(config.proximity.dwell_ms, 500);
        assert_eq!(config.proximity.distance, 64.0);
        assert!(!config.combat.swap_back);
        assert_eq!(config.combat.cooldown_ms, 3000);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.network.server_url, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.yaml");
        std::fs::write(
            &path,
            "tickMs: 33\nnetwork:\n  serverUrl: ws://localhost:2567\n  roomId: lobby\n",
        )
        .unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.network.room_id.as_deref(), Some("lobby"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "combat": { "autoChoiceMinMs": 5000, "autoChoiceMaxMs": 1000 } }"#,
        )
        .unwrap();

        assert!(matches!(
            GameConfig::from_file(&path),
            Err(MazeError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(GameConfig::from_file(&path), Err(MazeError::Json(_))));
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();

        let path = GameConfig::write_default(dir.path()).unwrap();
        assert!(path.ends_with(DEFAULT_CONFIG_FILE));
        assert_eq!(GameConfig::from_file(&path).unwrap(), GameConfig::default());

        // Second init does not overwrite
        assert!(GameConfig::write_default(dir.path()).is_err());
    }
}
