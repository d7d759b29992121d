//! Error types for RPS Maze

use thiserror::Error;

/// General RPS Maze error type
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The world loop reported an infrastructure failure
    #[error("World error: {0}")]
    World(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
