//! rps-maze init command

use clap::Args;
use shared::GameConfig;
use std::path::PathBuf;

use crate::output::print_success;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the config into
    #[arg(default_value = ".")]
    pub directory: PathBuf,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<PathBuf> {
        println!("Initializing RPS Maze config in {:?}", self.directory);
        let path = GameConfig::write_default(&self.directory)?;
        print_success(&format!("Wrote {}", path.display()));
        Ok(path)
    }
}
