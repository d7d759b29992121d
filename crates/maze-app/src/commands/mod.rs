//! CLI Commands

pub mod init;
pub mod simulate;

pub use init::InitCommand;
pub use simulate::SimulateCommand;
