//! Use case errors
//!
//! Denied doors, ignored moves and rejected duels are not errors; they
//! come back as `bool` or as events. Only infrastructure failures end
//! up here.

use maze_domain::repository::agent_repository::RepositoryError;
use maze_domain::service::combat::CombatError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A repository could not be read or written
    Repository(RepositoryError),
    /// The duel state machine rejected a transition it should never see
    Combat(CombatError),
}

impl From<RepositoryError> for WorldError {
    fn from(err: RepositoryError) -> Self {
        WorldError::Repository(err)
    }
}

impl From<CombatError> for WorldError {
    fn from(err: CombatError) -> Self {
        match err {
            CombatError::Repository(err) => WorldError::Repository(err),
            other => WorldError::Combat(other),
        }
    }
}

impl core::fmt::Display for WorldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WorldError::Repository(err) => write!(f, "Repository error: {}", err),
            WorldError::Combat(err) => write!(f, "Combat error: {}", err),
        }
    }
}

impl std::error::Error for WorldError {}
