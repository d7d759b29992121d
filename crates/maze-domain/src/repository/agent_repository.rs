//! Agent Repository - Abstract registry of live players
//!
//! This trait defines what operations the domain needs.
//! Eliminated agents are unregistered; nothing is persisted across sessions.

use crate::model::agent::{Agent, AgentId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Entity not found
    NotFound { id: String },
    /// Failed to persist
    PersistenceError { message: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Not found: {}", id)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

/// Agent Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// Lookups hand out copies; write changes back with `save`.
pub trait AgentRepository {
    /// Register or overwrite an agent
    fn save(&mut self, agent: &Agent) -> Result<(), RepositoryError>;

    /// Find an agent by ID
    fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError>;

    /// Remove an agent. Returns whether it was registered.
    fn unregister(&mut self, id: &AgentId) -> Result<bool, RepositoryError>;

    /// All registered agents, ordered by ID
    fn list_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    /// Number of registered agents
    fn count(&self) -> Result<usize, RepositoryError>;

    /// Check whether an agent is registered and alive
    fn is_alive(&self, id: &AgentId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.map(|a| a.is_alive()).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::agent::ControlMode;
    use std::collections::BTreeMap;

    struct InMemoryAgentRepo {
        agents: BTreeMap<AgentId, Agent>,
    }

    impl AgentRepository for InMemoryAgentRepo {
        fn save(&mut self, agent: &Agent) -> Result<(), RepositoryError> {
            self.agents.insert(agent.id().clone(), agent.clone());
            Ok(())
        }

        fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
            Ok(self.agents.get(id).cloned())
        }

        fn unregister(&mut self, id: &AgentId) -> Result<bool, RepositoryError> {
            Ok(self.agents.remove(id).is_some())
        }

        fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
            Ok(self.agents.values().cloned().collect())
        }

        fn count(&self) -> Result<usize, RepositoryError> {
            Ok(self.agents.len())
        }
    }

    #[test]
    fn test_is_alive_default() {
        let mut repo = InMemoryAgentRepo {
            agents: BTreeMap::new(),
        };
        let mut ghost = Agent::new(AgentId::new("ghost"), ControlMode::Automated);
        ghost.eliminate();

        repo.save(&Agent::new(AgentId::new("p1"), ControlMode::Human))
            .unwrap();
        repo.save(&ghost).unwrap();

        assert!(repo.is_alive(&AgentId::new("p1")).unwrap());
        assert!(!repo.is_alive(&AgentId::new("ghost")).unwrap());
        assert!(!repo.is_alive(&AgentId::new("nobody")).unwrap());
    }
}
