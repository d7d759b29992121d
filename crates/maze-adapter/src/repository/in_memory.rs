//! In-Memory Repository Implementations
//!
//! The game's registries (players, doors, keys) as shared maps.
//! Clones share the same storage, so the app can keep a handle for
//! rendering while the World owns another.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use maze_domain::model::agent::{Agent, AgentId};
use maze_domain::model::barrier::{Barrier, BarrierId};
use maze_domain::model::key_item::{KeyItem, KeyItemId};
use maze_domain::repository::agent_repository::{AgentRepository, RepositoryError};
use maze_domain::repository::world_repository::{BarrierRepository, KeyItemRepository};

fn read_lock_error() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire read lock".to_string(),
    }
}

fn write_lock_error() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire write lock".to_string(),
    }
}

/// In-memory Agent Repository
///
/// Thread-safe implementation using RwLock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentRepository {
    agents: Arc<RwLock<HashMap<String, Agent>>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self {
            agents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl AgentRepository for InMemoryAgentRepository {
    fn save(&mut self, agent: &Agent) -> Result<(), RepositoryError> {
        let mut agents = self.agents.write().map_err(|_| write_lock_error())?;
        agents.insert(agent.id().as_str().to_string(), agent.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.agents.read().map_err(|_| read_lock_error())?;
        Ok(agents.get(id.as_str()).cloned())
    }

    fn unregister(&mut self, id: &AgentId) -> Result<bool, RepositoryError> {
        let mut agents = self.agents.write().map_err(|_| write_lock_error())?;
        Ok(agents.remove(id.as_str()).is_some())
    }

    fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        let agents = self.agents.read().map_err(|_| read_lock_error())?;
        let mut all: Vec<Agent> = agents.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let agents = self.agents.read().map_err(|_| read_lock_error())?;
        Ok(agents.len())
    }
}

/// In-memory Barrier Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryBarrierRepository {
    barriers: Arc<RwLock<HashMap<String, Barrier>>>,
}

impl InMemoryBarrierRepository {
    pub fn new() -> Self {
        Self {
            barriers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl BarrierRepository for InMemoryBarrierRepository {
    fn save(&mut self, barrier: &Barrier) -> Result<(), RepositoryError> {
        let mut barriers = self.barriers.write().map_err(|_| write_lock_error())?;
        barriers.insert(barrier.id().as_str().to_string(), barrier.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &BarrierId) -> Result<Option<Barrier>, RepositoryError> {
        let barriers = self.barriers.read().map_err(|_| read_lock_error())?;
        Ok(barriers.get(id.as_str()).cloned())
    }

    fn remove(&mut self, id: &BarrierId) -> Result<bool, RepositoryError> {
        let mut barriers = self.barriers.write().map_err(|_| write_lock_error())?;
        Ok(barriers.remove(id.as_str()).is_some())
    }

    fn list_all(&self) -> Result<Vec<Barrier>, RepositoryError> {
        let barriers = self.barriers.read().map_err(|_| read_lock_error())?;
        let mut all: Vec<Barrier> = barriers.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}

/// In-memory Key Item Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyItemRepository {
    items: Arc<RwLock<HashMap<String, KeyItem>>>,
}

impl InMemoryKeyItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl KeyItemRepository for InMemoryKeyItemRepository {
    fn save(&mut self, item: &KeyItem) -> Result<(), RepositoryError> {
        let mut items = self.items.write().map_err(|_| write_lock_error())?;
        items.insert(item.id().as_str().to_string(), item.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &KeyItemId) -> Result<Option<KeyItem>, RepositoryError> {
        let items = self.items.read().map_err(|_| read_lock_error())?;
        Ok(items.get(id.as_str()).cloned())
    }

    fn remove(&mut self, id: &KeyItemId) -> Result<bool, RepositoryError> {
        let mut items = self.items.write().map_err(|_| write_lock_error())?;
        Ok(items.remove(id.as_str()).is_some())
    }

    fn list_all(&self) -> Result<Vec<KeyItem>, RepositoryError> {
        let items = self.items.read().map_err(|_| read_lock_error())?;
        let mut all: Vec<KeyItem> = items.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}
