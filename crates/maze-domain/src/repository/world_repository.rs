//! Barrier & Key Item Repositories - The static furniture of the maze

use crate::model::barrier::{Barrier, BarrierId};
use crate::model::key_item::{KeyItem, KeyItemId};
use crate::repository::agent_repository::RepositoryError;

/// Barrier Repository Trait
pub trait BarrierRepository {
    /// Create or update a barrier
    fn save(&mut self, barrier: &Barrier) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: &BarrierId) -> Result<Option<Barrier>, RepositoryError>;

    /// Remove a barrier from the world. Returns whether it existed.
    fn remove(&mut self, id: &BarrierId) -> Result<bool, RepositoryError>;

    /// All barriers, ordered by ID
    fn list_all(&self) -> Result<Vec<Barrier>, RepositoryError>;
}

/// Key Item Repository Trait
pub trait KeyItemRepository {
    fn save(&mut self, item: &KeyItem) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: &KeyItemId) -> Result<Option<KeyItem>, RepositoryError>;

    /// Remove an item (it was picked up). Returns whether it existed.
    fn remove(&mut self, id: &KeyItemId) -> Result<bool, RepositoryError>;

    /// All items still lying in the world, ordered by ID
    fn list_all(&self) -> Result<Vec<KeyItem>, RepositoryError>;
}
