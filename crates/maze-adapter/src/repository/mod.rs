//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from maze-domain.
//! Nothing outlives the process; a new game starts from scratch.

pub mod in_memory;
