//! Domain Services - The rules that span several entities
//!
//! Doors are opened by the AccessResolver, duels are started by the
//! ProximityDetector and run by the SessionCoordinator.

pub mod access_resolver;
pub mod combat;
pub mod coordinator;
pub mod proximity;
pub mod scheduler;
