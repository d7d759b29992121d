//! Ports - What the rules need from the outside world
//!
//! Repository ports live in `repository/`. The ports here cover
//! everything else the domain cannot do by itself: rolling dice and
//! talking to other game instances.

pub mod network;
pub mod random;
