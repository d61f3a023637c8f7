//! Gloam Waves - Wave Spawning and Room Gating
//!
//! This crate drives wave-based encounters: sequenced enemy waves spawned
//! around a center point, completion tracked through death notifications,
//! and room blockers locked for the duration of the fight.
//!
//! # Features
//!
//! - Declarative wave definitions with JSON loading and validation
//! - Resumable spawn tasks with start delays and spawn intervals
//! - Death-registry wave completion tracking
//! - Room blocker lock/unlock tied to wave lifecycle events

pub mod config;
pub mod room;
pub mod spawner;

pub mod prelude {
    pub use crate::config::{load_waves, validate, WaveConfigError, WaveDefinition};
    pub use crate::room::{BlockerHost, RoomBlockerSet, WaveRoomController};
    pub use crate::spawner::{SpawnHost, WaveEvent, WavePhase, WaveSpawner};
}

pub use prelude::*;
