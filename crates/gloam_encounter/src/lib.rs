//! Gloam Encounter - Combat Encounter Simulation
//!
//! The top-level crate wiring the encounter subsystems together: entity
//! storage and movement, per-entity AI controllers, damage resolution,
//! wave spawning and room gating, all stepped on fixed simulation and
//! physics ticks.
//!
//! # Features
//!
//! - Flat entity world with spawn templates and attachment hierarchy
//! - Fixed-order simulation tick: AI, damage, spawning, lifecycle events
//! - Physics tick integrating AI movement intent
//! - Wave-gated room locking driven by spawner lifecycle events
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use gloam_encounter::prelude::*;
//! use gloam_waves::WaveDefinition;
//!
//! let waves = vec![WaveDefinition {
//!     template: "grunt".to_string(),
//!     count: 3,
//!     ..WaveDefinition::default()
//! }];
//! let mut encounter = Encounter::new(waves, Vec3::ZERO);
//! encounter.world.register_template(
//!     "grunt",
//!     SpawnTemplate {
//!         max_health: 30.0,
//!         shield: 0.0,
//!         resistance: 0.0,
//!         tag: Some("enemy".to_string()),
//!         base_speed: 3.0,
//!         ai: None,
//!     },
//! );
//! encounter.begin_encounter();
//! encounter.advance(1.0 / 60.0);
//! ```

pub mod sim;
pub mod world;

pub mod prelude {
    pub use crate::sim::{DialoguePanel, Encounter};
    pub use crate::world::{
        AiSpawn, Entity, EntityAnimation, MovementState, SpawnTemplate, World,
    };
}

pub use prelude::*;
