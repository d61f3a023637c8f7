//! Gloam AI - Encounter State Machines and Behaviors
//!
//! This crate provides the per-entity AI controller and its pluggable
//! behavior strategies.
//!
//! # Features
//!
//! - Finite encounter state machine mediated by `AiController`
//! - Hostile patrol/chase/attack behavior
//! - Passive follower behavior
//! - Dialogue-trigger behavior
//!
//! Behaviors *request* state transitions; only the controller commits them.
//!
//! # Example
//!
//! ```ignore
//! use gloam_ai::prelude::*;
//!
//! let profile = AiProfile::default();
//! let mut controller = AiController::new(BehaviorKind::Hostile, profile);
//! controller.tick(&mut ctx); // per simulation tick
//! ```

pub mod behavior;
pub mod controller;
pub mod dialogue;
pub mod follow;
pub mod hostile;

pub mod prelude {
    pub use crate::behavior::{
        AiBehavior, AnimationSink, BehaviorCtx, Locomotion, PendingHit, TargetView,
    };
    pub use crate::controller::{AiController, AiProfile, AiState, BehaviorKind};
    pub use crate::dialogue::{DialogueConfig, DialogueSurface, DialogueTriggerBehavior};
    pub use crate::follow::{FollowConfig, PassiveFollowBehavior};
    pub use crate::hostile::{HostileBehavior, HostileConfig};
}

pub use prelude::*;
