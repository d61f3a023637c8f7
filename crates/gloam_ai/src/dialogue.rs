//! Contact-triggered dialogue behavior

use crate::behavior::{AiBehavior, BehaviorCtx, Locomotion};
use crate::controller::AiState;
use log::debug;
use serde::{Deserialize, Serialize};

/// Presentation surface a dialogue behavior drives.
///
/// The simulation owns when dialogue opens and closes; how it is rendered
/// lives behind this trait.
pub trait DialogueSurface {
    /// Open the dialogue presentation
    fn activate(&mut self);
    /// Close the dialogue presentation
    fn deactivate(&mut self);
}

/// Tuning for a dialogue-trigger entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Only contacts carrying this tag start a dialogue
    pub target_tag: String,
    /// Whether contact starts the dialogue at all
    pub trigger_on_contact: bool,
    /// Close the presentation surface when the dialogue ends
    pub close_surface_on_end: bool,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            target_tag: "player".to_string(),
            trigger_on_contact: true,
            close_surface_on_end: true,
        }
    }
}

/// Stationary entity that opens a dialogue when the tagged target touches
/// its trigger volume. It never moves and never fights.
pub struct DialogueTriggerBehavior {
    config: DialogueConfig,
    engaged: bool,
}

impl DialogueTriggerBehavior {
    pub fn new(config: DialogueConfig) -> Self {
        Self {
            config,
            engaged: false,
        }
    }
}

impl AiBehavior for DialogueTriggerBehavior {
    fn on_activate(&mut self, _ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        Some(AiState::Idle)
    }

    fn tick(&mut self, _state: AiState, _ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        None
    }

    fn on_state_changed(&mut self, _old: AiState, _new: AiState, _locomotion: &mut dyn Locomotion) {
    }

    fn on_contact(&mut self, tag: &str, surface: &mut dyn DialogueSurface) -> Option<AiState> {
        if !self.config.trigger_on_contact || self.engaged || tag != self.config.target_tag {
            return None;
        }

        debug!("dialogue opened by contact tag '{}'", tag);
        self.engaged = true;
        surface.activate();
        Some(AiState::Dialogue)
    }

    fn on_dialogue_ended(&mut self, surface: &mut dyn DialogueSurface) -> Option<AiState> {
        if !self.engaged {
            return None;
        }

        self.engaged = false;
        if self.config.close_surface_on_end {
            surface.deactivate();
        }
        Some(AiState::Idle)
    }
}
