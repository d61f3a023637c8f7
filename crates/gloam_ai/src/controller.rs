//! Encounter state controller

use crate::behavior::{AiBehavior, BehaviorCtx, Locomotion};
use crate::dialogue::{DialogueConfig, DialogueSurface, DialogueTriggerBehavior};
use crate::follow::{FollowConfig, PassiveFollowBehavior};
use crate::hostile::{HostileBehavior, HostileConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shared encounter state mediated by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Patrol,
    Chase,
    Attack,
    Dialogue,
    Disabled,
}

/// The variant of AI strategy bound to a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BehaviorKind {
    #[default]
    None,
    Hostile,
    PassiveFollow,
    DialogueTrigger,
}

/// Static authored tuning for each behavior kind, loaded at entity creation
/// and immutable for the entity's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiProfile {
    pub hostile: HostileConfig,
    pub follow: FollowConfig,
    pub dialogue: DialogueConfig,
}

/// Thin mediator owning the encounter state for one entity.
///
/// The controller stores the current state, dispatches per-tick updates to
/// the active behavior, and commits the transitions behaviors request.
/// Behaviors are built lazily on first activation and cached per kind;
/// switching kinds tears the old behavior down before the new one runs.
pub struct AiController {
    kind: BehaviorKind,
    state: AiState,
    profile: AiProfile,
    behaviors: HashMap<BehaviorKind, Box<dyn AiBehavior>>,
    pending_activation: bool,
}

impl AiController {
    /// Create a controller for the given behavior kind
    pub fn new(kind: BehaviorKind, profile: AiProfile) -> Self {
        Self {
            kind,
            state: AiState::Idle,
            profile,
            behaviors: HashMap::new(),
            pending_activation: kind != BehaviorKind::None,
        }
    }

    /// Current encounter state
    pub fn state(&self) -> AiState {
        self.state
    }

    /// The bound behavior kind
    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    /// Switch the behavior kind, tearing down the previous behavior first.
    ///
    /// Switching to the kind already bound is a no-op.
    pub fn set_kind(&mut self, kind: BehaviorKind, locomotion: &mut dyn Locomotion) {
        if kind == self.kind {
            return;
        }

        if let Some(previous) = self.behaviors.get_mut(&self.kind) {
            previous.on_deactivate(locomotion);
        }

        self.kind = kind;
        self.pending_activation = kind != BehaviorKind::None;
    }

    /// Commit a state transition.
    ///
    /// Re-entrant calls with the current state are ignored, so the active
    /// behavior's `on_state_changed` never fires for a non-transition.
    pub fn change_state(&mut self, new: AiState, locomotion: &mut dyn Locomotion) {
        if new == self.state {
            return;
        }

        let old = self.state;
        self.state = new;
        if let Some(behavior) = self.behaviors.get_mut(&self.kind) {
            behavior.on_state_changed(old, new, locomotion);
        }
    }

    /// Per simulation tick update of the active behavior
    pub fn tick(&mut self, ctx: &mut BehaviorCtx<'_>) {
        if self.kind == BehaviorKind::None {
            return;
        }

        self.ensure_behavior();
        let Some(behavior) = self.behaviors.get_mut(&self.kind) else {
            return;
        };

        if self.pending_activation {
            self.pending_activation = false;
            if let Some(next) = behavior.on_activate(ctx) {
                commit_state(&mut self.state, behavior.as_mut(), next, &mut *ctx.locomotion);
            }
        }

        if let Some(next) = behavior.tick(self.state, ctx) {
            commit_state(&mut self.state, behavior.as_mut(), next, &mut *ctx.locomotion);
        }
    }

    /// Per physics tick hook of the active behavior
    pub fn fixed_tick(&mut self, ctx: &mut BehaviorCtx<'_>) {
        if let Some(behavior) = self.behaviors.get_mut(&self.kind) {
            behavior.fixed_tick(self.state, ctx);
        }
    }

    /// Contact notification from a trigger-volume collaborator
    pub fn notify_contact(
        &mut self,
        tag: &str,
        locomotion: &mut dyn Locomotion,
        surface: &mut dyn DialogueSurface,
    ) {
        self.ensure_behavior();
        let Some(behavior) = self.behaviors.get_mut(&self.kind) else {
            return;
        };
        if let Some(next) = behavior.on_contact(tag, surface) {
            commit_state(&mut self.state, behavior.as_mut(), next, locomotion);
        }
    }

    /// Explicit dialogue end from the presentation surface
    pub fn end_dialogue(
        &mut self,
        locomotion: &mut dyn Locomotion,
        surface: &mut dyn DialogueSurface,
    ) {
        let Some(behavior) = self.behaviors.get_mut(&self.kind) else {
            return;
        };
        if let Some(next) = behavior.on_dialogue_ended(surface) {
            commit_state(&mut self.state, behavior.as_mut(), next, locomotion);
        }
    }

    fn ensure_behavior(&mut self) {
        if self.behaviors.contains_key(&self.kind) {
            return;
        }

        let behavior: Box<dyn AiBehavior> = match self.kind {
            BehaviorKind::None => return,
            BehaviorKind::Hostile => Box::new(HostileBehavior::new(self.profile.hostile.clone())),
            BehaviorKind::PassiveFollow => {
                Box::new(PassiveFollowBehavior::new(self.profile.follow.clone()))
            }
            BehaviorKind::DialogueTrigger => {
                Box::new(DialogueTriggerBehavior::new(self.profile.dialogue.clone()))
            }
        };

        self.behaviors.insert(self.kind, behavior);
    }
}

fn commit_state(
    state: &mut AiState,
    behavior: &mut dyn AiBehavior,
    new: AiState,
    locomotion: &mut dyn Locomotion,
) {
    if *state == new {
        return;
    }
    let old = *state;
    *state = new;
    behavior.on_state_changed(old, new, locomotion);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct NullLocomotion;

    impl Locomotion for NullLocomotion {
        fn set_move_input(&mut self, _input: Vec2) {}
        fn set_fast_moving(&mut self, _fast: bool) {}
        fn set_speed_modifier(&mut self, _modifier: f32) {}
    }

    #[derive(Default)]
    struct CountingLocomotion {
        modifier_calls: u32,
        modifier: f32,
    }

    impl Locomotion for CountingLocomotion {
        fn set_move_input(&mut self, _input: Vec2) {}
        fn set_fast_moving(&mut self, _fast: bool) {}
        fn set_speed_modifier(&mut self, modifier: f32) {
            self.modifier_calls += 1;
            self.modifier = modifier;
        }
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut controller = AiController::new(BehaviorKind::None, AiProfile::default());
        let mut loco = NullLocomotion;

        assert_eq!(controller.state(), AiState::Idle);
        controller.change_state(AiState::Idle, &mut loco);
        assert_eq!(controller.state(), AiState::Idle);

        controller.change_state(AiState::Chase, &mut loco);
        assert_eq!(controller.state(), AiState::Chase);
    }

    #[test]
    fn test_same_state_does_not_fire_callback() {
        // The hostile behavior retunes the speed modifier in
        // on_state_changed, so every callback is observable.
        let mut controller = AiController::new(BehaviorKind::Hostile, AiProfile::default());
        controller.ensure_behavior();
        let mut loco = CountingLocomotion::default();

        controller.change_state(AiState::Chase, &mut loco);
        assert_eq!(loco.modifier_calls, 1);
        assert_eq!(loco.modifier, 1.2);

        // Re-entrant call with the current state: no callback.
        controller.change_state(AiState::Chase, &mut loco);
        assert_eq!(loco.modifier_calls, 1);

        controller.change_state(AiState::Idle, &mut loco);
        assert_eq!(loco.modifier_calls, 2);
        assert_eq!(loco.modifier, 1.0);
    }

    #[test]
    fn test_none_kind_has_no_behavior() {
        let mut controller = AiController::new(BehaviorKind::None, AiProfile::default());
        controller.ensure_behavior();
        assert!(controller.behaviors.is_empty());
    }

    #[test]
    fn test_set_kind_same_is_noop() {
        let mut controller = AiController::new(BehaviorKind::Hostile, AiProfile::default());
        let mut loco = NullLocomotion;

        controller.set_kind(BehaviorKind::Hostile, &mut loco);
        assert!(controller.pending_activation);
        assert_eq!(controller.kind(), BehaviorKind::Hostile);
    }

    #[test]
    fn test_switching_kind_requests_reactivation() {
        let mut controller = AiController::new(BehaviorKind::Hostile, AiProfile::default());
        let mut loco = NullLocomotion;
        controller.ensure_behavior();
        controller.pending_activation = false;

        controller.set_kind(BehaviorKind::PassiveFollow, &mut loco);
        assert_eq!(controller.kind(), BehaviorKind::PassiveFollow);
        assert!(controller.pending_activation);

        // The hostile behavior stays cached for reuse.
        assert!(controller.behaviors.contains_key(&BehaviorKind::Hostile));
    }
}
