//! Behavior capability and per-tick context

use crate::controller::AiState;
use crate::dialogue::DialogueSurface;
use glam::{Vec2, Vec3};
use gloam_combat::DamageEvent;
use gloam_core::EntityId;

/// Movement-intent sink driven by behaviors each simulation tick.
///
/// The executor integrates the intent on the physics tick and reports no
/// state back to the AI.
pub trait Locomotion {
    /// 2D ground-plane movement intent; the executor clamps it to unit length
    fn set_move_input(&mut self, input: Vec2);
    /// Fast-moving flag forwarded to locomotion/animation
    fn set_fast_moving(&mut self, fast: bool);
    /// Speed multiplier retuned on state changes
    fn set_speed_modifier(&mut self, modifier: f32);

    /// Stop in place
    fn halt(&mut self) {
        self.set_move_input(Vec2::ZERO);
        self.set_fast_moving(false);
    }
}

/// Fire-and-forget animation trigger surface
pub trait AnimationSink {
    /// Fire a named trigger (`Attack`, `Hit`, `Death`)
    fn trigger(&mut self, name: &str);
}

/// Read-only view of the tracked target, present only while it exists
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub entity: EntityId,
    pub position: Vec3,
}

/// A hit produced by a behavior this tick, resolved later through the
/// damage channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingHit {
    /// Entity the hit lands on
    pub target: EntityId,
    pub event: DamageEvent,
}

/// Per-tick context handed to the active behavior.
pub struct BehaviorCtx<'a> {
    /// The entity this behavior steers
    pub entity: EntityId,
    /// Its current world position
    pub position: Vec3,
    /// The designated target, when it still exists
    pub target: Option<TargetView>,
    /// Simulation tick step in seconds
    pub delta_time: f32,
    pub locomotion: &'a mut dyn Locomotion,
    pub animation: &'a mut dyn AnimationSink,
    /// Outbox for hits produced this tick
    pub damage_out: &'a mut Vec<PendingHit>,
}

impl BehaviorCtx<'_> {
    /// Ground-plane distance to the target, ignoring vertical offset.
    ///
    /// Elevation differences must never cause spurious detection loss.
    pub fn horizontal_target_distance(&self) -> Option<f32> {
        self.target
            .map(|t| horizontal_distance(self.position, t.position))
    }
}

/// Ground-plane distance between two points
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    Vec2::new(d.x, d.z).length()
}

/// Strategy consumed by the controller.
///
/// Behaviors never mutate the encounter state directly; they return the
/// state they want and the controller decides whether to commit it.
pub trait AiBehavior {
    /// First activation; returns the state the behavior wants to start in
    fn on_activate(&mut self, ctx: &mut BehaviorCtx<'_>) -> Option<AiState>;

    /// Torn down before another behavior kind takes over
    fn on_deactivate(&mut self, locomotion: &mut dyn Locomotion) {
        let _ = locomotion;
    }

    /// Simulation-tick update; may request one transition
    fn tick(&mut self, state: AiState, ctx: &mut BehaviorCtx<'_>) -> Option<AiState>;

    /// Physics-tick hook; locomotion integration happens in the executor
    fn fixed_tick(&mut self, state: AiState, ctx: &mut BehaviorCtx<'_>) {
        let _ = (state, ctx);
    }

    /// Called after the controller commits a transition, to retune locomotion
    fn on_state_changed(&mut self, old: AiState, new: AiState, locomotion: &mut dyn Locomotion);

    /// Contact notification from an external trigger volume
    fn on_contact(&mut self, tag: &str, surface: &mut dyn DialogueSurface) -> Option<AiState> {
        let _ = (tag, surface);
        None
    }

    /// Explicit dialogue end from the presentation surface
    fn on_dialogue_ended(&mut self, surface: &mut dyn DialogueSurface) -> Option<AiState> {
        let _ = surface;
        None
    }
}
