//! Passive follower behavior

use crate::behavior::{AiBehavior, BehaviorCtx, Locomotion};
use crate::controller::AiState;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for a passive follower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowConfig {
    /// Target within this ground-plane distance is picked up (inclusive)
    pub detection_radius: f32,
    /// Target beyond this ground-plane distance is dropped
    pub lose_sight_radius: f32,
    pub chase_speed_multiplier: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            detection_radius: 5.0,
            lose_sight_radius: 8.0,
            chase_speed_multiplier: 1.2,
        }
    }
}

/// Follows the target while in range, never attacks.
///
/// Only `Idle` and `Chase` are ever requested.
pub struct PassiveFollowBehavior {
    config: FollowConfig,
}

impl PassiveFollowBehavior {
    pub fn new(config: FollowConfig) -> Self {
        Self { config }
    }
}

impl AiBehavior for PassiveFollowBehavior {
    fn on_activate(&mut self, _ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        Some(AiState::Idle)
    }

    fn on_deactivate(&mut self, locomotion: &mut dyn Locomotion) {
        locomotion.halt();
        locomotion.set_speed_modifier(1.0);
    }

    fn tick(&mut self, state: AiState, ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        match state {
            AiState::Idle => {
                ctx.locomotion.halt();
                let dist = ctx.horizontal_target_distance()?;
                (dist <= self.config.detection_radius).then_some(AiState::Chase)
            }
            AiState::Chase => {
                let Some(target) = ctx.target else {
                    return Some(AiState::Idle);
                };
                let dist = ctx.horizontal_target_distance()?;
                if dist > self.config.lose_sight_radius {
                    return Some(AiState::Idle);
                }

                let mut to_target = target.position - ctx.position;
                to_target.y = 0.0;
                let dir = to_target.normalize_or_zero();
                ctx.locomotion.set_move_input(Vec2::new(dir.x, dir.z));
                ctx.locomotion.set_fast_moving(true);
                None
            }
            _ => None,
        }
    }

    fn on_state_changed(&mut self, _old: AiState, new: AiState, locomotion: &mut dyn Locomotion) {
        let modifier = if new == AiState::Chase {
            self.config.chase_speed_multiplier
        } else {
            1.0
        };
        locomotion.set_speed_modifier(modifier);
    }
}
