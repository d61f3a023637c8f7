//! Hostile patrol/chase/attack behavior

use crate::behavior::{horizontal_distance, AiBehavior, BehaviorCtx, Locomotion, PendingHit};
use crate::controller::AiState;
use glam::{Vec2, Vec3};
use gloam_combat::{DamageEvent, DamageType};
use serde::{Deserialize, Serialize};

/// Static authored tuning for a hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileConfig {
    /// Ordered waypoint sequence; empty holds the entity in Idle
    pub patrol_points: Vec<Vec3>,
    pub patrol_speed_multiplier: f32,
    /// Radius around a waypoint that counts as reached
    pub waypoint_reach_distance: f32,
    /// Dwell time at each waypoint in seconds
    pub wait_at_point: f32,
    /// Wrap to the first waypoint after the last, instead of stopping there
    pub loop_patrol: bool,
    /// Target within this ground-plane distance is detected (inclusive)
    pub detection_radius: f32,
    /// Target beyond this ground-plane distance is lost while chasing
    pub lose_sight_radius: f32,
    pub chase_speed_multiplier: f32,
    /// Target within this distance can be attacked
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Animation trigger fired on each attack; empty disables the signal
    pub attack_trigger: String,
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            patrol_points: Vec::new(),
            patrol_speed_multiplier: 1.0,
            waypoint_reach_distance: 0.3,
            wait_at_point: 1.0,
            loop_patrol: true,
            detection_radius: 5.0,
            lose_sight_radius: 8.0,
            chase_speed_multiplier: 1.2,
            attack_range: 1.2,
            attack_damage: 10.0,
            attack_cooldown: 1.0,
            attack_trigger: "Attack".to_string(),
        }
    }
}

/// Patrol → chase → attack state machine layered on the controller's
/// shared states.
pub struct HostileBehavior {
    config: HostileConfig,
    patrol_index: usize,
    wait_timer: f32,
    attack_timer: f32,
}

impl HostileBehavior {
    /// Create the behavior from its authored config
    pub fn new(config: HostileConfig) -> Self {
        Self {
            config,
            patrol_index: 0,
            wait_timer: 0.0,
            attack_timer: 0.0,
        }
    }

    /// Detection while idling or patrolling; inclusive at the boundary
    fn try_detect(&self, ctx: &BehaviorCtx<'_>) -> Option<AiState> {
        let dist = ctx.horizontal_target_distance()?;
        (dist <= self.config.detection_radius).then_some(AiState::Chase)
    }

    fn patrol(&mut self, ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        if self.config.patrol_points.is_empty() {
            return Some(AiState::Idle);
        }

        let count = self.config.patrol_points.len();
        let waypoint = self.config.patrol_points[self.patrol_index.min(count - 1)];
        let mut to_waypoint = waypoint - ctx.position;
        to_waypoint.y = 0.0;

        if to_waypoint.length() <= self.config.waypoint_reach_distance {
            ctx.locomotion.set_move_input(Vec2::ZERO);
            self.wait_timer += ctx.delta_time;
            if self.wait_timer >= self.config.wait_at_point {
                self.wait_timer = 0.0;
                self.patrol_index += 1;
                if self.patrol_index >= count {
                    self.patrol_index = if self.config.loop_patrol { 0 } else { count - 1 };
                }
            }
            return None;
        }

        let dir = to_waypoint.normalize_or_zero();
        ctx.locomotion.set_move_input(Vec2::new(dir.x, dir.z));
        ctx.locomotion.set_fast_moving(false);
        None
    }

    fn chase(&mut self, ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        let Some(target) = ctx.target else {
            // Target destroyed: fall back to patrolling.
            return Some(AiState::Patrol);
        };

        let dist = horizontal_distance(ctx.position, target.position);
        if dist > self.config.lose_sight_radius {
            return Some(AiState::Patrol);
        }
        if dist <= self.config.attack_range {
            return Some(AiState::Attack);
        }

        let mut to_target = target.position - ctx.position;
        to_target.y = 0.0;
        let dir = to_target.normalize_or_zero();
        ctx.locomotion.set_move_input(Vec2::new(dir.x, dir.z));
        ctx.locomotion.set_fast_moving(true);
        None
    }

    fn attack(&mut self, ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        let Some(target) = ctx.target else {
            return Some(AiState::Patrol);
        };

        let dist = horizontal_distance(ctx.position, target.position);
        if dist > self.config.attack_range {
            return Some(AiState::Chase);
        }

        ctx.locomotion.halt();

        self.attack_timer -= ctx.delta_time;
        if self.attack_timer > 0.0 {
            return None;
        }
        self.attack_timer = self.config.attack_cooldown;

        if !self.config.attack_trigger.is_empty() {
            ctx.animation.trigger(&self.config.attack_trigger);
        }

        ctx.damage_out.push(PendingHit {
            target: target.entity,
            event: DamageEvent::new(self.config.attack_damage, DamageType::Physical)
                .with_attacker(ctx.entity),
        });

        None
    }
}

impl AiBehavior for HostileBehavior {
    fn on_activate(&mut self, _ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        Some(if self.config.patrol_points.is_empty() {
            AiState::Idle
        } else {
            AiState::Patrol
        })
    }

    fn on_deactivate(&mut self, locomotion: &mut dyn Locomotion) {
        locomotion.halt();
        locomotion.set_speed_modifier(1.0);
    }

    fn tick(&mut self, state: AiState, ctx: &mut BehaviorCtx<'_>) -> Option<AiState> {
        match state {
            AiState::Idle => {
                ctx.locomotion.halt();
                self.try_detect(ctx)
            }
            AiState::Patrol => {
                if let Some(next) = self.try_detect(ctx) {
                    return Some(next);
                }
                self.patrol(ctx)
            }
            AiState::Chase => self.chase(ctx),
            AiState::Attack => self.attack(ctx),
            AiState::Dialogue | AiState::Disabled => None,
        }
    }

    fn on_state_changed(&mut self, _old: AiState, new: AiState, locomotion: &mut dyn Locomotion) {
        match new {
            AiState::Patrol => locomotion.set_speed_modifier(self.config.patrol_speed_multiplier),
            AiState::Chase => locomotion.set_speed_modifier(self.config.chase_speed_multiplier),
            _ => locomotion.set_speed_modifier(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{AnimationSink, TargetView};
    use gloam_core::EntityId;

    #[derive(Default)]
    struct RecordingLocomotion {
        input: Vec2,
        fast: bool,
        modifier: f32,
    }

    impl Locomotion for RecordingLocomotion {
        fn set_move_input(&mut self, input: Vec2) {
            self.input = input;
        }
        fn set_fast_moving(&mut self, fast: bool) {
            self.fast = fast;
        }
        fn set_speed_modifier(&mut self, modifier: f32) {
            self.modifier = modifier;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        triggers: Vec<String>,
    }

    impl AnimationSink for RecordingSink {
        fn trigger(&mut self, name: &str) {
            self.triggers.push(name.to_string());
        }
    }

    struct Rig {
        loco: RecordingLocomotion,
        anim: RecordingSink,
        hits: Vec<PendingHit>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                loco: RecordingLocomotion::default(),
                anim: RecordingSink::default(),
                hits: Vec::new(),
            }
        }

        fn ctx(&mut self, position: Vec3, target: Option<TargetView>, dt: f32) -> BehaviorCtx<'_> {
            BehaviorCtx {
                entity: EntityId::from_raw(1),
                position,
                target,
                delta_time: dt,
                locomotion: &mut self.loco,
                animation: &mut self.anim,
                damage_out: &mut self.hits,
            }
        }
    }

    fn target_at(x: f32, y: f32, z: f32) -> Option<TargetView> {
        Some(TargetView {
            entity: EntityId::from_raw(99),
            position: Vec3::new(x, y, z),
        })
    }

    #[test]
    fn test_activation_state_depends_on_waypoints() {
        let mut rig = Rig::new();

        let mut without = HostileBehavior::new(HostileConfig::default());
        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.1);
        assert_eq!(without.on_activate(&mut ctx), Some(AiState::Idle));

        let mut with = HostileBehavior::new(HostileConfig {
            patrol_points: vec![Vec3::new(5.0, 0.0, 0.0)],
            ..HostileConfig::default()
        });
        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.1);
        assert_eq!(with.on_activate(&mut ctx), Some(AiState::Patrol));
    }

    #[test]
    fn test_detection_inclusive_at_boundary() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        // Exactly at detection_radius (5.0), elevated by 3 on Y: the
        // ground-plane check must still detect.
        let mut ctx = rig.ctx(Vec3::ZERO, target_at(5.0, 3.0, 0.0), 0.1);
        assert_eq!(behavior.tick(AiState::Idle, &mut ctx), Some(AiState::Chase));

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(5.01, 0.0, 0.0), 0.1);
        assert_eq!(behavior.tick(AiState::Idle, &mut ctx), None);
    }

    #[test]
    fn test_chase_reverts_to_patrol_beyond_lose_sight() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(8.5, 0.0, 0.0), 0.1);
        assert_eq!(
            behavior.tick(AiState::Chase, &mut ctx),
            Some(AiState::Patrol)
        );
    }

    #[test]
    fn test_chase_enters_attack_range() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(1.0, 0.0, 0.0), 0.1);
        assert_eq!(
            behavior.tick(AiState::Chase, &mut ctx),
            Some(AiState::Attack)
        );
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(4.0, 0.0, 0.0), 0.1);
        assert_eq!(behavior.tick(AiState::Chase, &mut ctx), None);
        assert!(rig.loco.input.x > 0.9);
        assert!(rig.loco.fast);
    }

    #[test]
    fn test_lost_target_reverts_to_patrol() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.1);
        assert_eq!(
            behavior.tick(AiState::Chase, &mut ctx),
            Some(AiState::Patrol)
        );
    }

    #[test]
    fn test_attack_on_cooldown() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        // First attack fires immediately.
        let mut ctx = rig.ctx(Vec3::ZERO, target_at(1.0, 0.0, 0.0), 0.1);
        assert_eq!(behavior.tick(AiState::Attack, &mut ctx), None);
        assert_eq!(rig.hits.len(), 1);
        assert_eq!(rig.hits[0].event.amount, 10.0);
        assert_eq!(rig.anim.triggers, vec!["Attack".to_string()]);

        // Cooldown (1s) gates the next hit.
        for _ in 0..9 {
            let mut ctx = rig.ctx(Vec3::ZERO, target_at(1.0, 0.0, 0.0), 0.1);
            behavior.tick(AiState::Attack, &mut ctx);
        }
        assert_eq!(rig.hits.len(), 1);

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(1.0, 0.0, 0.0), 0.1);
        behavior.tick(AiState::Attack, &mut ctx);
        assert_eq!(rig.hits.len(), 2);
    }

    #[test]
    fn test_attack_reverts_to_chase_out_of_range() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(2.0, 0.0, 0.0), 0.1);
        assert_eq!(
            behavior.tick(AiState::Attack, &mut ctx),
            Some(AiState::Chase)
        );
    }

    #[test]
    fn test_patrol_waypoint_advance_and_loop() {
        let config = HostileConfig {
            patrol_points: vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
            wait_at_point: 0.5,
            ..HostileConfig::default()
        };
        let mut behavior = HostileBehavior::new(config);
        let mut rig = Rig::new();

        // Standing on waypoint 0: dwell, then advance.
        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.3);
        behavior.tick(AiState::Patrol, &mut ctx);
        assert_eq!(behavior.patrol_index, 0);

        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.3);
        behavior.tick(AiState::Patrol, &mut ctx);
        assert_eq!(behavior.patrol_index, 1);

        // Standing on waypoint 1: dwell expires and wraps to 0.
        let mut ctx = rig.ctx(Vec3::new(10.0, 0.0, 0.0), None, 0.6);
        behavior.tick(AiState::Patrol, &mut ctx);
        assert_eq!(behavior.patrol_index, 0);
    }

    #[test]
    fn test_patrol_without_loop_clamps_to_last() {
        let config = HostileConfig {
            patrol_points: vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
            wait_at_point: 0.0,
            loop_patrol: false,
            ..HostileConfig::default()
        };
        let mut behavior = HostileBehavior::new(config);
        behavior.patrol_index = 1;
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::new(10.0, 0.0, 0.0), None, 0.1);
        behavior.tick(AiState::Patrol, &mut ctx);
        assert_eq!(behavior.patrol_index, 1);
    }

    #[test]
    fn test_no_waypoints_requests_idle() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, None, 0.1);
        assert_eq!(
            behavior.tick(AiState::Patrol, &mut ctx),
            Some(AiState::Idle)
        );
    }

    #[test]
    fn test_detection_wins_over_patrol_fallback() {
        // No waypoints but a target in range: detection takes priority.
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut rig = Rig::new();

        let mut ctx = rig.ctx(Vec3::ZERO, target_at(2.0, 0.0, 0.0), 0.1);
        assert_eq!(
            behavior.tick(AiState::Patrol, &mut ctx),
            Some(AiState::Chase)
        );
    }

    #[test]
    fn test_speed_modifier_per_state() {
        let mut behavior = HostileBehavior::new(HostileConfig::default());
        let mut loco = RecordingLocomotion::default();

        behavior.on_state_changed(AiState::Idle, AiState::Chase, &mut loco);
        assert_eq!(loco.modifier, 1.2);

        behavior.on_state_changed(AiState::Chase, AiState::Patrol, &mut loco);
        assert_eq!(loco.modifier, 1.0);

        behavior.on_state_changed(AiState::Patrol, AiState::Attack, &mut loco);
        assert_eq!(loco.modifier, 1.0);
    }
}
