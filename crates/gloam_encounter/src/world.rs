//! Entity storage and movement execution

use glam::{Vec2, Vec3};
use gloam_ai::{AiProfile, AnimationSink, BehaviorKind, Locomotion};
use gloam_combat::{DamageHost, HealthModel};
use gloam_core::{EntityId, IdAllocator};
use gloam_waves::BlockerHost;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One simulation entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec3,
    /// Owner in the attachment hierarchy, for damage resolution
    pub parent: Option<EntityId>,
    pub tag: Option<String>,
    pub health: Option<HealthModel>,
    /// Disabled entities are inert (used for room blockers)
    pub enabled: bool,
}

/// Movement intent executor for one entity.
///
/// AI behaviors write intent through [`Locomotion`]; the physics tick
/// integrates it into the entity position.
#[derive(Debug, Clone)]
pub struct MovementState {
    pub base_speed: f32,
    pub move_input: Vec2,
    pub fast_moving: bool,
    pub speed_modifier: f32,
    pub enabled: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            move_input: Vec2::ZERO,
            fast_moving: false,
            speed_modifier: 1.0,
            enabled: true,
        }
    }
}

impl MovementState {
    pub fn new(base_speed: f32) -> Self {
        Self {
            base_speed,
            ..Self::default()
        }
    }

    /// Ground-plane velocity integrated on the physics tick
    pub fn integrate(&self, position: &mut Vec3, delta_time: f32) {
        if !self.enabled {
            return;
        }
        let velocity = self.move_input * self.base_speed * self.speed_modifier;
        position.x += velocity.x * delta_time;
        position.z += velocity.y * delta_time;
    }
}

impl Locomotion for MovementState {
    fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input.clamp_length_max(1.0);
    }

    fn set_fast_moving(&mut self, fast: bool) {
        self.fast_moving = fast;
    }

    fn set_speed_modifier(&mut self, modifier: f32) {
        self.speed_modifier = modifier;
    }
}

/// AI binding requested by a spawn template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSpawn {
    pub kind: BehaviorKind,
    #[serde(default)]
    pub profile: AiProfile,
}

/// Authored recipe for spawnable actors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTemplate {
    pub max_health: f32,
    #[serde(default)]
    pub shield: f32,
    #[serde(default)]
    pub resistance: f32,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_base_speed")]
    pub base_speed: f32,
    #[serde(default)]
    pub ai: Option<AiSpawn>,
}

fn default_base_speed() -> f32 {
    3.0
}

/// Appends animation triggers for one entity to the world's trigger log
pub struct EntityAnimation<'a> {
    pub entity: EntityId,
    pub log: &'a mut Vec<(EntityId, String)>,
}

impl AnimationSink for EntityAnimation<'_> {
    fn trigger(&mut self, name: &str) {
        self.log.push((self.entity, name.to_string()));
    }
}

/// Flat entity store the encounter simulation runs against.
#[derive(Default)]
pub struct World {
    pub entities: HashMap<EntityId, Entity>,
    pub movement: HashMap<EntityId, MovementState>,
    allocator: IdAllocator,
    templates: HashMap<String, SpawnTemplate>,
    /// Animation triggers fired this frame, drained by the presentation layer
    pub animation_log: Vec<(EntityId, String)>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an authored spawn recipe under a name
    pub fn register_template(&mut self, name: impl Into<String>, template: SpawnTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// Instantiate a template at a position.
    ///
    /// Returns the new entity's id together with the AI binding the
    /// template asks for, so the caller can attach a controller.
    pub fn spawn_actor(
        &mut self,
        template: &str,
        position: Vec3,
    ) -> Option<(EntityId, Option<AiSpawn>)> {
        let Some(recipe) = self.templates.get(template).cloned() else {
            warn!("unknown spawn template '{}'", template);
            return None;
        };

        let id = self.allocator.allocate();
        self.entities.insert(
            id,
            Entity {
                id,
                position,
                parent: None,
                tag: recipe.tag.clone(),
                health: Some(HealthModel::new(
                    recipe.max_health,
                    recipe.shield,
                    recipe.resistance,
                )),
                enabled: true,
            },
        );
        self.movement.insert(id, MovementState::new(recipe.base_speed));
        Some((id, recipe.ai))
    }

    /// Create a blocker entity, initially disabled (room open)
    pub fn spawn_blocker(&mut self, position: Vec3) -> EntityId {
        let id = self.allocator.allocate();
        self.entities.insert(
            id,
            Entity {
                id,
                position,
                parent: None,
                tag: None,
                health: None,
                enabled: false,
            },
        );
        id
    }

    /// Attach a child volume (hitbox, trigger) to an owner entity
    pub fn attach_volume(&mut self, owner: EntityId, tag: Option<String>) -> EntityId {
        let position = self.position(owner).unwrap_or(Vec3::ZERO);
        let id = self.allocator.allocate();
        self.entities.insert(
            id,
            Entity {
                id,
                position,
                parent: Some(owner),
                tag,
                health: None,
                enabled: true,
            },
        );
        id
    }

    /// Remove an entity and its movement state; children stay, with a
    /// dangling parent that simply fails resolution.
    pub fn despawn(&mut self, entity: EntityId) {
        self.entities.remove(&entity);
        self.movement.remove(&entity);
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.entities.get(&entity).map(|e| e.position)
    }

    pub fn health(&self, entity: EntityId) -> Option<&HealthModel> {
        self.entities.get(&entity)?.health.as_ref()
    }

    /// Animation triggers fired since the last drain
    pub fn drain_animation_log(&mut self) -> Vec<(EntityId, String)> {
        std::mem::take(&mut self.animation_log)
    }
}

impl DamageHost for World {
    fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.entities.get(&entity)?.parent
    }

    fn tag(&self, entity: EntityId) -> Option<&str> {
        self.entities.get(&entity)?.tag.as_deref()
    }

    fn has_health(&self, entity: EntityId) -> bool {
        self.entities
            .get(&entity)
            .map(|e| e.health.is_some())
            .unwrap_or(false)
    }

    fn health_mut(&mut self, entity: EntityId) -> Option<&mut HealthModel> {
        self.entities.get_mut(&entity)?.health.as_mut()
    }
}

impl BlockerHost for World {
    fn set_blocker_enabled(&mut self, blocker: EntityId, enabled: bool) {
        if let Some(entity) = self.entities.get_mut(&blocker) {
            entity.enabled = enabled;
        }
    }
}
