//! The encounter simulation loop

use crate::world::{EntityAnimation, World};
use glam::Vec3;
use gloam_ai::{
    AiController, AiState, BehaviorCtx, DialogueSurface, PendingHit, TargetView,
};
use gloam_combat::{DamageChannel, DamageEvent};
use gloam_core::{EntityId, TickTiming};
use gloam_waves::{
    RoomBlockerSet, SpawnHost, WaveDefinition, WaveRoomController, WaveSpawner,
};
use std::collections::BTreeMap;

/// Presentation-side dialogue state driven by the simulation
#[derive(Debug, Default)]
pub struct DialoguePanel {
    open: bool,
}

impl DialoguePanel {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl DialogueSurface for DialoguePanel {
    fn activate(&mut self) {
        self.open = true;
    }

    fn deactivate(&mut self) {
        self.open = false;
    }
}

/// Spawns entities and binds AI controllers on behalf of the wave spawner
struct SpawnAdapter<'a> {
    world: &'a mut World,
    controllers: &'a mut BTreeMap<EntityId, AiController>,
}

impl SpawnHost for SpawnAdapter<'_> {
    fn spawn(&mut self, template: &str, position: Vec3) -> Option<EntityId> {
        let (id, ai) = self.world.spawn_actor(template, position)?;
        if let Some(spawn) = ai {
            self.controllers
                .insert(id, AiController::new(spawn.kind, spawn.profile));
        }
        Some(id)
    }
}

/// One running combat encounter.
///
/// Owns the world, the per-entity AI controllers, the wave spawner and the
/// room gate, and steps them in a fixed order each simulation tick: AI,
/// damage resolution, spawning, then lifecycle events. Locomotion intent is
/// integrated separately on the physics tick.
pub struct Encounter {
    pub world: World,
    controllers: BTreeMap<EntityId, AiController>,
    spawner: WaveSpawner,
    room: WaveRoomController,
    timing: TickTiming,
    player: Option<EntityId>,
    channel: DamageChannel,
    pending_damage: Vec<PendingHit>,
    dialogue: DialoguePanel,
}

impl Encounter {
    /// Create an encounter for a wave sequence centered at `spawn_center`
    pub fn new(waves: Vec<WaveDefinition>, spawn_center: Vec3) -> Self {
        Self {
            world: World::new(),
            controllers: BTreeMap::new(),
            spawner: WaveSpawner::new(waves, spawn_center),
            room: WaveRoomController::new(RoomBlockerSet::default()),
            timing: TickTiming::default(),
            player: None,
            channel: DamageChannel::new(),
            pending_damage: Vec::new(),
            dialogue: DialoguePanel::default(),
        }
    }

    /// Deterministic spawn placement for tests and replays
    pub fn with_spawn_seed(mut self, seed: u64) -> Self {
        self.spawner = self.spawner.with_rng_seed(seed);
        self
    }

    /// Override the default simulation and physics rates
    pub fn with_tick_rates(mut self, sim_hz: u32, physics_hz: u32) -> Self {
        self.timing = TickTiming::new(sim_hz, physics_hz);
        self
    }

    /// Gate the encounter room behind the given blocker entities
    pub fn set_blockers(&mut self, handles: Vec<EntityId>) {
        self.room = WaveRoomController::new(RoomBlockerSet::new(handles));
        self.room.arm(&mut self.world);
    }

    /// Spawn the player-controlled actor and designate it as the AI target
    pub fn spawn_player(&mut self, template: &str, position: Vec3) -> Option<EntityId> {
        let (id, _) = self.world.spawn_actor(template, position)?;
        self.player = Some(id);
        Some(id)
    }

    /// Spawn a scripted actor (NPC, dialogue trigger) outside the wave flow
    pub fn spawn_actor(&mut self, template: &str, position: Vec3) -> Option<EntityId> {
        let mut adapter = SpawnAdapter {
            world: &mut self.world,
            controllers: &mut self.controllers,
        };
        adapter.spawn(template, position)
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn spawner(&self) -> &WaveSpawner {
        &self.spawner
    }

    pub fn room(&self) -> &WaveRoomController {
        &self.room
    }

    pub fn dialogue_open(&self) -> bool {
        self.dialogue.is_open()
    }

    /// Encounter state of one AI-driven entity
    pub fn controller_state(&self, entity: EntityId) -> Option<AiState> {
        self.controllers.get(&entity).map(|c| c.state())
    }

    /// Start the wave sequence, unless the room was already cleared
    pub fn begin_encounter(&mut self) {
        self.room.begin_encounter(&mut self.spawner);
    }

    /// Queue a hit from an external collaborator (projectile, hazard)
    pub fn queue_damage(&mut self, target: EntityId, event: DamageEvent) {
        self.pending_damage.push(PendingHit { target, event });
    }

    /// Report a trigger-volume contact on an AI entity
    pub fn notify_contact(&mut self, entity: EntityId, tag: &str) {
        let Self {
            world,
            controllers,
            dialogue,
            ..
        } = self;
        let Some(controller) = controllers.get_mut(&entity) else {
            return;
        };
        let Some(locomotion) = world.movement.get_mut(&entity) else {
            return;
        };
        controller.notify_contact(tag, locomotion, dialogue);
    }

    /// Close the dialogue owned by the given entity
    pub fn end_dialogue(&mut self, entity: EntityId) {
        let Self {
            world,
            controllers,
            dialogue,
            ..
        } = self;
        let Some(controller) = controllers.get_mut(&entity) else {
            return;
        };
        let Some(locomotion) = world.movement.get_mut(&entity) else {
            return;
        };
        controller.end_dialogue(locomotion, dialogue);
    }

    /// Feed elapsed wall-clock time and run all due fixed steps
    pub fn advance(&mut self, delta_time: f32) {
        self.timing.advance(delta_time);

        while self.timing.consume_sim_step() {
            let dt = self.timing.sim_step();
            self.sim_tick(dt);
        }
        while self.timing.consume_physics_step() {
            let dt = self.timing.physics_step();
            self.physics_tick(dt);
        }
    }

    fn sim_tick(&mut self, dt: f32) {
        self.ai_pass(dt);
        self.damage_pass();
        self.spawn_pass(dt);
        self.event_pass();
    }

    fn ai_pass(&mut self, dt: f32) {
        self.behavior_pass(dt, |controller, ctx| controller.tick(ctx));
    }

    /// Run one controller hook for every AI entity, with a fresh per-entity
    /// context.
    fn behavior_pass(
        &mut self,
        dt: f32,
        mut hook: impl FnMut(&mut AiController, &mut BehaviorCtx<'_>),
    ) {
        let Self {
            world,
            controllers,
            pending_damage,
            player,
            ..
        } = self;

        let target = (*player).and_then(|p| {
            world
                .position(p)
                .map(|position| TargetView { entity: p, position })
        });

        for (&id, controller) in controllers.iter_mut() {
            let Some(position) = world.entities.get(&id).map(|e| e.position) else {
                continue;
            };
            let Some(locomotion) = world.movement.get_mut(&id) else {
                continue;
            };
            let mut animation = EntityAnimation {
                entity: id,
                log: &mut world.animation_log,
            };
            let mut ctx = BehaviorCtx {
                entity: id,
                position,
                target,
                delta_time: dt,
                locomotion,
                animation: &mut animation,
                damage_out: pending_damage,
            };
            hook(controller, &mut ctx);
        }
    }

    fn damage_pass(&mut self) {
        let hits = std::mem::take(&mut self.pending_damage);
        for hit in hits {
            let Some(outcome) = self.channel.deliver(&mut self.world, hit.target, hit.event)
            else {
                continue;
            };

            if outcome.died {
                self.world
                    .animation_log
                    .push((outcome.target, "Death".to_string()));
                self.spawner.notify_death(outcome.target);
                self.world.despawn(outcome.target);
                self.controllers.remove(&outcome.target);
                if self.player == Some(outcome.target) {
                    self.player = None;
                }
            } else {
                self.world
                    .animation_log
                    .push((outcome.target, "Hit".to_string()));
            }
        }
    }

    fn spawn_pass(&mut self, dt: f32) {
        let Self {
            world,
            controllers,
            spawner,
            ..
        } = self;
        let mut adapter = SpawnAdapter { world, controllers };
        spawner.tick(dt, &mut adapter);
    }

    fn event_pass(&mut self) {
        for event in self.spawner.drain_events() {
            self.room.handle_event(event, &mut self.world);
        }
    }

    fn physics_tick(&mut self, dt: f32) {
        self.behavior_pass(dt, |controller, ctx| controller.fixed_tick(ctx));

        let world = &mut self.world;
        for (id, movement) in world.movement.iter() {
            if let Some(entity) = world.entities.get_mut(id) {
                movement.integrate(&mut entity.position, dt);
            }
        }
    }
}
