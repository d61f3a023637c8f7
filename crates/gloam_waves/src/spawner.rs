//! Sequenced wave spawning

use crate::config::WaveDefinition;
use glam::Vec3;
use gloam_core::EntityId;
use gloam_event::EventChannel;
use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Lifecycle events emitted by the spawner, drained once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEvent {
    /// A wave began spawning (fires after its start delay)
    WaveStarted(usize),
    /// Every entity of the wave has been spawned and killed
    WaveCompleted(usize),
    /// The final wave completed
    AllWavesCompleted,
}

/// Where the spawner is in the encounter sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePhase {
    /// No encounter running
    #[default]
    Idle,
    /// The current wave still has spawns to issue
    Spawning,
    /// All spawns issued; waiting for the wave to die out
    InWave,
    /// The whole sequence finished
    Completed,
}

/// Entity factory the spawner drives.
///
/// Returning `None` means the template could not be instantiated; the
/// spawner retries on later ticks.
pub trait SpawnHost {
    fn spawn(&mut self, template: &str, position: Vec3) -> Option<EntityId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnStage {
    StartDelay,
    Spawning,
}

/// Resumable progress through one wave's spawn schedule
#[derive(Debug, Clone, Copy)]
struct SpawnTask {
    wave_index: usize,
    stage: SpawnStage,
    elapsed: f32,
    spawned: u32,
}

/// Runs an authored wave sequence to completion.
///
/// Spawned entities are tracked in a registry keyed by id; the simulation
/// reports deaths through [`WaveSpawner::notify_death`]. A wave completes
/// only once every spawn has been issued and every spawned entity is dead.
pub struct WaveSpawner {
    waves: Vec<WaveDefinition>,
    spawn_center: Vec3,
    can_restart: bool,
    phase: WavePhase,
    current_wave: Option<usize>,
    alive_in_wave: u32,
    registry: HashMap<EntityId, usize>,
    task: Option<SpawnTask>,
    events: EventChannel<WaveEvent>,
    rng: SmallRng,
}

impl WaveSpawner {
    /// Create a spawner for the given sequence, centered at `spawn_center`
    pub fn new(waves: Vec<WaveDefinition>, spawn_center: Vec3) -> Self {
        Self {
            waves,
            spawn_center,
            can_restart: false,
            phase: WavePhase::Idle,
            current_wave: None,
            alive_in_wave: 0,
            registry: HashMap::new(),
            task: None,
            events: EventChannel::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Allow `start_waves` to rerun a completed sequence
    pub fn with_restart(mut self, can_restart: bool) -> Self {
        self.can_restart = can_restart;
        self
    }

    /// Deterministic spawn placement for tests and replays
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Index of the wave in progress, if any
    pub fn current_wave(&self) -> Option<usize> {
        self.current_wave
    }

    /// Live entities spawned by the current wave
    pub fn alive_in_wave(&self) -> u32 {
        self.alive_in_wave
    }

    /// Begin the sequence from wave zero.
    ///
    /// Ignored when the sequence already completed and restarting is
    /// disabled. A restart abandons tracking of any survivors from the
    /// previous run; their late deaths are ignored.
    pub fn start_waves(&mut self) {
        if self.waves.is_empty() {
            warn!("wave sequence is empty, nothing to start");
            return;
        }
        if self.phase == WavePhase::Completed && !self.can_restart {
            debug!("wave sequence already completed and restart is disabled");
            return;
        }

        self.registry.clear();
        self.start_wave(0);
    }

    /// Abandon the running sequence without emitting completion events
    pub fn stop(&mut self) {
        self.task = None;
        self.current_wave = None;
        self.alive_in_wave = 0;
        self.phase = WavePhase::Idle;
        self.registry.clear();
    }

    /// Advance spawning by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32, host: &mut dyn SpawnHost) {
        let Some(mut task) = self.task.take() else {
            return;
        };
        let wave = &self.waves[task.wave_index];
        let count = wave.count;
        let start_delay = wave.start_delay;
        let interval = wave.spawn_interval;

        task.elapsed += delta_time;

        if task.stage == SpawnStage::StartDelay {
            if task.elapsed < start_delay {
                self.task = Some(task);
                return;
            }
            task.stage = SpawnStage::Spawning;
            // Credit a full interval so the first spawn is immediate.
            task.elapsed = interval;
            info!("wave {} started ({} spawns)", task.wave_index, count);
            self.events.send(WaveEvent::WaveStarted(task.wave_index));
        }

        if interval > 0.0 {
            while task.elapsed >= interval && task.spawned < count {
                if !self.spawn_one(&mut task, host) {
                    break;
                }
                task.elapsed -= interval;
            }
        } else if task.spawned < count {
            // Zero interval drips one spawn per tick.
            self.spawn_one(&mut task, host);
        }

        if task.spawned >= count {
            self.phase = WavePhase::InWave;
            if self.alive_in_wave == 0 {
                self.complete_current_wave();
            }
        } else {
            self.task = Some(task);
        }
    }

    /// Report the death of a spawned entity.
    ///
    /// Deaths of entities the spawner never spawned, or that belong to an
    /// abandoned run, are ignored.
    pub fn notify_death(&mut self, entity: EntityId) {
        let Some(wave_index) = self.registry.remove(&entity) else {
            return;
        };
        if self.current_wave != Some(wave_index) {
            debug!("late death from superseded wave {}", wave_index);
            return;
        }

        self.alive_in_wave = self.alive_in_wave.saturating_sub(1);
        if self.alive_in_wave == 0 && self.phase == WavePhase::InWave {
            self.complete_current_wave();
        }
    }

    /// Drain events emitted since the previous drain, in emission order
    pub fn drain_events(&mut self) -> Vec<WaveEvent> {
        self.events.drain()
    }

    /// Jump to a specific wave, superseding any in-flight spawn task
    pub fn start_wave(&mut self, index: usize) {
        if index >= self.waves.len() {
            error!("wave index {} out of range", index);
            return;
        }

        self.current_wave = Some(index);
        self.alive_in_wave = 0;
        self.phase = WavePhase::Spawning;
        self.task = None;

        let wave = &self.waves[index];
        if !wave.is_spawnable() {
            // The sequence stalls here; validate configs up front to
            // catch this before an encounter starts.
            warn!("wave {} can never spawn, sequence stalled", index);
            return;
        }

        self.task = Some(SpawnTask {
            wave_index: index,
            stage: SpawnStage::StartDelay,
            elapsed: 0.0,
            spawned: 0,
        });
    }

    fn spawn_one(&mut self, task: &mut SpawnTask, host: &mut dyn SpawnHost) -> bool {
        let wave = &self.waves[task.wave_index];
        let position = self.spawn_center + sample_disk(&mut self.rng, wave.spawn_radius);
        let Some(entity) = host.spawn(&wave.template, position) else {
            warn!(
                "template '{}' failed to spawn for wave {}",
                wave.template, task.wave_index
            );
            return false;
        };

        self.registry.insert(entity, task.wave_index);
        self.alive_in_wave += 1;
        task.spawned += 1;
        debug!(
            "spawned {} ({}/{}) for wave {}",
            entity, task.spawned, wave.count, task.wave_index
        );
        true
    }

    fn complete_current_wave(&mut self) {
        let Some(index) = self.current_wave else {
            return;
        };

        info!("wave {} completed", index);
        self.events.send(WaveEvent::WaveCompleted(index));

        let next = index + 1;
        if next < self.waves.len() {
            self.start_wave(next);
        } else {
            self.current_wave = None;
            self.phase = WavePhase::Completed;
            info!("all waves completed");
            self.events.send(WaveEvent::AllWavesCompleted);
        }
    }
}

/// Uniform point on the ground-plane disk of the given radius
fn sample_disk(rng: &mut SmallRng, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().sqrt();
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(r * angle.cos(), 0.0, r * angle.sin())
}
