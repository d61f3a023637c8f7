//! Fixed-step tick timing
//!
//! The simulation runs on two independent periodic callbacks: a simulation
//! tick (AI, damage resolution, wave orchestration) and a physics tick
//! (locomotion integration). Wall-clock time is accumulated and handed out
//! in fixed steps for each.

/// Accumulates elapsed time and dispenses fixed simulation and physics steps.
///
/// The physics rate must not exceed the simulation rate.
#[derive(Debug, Clone)]
pub struct TickTiming {
    sim_step: f32,
    physics_step: f32,
    sim_accumulator: f32,
    physics_accumulator: f32,
    total_time: f32,
}

impl TickTiming {
    /// Create timing for the given simulation and physics rates (Hz).
    pub fn new(sim_hz: u32, physics_hz: u32) -> Self {
        let sim_hz = sim_hz.max(1);
        // Physics may run slower than the simulation, never faster.
        let physics_hz = physics_hz.clamp(1, sim_hz);
        Self {
            sim_step: 1.0 / sim_hz as f32,
            physics_step: 1.0 / physics_hz as f32,
            sim_accumulator: 0.0,
            physics_accumulator: 0.0,
            total_time: 0.0,
        }
    }

    /// Fixed simulation step in seconds
    pub fn sim_step(&self) -> f32 {
        self.sim_step
    }

    /// Fixed physics step in seconds
    pub fn physics_step(&self) -> f32 {
        self.physics_step
    }

    /// Total accumulated time in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Feed elapsed wall-clock time into both accumulators
    pub fn advance(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        self.sim_accumulator += delta_time;
        self.physics_accumulator += delta_time;
        self.total_time += delta_time;
    }

    /// Consume one simulation step if enough time has accumulated
    pub fn consume_sim_step(&mut self) -> bool {
        if self.sim_accumulator >= self.sim_step {
            self.sim_accumulator -= self.sim_step;
            true
        } else {
            false
        }
    }

    /// Consume one physics step if enough time has accumulated
    pub fn consume_physics_step(&mut self) -> bool {
        if self.physics_accumulator >= self.physics_step {
            self.physics_accumulator -= self.physics_step;
            true
        } else {
            false
        }
    }

    /// Reset both accumulators (e.g. after a pause)
    pub fn reset(&mut self) {
        self.sim_accumulator = 0.0;
        self.physics_accumulator = 0.0;
    }
}

impl Default for TickTiming {
    fn default() -> Self {
        Self::new(60, 50)
    }
}
