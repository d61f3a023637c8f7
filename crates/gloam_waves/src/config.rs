//! Wave definitions and JSON loading

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One authored wave in an encounter sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Name of the spawn template to instantiate
    pub template: String,
    /// How many entities this wave spawns
    #[serde(default = "default_count")]
    pub count: u32,
    /// Entities are placed uniformly within this radius of the spawn center
    #[serde(default = "default_spawn_radius")]
    pub spawn_radius: f32,
    /// Seconds before the first spawn of this wave
    #[serde(default)]
    pub start_delay: f32,
    /// Seconds between spawns; zero spawns one entity per tick
    #[serde(default)]
    pub spawn_interval: f32,
}

fn default_count() -> u32 {
    5
}

fn default_spawn_radius() -> f32 {
    5.0
}

impl Default for WaveDefinition {
    fn default() -> Self {
        Self {
            template: String::new(),
            count: default_count(),
            spawn_radius: default_spawn_radius(),
            start_delay: 0.0,
            spawn_interval: 0.0,
        }
    }
}

impl WaveDefinition {
    /// Whether this wave can produce at least one entity.
    ///
    /// A wave that never spawns anything can never complete and stalls the
    /// sequence.
    pub fn is_spawnable(&self) -> bool {
        !self.template.is_empty() && self.count > 0
    }
}

/// Errors surfaced by wave config loading and validation
#[derive(Debug, Error)]
pub enum WaveConfigError {
    #[error("wave {index} has no spawn template")]
    MissingTemplate { index: usize },
    #[error("wave {index} has zero spawn count")]
    ZeroCount { index: usize },
    #[error("failed to parse wave config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject wave sequences that would stall at runtime
pub fn validate(waves: &[WaveDefinition]) -> Result<(), WaveConfigError> {
    for (index, wave) in waves.iter().enumerate() {
        if wave.template.is_empty() {
            return Err(WaveConfigError::MissingTemplate { index });
        }
        if wave.count == 0 {
            return Err(WaveConfigError::ZeroCount { index });
        }
    }
    Ok(())
}

/// Parse and validate a JSON wave sequence
pub fn load_waves(json: &str) -> Result<Vec<WaveDefinition>, WaveConfigError> {
    let waves: Vec<WaveDefinition> = serde_json::from_str(json)?;
    validate(&waves)?;
    Ok(waves)
}
