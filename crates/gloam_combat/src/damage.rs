//! Damage types and events

use gloam_core::EntityId;
use serde::{Deserialize, Serialize};

/// How a hit interacts with the target's damage reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    /// Physical damage, reduced by resistance
    #[default]
    Physical,
    /// True damage ignores resistance (the shield still absorbs first)
    True,
}

/// Immutable description of a single hit.
///
/// Produced once per hit and consumed by exactly one damageable target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Damage amount before shield and resistance
    pub amount: f32,
    /// Type of damage
    pub damage_type: DamageType,
    /// Entity that owns the attack
    pub attacker: Option<EntityId>,
    /// Entity the hit physically came from (hitbox, projectile)
    pub source: Option<EntityId>,
}

impl DamageEvent {
    /// Create a new damage event
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            attacker: None,
            source: None,
        }
    }

    /// Set the attacking entity
    pub fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = Some(attacker);
        self
    }

    /// Set the entity the hit came from
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }
}
