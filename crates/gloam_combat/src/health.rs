//! Health ledger and damage resolution

use crate::damage::{DamageEvent, DamageType};
use serde::{Deserialize, Serialize};

/// Per-entity shield/resistance/health ledger.
///
/// Damage resolution order: the shield absorbs first, resistance reduces
/// what is left, and the remainder comes off health, floored at zero.
/// Reaching zero health is terminal: once death has been signaled, no
/// further damage or healing mutates the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthModel {
    health: f32,
    max_health: f32,
    shield: f32,
    max_shield: f32,
    /// Percent damage reduction applied after the shield, in [0, 100]
    resistance: f32,
}

impl HealthModel {
    /// Create a full-health ledger.
    ///
    /// `max_health` is raised to at least 1, `max_shield` floored at 0, and
    /// `resistance` clamped to [0, 100]. The shield starts full.
    pub fn new(max_health: f32, max_shield: f32, resistance: f32) -> Self {
        let max_health = max_health.max(1.0);
        let max_shield = max_shield.max(0.0);
        Self {
            health: max_health,
            max_health,
            shield: max_shield,
            max_shield,
            resistance: resistance.clamp(0.0, 100.0),
        }
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Maximum health
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Current shield
    pub fn shield(&self) -> f32 {
        self.shield
    }

    /// Maximum shield
    pub fn max_shield(&self) -> f32 {
        self.max_shield
    }

    /// Percent damage reduction in [0, 100]
    pub fn resistance(&self) -> f32 {
        self.resistance
    }

    /// Health as a percentage of maximum, in [0, 100]
    pub fn health_percent(&self) -> f32 {
        (self.health / self.max_health) * 100.0
    }

    /// Whether death has been reached
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether the entity is still alive
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Apply raw damage through the shield → resistance → health pipeline.
    ///
    /// Returns true iff health reaches zero as a result of this call.
    /// Non-positive amounts and hits on an already-dead ledger are no-ops.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.take_damage_typed(amount, DamageType::Physical)
    }

    /// Apply a damage event. True damage skips the resistance step.
    pub fn apply(&mut self, event: &DamageEvent) -> bool {
        self.take_damage_typed(event.amount, event.damage_type)
    }

    fn take_damage_typed(&mut self, amount: f32, damage_type: DamageType) -> bool {
        if amount <= 0.0 || self.is_dead() {
            return false;
        }

        let mut remaining = amount;

        // 1) The shield absorbs first
        if self.shield > 0.0 {
            let absorbed = self.shield.min(remaining);
            self.shield -= absorbed;
            remaining -= absorbed;
        }

        if remaining <= 0.0 {
            return false;
        }

        // 2) Resistance: 0-100% reduction
        let final_damage = match damage_type {
            DamageType::Physical => {
                let reduction = (self.resistance / 100.0).clamp(0.0, 1.0);
                remaining * (1.0 - reduction)
            }
            DamageType::True => remaining,
        };

        // 3) Health, floored at zero
        self.health -= final_damage;
        if self.health <= 0.0 {
            self.health = 0.0;
            return true;
        }

        false
    }

    /// Heal by a percentage of maximum health, capped at maximum.
    ///
    /// No effect once dead.
    pub fn heal_percent(&mut self, pct: f32) {
        if self.is_dead() || pct <= 0.0 {
            return;
        }

        self.health += self.max_health * (pct / 100.0);
        if self.health > self.max_health {
            self.health = self.max_health;
        }
    }

    /// Set the shield, clamped to [0, max_shield]
    pub fn set_shield(&mut self, value: f32) {
        self.shield = value.clamp(0.0, self.max_shield);
    }

    /// Set the resistance, clamped to [0, 100]
    pub fn set_resistance(&mut self, resistance: f32) {
        self.resistance = resistance.clamp(0.0, 100.0);
    }
}

impl Default for HealthModel {
    fn default() -> Self {
        Self::new(100.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_ordering() {
        // Shield absorbs 20 first, resistance halves the remaining 30.
        let mut ledger = HealthModel::new(100.0, 20.0, 50.0);

        let died = ledger.take_damage(50.0);
        assert!(!died);
        assert_eq!(ledger.shield(), 0.0);
        assert_eq!(ledger.health(), 85.0);
    }

    #[test]
    fn test_shield_absorbs_everything() {
        let mut ledger = HealthModel::new(100.0, 40.0, 0.0);

        assert!(!ledger.take_damage(25.0));
        assert_eq!(ledger.shield(), 15.0);
        assert_eq!(ledger.health(), 100.0);
    }

    #[test]
    fn test_non_positive_damage_is_noop() {
        let mut ledger = HealthModel::new(100.0, 10.0, 0.0);

        assert!(!ledger.take_damage(0.0));
        assert!(!ledger.take_damage(-5.0));
        assert_eq!(ledger.health(), 100.0);
        assert_eq!(ledger.shield(), 10.0);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut ledger = HealthModel::new(50.0, 0.0, 0.0);

        assert!(ledger.take_damage(60.0));
        assert!(ledger.is_dead());
        assert_eq!(ledger.health(), 0.0);

        // Further hits report no new death and change nothing.
        assert!(!ledger.take_damage(10.0));
        assert_eq!(ledger.health(), 0.0);

        ledger.heal_percent(50.0);
        assert_eq!(ledger.health(), 0.0);
    }

    #[test]
    fn test_death_reported_exactly_once() {
        let mut ledger = HealthModel::new(30.0, 0.0, 0.0);
        assert!(!ledger.take_damage(20.0));
        assert!(ledger.take_damage(20.0));
        assert!(!ledger.take_damage(20.0));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut ledger = HealthModel::new(100.0, 0.0, 0.0);
        ledger.take_damage(30.0);

        ledger.heal_percent(20.0);
        assert_eq!(ledger.health(), 90.0);

        ledger.heal_percent(500.0);
        assert_eq!(ledger.health(), 100.0);
    }

    #[test]
    fn test_set_shield_clamps() {
        let mut ledger = HealthModel::new(100.0, 50.0, 0.0);

        ledger.set_shield(200.0);
        assert_eq!(ledger.shield(), 50.0);

        ledger.set_shield(-10.0);
        assert_eq!(ledger.shield(), 0.0);
    }

    #[test]
    fn test_true_damage_skips_resistance() {
        let mut ledger = HealthModel::new(100.0, 10.0, 75.0);

        let event = DamageEvent::new(30.0, DamageType::True);
        assert!(!ledger.apply(&event));

        // Shield absorbed 10, the remaining 20 landed unreduced.
        assert_eq!(ledger.shield(), 0.0);
        assert_eq!(ledger.health(), 80.0);
    }

    #[test]
    fn test_resistance_clamped() {
        let mut ledger = HealthModel::new(100.0, 0.0, 250.0);
        assert_eq!(ledger.resistance(), 100.0);

        // Fully resistant: health never moves.
        assert!(!ledger.take_damage(40.0));
        assert_eq!(ledger.health(), 100.0);
    }

    #[test]
    fn test_health_percent() {
        let mut ledger = HealthModel::new(200.0, 0.0, 0.0);
        ledger.take_damage(50.0);
        assert_eq!(ledger.health_percent(), 75.0);
    }
}
