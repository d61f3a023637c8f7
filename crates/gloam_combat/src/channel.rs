//! Damage delivery from attacking volumes to damageable entities

use crate::damage::DamageEvent;
use crate::health::HealthModel;
use gloam_core::EntityId;
use log::debug;

/// Ownership-hierarchy walks get bounded so malformed authored data
/// (a parent cycle) degrades instead of hanging the tick.
const MAX_HIERARCHY_DEPTH: usize = 16;

/// World-side lookups the damage channel resolves hits against.
///
/// Implemented by whatever owns the entities; the channel itself carries no
/// world state.
pub trait DamageHost {
    /// Owner of an entity, one step up the ownership hierarchy
    fn parent(&self, entity: EntityId) -> Option<EntityId>;
    /// Tag used for target filtering
    fn tag(&self, entity: EntityId) -> Option<&str>;
    /// Whether the entity carries a health ledger
    fn has_health(&self, entity: EntityId) -> bool;
    /// Mutable access to the entity's health ledger
    fn health_mut(&mut self, entity: EntityId) -> Option<&mut HealthModel>;
}

/// Outcome of a delivered hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The damageable entity that consumed the hit
    pub target: EntityId,
    /// Whether this hit killed the target
    pub died: bool,
}

/// Routes a damage event from a struck volume to the nearest
/// capability-holder with a health ledger, walking outward through the
/// volume's ownership hierarchy.
#[derive(Debug, Clone, Default)]
pub struct DamageChannel {
    /// Only struck volumes carrying this tag are considered, when set
    target_tag: Option<String>,
}

impl DamageChannel {
    /// Create a channel with no tag filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict delivery to volumes carrying the given tag
    pub fn with_target_tag(mut self, tag: impl Into<String>) -> Self {
        self.target_tag = Some(tag.into());
        self
    }

    /// Find the nearest health-bearing entity on the struck volume's
    /// ownership chain, starting with the volume itself.
    pub fn resolve_damageable<H: DamageHost>(
        &self,
        host: &H,
        struck: EntityId,
    ) -> Option<EntityId> {
        let mut current = struck;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            if host.has_health(current) {
                return Some(current);
            }
            current = host.parent(current)?;
        }
        None
    }

    /// Deliver a damage event to the entity struck at `struck`.
    ///
    /// Returns `None` when the hit is filtered out (wrong tag, self-hit, no
    /// damageable holder on the chain); the event is consumed either way.
    pub fn deliver<H: DamageHost>(
        &self,
        host: &mut H,
        struck: EntityId,
        event: DamageEvent,
    ) -> Option<DamageOutcome> {
        if let Some(wanted) = &self.target_tag {
            match host.tag(struck) {
                Some(tag) if tag == wanted => {}
                _ => return None,
            }
        }

        let target = self.resolve_damageable(host, struck)?;

        // An attack never lands on its own owner.
        if event.attacker == Some(target) {
            return None;
        }

        let ledger = host.health_mut(target)?;
        let died = ledger.apply(&event);
        debug!(
            "entity {} took {} damage from {:?} (died: {})",
            target, event.amount, event.attacker, died
        );

        Some(DamageOutcome { target, died })
    }
}
