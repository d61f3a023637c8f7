//! Gloam Combat - Health and Damage
//!
//! Layered damage model shared by every damageable entity.
//!
//! # Features
//!
//! - Shield → resistance → health damage resolution
//! - Immutable per-hit damage events
//! - Damage channel resolving hits to the nearest damageable holder
//!
//! # Example
//!
//! ```
//! use gloam_combat::prelude::*;
//!
//! let mut ledger = HealthModel::new(100.0, 20.0, 50.0);
//!
//! // Shield absorbs 20, resistance halves the remaining 30.
//! let died = ledger.take_damage(50.0);
//! assert!(!died);
//! assert_eq!(ledger.health(), 85.0);
//! ```

pub mod channel;
pub mod damage;
pub mod health;

pub mod prelude {
    pub use crate::channel::{DamageChannel, DamageHost, DamageOutcome};
    pub use crate::damage::{DamageEvent, DamageType};
    pub use crate::health::HealthModel;
}

pub use prelude::*;
