//! Gloam Core - Identifiers and Timing
//!
//! Shared building blocks for the encounter simulation crates.
//!
//! # Features
//!
//! - Opaque entity identifiers with a monotonic allocator
//! - Fixed-step simulation and physics tick timing

pub mod id;
pub mod tick;

pub mod prelude {
    pub use crate::id::{EntityId, IdAllocator};
    pub use crate::tick::TickTiming;
}

pub use prelude::*;
