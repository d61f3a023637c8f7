//! Entity identifiers

use core::fmt;
use serde::{Deserialize, Serialize};

/// An opaque identifier for a simulation entity.
///
/// Ids are allocated once and never reused: death is terminal in this
/// subsystem, so a stale id can at worst miss a lookup, never alias a
/// different entity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an id from its raw value
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    #[inline]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids, starting at 1 and never reusing.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create a new allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}
