//! Room gating tied to wave lifecycle

use crate::spawner::{WaveEvent, WaveSpawner};
use gloam_core::EntityId;
use log::{debug, info};

/// Collaborator that can enable or disable blocker entities
pub trait BlockerHost {
    fn set_blocker_enabled(&mut self, blocker: EntityId, enabled: bool);
}

/// A group of blocker entities toggled together
#[derive(Debug, Clone, Default)]
pub struct RoomBlockerSet {
    handles: Vec<EntityId>,
    locked: bool,
}

impl RoomBlockerSet {
    pub fn new(handles: Vec<EntityId>) -> Self {
        Self {
            handles,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock every blocker in the set.
    ///
    /// All blockers move together; there is never a partially locked room.
    pub fn set_locked(&mut self, locked: bool, host: &mut dyn BlockerHost) {
        self.locked = locked;
        for &handle in &self.handles {
            host.set_blocker_enabled(handle, locked);
        }
    }
}

/// Locks a room's blockers while its wave encounter runs.
///
/// The room locks when the first wave starts and unlocks permanently once
/// the sequence completes. A completed room never re-locks, even if the
/// spawner is restarted.
pub struct WaveRoomController {
    blockers: RoomBlockerSet,
    lock_on_first_wave: bool,
    completed: bool,
}

impl WaveRoomController {
    pub fn new(blockers: RoomBlockerSet) -> Self {
        Self {
            blockers,
            lock_on_first_wave: true,
            completed: false,
        }
    }

    /// Disable locking on wave start; blockers stay open the whole fight
    pub fn with_lock_on_first_wave(mut self, lock: bool) -> Self {
        self.lock_on_first_wave = lock;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_locked(&self) -> bool {
        self.blockers.is_locked()
    }

    /// Make sure the room starts open
    pub fn arm(&mut self, host: &mut dyn BlockerHost) {
        self.blockers.set_locked(false, host);
    }

    /// Kick off the encounter, unless this room was already cleared
    pub fn begin_encounter(&mut self, spawner: &mut WaveSpawner) {
        if self.completed {
            debug!("room already cleared, not restarting encounter");
            return;
        }
        spawner.start_waves();
    }

    /// React to one spawner lifecycle event
    pub fn handle_event(&mut self, event: WaveEvent, host: &mut dyn BlockerHost) {
        match event {
            WaveEvent::WaveStarted(0) if self.lock_on_first_wave && !self.completed => {
                info!("room locked for encounter");
                self.blockers.set_locked(true, host);
            }
            WaveEvent::AllWavesCompleted => {
                info!("room cleared, unlocking");
                self.completed = true;
                self.blockers.set_locked(false, host);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct TestHost {
        enabled: HashMap<EntityId, bool>,
    }

    impl BlockerHost for TestHost {
        fn set_blocker_enabled(&mut self, blocker: EntityId, enabled: bool) {
            self.enabled.insert(blocker, enabled);
        }
    }

    fn blocker_ids() -> Vec<EntityId> {
        vec![EntityId::from_raw(10), EntityId::from_raw(11)]
    }

    #[test]
    fn test_first_wave_locks_all_blockers() {
        let mut room = WaveRoomController::new(RoomBlockerSet::new(blocker_ids()));
        let mut host = TestHost::default();

        room.arm(&mut host);
        assert!(!room.is_locked());

        room.handle_event(WaveEvent::WaveStarted(0), &mut host);
        assert!(room.is_locked());
        for id in blocker_ids() {
            assert!(host.enabled[&id]);
        }
    }

    #[test]
    fn test_later_waves_do_not_relock() {
        let mut room = WaveRoomController::new(RoomBlockerSet::new(blocker_ids()));
        let mut host = TestHost::default();

        room.handle_event(WaveEvent::WaveStarted(0), &mut host);
        room.handle_event(WaveEvent::WaveCompleted(0), &mut host);
        room.handle_event(WaveEvent::WaveStarted(1), &mut host);
        // Still locked from the first wave; intermediate events change nothing.
        assert!(room.is_locked());
    }

    #[test]
    fn test_completion_unlocks_permanently() {
        let mut room = WaveRoomController::new(RoomBlockerSet::new(blocker_ids()));
        let mut host = TestHost::default();

        room.handle_event(WaveEvent::WaveStarted(0), &mut host);
        room.handle_event(WaveEvent::AllWavesCompleted, &mut host);
        assert!(!room.is_locked());
        assert!(room.is_completed());

        // A stray wave-start event after clearing never re-locks.
        room.handle_event(WaveEvent::WaveStarted(0), &mut host);
        assert!(!room.is_locked());
    }

    #[test]
    fn test_lock_on_first_wave_disabled() {
        let mut room = WaveRoomController::new(RoomBlockerSet::new(blocker_ids()))
            .with_lock_on_first_wave(false);
        let mut host = TestHost::default();

        room.handle_event(WaveEvent::WaveStarted(0), &mut host);
        assert!(!room.is_locked());
    }

    #[test]
    fn test_cleared_room_does_not_restart() {
        let mut room = WaveRoomController::new(RoomBlockerSet::new(blocker_ids()));
        let mut host = TestHost::default();
        room.handle_event(WaveEvent::AllWavesCompleted, &mut host);

        let mut spawner =
            WaveSpawner::new(vec![crate::config::WaveDefinition::default()], glam::Vec3::ZERO);
        room.begin_encounter(&mut spawner);
        assert_eq!(spawner.phase(), crate::spawner::WavePhase::Idle);
    }
}
