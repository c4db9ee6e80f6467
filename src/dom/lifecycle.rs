//! Instance lifecycle: create, attach, update, detach, destroy.
//!
//! The `LifecycleTracker` records which instances are currently alive in the
//! scene arena and accumulates lifecycle events that callers can drain, e.g.
//! to verify that every instance is destroyed exactly once.

use std::collections::HashSet;

use super::node::InstanceId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during an instance's life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The instance was allocated (not yet attached to any parent).
    Created { id: InstanceId },
    /// The instance was attached under `parent`.
    Attached { id: InstanceId, parent: InstanceId },
    /// A commit changed the instance's attributes.
    Updated { id: InstanceId },
    /// The instance was detached from its parent.
    Detached { id: InstanceId },
    /// The instance was torn down and its slot released.
    Destroyed { id: InstanceId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks live instances and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    live: HashSet<InstanceId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly allocated instance.
    pub fn on_created(&mut self, id: InstanceId) {
        if self.live.insert(id) {
            self.pending.push(LifecycleEvent::Created { id });
        }
    }

    /// Record that `id` was attached under `parent`. Ignored for dead ids.
    pub fn on_attached(&mut self, id: InstanceId, parent: InstanceId) {
        if self.live.contains(&id) {
            self.pending.push(LifecycleEvent::Attached { id, parent });
        }
    }

    /// Record an attribute update. Ignored for dead ids.
    pub fn on_updated(&mut self, id: InstanceId) {
        if self.live.contains(&id) {
            self.pending.push(LifecycleEvent::Updated { id });
        }
    }

    /// Record a detach. Ignored for dead ids.
    pub fn on_detached(&mut self, id: InstanceId) {
        if self.live.contains(&id) {
            self.pending.push(LifecycleEvent::Detached { id });
        }
    }

    /// Record a teardown.
    ///
    /// Only the first call for a given id produces an event.
    pub fn on_destroyed(&mut self, id: InstanceId) {
        if self.live.remove(&id) {
            self.pending.push(LifecycleEvent::Destroyed { id });
        }
    }

    /// Whether `id` has been created and not yet destroyed.
    pub fn is_live(&self, id: InstanceId) -> bool {
        self.live.contains(&id)
    }

    /// Number of live instances.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Drain and return all pending events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Drop pending events without returning them. Returns how many were
    /// dropped.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Forget all live ids and pending events.
    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id(sm: &mut SlotMap<InstanceId, ()>) -> InstanceId {
        sm.insert(())
    }

    #[test]
    fn new_tracker_is_empty() {
        let tracker = LifecycleTracker::new();
        assert_eq!(tracker.live_count(), 0);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn full_lifecycle_sequence() {
        let mut sm = SlotMap::with_key();
        let parent = make_id(&mut sm);
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_created(id);
        tracker.on_attached(id, parent);
        tracker.on_updated(id);
        tracker.on_detached(id);
        tracker.on_destroyed(id);

        assert_eq!(
            tracker.pending_events(),
            vec![
                LifecycleEvent::Created { id },
                LifecycleEvent::Attached { id, parent },
                LifecycleEvent::Updated { id },
                LifecycleEvent::Detached { id },
                LifecycleEvent::Destroyed { id },
            ]
        );
        assert!(!tracker.is_live(id));
    }

    #[test]
    fn destroy_fires_once() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_created(id);
        tracker.on_destroyed(id);
        tracker.on_destroyed(id);
        let destroyed = tracker
            .pending_events()
            .into_iter()
            .filter(|e| matches!(e, LifecycleEvent::Destroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn events_for_dead_ids_are_ignored() {
        let mut sm = SlotMap::with_key();
        let parent = make_id(&mut sm);
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_attached(id, parent);
        tracker.on_updated(id);
        tracker.on_detached(id);
        tracker.on_destroyed(id);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn pending_events_drains() {
        let mut sm = SlotMap::with_key();
        let a = make_id(&mut sm);
        let b = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_created(a);
        tracker.on_created(b);
        assert_eq!(tracker.pending_events().len(), 2);
        assert!(tracker.pending_events().is_empty());
        assert_eq!(tracker.live_count(), 2);
    }

    #[test]
    fn discard_pending_keeps_live_set() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_created(id);
        tracker.on_updated(id);
        assert_eq!(tracker.pending_len(), 2);
        assert_eq!(tracker.discard_pending(), 2);
        assert!(!tracker.has_pending());
        assert!(tracker.is_live(id));
    }

    #[test]
    fn clear_resets_everything() {
        let mut sm = SlotMap::with_key();
        let id = make_id(&mut sm);
        let mut tracker = LifecycleTracker::new();

        tracker.on_created(id);
        tracker.clear();
        assert!(!tracker.is_live(id));
        assert!(!tracker.has_pending());
    }
}
