//! Per-instance subscription slots, one per channel.

use super::channel::Channel;
use super::handler::Handler;

/// Active subscriptions of one input instance.
///
/// Each channel holds at most one handler, so two callbacks can never be live
/// on the same channel at once.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    slots: [Option<Handler>; 3],
}

impl Subscriptions {
    /// No subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handler bound on `channel`, if any.
    pub fn get(&self, channel: Channel) -> Option<&Handler> {
        self.slots[channel.slot()].as_ref()
    }

    /// Whether `handler` is the one currently bound on `channel`.
    pub fn is_bound(&self, channel: Channel, handler: &Handler) -> bool {
        self.get(channel).is_some_and(|h| h.same(handler))
    }

    /// Bind `handler` on `channel`, returning the handler it displaced.
    pub fn attach(&mut self, channel: Channel, handler: Handler) -> Option<Handler> {
        self.slots[channel.slot()].replace(handler)
    }

    /// Unbind `handler` from `channel` if it is the bound one.
    ///
    /// Returns `false` when a different handler (or none) is bound.
    pub fn detach(&mut self, channel: Channel, handler: &Handler) -> bool {
        if self.is_bound(channel, handler) {
            self.slots[channel.slot()] = None;
            true
        } else {
            false
        }
    }

    /// Unbind whatever is bound on `channel`.
    pub fn detach_channel(&mut self, channel: Channel) -> Option<Handler> {
        self.slots[channel.slot()].take()
    }

    /// Unbind everything, returning how many subscriptions were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.len();
        self.slots = Default::default();
        count
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no channel has a subscription.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
