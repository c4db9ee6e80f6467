//! Event channels an input instance can emit on.

use std::fmt;

/// A named category of user-interaction event.
///
/// The three channels are distinct: a handler bound on one never observes
/// events from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Fired on every keystroke that changes the value.
    Input,
    /// Fired when the value is confirmed (Enter).
    Enter,
    /// Fired on blur or completion when the value differs from the last
    /// committed one.
    Change,
}

impl Channel {
    /// Every channel, in slot order.
    pub const ALL: [Channel; 3] = [Channel::Input, Channel::Enter, Channel::Change];

    /// Wire name of the channel.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Input => "input",
            Channel::Enter => "enter",
            Channel::Change => "change",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Channel::Input => 0,
            Channel::Enter => 1,
            Channel::Change => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
