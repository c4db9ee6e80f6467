//! Event primitives: channels, callback handles, subscription slots.

pub mod channel;
pub mod handler;
pub mod subscriptions;

pub use channel::Channel;
pub use handler::Handler;
pub use subscriptions::Subscriptions;
