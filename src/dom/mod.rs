//! Scene arena: slotmap-backed instance tree, input editing, lifecycle.

pub mod input;
pub mod lifecycle;
pub mod node;
pub mod tree;

pub use input::{CursorMotion, InputState};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use node::{BoxProps, CommonProps, InputProps, Instance, InstanceId, InstanceKind, TextProps};
pub use tree::{Scene, ROOT_IDENTITY};
