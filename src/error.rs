//! Error type shared by the host hooks, the scene and the root.

use crate::dom::node::InstanceId;
use crate::vnode::tag::Tag;

/// Errors raised while applying a commit or driving the root lifecycle.
///
/// Every variant is fatal for the commit in progress. Non-fatal anomalies
/// (text nodes, no-op updates, insert fallbacks) are logged instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The element type name is not one of `box`, `group`, `text`, `input`.
    #[error("unknown element type: `{0}`")]
    UnrecognizedTag(String),

    /// `mount` was called while a root is already mounted.
    #[error("a root is already mounted; unmount it before mounting again")]
    AlreadyMounted,

    /// `update` was called while no root is mounted.
    #[error("no root is mounted")]
    NotMounted,

    /// The instance was already torn down (or never belonged to this scene).
    #[error("instance {0:?} is no longer part of the scene")]
    StaleInstance(InstanceId),

    /// `child` is not in `parent`'s children.
    #[error("instance {child:?} is not a child of {parent:?}")]
    NotAChild {
        parent: InstanceId,
        child: InstanceId,
    },

    /// `child` still belongs to another parent and must be removed first.
    #[error("instance {child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        parent: InstanceId,
        child: InstanceId,
    },

    /// Attaching `child` under `parent` would make it its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        parent: InstanceId,
        child: InstanceId,
    },

    /// An update for one tag was dispatched to an instance of another kind.
    #[error("`{expected}` update dispatched to a `{found}` instance")]
    KindMismatch { expected: Tag, found: Tag },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HostError>;
