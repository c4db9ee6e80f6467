//! Headless testing helpers: a reference reconciler, a recording surface,
//! snapshot outlines.
//!
//! Use [`KeyedReconciler`] to drive a [`Host`](crate::host::Host) the way an
//! external reconciliation algorithm would, [`HeadlessSurface`] to mount a
//! [`Root`](crate::root::Root) without a terminal, and [`scene_to_string`] to
//! capture the scene as plain text for snapshot-style assertions.

pub mod reconciler;
pub mod snapshot;
pub mod surface;

pub use reconciler::KeyedReconciler;
pub use snapshot::{scene_to_string, subtree_to_string};
pub use surface::HeadlessSurface;
