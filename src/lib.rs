//! # gilt-tui-host
//!
//! A host adapter that lets a declarative reconciler drive a retained terminal
//! scene graph.
//!
//! Each render pass produces a virtual tree of typed nodes (tag, attribute bag,
//! children). A reconciliation algorithm diffs successive trees and calls the
//! hooks on [`host::Host`]; the host turns those calls into instance creation,
//! attribute merges, event subscription changes and structural mutations on a
//! slotmap-backed [`dom::Scene`]. A [`root::Root`] binds the scene to a
//! rendering surface and guarantees at most one live mount.
//!
//! ## Core Systems
//!
//! - **[`vnode`]**: Virtual nodes, tags, typed attribute bags
//! - **[`dom`]**: Slotmap-backed scene arena, input editing, lifecycle tracking
//! - **[`host`]**: Instance factory, attribute applier, event binder, hooks
//! - **[`event`]**: Handler identity, channels, per-instance subscriptions
//! - **[`root`]**: Mount/update/unmount state machine, `Surface`/`Reconciler` seams
//! - **[`testing`]**: Keyed reference reconciler, headless surface, outlines
//! - **[`config`]**: Kind defaults and commit behaviour
//! - **[`color`]**: Color attribute values backed by crossterm colors
//!
//! ## Example
//!
//! ```
//! use gilt_tui_host::root::Root;
//! use gilt_tui_host::testing::{scene_to_string, HeadlessSurface, KeyedReconciler};
//! use gilt_tui_host::vnode::VirtualNode;
//!
//! let mut root = Root::new(KeyedReconciler::new());
//! let tree = vec![VirtualNode::boxed().child(VirtualNode::text("hello"))];
//! root.mount(&tree, HeadlessSurface::new()).unwrap();
//! assert_eq!(scene_to_string(root.scene()), "box#box\n  text#text \"hello\"");
//!
//! root.unmount().unwrap();
//! assert!(root.scene().is_empty());
//! ```

// Foundation
pub mod color;
pub mod config;
pub mod error;

// Trees
pub mod dom;
pub mod vnode;

// Adapter
pub mod event;
pub mod host;
pub mod root;

// Test support
pub mod testing;

pub use config::HostOptions;
pub use error::{HostError, Result};
pub use host::Host;
pub use root::{Reconciler, Root, RootState, Surface};
pub use vnode::{Attributes, VirtualNode};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use gilt_tui_host_macros::view;
