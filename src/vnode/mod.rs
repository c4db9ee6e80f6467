//! Virtual tree: element tags, attribute bags, nodes.

pub mod attrs;
pub mod node;
pub mod tag;

pub use attrs::{Attributes, BorderStyle, Dimension, ParseAttrError, Placement};
pub use node::{IntoChildren, VirtualNode};
pub use tag::Tag;
