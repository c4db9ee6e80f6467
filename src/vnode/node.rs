//! Virtual nodes: the declarative tree produced by each render pass.

use super::attrs::Attributes;
use super::tag::Tag;

/// One element of a virtual tree.
///
/// The tag is kept as the element type name so that unknown names can be
/// expressed and rejected when an instance is created.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualNode {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<VirtualNode>,
}

impl VirtualNode {
    /// A node with the given element type and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// A `box` node.
    pub fn boxed() -> Self {
        Self::new(Tag::Box.name())
    }

    /// A `group` node.
    pub fn group() -> Self {
        Self::new(Tag::Group.name())
    }

    /// A `text` node with the given content.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Tag::Text.name()).with_attributes(Attributes::new().content(content))
    }

    /// An `input` node.
    pub fn input() -> Self {
        Self::new(Tag::Input.name())
    }

    /// Merge `attributes` into this node's bag (builder).
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = self.attributes.merge(&attributes);
        self
    }

    /// Edit this node's bag in place (builder).
    pub fn attrs(mut self, edit: impl FnOnce(Attributes) -> Attributes) -> Self {
        self.attributes = edit(std::mem::take(&mut self.attributes));
        self
    }

    /// Append one child, a list of children, or nothing (builder).
    pub fn child(mut self, child: impl IntoChildren) -> Self {
        self.children.extend(child.into_children());
        self
    }

    /// Append several children (builder).
    pub fn with_children(mut self, children: impl IntoIterator<Item = VirtualNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// The reconciliation key: the `id` attribute, if any.
    pub fn key(&self) -> Option<&str> {
        self.attributes.id.as_deref()
    }
}

/// Anything that can be spliced into a child list.
pub trait IntoChildren {
    fn into_children(self) -> Vec<VirtualNode>;
}

impl IntoChildren for VirtualNode {
    fn into_children(self) -> Vec<VirtualNode> {
        vec![self]
    }
}

impl IntoChildren for Vec<VirtualNode> {
    fn into_children(self) -> Vec<VirtualNode> {
        self
    }
}

impl IntoChildren for Option<VirtualNode> {
    fn into_children(self) -> Vec<VirtualNode> {
        self.into_iter().collect()
    }
}
