//! Live instance types: InstanceId, Instance, InstanceKind and per-kind props.

use slotmap::new_key_type;

use super::input::InputState;
use crate::color::Color;
use crate::event::Subscriptions;
use crate::vnode::attrs::{BorderStyle, Dimension, Placement};
use crate::vnode::tag::Tag;

new_key_type! {
    /// Handle to a live instance in the scene arena. Copy, lightweight (u64).
    pub struct InstanceId;
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Fields shared by every kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonProps {
    pub position: Placement,
    pub x: i32,
    pub y: i32,
    pub width: Dimension,
    pub height: Dimension,
    pub visible: bool,
    pub border_style: BorderStyle,
}

impl CommonProps {
    /// Relative placement at the origin, auto-sized, visible, no border.
    pub fn relative() -> Self {
        Self {
            position: Placement::Relative,
            x: 0,
            y: 0,
            width: Dimension::Auto,
            height: Dimension::Auto,
            visible: true,
            border_style: BorderStyle::None,
        }
    }

    /// Set a fixed size (builder).
    pub fn sized(mut self, width: u16, height: u16) -> Self {
        self.width = Dimension::Cells(width);
        self.height = Dimension::Cells(height);
        self
    }
}

/// Box-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxProps {
    pub background_color: Color,
    pub border_color: Color,
}

/// Text-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub content: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub selectable: bool,
}

/// Input-specific fields, including the editor and the event subscriptions.
#[derive(Debug, Clone, Default)]
pub struct InputProps {
    pub editor: InputState,
    pub placeholder: String,
    pub text_color: Option<Color>,
    pub focused_background_color: Option<Color>,
    pub focused_text_color: Option<Color>,
    pub focused: bool,
    pub(crate) subscriptions: Subscriptions,
}

impl InputProps {
    /// Active subscriptions (read-only; the event binder owns mutation).
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }
}

// ---------------------------------------------------------------------------
// InstanceKind
// ---------------------------------------------------------------------------

/// Kind-specific state, one variant per [`Tag`].
#[derive(Debug, Clone)]
pub enum InstanceKind {
    Box(BoxProps),
    Group,
    Text(TextProps),
    Input(Box<InputProps>),
}

impl InstanceKind {
    /// The tag this kind was created from.
    pub fn tag(&self) -> Tag {
        match self {
            InstanceKind::Box(_) => Tag::Box,
            InstanceKind::Group => Tag::Group,
            InstanceKind::Text(_) => Tag::Text,
            InstanceKind::Input(_) => Tag::Input,
        }
    }
}

// ---------------------------------------------------------------------------
// Instance
// ---------------------------------------------------------------------------

/// A retained, mutable scene node.
///
/// Parent and child links live in the [`Scene`](super::tree::Scene) arena, not
/// here, so an instance never owns or points at another instance directly.
#[derive(Debug, Clone)]
pub struct Instance {
    identity: String,
    pub kind: InstanceKind,
    pub common: CommonProps,
}

impl Instance {
    pub fn new(identity: impl Into<String>, kind: InstanceKind, common: CommonProps) -> Self {
        Self {
            identity: identity.into(),
            kind,
            common,
        }
    }

    /// The identity string (the `id` attribute or the tag name).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    pub fn as_box(&self) -> Option<&BoxProps> {
        match &self.kind {
            InstanceKind::Box(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match &self.kind {
            InstanceKind::Text(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&InputProps> {
        match &self.kind {
            InstanceKind::Input(props) => Some(&**props),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut InputProps> {
        match &mut self.kind {
            InstanceKind::Input(props) => Some(&mut **props),
            _ => None,
        }
    }

    /// Number of active event subscriptions (always 0 for non-inputs).
    pub fn subscription_count(&self) -> usize {
        self.as_input().map_or(0, |input| input.subscriptions.len())
    }
}
