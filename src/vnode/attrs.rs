//! Attribute bags and their value types.
//!
//! [`Attributes`] is a typed mapping from attribute name to value where every
//! field is optional: `None` means the attribute is absent from the bag. The
//! applier merges only the present attributes, so an update that omits one
//! keeps whatever the instance already has.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::event::{Channel, Handler};

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A width or height: a concrete cell count, or derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Exactly this many cells.
    Cells(u16),
    /// Derived from content or children.
    Auto,
}

impl From<u16> for Dimension {
    fn from(cells: u16) -> Self {
        Dimension::Cells(cells)
    }
}

/// Negative values clamp to zero, values past `u16::MAX` saturate.
impl From<i32> for Dimension {
    fn from(cells: i32) -> Self {
        Dimension::Cells(u16::try_from(cells.max(0)).unwrap_or(u16::MAX))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cells(n) => write!(f, "{n}"),
            Dimension::Auto => f.write_str("auto"),
        }
    }
}

/// Placement mode of an instance relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Positioned at `x`/`y` relative to the parent's origin.
    Absolute,
    /// Flows with its siblings; `x`/`y` are offsets from the flow position.
    Relative,
}

impl FromStr for Placement {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Placement::Absolute),
            "relative" => Ok(Placement::Relative),
            other => Err(ParseAttrError::new("position", other)),
        }
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    /// No border.
    #[default]
    None,
    Single,
    Double,
    Rounded,
    Heavy,
}

impl FromStr for BorderStyle {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(BorderStyle::None),
            "single" => Ok(BorderStyle::Single),
            "double" => Ok(BorderStyle::Double),
            "rounded" => Ok(BorderStyle::Rounded),
            "heavy" => Ok(BorderStyle::Heavy),
            other => Err(ParseAttrError::new("border_style", other)),
        }
    }
}

/// Error returned when a string attribute value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value `{value}` for attribute `{attribute}`")]
pub struct ParseAttrError {
    pub attribute: &'static str,
    pub value: String,
}

impl ParseAttrError {
    fn new(attribute: &'static str, value: &str) -> Self {
        Self {
            attribute,
            value: value.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// An attribute bag.
///
/// Common attributes apply to every kind. Kind-specific ones are only read for
/// the matching kind: `background_color`/`border_color` for boxes,
/// `content`/`fg`/`bg`/`selectable` for texts, and the input fields for inputs.
/// Handlers are only bound on inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    // Common
    pub id: Option<String>,
    pub position: Option<Placement>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub visible: Option<bool>,
    pub border_style: Option<BorderStyle>,

    // Box
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,

    // Text
    pub content: Option<String>,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub selectable: Option<bool>,

    // Input
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub max_length: Option<usize>,
    pub text_color: Option<Color>,
    pub focused_background_color: Option<Color>,
    pub focused_text_color: Option<Color>,

    // Handlers
    pub on_input: Option<Handler>,
    pub on_enter: Option<Handler>,
    pub on_change: Option<Handler>,
}

impl Attributes {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handler carried for `channel`, if any.
    pub fn handler(&self, channel: Channel) -> Option<&Handler> {
        match channel {
            Channel::Input => self.on_input.as_ref(),
            Channel::Enter => self.on_enter.as_ref(),
            Channel::Change => self.on_change.as_ref(),
        }
    }

    /// Whether the bag carries no attribute at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `other` on top of `self`: present fields of `other` win.
    pub fn merge(&self, other: &Attributes) -> Attributes {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }
        Attributes {
            id: pick(&self.id, &other.id),
            position: pick(&self.position, &other.position),
            x: pick(&self.x, &other.x),
            y: pick(&self.y, &other.y),
            width: pick(&self.width, &other.width),
            height: pick(&self.height, &other.height),
            visible: pick(&self.visible, &other.visible),
            border_style: pick(&self.border_style, &other.border_style),
            background_color: pick(&self.background_color, &other.background_color),
            border_color: pick(&self.border_color, &other.border_color),
            content: pick(&self.content, &other.content),
            fg: pick(&self.fg, &other.fg),
            bg: pick(&self.bg, &other.bg),
            selectable: pick(&self.selectable, &other.selectable),
            placeholder: pick(&self.placeholder, &other.placeholder),
            value: pick(&self.value, &other.value),
            max_length: pick(&self.max_length, &other.max_length),
            text_color: pick(&self.text_color, &other.text_color),
            focused_background_color: pick(
                &self.focused_background_color,
                &other.focused_background_color,
            ),
            focused_text_color: pick(&self.focused_text_color, &other.focused_text_color),
            on_input: pick(&self.on_input, &other.on_input),
            on_enter: pick(&self.on_enter, &other.on_enter),
            on_change: pick(&self.on_change, &other.on_change),
        }
    }

    // ── Builders: common ─────────────────────────────────────────────

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn position(mut self, position: Placement) -> Self {
        self.position = Some(position);
        self
    }

    pub fn x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn border_style(mut self, style: BorderStyle) -> Self {
        self.border_style = Some(style);
        self
    }

    // ── Builders: box ────────────────────────────────────────────────

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn border_color(mut self, color: impl Into<Color>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    // ── Builders: text ───────────────────────────────────────────────

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn fg(mut self, color: impl Into<Color>) -> Self {
        self.fg = Some(color.into());
        self
    }

    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = Some(selectable);
        self
    }

    // ── Builders: input ──────────────────────────────────────────────

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn text_color(mut self, color: impl Into<Color>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn focused_background_color(mut self, color: impl Into<Color>) -> Self {
        self.focused_background_color = Some(color.into());
        self
    }

    pub fn focused_text_color(mut self, color: impl Into<Color>) -> Self {
        self.focused_text_color = Some(color.into());
        self
    }

    // ── Builders: handlers ───────────────────────────────────────────

    /// Per-keystroke value handler.
    pub fn on_input(mut self, handler: impl Into<Handler>) -> Self {
        self.on_input = Some(handler.into());
        self
    }

    /// Confirm (Enter) handler.
    pub fn on_enter(mut self, handler: impl Into<Handler>) -> Self {
        self.on_enter = Some(handler.into());
        self
    }

    /// Blur/completion change handler.
    pub fn on_change(mut self, handler: impl Into<Handler>) -> Self {
        self.on_change = Some(handler.into());
        self
    }
}
