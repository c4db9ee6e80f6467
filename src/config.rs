//! Host configuration: construction defaults per kind and commit behaviour.

use crate::color::Color;

/// Defaults the factory applies before an instance's attributes are merged,
/// plus root-level behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct HostOptions {
    /// Size of a box whose bag gives no width/height.
    pub box_size: (u16, u16),
    /// Fill of a box whose bag gives no background color.
    pub box_background: Color,
    /// Border color of a box whose bag gives none.
    pub box_border_color: Color,
    /// Size of an input whose bag gives no width/height.
    pub input_size: (u16, u16),
    /// Whether text instances are selectable unless told otherwise.
    pub text_selectable: bool,
    /// Whether the root asks the surface for a frame after every commit.
    pub render_on_commit: bool,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            box_size: (20, 10),
            box_background: Color::rgb(20, 20, 40),
            box_border_color: Color::WHITE,
            input_size: (20, 3),
            text_selectable: true,
            render_on_commit: true,
        }
    }
}

impl HostOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default box size (builder).
    pub fn with_box_size(mut self, width: u16, height: u16) -> Self {
        self.box_size = (width, height);
        self
    }

    /// Set the default box fill (builder).
    pub fn with_box_background(mut self, color: impl Into<Color>) -> Self {
        self.box_background = color.into();
        self
    }

    /// Set the default box border color (builder).
    pub fn with_box_border_color(mut self, color: impl Into<Color>) -> Self {
        self.box_border_color = color.into();
        self
    }

    /// Set the default input size (builder).
    pub fn with_input_size(mut self, width: u16, height: u16) -> Self {
        self.input_size = (width, height);
        self
    }

    pub fn with_text_selectable(mut self, selectable: bool) -> Self {
        self.text_selectable = selectable;
        self
    }

    pub fn with_render_on_commit(mut self, render: bool) -> Self {
        self.render_on_commit = render;
        self
    }
}
