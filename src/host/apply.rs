//! Attribute applier: merge an attribute bag onto a live instance.
//!
//! Only attributes present in the bag are written. Applying the same bag twice
//! leaves the instance exactly as after the first application. Kind-specific
//! attributes that do not belong to the instance's kind are skipped.

use tracing::trace;

use crate::dom::node::{BoxProps, CommonProps, InputProps, Instance, InstanceKind, TextProps};
use crate::vnode::attrs::Attributes;
use crate::vnode::tag::Tag;

/// Apply `attrs` onto `instance`.
pub fn apply(instance: &mut Instance, attrs: &Attributes) {
    skip_foreign(instance, attrs);
    apply_common(&mut instance.common, attrs);
    match &mut instance.kind {
        InstanceKind::Box(props) => apply_box(props, attrs),
        InstanceKind::Group => {}
        InstanceKind::Text(props) => apply_text(props, attrs),
        InstanceKind::Input(props) => apply_input(props, attrs),
    }
}

fn apply_common(common: &mut CommonProps, attrs: &Attributes) {
    if let Some(position) = attrs.position {
        common.position = position;
    }
    if let Some(x) = attrs.x {
        common.x = x;
    }
    if let Some(y) = attrs.y {
        common.y = y;
    }
    if let Some(width) = attrs.width {
        common.width = width;
    }
    if let Some(height) = attrs.height {
        common.height = height;
    }
    if let Some(visible) = attrs.visible {
        common.visible = visible;
    }
    if let Some(style) = attrs.border_style {
        common.border_style = style;
    }
}

fn apply_box(props: &mut BoxProps, attrs: &Attributes) {
    if let Some(color) = attrs.background_color {
        props.background_color = color;
    }
    if let Some(color) = attrs.border_color {
        props.border_color = color;
    }
}

fn apply_text(props: &mut TextProps, attrs: &Attributes) {
    if let Some(content) = &attrs.content {
        props.content.clone_from(content);
    }
    if let Some(fg) = attrs.fg {
        props.fg = Some(fg);
    }
    if let Some(bg) = attrs.bg {
        props.bg = Some(bg);
    }
    if let Some(selectable) = attrs.selectable {
        props.selectable = selectable;
    }
}

fn apply_input(props: &mut InputProps, attrs: &Attributes) {
    if let Some(placeholder) = &attrs.placeholder {
        props.placeholder.clone_from(placeholder);
    }
    // Limit first so a value arriving in the same bag is truncated to it.
    if let Some(max) = attrs.max_length {
        props.editor.set_max_length(Some(max));
    }
    if let Some(value) = &attrs.value {
        if props.editor.value() != value {
            props.editor.set_value(value.as_str());
        }
    }
    if let Some(color) = attrs.text_color {
        props.text_color = Some(color);
    }
    if let Some(color) = attrs.focused_background_color {
        props.focused_background_color = Some(color);
    }
    if let Some(color) = attrs.focused_text_color {
        props.focused_text_color = Some(color);
    }
}

fn has_box_attrs(a: &Attributes) -> bool {
    a.background_color.is_some() || a.border_color.is_some()
}

fn has_text_attrs(a: &Attributes) -> bool {
    a.content.is_some() || a.fg.is_some() || a.bg.is_some() || a.selectable.is_some()
}

fn has_input_attrs(a: &Attributes) -> bool {
    a.placeholder.is_some()
        || a.value.is_some()
        || a.max_length.is_some()
        || a.text_color.is_some()
        || a.focused_background_color.is_some()
        || a.focused_text_color.is_some()
}

/// Log kind-specific attributes the instance's kind does not own.
fn skip_foreign(instance: &Instance, attrs: &Attributes) {
    let tag = instance.tag();
    let foreign = [
        (Tag::Box, has_box_attrs(attrs)),
        (Tag::Text, has_text_attrs(attrs)),
        (Tag::Input, has_input_attrs(attrs)),
    ];
    for (owner, present) in foreign {
        if present && owner != tag {
            trace!(
                instance = instance.identity(),
                kind = %tag,
                %owner,
                "ignored attributes of another kind"
            );
        }
    }
}
