//! Instance factory: build a live instance of the right kind from a tag name
//! and its initial attribute bag.

use tracing::trace;

use super::{apply, events};
use crate::config::HostOptions;
use crate::dom::node::{BoxProps, CommonProps, Instance, InstanceKind, TextProps};
use crate::error::Result;
use crate::vnode::attrs::{Attributes, BorderStyle, Placement};
use crate::vnode::tag::Tag;

/// Construct an unattached instance for `tag`.
///
/// Kind defaults from `options` are laid down first, then `attrs` is merged on
/// top and its handlers are bound. An unknown tag fails before anything is
/// built.
pub fn create(tag: &str, attrs: &Attributes, options: &HostOptions) -> Result<Instance> {
    let tag: Tag = tag.parse()?;
    let identity = attrs.id.clone().unwrap_or_else(|| tag.name().to_owned());

    let (kind, common) = defaults(tag, options);
    let mut instance = Instance::new(identity, kind, common);
    apply::apply(&mut instance, attrs);
    let bound = events::bind(&mut instance, attrs);

    trace!(instance = instance.identity(), %tag, bound, "created");
    Ok(instance)
}

/// Kind-specific state and common fields before any attribute is applied.
fn defaults(tag: Tag, options: &HostOptions) -> (InstanceKind, CommonProps) {
    match tag {
        Tag::Box => {
            let (width, height) = options.box_size;
            let common = CommonProps {
                position: Placement::Absolute,
                border_style: BorderStyle::Single,
                ..CommonProps::relative().sized(width, height)
            };
            let props = BoxProps {
                background_color: options.box_background,
                border_color: options.box_border_color,
            };
            (InstanceKind::Box(props), common)
        }
        Tag::Group => (InstanceKind::Group, CommonProps::relative()),
        Tag::Text => {
            let props = TextProps {
                content: String::new(),
                fg: None,
                bg: None,
                selectable: options.text_selectable,
            };
            (InstanceKind::Text(props), CommonProps::relative())
        }
        Tag::Input => {
            let (width, height) = options.input_size;
            (
                InstanceKind::Input(Box::default()),
                CommonProps::relative().sized(width, height),
            )
        }
    }
}
