//! The closed set of element types.

use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// Element type of a virtual node or live instance.
///
/// Every dispatch site matches on this exhaustively, so adding a variant
/// forces each of them to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Bordered, filled container (`box`).
    Box,
    /// Plain layout group (`group`).
    Group,
    /// Text leaf (`text`).
    Text,
    /// Single-line text input (`input`).
    Input,
}

impl Tag {
    /// Every tag.
    pub const ALL: [Tag; 4] = [Tag::Box, Tag::Group, Tag::Text, Tag::Input];

    /// Element type name as written in a view.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Box => "box",
            Tag::Group => "group",
            Tag::Text => "text",
            Tag::Input => "input",
        }
    }
}

impl FromStr for Tag {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(Tag::Box),
            "group" => Ok(Tag::Group),
            "text" => Ok(Tag::Text),
            "input" => Ok(Tag::Input),
            other => Err(HostError::UnrecognizedTag(other.to_owned())),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
