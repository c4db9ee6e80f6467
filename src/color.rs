//! Color attribute values.
//!
//! Colors arrive in attribute bags either as strings (`#rrggbb`, `#rgb`, or a
//! named color) or as RGBA integers. They are stored as crossterm colors so a
//! surface can hand them straight to the terminal.

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color as TermColor;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color plus an alpha channel.
///
/// Alpha is kept for surfaces that blend; the core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    term: TermColor,
    alpha: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Build an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            term: TermColor::Rgb { r, g, b },
            alpha: 255,
        }
    }

    /// Build a color from RGBA integer channels.
    pub const fn from_ints(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            term: TermColor::Rgb { r, g, b },
            alpha: a,
        }
    }

    /// The crossterm color.
    pub fn term(&self) -> TermColor {
        self.term
    }

    /// The alpha channel (255 = opaque).
    pub fn alpha(&self) -> u8 {
        self.alpha
    }
}

impl From<TermColor> for Color {
    fn from(term: TermColor) -> Self {
        Self { term, alpha: 255 }
    }
}

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        color.term
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            TermColor::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            other => write!(f, "{}", format!("{other:?}").to_ascii_lowercase()),
        }
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
            .map(Color::from)
            .ok_or_else(|| ParseColorError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Supports `#rrggbb`, `#rgb`, and the sixteen terminal color names
/// (case-insensitive, with or without underscores). Returns `None` otherwise.
pub fn parse_color(s: &str) -> Option<TermColor> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    match s.to_ascii_lowercase().as_str() {
        "black" => Some(TermColor::Black),
        "red" => Some(TermColor::Red),
        "green" => Some(TermColor::Green),
        "yellow" => Some(TermColor::Yellow),
        "blue" => Some(TermColor::Blue),
        "magenta" => Some(TermColor::Magenta),
        "cyan" => Some(TermColor::Cyan),
        "white" => Some(TermColor::White),
        "dark_red" | "darkred" => Some(TermColor::DarkRed),
        "dark_green" | "darkgreen" => Some(TermColor::DarkGreen),
        "dark_yellow" | "darkyellow" => Some(TermColor::DarkYellow),
        "dark_blue" | "darkblue" => Some(TermColor::DarkBlue),
        "dark_magenta" | "darkmagenta" => Some(TermColor::DarkMagenta),
        "dark_cyan" | "darkcyan" => Some(TermColor::DarkCyan),
        "dark_grey" | "dark_gray" | "darkgrey" | "darkgray" => Some(TermColor::DarkGrey),
        "grey" | "gray" => Some(TermColor::Grey),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<TermColor> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(TermColor::Rgb { r, g, b })
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // 0xA -> 0xAA
            Some(TermColor::Rgb {
                r: r * 17,
                g: g * 17,
                b: b * 17,
            })
        }
        _ => None,
    }
}
