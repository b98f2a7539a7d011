use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimecodeError;

/// Marker colors offered by the editing host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerColor {
    Blue,
    Cyan,
    Green,
    Yellow,
    Red,
    Pink,
    Purple,
    Fuchsia,
    Rose,
    Lavender,
    Sky,
    Mint,
    Lemon,
    Sand,
    Cocoa,
    Chocolate,
    Cream,
}

impl MarkerColor {
    /// All colors in the order the host lists them.
    pub const ALL: [MarkerColor; 17] = [
        MarkerColor::Blue,
        MarkerColor::Cyan,
        MarkerColor::Green,
        MarkerColor::Yellow,
        MarkerColor::Red,
        MarkerColor::Pink,
        MarkerColor::Purple,
        MarkerColor::Fuchsia,
        MarkerColor::Rose,
        MarkerColor::Lavender,
        MarkerColor::Sky,
        MarkerColor::Mint,
        MarkerColor::Lemon,
        MarkerColor::Sand,
        MarkerColor::Cocoa,
        MarkerColor::Chocolate,
        MarkerColor::Cream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Cyan => "Cyan",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Pink => "Pink",
            Self::Purple => "Purple",
            Self::Fuchsia => "Fuchsia",
            Self::Rose => "Rose",
            Self::Lavender => "Lavender",
            Self::Sky => "Sky",
            Self::Mint => "Mint",
            Self::Lemon => "Lemon",
            Self::Sand => "Sand",
            Self::Cocoa => "Cocoa",
            Self::Chocolate => "Chocolate",
            Self::Cream => "Cream",
        }
    }
}

impl Default for MarkerColor {
    fn default() -> Self {
        Self::Blue
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerColor {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| TimecodeError::UnknownMarkerColor(s.to_string()))
    }
}

/// A timeline marker, positioned in frames from the timeline start.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Marker {
    pub frame: u64,
    pub color: MarkerColor,
    pub name: String,
    pub note: String,
}

impl Marker {
    pub fn new(frame: u64, color: MarkerColor) -> Self {
        Self {
            frame,
            color,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
