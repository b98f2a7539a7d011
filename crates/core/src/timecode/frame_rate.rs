//! Supported nominal frame rates and the timebase a codec is configured with.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TimecodeError;

/// Frames dropped per affected minute, as a fraction of the nominal rate.
const DROP_FRAME_FACTOR: f64 = 0.066666;

/// Nominal frame rates a timeline can run at.
///
/// Each rate serialises as its display identifier (`"29.97"`). The truncated
/// identifiers reported by editing hosts (`"29"`, `"24.0"`) are accepted as
/// aliases when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameRate {
    #[serde(rename = "16")]
    Fps16,
    #[serde(rename = "18")]
    Fps18,
    #[serde(rename = "23.976", alias = "23")]
    Fps23_976,
    #[serde(rename = "24", alias = "24.0")]
    Fps24,
    #[serde(rename = "25")]
    Fps25,
    #[serde(rename = "29.97", alias = "29")]
    Fps29_97,
    #[serde(rename = "30", alias = "30.0")]
    Fps30,
    #[serde(rename = "47.952", alias = "47")]
    Fps47_952,
    #[serde(rename = "48")]
    Fps48,
    #[serde(rename = "50")]
    Fps50,
    #[serde(rename = "59.94", alias = "59")]
    Fps59_94,
    #[serde(rename = "60")]
    Fps60,
    #[serde(rename = "72")]
    Fps72,
    #[serde(rename = "95.904", alias = "95")]
    Fps95_904,
    #[serde(rename = "96")]
    Fps96,
    #[serde(rename = "100")]
    Fps100,
    #[serde(rename = "119.88", alias = "119")]
    Fps119_88,
    #[serde(rename = "120")]
    Fps120,
}

/// Identifier lookup table. Canonical identifiers first, host aliases after.
static RATE_TABLE: &[(&str, FrameRate)] = &[
    ("16", FrameRate::Fps16),
    ("18", FrameRate::Fps18),
    ("23.976", FrameRate::Fps23_976),
    ("24", FrameRate::Fps24),
    ("25", FrameRate::Fps25),
    ("29.97", FrameRate::Fps29_97),
    ("30", FrameRate::Fps30),
    ("47.952", FrameRate::Fps47_952),
    ("48", FrameRate::Fps48),
    ("50", FrameRate::Fps50),
    ("59.94", FrameRate::Fps59_94),
    ("60", FrameRate::Fps60),
    ("72", FrameRate::Fps72),
    ("95.904", FrameRate::Fps95_904),
    ("96", FrameRate::Fps96),
    ("100", FrameRate::Fps100),
    ("119.88", FrameRate::Fps119_88),
    ("120", FrameRate::Fps120),
    // Host aliases
    ("23", FrameRate::Fps23_976),
    ("24.0", FrameRate::Fps24),
    ("29", FrameRate::Fps29_97),
    ("30.0", FrameRate::Fps30),
    ("47", FrameRate::Fps47_952),
    ("59", FrameRate::Fps59_94),
    ("95", FrameRate::Fps95_904),
    ("119", FrameRate::Fps119_88),
];

impl FrameRate {
    /// Every supported rate in ascending order.
    pub const ALL: [FrameRate; 18] = [
        FrameRate::Fps16,
        FrameRate::Fps18,
        FrameRate::Fps23_976,
        FrameRate::Fps24,
        FrameRate::Fps25,
        FrameRate::Fps29_97,
        FrameRate::Fps30,
        FrameRate::Fps47_952,
        FrameRate::Fps48,
        FrameRate::Fps50,
        FrameRate::Fps59_94,
        FrameRate::Fps60,
        FrameRate::Fps72,
        FrameRate::Fps95_904,
        FrameRate::Fps96,
        FrameRate::Fps100,
        FrameRate::Fps119_88,
        FrameRate::Fps120,
    ];

    /// Look up a rate by identifier, including host aliases.
    pub fn from_identifier(id: &str) -> Option<Self> {
        let id = id.trim();
        RATE_TABLE
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, rate)| *rate)
    }

    /// Canonical display identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Fps16 => "16",
            Self::Fps18 => "18",
            Self::Fps23_976 => "23.976",
            Self::Fps24 => "24",
            Self::Fps25 => "25",
            Self::Fps29_97 => "29.97",
            Self::Fps30 => "30",
            Self::Fps47_952 => "47.952",
            Self::Fps48 => "48",
            Self::Fps50 => "50",
            Self::Fps59_94 => "59.94",
            Self::Fps60 => "60",
            Self::Fps72 => "72",
            Self::Fps95_904 => "95.904",
            Self::Fps96 => "96",
            Self::Fps100 => "100",
            Self::Fps119_88 => "119.88",
            Self::Fps120 => "120",
        }
    }

    /// Frames per second as a floating point value.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Fps16 => 16.0,
            Self::Fps18 => 18.0,
            Self::Fps23_976 => 23.976,
            Self::Fps24 => 24.0,
            Self::Fps25 => 25.0,
            Self::Fps29_97 => 29.97,
            Self::Fps30 => 30.0,
            Self::Fps47_952 => 47.952,
            Self::Fps48 => 48.0,
            Self::Fps50 => 50.0,
            Self::Fps59_94 => 59.94,
            Self::Fps60 => 60.0,
            Self::Fps72 => 72.0,
            Self::Fps95_904 => 95.904,
            Self::Fps96 => 96.0,
            Self::Fps100 => 100.0,
            Self::Fps119_88 => 119.88,
            Self::Fps120 => 120.0,
        }
    }

    /// Integer frames per second used for timecode arithmetic.
    pub fn nominal_fps(&self) -> u64 {
        self.as_f64().round() as u64
    }

    /// Frame numbers skipped at the start of each affected minute in drop-frame mode.
    pub fn drop_frames_per_minute(&self) -> u64 {
        (self.as_f64() * DROP_FRAME_FACTOR).round() as u64
    }

    /// True for the NTSC-style rates that drop-frame timecode is meant for.
    pub fn is_fractional(&self) -> bool {
        self.as_f64().fract() != 0.0
    }

    /// Wall-clock duration of a single frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.as_f64())
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::Fps24
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for FrameRate {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| TimecodeError::UnsupportedRate(s.to_string()))
    }
}

/// Rate and counting mode a codec converts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimebaseConfig {
    pub frame_rate: FrameRate,
    pub drop_frame: bool,
}

impl TimebaseConfig {
    pub fn new(frame_rate: FrameRate, drop_frame: bool) -> Self {
        Self {
            frame_rate,
            drop_frame,
        }
    }

    /// Build a config from a host rate identifier.
    pub fn from_identifier(rate: &str, drop_frame: bool) -> Result<Self, TimecodeError> {
        Ok(Self::new(rate.parse()?, drop_frame))
    }

    /// Real elapsed seconds for a frame count at the precise (not nominal) rate.
    pub fn frames_to_seconds(&self, frames: u64) -> f64 {
        frames as f64 / self.frame_rate.as_f64()
    }
}
