use std::fmt;
use std::str::FromStr;

use crate::error::TimecodeError;

/// Separator between seconds and frames in non-drop-frame timecode.
pub const NDF_SEPARATOR: char = ':';
/// Separator between seconds and frames in drop-frame timecode.
pub const DF_SEPARATOR: char = ';';

/// A parsed `HH:MM:SS:FF` (or `HH:MM:SS;FF`) timecode.
///
/// Fields are ordered so that comparing two timecodes compares their
/// position on the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
    pub drop_frame: bool,
}

impl Timecode {
    pub fn new(hours: u64, minutes: u32, seconds: u32, frames: u32, drop_frame: bool) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
            drop_frame,
        }
    }

    /// Separator written before the frame field.
    pub fn frame_separator(&self) -> char {
        if self.drop_frame {
            DF_SEPARATOR
        } else {
            NDF_SEPARATOR
        }
    }

    /// Minutes elapsed since 00:00, counting hours. Saturates at `u64::MAX`.
    pub fn total_minutes(&self) -> u64 {
        self.hours
            .saturating_mul(60)
            .saturating_add(u64::from(self.minutes))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours,
            self.minutes,
            self.seconds,
            self.frame_separator(),
            self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    /// Parses the fixed-width layout `HH:MM:SS:FF`. Fields sit at fixed
    /// offsets; the frame field runs to the end of the string so rates above
    /// 99 fps can carry three digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| TimecodeError::MalformedTimecode {
            timecode: s.to_string(),
            reason,
        };

        let bytes = s.as_bytes();
        if bytes.len() < 10 {
            return Err(malformed("expected HH:MM:SS:FF"));
        }
        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(malformed("expected ':' after hours and minutes"));
        }
        let drop_frame = match bytes[8] {
            b':' => false,
            b';' => true,
            _ => return Err(malformed("expected ':' or ';' before frames")),
        };

        let hours = parse_field(&bytes[0..2]).ok_or_else(|| malformed("invalid hours"))?;
        let minutes = parse_field(&bytes[3..5]).ok_or_else(|| malformed("invalid minutes"))?;
        let seconds = parse_field(&bytes[6..8]).ok_or_else(|| malformed("invalid seconds"))?;
        let frames = parse_field(&bytes[9..]).ok_or_else(|| malformed("invalid frames"))?;

        Ok(Self {
            hours: u64::from(hours),
            minutes,
            seconds,
            frames,
            drop_frame,
        })
    }
}

fn parse_field(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits.iter().try_fold(0u32, |acc, d| {
        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
    })
}
