use thiserror::Error;

use crate::timecode::frame_rate::FrameRate;

/// Errors returned by timecode and marker conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimecodeError {
    #[error("Unsupported frame rate: {0}")]
    UnsupportedRate(String),

    #[error("Timecode {timecode} does not fit frame rate {rate}")]
    RateMismatch { timecode: String, rate: FrameRate },

    #[error("Malformed timecode {timecode:?}: {reason}")]
    MalformedTimecode {
        timecode: String,
        reason: &'static str,
    },

    #[error("Unknown marker color: {0}")]
    UnknownMarkerColor(String),
}

pub type Result<T> = std::result::Result<T, TimecodeError>;
