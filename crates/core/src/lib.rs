//! SMPTE timecode conversion.
//!
//! Converts between `HH:MM:SS:FF` timecode and absolute frame counts in
//! non-drop-frame and drop-frame modes, across the frame rates an editing
//! host offers. Also computes marker-to-marker durations on a timeline.
//!
//! ```
//! use smpte_core::TimecodeCodec;
//!
//! let codec = TimecodeCodec::from_identifier("29.97", true).unwrap();
//! assert_eq!(codec.timecode_from_frames(1800), "00:01:00;02");
//! assert_eq!(codec.frames_from_timecode("00:01:00;02").unwrap(), Some(1800));
//! ```

pub use error::{Result, TimecodeError};
pub use marker::{
    filter_by_color, marker_durations, Marker, MarkerColor, MarkerDuration, FALLBACK_DURATION,
};
pub use timecode::codec::TimecodeCodec;
pub use timecode::frame_rate::{FrameRate, TimebaseConfig};
pub use timecode::timecode::{Timecode, DF_SEPARATOR, NDF_SEPARATOR};

mod error;
pub mod marker;
mod timecode;
