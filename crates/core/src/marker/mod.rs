//! Markers and the durations between them.

mod marker;

pub mod durations;

pub use durations::{filter_by_color, marker_durations, MarkerDuration, FALLBACK_DURATION};
pub use marker::{Marker, MarkerColor};
