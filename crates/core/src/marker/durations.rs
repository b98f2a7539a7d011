//! Marker-to-marker durations.
//!
//! Each marker lasts until the next marker on the timeline; the last one
//! lasts until the end of the timeline.

use serde::{Deserialize, Serialize};

use super::marker::{Marker, MarkerColor};
use crate::timecode::codec::TimecodeCodec;

/// Duration given to a marker whose successor is not strictly after it.
pub const FALLBACK_DURATION: u64 = 1;

/// A marker paired with the span up to the next marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDuration {
    pub marker: Marker,
    /// Duration in frames.
    pub frames: u64,
    /// Duration rendered as timecode.
    pub timecode: String,
}

/// Keep the markers of one color, or all of them when `color` is `None`.
pub fn filter_by_color(markers: &[Marker], color: Option<MarkerColor>) -> Vec<Marker> {
    match color {
        Some(color) => markers
            .iter()
            .filter(|marker| marker.color == color)
            .cloned()
            .collect(),
        None => markers.to_vec(),
    }
}

/// Compute the duration of every marker, in timeline order.
///
/// `timeline_length` is the frame count from the timeline start to its end.
/// A marker at or past its successor (a duplicate position, or a marker
/// beyond the timeline end) gets [`FALLBACK_DURATION`].
pub fn marker_durations(
    markers: &[Marker],
    timeline_length: u64,
    codec: &TimecodeCodec,
) -> Vec<MarkerDuration> {
    let mut sorted = markers.to_vec();
    sorted.sort_by_key(|marker| marker.frame);

    log::debug!(
        "Computing durations for {} markers (timeline length {} frames at {})",
        sorted.len(),
        timeline_length,
        codec.frame_rate()
    );

    let ends: Vec<u64> = sorted
        .iter()
        .skip(1)
        .map(|marker| marker.frame)
        .chain(std::iter::once(timeline_length))
        .collect();

    sorted
        .into_iter()
        .zip(ends)
        .map(|(marker, end)| {
            let frames = match end.checked_sub(marker.frame) {
                Some(span) if span > 0 => span,
                _ => {
                    log::warn!(
                        "Marker {:?} at frame {} has no following span (next position {}), using {} frame",
                        marker.name,
                        marker.frame,
                        end,
                        FALLBACK_DURATION
                    );
                    FALLBACK_DURATION
                }
            };
            let timecode = codec.timecode_at(frames).to_string();
            MarkerDuration {
                marker,
                frames,
                timecode,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecode::frame_rate::{FrameRate, TimebaseConfig};

    fn codec_24() -> TimecodeCodec {
        TimecodeCodec::new(TimebaseConfig::new(FrameRate::Fps24, false))
    }

    #[test]
    fn test_successive_differences() {
        let markers = vec![
            Marker::new(0, MarkerColor::Blue),
            Marker::new(48, MarkerColor::Blue),
            Marker::new(120, MarkerColor::Blue),
        ];
        let durations = marker_durations(&markers, 240, &codec_24());

        let frames: Vec<u64> = durations.iter().map(|d| d.frames).collect();
        assert_eq!(frames, vec![48, 72, 120]);
        assert_eq!(durations[0].timecode, "00:00:02:00");
        assert_eq!(durations[1].timecode, "00:00:03:00");
        assert_eq!(durations[2].timecode, "00:00:05:00");
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let markers = vec![
            Marker::new(100, MarkerColor::Red).with_name("b"),
            Marker::new(10, MarkerColor::Red).with_name("a"),
        ];
        let durations = marker_durations(&markers, 150, &codec_24());
        assert_eq!(durations[0].marker.name, "a");
        assert_eq!(durations[0].frames, 90);
        assert_eq!(durations[1].marker.name, "b");
        assert_eq!(durations[1].frames, 50);
    }

    #[test]
    fn test_fallback_for_duplicates_and_overrun() {
        let markers = vec![
            Marker::new(10, MarkerColor::Green),
            Marker::new(10, MarkerColor::Green),
            Marker::new(500, MarkerColor::Green),
        ];
        let durations = marker_durations(&markers, 200, &codec_24());
        assert_eq!(durations[0].frames, FALLBACK_DURATION);
        assert_eq!(durations[1].frames, 490);
        assert_eq!(durations[2].frames, FALLBACK_DURATION);
        assert_eq!(durations[2].timecode, "00:00:00:01");
    }

    #[test]
    fn test_drop_frame_durations() {
        let codec = TimecodeCodec::new(TimebaseConfig::new(FrameRate::Fps29_97, true));
        let markers = vec![Marker::new(0, MarkerColor::Sky)];
        let durations = marker_durations(&markers, 1_800, &codec);
        assert_eq!(durations[0].timecode, "00:01:00;02");
    }

    #[test]
    fn test_empty_markers() {
        assert!(marker_durations(&[], 100, &codec_24()).is_empty());
    }

    #[test]
    fn test_filter_by_color() {
        let markers = vec![
            Marker::new(0, MarkerColor::Blue),
            Marker::new(10, MarkerColor::Red),
            Marker::new(20, MarkerColor::Blue),
        ];

        let blue = filter_by_color(&markers, Some(MarkerColor::Blue));
        assert_eq!(blue.len(), 2);
        assert!(blue.iter().all(|m| m.color == MarkerColor::Blue));

        assert_eq!(filter_by_color(&markers, None), markers);
        assert!(filter_by_color(&markers, Some(MarkerColor::Cream)).is_empty());
    }
}
