//! Marker duration example.
//!
//! Sizes a handful of markers on a 29.97 drop-frame timeline, the way an
//! editing host script would before writing durations back to its markers.
//!
//! Usage:
//!   cargo run --package smpte-core --example marker_durations

use smpte_core::{filter_by_color, marker_durations, Marker, MarkerColor, TimecodeCodec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // Host timelines report "29" for 29.97.
    let codec = TimecodeCodec::from_identifier("29", true)?;

    let timeline_end = codec
        .frames_from_timecode("00:12:00;00")?
        .ok_or("timeline end is empty")?;

    let markers = vec![
        Marker::new(0, MarkerColor::Blue).with_name("Open"),
        Marker::new(1_800, MarkerColor::Red).with_name("Interview"),
        Marker::new(17_982, MarkerColor::Blue).with_name("B-roll"),
        Marker::new(19_000, MarkerColor::Blue).with_name("Close"),
    ];

    let blue = filter_by_color(&markers, Some(MarkerColor::Blue));
    println!("{} blue markers found.", blue.len());

    for duration in marker_durations(&blue, timeline_end, &codec) {
        println!(
            "{:<10} at {}  lasts {} ({} frames)",
            duration.marker.name,
            codec.timecode_at(duration.marker.frame),
            duration.timecode,
            duration.frames
        );
    }

    Ok(())
}
