//! Conversion between SMPTE timecode and absolute frame counts.
//!
//! Drop-frame conversion uses the Duncan/Heidelberger method: at rates like
//! 29.97 the timecode labels `;00` and `;01` are skipped at the start of every
//! minute except each tenth minute, which keeps the displayed time aligned
//! with wall-clock time.
//!
//! Both conversions are pure functions of their input and the configured
//! [`TimebaseConfig`]. The integer rate used for arithmetic is derived per
//! call and never written back into the configuration.

use super::frame_rate::{FrameRate, TimebaseConfig};
use super::timecode::Timecode;
use crate::error::{Result, TimecodeError};

/// Frame-count layout of one drop-frame timebase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DropFrameLayout {
    time_base: u64,
    drop_frames: u64,
    frames_per_minute: u64,
    frames_per_10_minutes: u64,
    frames_per_24_hours: u64,
}

impl DropFrameLayout {
    fn new(rate: FrameRate) -> Self {
        let time_base = rate.nominal_fps();
        let drop_frames = rate.drop_frames_per_minute();
        let frames_per_minute = time_base * 60 - drop_frames;
        // One undropped minute plus nine dropped ones.
        let frames_per_10_minutes = frames_per_minute * 10 + drop_frames;

        Self {
            time_base,
            drop_frames,
            frames_per_minute,
            frames_per_10_minutes,
            frames_per_24_hours: frames_per_10_minutes * 6 * 24,
        }
    }
}

/// Converts between timecode strings and frame counts for one timebase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimecodeCodec {
    config: TimebaseConfig,
}

impl TimecodeCodec {
    pub fn new(config: TimebaseConfig) -> Self {
        Self { config }
    }

    /// Create a codec from a host rate identifier such as `"29.97"` or `"29"`.
    pub fn from_identifier(rate: &str, drop_frame: bool) -> Result<Self> {
        Ok(Self::new(TimebaseConfig::from_identifier(rate, drop_frame)?))
    }

    /// Switch to another rate and counting mode.
    ///
    /// On `UnsupportedRate` the previous configuration is kept.
    pub fn configure(&mut self, rate: &str, drop_frame: bool) -> Result<()> {
        self.config = TimebaseConfig::from_identifier(rate, drop_frame)?;
        Ok(())
    }

    pub fn set_config(&mut self, config: TimebaseConfig) {
        self.config = config;
    }

    pub fn config(&self) -> TimebaseConfig {
        self.config
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.config.frame_rate
    }

    pub fn is_drop_frame(&self) -> bool {
        self.config.drop_frame
    }

    /// Number of frames in one 24-hour drop-frame cycle, where the
    /// frame-to-timecode conversion wraps. `None` in non-drop-frame mode,
    /// which does not wrap.
    pub fn frames_per_24_hours(&self) -> Option<u64> {
        self.config
            .drop_frame
            .then(|| DropFrameLayout::new(self.config.frame_rate).frames_per_24_hours)
    }

    /// Convert a timecode string to an absolute frame count.
    ///
    /// Empty or absent input yields `Ok(None)`. Either separator is accepted
    /// before the frame field; the configured mode decides the arithmetic.
    pub fn frames_from_timecode<'a>(&self, tc: impl Into<Option<&'a str>>) -> Result<Option<u64>> {
        let tc = match tc.into().map(str::trim) {
            Some(tc) if !tc.is_empty() => tc,
            _ => return Ok(None),
        };

        let timecode: Timecode = tc.parse()?;
        let time_base = self.config.frame_rate.nominal_fps();
        if u64::from(timecode.frames) >= time_base {
            return Err(TimecodeError::RateMismatch {
                timecode: tc.to_string(),
                rate: self.config.frame_rate,
            });
        }

        self.frames_from(&timecode)
            .map(Some)
            .ok_or_else(|| TimecodeError::MalformedTimecode {
                timecode: tc.to_string(),
                reason: "out of range",
            })
    }

    /// Frame count of an already parsed timecode. The frame field is not
    /// checked against the rate. `None` when the count does not fit in a `u64`.
    pub fn frames_from(&self, timecode: &Timecode) -> Option<u64> {
        let time_base = self.config.frame_rate.nominal_fps();
        let total_minutes = timecode
            .hours
            .checked_mul(60)?
            .checked_add(u64::from(timecode.minutes))?;
        let seconds = u64::from(timecode.seconds);
        let frames = u64::from(timecode.frames);

        if self.config.drop_frame {
            let drop_frames = self.config.frame_rate.drop_frames_per_minute();
            let raw = total_minutes
                .checked_mul(60)?
                .checked_add(seconds)?
                .checked_mul(time_base)?
                .checked_add(frames)?;
            // Every minute holds at least `drop_frames` labels, so this never underflows.
            raw.checked_sub(drop_frames * (total_minutes - total_minutes / 10))
        } else {
            total_minutes
                .checked_mul(60)?
                .checked_add(seconds)?
                .checked_mul(time_base)?
                .checked_add(frames)
        }
    }

    /// Convert a frame count to a timecode string.
    ///
    /// The sign is discarded: `-48` renders like `48`. Drop-frame output wraps
    /// every 24 hours; non-drop-frame output keeps counting hours.
    pub fn timecode_from_frames(&self, frames: i64) -> String {
        self.timecode_at(frames.unsigned_abs()).to_string()
    }

    /// Structured form of [`timecode_from_frames`](Self::timecode_from_frames).
    pub fn timecode_at(&self, frames: u64) -> Timecode {
        if self.config.drop_frame {
            self.drop_frame_timecode(frames)
        } else {
            self.non_drop_timecode(frames)
        }
    }

    fn drop_frame_timecode(&self, frames: u64) -> Timecode {
        let layout = DropFrameLayout::new(self.config.frame_rate);
        let drop_frames = layout.drop_frames;

        let mut frames = frames % layout.frames_per_24_hours;
        let d = frames / layout.frames_per_10_minutes;
        let m = frames % layout.frames_per_10_minutes;

        // Re-insert the skipped labels so plain division yields the display fields.
        if m > drop_frames {
            frames += drop_frames * 9 * d
                + drop_frames * ((m - drop_frames) / layout.frames_per_minute);
        } else {
            frames += drop_frames * 9 * d;
        }

        let time_base = layout.time_base;
        let total_seconds = frames / time_base;
        Timecode {
            hours: total_seconds / 3600,
            minutes: ((total_seconds / 60) % 60) as u32,
            seconds: (total_seconds % 60) as u32,
            frames: (frames % time_base) as u32,
            drop_frame: true,
        }
    }

    fn non_drop_timecode(&self, frames: u64) -> Timecode {
        let time_base = self.config.frame_rate.nominal_fps();
        let frames_per_hour = time_base * 3600;
        let frames_per_minute = time_base * 60;

        let hours = frames / frames_per_hour;
        let remainder = frames - hours * frames_per_hour;
        let minutes = remainder / frames_per_minute;
        let remainder = remainder - minutes * frames_per_minute;
        let seconds = remainder / time_base;

        Timecode {
            hours,
            minutes: minutes as u32,
            seconds: seconds as u32,
            frames: (remainder - seconds * time_base) as u32,
            drop_frame: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(rate: &str, drop_frame: bool) -> TimecodeCodec {
        TimecodeCodec::from_identifier(rate, drop_frame).unwrap()
    }

    #[test]
    fn test_default_is_24_non_drop() {
        let codec = TimecodeCodec::default();
        assert_eq!(codec.frame_rate(), FrameRate::Fps24);
        assert!(!codec.is_drop_frame());
    }

    #[test]
    fn test_configure_rejects_unknown_rate_and_keeps_previous() {
        let mut codec = codec("25", false);
        let err = codec.configure("31", true).unwrap_err();
        assert_eq!(err, TimecodeError::UnsupportedRate("31".to_string()));
        assert_eq!(codec.config(), TimebaseConfig::new(FrameRate::Fps25, false));

        codec.configure("29", true).unwrap();
        assert_eq!(codec.config(), TimebaseConfig::new(FrameRate::Fps29_97, true));
    }

    #[test]
    fn test_non_drop_frames_from_timecode() {
        let codec = codec("24", false);
        assert_eq!(codec.frames_from_timecode("00:00:02:00").unwrap(), Some(48));
        assert_eq!(codec.frames_from_timecode("01:00:00:00").unwrap(), Some(86_400));
        assert_eq!(codec.frames_from_timecode("00:01:01:23").unwrap(), Some(1_487));
    }

    #[test]
    fn test_fractional_non_drop_uses_rounded_rate() {
        let codec = codec("29.97", false);
        assert_eq!(codec.frames_from_timecode("00:01:00:00").unwrap(), Some(1_800));
        assert_eq!(codec.timecode_from_frames(1_800), "00:01:00:00");
    }

    #[test]
    fn test_empty_input_is_no_value() {
        let codec = codec("24", false);
        assert_eq!(codec.frames_from_timecode("").unwrap(), None);
        assert_eq!(codec.frames_from_timecode(None::<&str>).unwrap(), None);
        assert_eq!(codec.frames_from_timecode("   ").unwrap(), None);
    }

    #[test]
    fn test_rate_mismatch() {
        let codec = codec("24", false);
        let err = codec.frames_from_timecode("00:00:00:30").unwrap_err();
        assert_eq!(
            err,
            TimecodeError::RateMismatch {
                timecode: "00:00:00:30".to_string(),
                rate: FrameRate::Fps24,
            }
        );
        assert!(codec.frames_from_timecode("00:00:00:24").is_err());
        assert_eq!(codec.frames_from_timecode("00:00:00:23").unwrap(), Some(23));
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let codec = codec("24", false);
        assert!(matches!(
            codec.frames_from_timecode("1:00:00:00"),
            Err(TimecodeError::MalformedTimecode { .. })
        ));
    }

    #[test]
    fn test_zero_frames() {
        for rate in FrameRate::ALL {
            let codec = TimecodeCodec::new(TimebaseConfig::new(rate, false));
            assert_eq!(codec.timecode_from_frames(0), "00:00:00:00");
        }
        assert_eq!(codec("29.97", true).timecode_from_frames(0), "00:00:00;00");
    }

    #[test]
    fn test_negative_frames_are_coerced() {
        let codec = codec("24", false);
        assert_eq!(codec.timecode_from_frames(-48), "00:00:02:00");
        assert_eq!(codec.timecode_from_frames(48), "00:00:02:00");
    }

    #[test]
    fn test_separator_follows_mode() {
        assert_eq!(codec("29.97", true).timecode_from_frames(100), "00:00:03;10");
        assert_eq!(codec("29.97", false).timecode_from_frames(100), "00:00:03:10");
    }

    #[test]
    fn test_drop_frame_minute_boundary() {
        let codec = codec("29.97", true);
        assert_eq!(codec.timecode_from_frames(1_798), "00:00:59;28");
        assert_eq!(codec.timecode_from_frames(1_799), "00:00:59;29");
        assert_eq!(codec.timecode_from_frames(1_800), "00:01:00;02");
        assert_eq!(codec.frames_from_timecode("00:01:00;02").unwrap(), Some(1_800));
    }

    #[test]
    fn test_drop_frame_tenth_minute_keeps_labels() {
        let codec = codec("29.97", true);
        // 10 minutes of 29.97 DF is 17982 frames.
        assert_eq!(codec.timecode_from_frames(17_981), "00:09:59;29");
        assert_eq!(codec.timecode_from_frames(17_982), "00:10:00;00");
        assert_eq!(codec.timecode_from_frames(17_983), "00:10:00;01");
        assert_eq!(codec.frames_from_timecode("00:10:00;00").unwrap(), Some(17_982));

        // Minute 11 drops again.
        let eleven = codec.frames_from_timecode("00:11:00;02").unwrap().unwrap();
        assert_eq!(codec.timecode_from_frames(eleven as i64 - 1), "00:10:59;29");
    }

    #[test]
    fn test_drop_frame_one_hour() {
        let codec = codec("29.97", true);
        assert_eq!(codec.frames_from_timecode("01:00:00;00").unwrap(), Some(107_892));
        assert_eq!(codec.timecode_from_frames(107_892), "01:00:00;00");
    }

    #[test]
    fn test_drop_frame_59_94_drops_four() {
        let codec = codec("59.94", true);
        assert_eq!(codec.timecode_from_frames(3_599), "00:00:59;59");
        assert_eq!(codec.timecode_from_frames(3_600), "00:01:00;04");
    }

    #[test]
    fn test_drop_frame_23_976_ten_minute_block() {
        let codec = codec("23.976", true);
        assert_eq!(codec.timecode_from_frames(14_382), "00:10:00;00");
        assert_eq!(codec.timecode_from_frames(14_384), "00:10:00;02");
        assert_eq!(codec.frames_from_timecode("00:10:00;02").unwrap(), Some(14_384));
        assert_eq!(codec.frames_per_24_hours(), Some(14_382 * 144));
    }

    #[test]
    fn test_drop_frame_wraps_at_24_hours() {
        let codec = codec("29.97", true);
        let day = codec.frames_per_24_hours().unwrap();
        assert_eq!(day, 2_589_408);
        assert_eq!(codec.timecode_from_frames(day as i64), "00:00:00;00");
        assert_eq!(codec.timecode_from_frames(day as i64 + 1_800), "00:01:00;02");
    }

    #[test]
    fn test_non_drop_does_not_wrap() {
        let codec = codec("24", false);
        assert_eq!(codec.frames_per_24_hours(), None);
        assert_eq!(codec.timecode_from_frames(24 * 86_400), "24:00:00:00");
        assert_eq!(codec.timecode_from_frames(24 * 3600 * 100), "100:00:00:00");
    }

    #[test]
    fn test_high_rate_three_digit_frames() {
        let codec = codec("120", false);
        assert_eq!(codec.timecode_from_frames(119), "00:00:00:119");
        assert_eq!(codec.frames_from_timecode("00:00:00:119").unwrap(), Some(119));
    }

    #[test]
    fn test_frames_from_out_of_range_hours() {
        let huge = Timecode::new(u64::MAX / 10, 0, 0, 0, false);
        assert_eq!(codec("24", false).frames_from(&huge), None);
        assert_eq!(codec("29.97", true).frames_from(&huge), None);

        let hour = Timecode::new(1, 0, 0, 0, true);
        assert_eq!(codec("29.97", true).frames_from(&hour), Some(107_892));
    }

    #[test]
    fn test_conversion_leaves_config_untouched() {
        let codec = codec("23.976", false);
        codec.frames_from_timecode("00:00:01:00").unwrap();
        codec.timecode_from_frames(1_000);
        assert_eq!(codec.frame_rate(), FrameRate::Fps23_976);
        assert!((codec.frame_rate().as_f64() - 23.976).abs() < 1e-9);
    }
}
