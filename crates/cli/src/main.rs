use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use smpte_core::{
    filter_by_color, marker_durations, FrameRate, Marker, MarkerColor, TimebaseConfig,
    TimecodeCodec,
};

mod config;

use config::{ConfigManager, Settings};

/// Convert between SMPTE timecode and frame counts.
#[derive(Parser, Debug)]
#[command(name = "smpte")]
#[command(about = "SMPTE timecode converter")]
struct Args {
    /// Frame rate identifier, e.g. 23.976, 29.97 or 25 (defaults to the configured rate)
    #[arg(long, global = true)]
    rate: Option<String>,

    /// Count in drop-frame timecode
    #[arg(long, global = true)]
    drop_frame: bool,

    /// Count in non-drop-frame timecode, even if drop-frame is configured
    #[arg(long, global = true, conflicts_with = "drop_frame")]
    non_drop_frame: bool,

    /// Settings file (default: <config dir>/smpte/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a timecode (HH:MM:SS:FF or HH:MM:SS;FF) to a frame count
    Frames { timecode: String },

    /// Convert a frame count to a timecode
    Timecode {
        #[arg(allow_negative_numbers = true)]
        frames: i64,
    },

    /// Print the duration from each marker to the next one
    Durations {
        /// Timeline length in frames
        #[arg(long)]
        length: u64,

        /// Only size markers of this color
        #[arg(long)]
        color: Option<String>,

        /// Marker positions as FRAME or FRAME:COLOR
        #[arg(required = true)]
        markers: Vec<String>,
    },

    /// List supported frame rates
    Rates,

    /// Show or change the default timebase
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    /// Persist --rate and --drop-frame/--non-drop-frame as the default
    Set,
    Reset,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config_manager = ConfigManager::new(args.config.clone());
    let settings = config_manager
        .load()
        .with_context(|| format!("loading {}", config_manager.config_path().display()))?;

    match &args.command {
        Command::Config { action } => run_config(action, &args, &mut config_manager),
        Command::Rates => {
            for rate in FrameRate::ALL {
                let df = if rate.is_fractional() { "  (drop-frame)" } else { "" };
                println!("{:<8} {:>8.3} fps{}", rate.identifier(), rate.as_f64(), df);
            }
            Ok(())
        }
        Command::Frames { timecode } => {
            let codec = build_codec(&args, &settings)?;
            if let Some(frames) = codec.frames_from_timecode(timecode.as_str())? {
                println!("{}", frames);
            }
            Ok(())
        }
        Command::Timecode { frames } => {
            let codec = build_codec(&args, &settings)?;
            println!("{}", codec.timecode_from_frames(*frames));
            Ok(())
        }
        Command::Durations {
            length,
            color,
            markers,
        } => {
            let codec = build_codec(&args, &settings)?;
            run_durations(&codec, *length, color.as_deref(), markers)
        }
    }
}

fn build_codec(args: &Args, settings: &Settings) -> Result<TimecodeCodec, anyhow::Error> {
    let timebase = resolve_timebase(args, settings)?;
    if timebase.drop_frame && !timebase.frame_rate.is_fractional() {
        log::warn!(
            "Drop-frame timecode at {} fps is not a broadcast standard",
            timebase.frame_rate
        );
    }
    log::debug!("Converting at {}", describe(&timebase));
    Ok(TimecodeCodec::new(timebase))
}

fn run_durations(
    codec: &TimecodeCodec,
    length: u64,
    color: Option<&str>,
    specs: &[String],
) -> Result<(), anyhow::Error> {
    let color = color.map(str::parse::<MarkerColor>).transpose()?;
    let markers = specs
        .iter()
        .map(String::as_str)
        .map(parse_marker)
        .collect::<Result<Vec<_>, _>>()?;

    let selected = filter_by_color(&markers, color);
    log::info!("{} of {} markers selected", selected.len(), markers.len());

    for duration in marker_durations(&selected, length, codec) {
        println!(
            "{}\t{}\t{}\t{}",
            duration.marker.frame, duration.marker.color, duration.frames, duration.timecode
        );
    }
    Ok(())
}

fn run_config(
    action: &ConfigAction,
    args: &Args,
    config_manager: &mut ConfigManager,
) -> Result<(), anyhow::Error> {
    match action {
        ConfigAction::Show => {
            let settings = config_manager.settings();
            println!("path:       {}", config_manager.config_path().display());
            println!("frame_rate: {}", settings.frame_rate);
            println!("drop_frame: {}", settings.drop_frame);
        }
        ConfigAction::Set => {
            if args.rate.is_none() && !args.drop_frame && !args.non_drop_frame {
                bail!("nothing to set: pass --rate, --drop-frame or --non-drop-frame");
            }
            let timebase = resolve_timebase(args, config_manager.settings())?;
            config_manager.update_settings(Settings {
                frame_rate: timebase.frame_rate,
                drop_frame: timebase.drop_frame,
            })?;
            println!("Saved {} to {}", describe(&timebase), config_manager.config_path().display());
        }
        ConfigAction::Reset => {
            config_manager.reset_to_defaults()?;
            println!("Restored defaults in {}", config_manager.config_path().display());
        }
    }
    Ok(())
}

/// Command-line flags override the persisted settings for this invocation.
fn resolve_timebase(args: &Args, settings: &Settings) -> Result<TimebaseConfig, anyhow::Error> {
    let mut timebase = settings.timebase();
    if let Some(id) = &args.rate {
        timebase.frame_rate = id.parse::<FrameRate>()?;
    }
    if args.drop_frame {
        timebase.drop_frame = true;
    } else if args.non_drop_frame {
        timebase.drop_frame = false;
    }
    Ok(timebase)
}

fn describe(timebase: &TimebaseConfig) -> String {
    let mode = if timebase.drop_frame { "DF" } else { "NDF" };
    format!("{} {}", timebase.frame_rate, mode)
}

/// Parse `FRAME` or `FRAME:COLOR`. Markers without a color are blue.
fn parse_marker(spec: &str) -> Result<Marker, anyhow::Error> {
    let (frame, color) = match spec.split_once(':') {
        Some((frame, color)) => (frame, color.parse::<MarkerColor>()?),
        None => (spec, MarkerColor::default()),
    };
    let frame = frame
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid marker position {:?}", spec))?;
    Ok(Marker::new(frame, color))
}
