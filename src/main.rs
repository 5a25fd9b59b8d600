// Segue - Rekordbox set builder
// Point it at a collection export and an opening track; it chains the rest
// by tempo and key and writes the set as CSV

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use segue::{config::Config, export, library, sequencer};

#[derive(Parser)]
#[command(name = "segue")]
#[command(about = "Builds a DJ set from a Rekordbox collection by chaining tempo/key-compatible tracks")]
struct Args {
    /// Path to the Rekordbox XML collection export
    #[arg(short, long)]
    library: PathBuf,

    /// Location of the track that opens the set, as it appears in the export
    #[arg(short, long)]
    start: String,

    /// How adventurous transitions may get, 0 (strict) to 10 (loose)
    #[arg(short, long)]
    jazzy: Option<f64>,

    /// Number of tracks to chain
    #[arg(short = 'n', long)]
    length: Option<usize>,

    /// Where to write the CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,
}

fn init_logging(dev: bool) -> Result<()> {
    if dev {
        // Everything straight to stderr while developing
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(());
    }

    // Daily rotating file appender
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "segue.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,segue=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Prevent the guard from being dropped
    std::mem::forget(guard);

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.dev)?;
    info!("🎵 Segue starting up");

    // Load config - falls back to defaults if missing
    let config = Config::load()?;

    let jazzy_factor = args.jazzy.unwrap_or(config.sequencer.jazzy_factor);
    let target_length = args.length.unwrap_or(config.sequencer.target_length);
    let output_path = args
        .output
        .unwrap_or_else(|| config.export.output_path.clone());

    ensure!(target_length > 0, "--length must be at least 1");

    println!("🎵 Segue - Rekordbox set builder");
    println!("================================");

    let tracks = library::load_collection(&args.library)?;
    println!("Loaded {} tracks from the collection", tracks.len());

    debug!(
        "Chaining from '{}' with jazzy factor {} toward {} tracks",
        args.start, jazzy_factor, target_length
    );
    let playlist = sequencer::build_playlist(&tracks, &args.start, jazzy_factor, target_length)?;

    export::write_csv(&playlist, &output_path)?;

    println!();
    for (position, track) in playlist.iter().enumerate() {
        println!(
            "{:>3}. {} - {}  [{} | {}]",
            position + 1,
            track.display_artist(),
            track.display_title(),
            track.display_tempo(),
            track.display_key(),
        );
    }

    if let (Some(average), Some((low, high))) = (playlist.average_bpm(), playlist.bpm_range()) {
        println!();
        println!(
            "{} tracks, average {:.1} BPM, range {:.1}-{:.1}",
            playlist.len(),
            average,
            low,
            high
        );
    }

    println!("Playlist generated and saved as {}", output_path.display());
    info!("Set of {} tracks written to {}", playlist.len(), output_path.display());

    Ok(())
}
