// meridian_replay/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Meridian: replays recorded GPS fixes through the 2-D tracking filter.
///
/// Fixes come either from a JSON file of recorded `{t, x, y}` records or
/// from a synthesized constant-velocity track with Gaussian noise.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the tracker TOML config.
    #[arg(short, long, default_value = "assets/tracker.toml")]
    pub config: PathBuf,

    /// JSON file of recorded fixes to replay.
    #[arg(long, value_name = "FILE")]
    pub fixes: Option<PathBuf>,

    /// Synthesize a noisy constant-velocity track instead of reading fixes.
    #[arg(long, default_value_t = false)]
    pub synth: bool,

    /// Seed for the synthetic track generator, for determinism.
    #[arg(long, default_value_t = 7)]
    pub seed: u64,
}
