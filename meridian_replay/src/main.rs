// meridian_replay/src/main.rs

mod cli;
mod config;
mod synth;

use clap::Parser;
use meridian_core::prelude::*;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// One recorded fix, as found in the JSON input files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FixRecord {
    /// Timestamp in seconds.
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = config::load(&cli.config)?;

    let fixes: Vec<FixRecord> = if cli.synth {
        synth::constant_velocity_track(&config.synth, cli.seed)?
    } else if let Some(path) = &cli.fixes {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        return Err("either --fixes <FILE> or --synth is required".into());
    };
    info!(count = fixes.len(), "replaying fixes");

    let mut track = Track::new(TrackHandle(1), config.filter.params())?;
    let mut accepted = 0usize;
    for fix in &fixes {
        match track.push_fix(fix.t, Observation::new(fix.x, fix.y)) {
            Ok(Some(outcome)) => {
                accepted += 1;
                info!(
                    t = fix.t,
                    x = outcome.estimate.position[0],
                    y = outcome.estimate.position[1],
                    vx = outcome.estimate.velocity[0],
                    vy = outcome.estimate.velocity[1],
                    innovation = outcome.innovation_norm,
                    "fix applied"
                );
            }
            // The track layer already logged why it discarded the fix.
            Ok(None) => {}
            // Recoverable: keep the prior belief and wait for the next fix.
            Err(FilterError::SingularInnovationCovariance) => {
                warn!(t = fix.t, "singular innovation covariance, keeping prior belief");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let estimate = track.estimate();
    println!(
        "replayed {} fixes ({} applied): position=({:.3}, {:.3}) velocity=({:.3}, {:.3}) trace={:.6}",
        fixes.len(),
        accepted,
        estimate.position[0],
        estimate.position[1],
        estimate.velocity[0],
        estimate.velocity[1],
        estimate.covariance_trace,
    );
    Ok(())
}
