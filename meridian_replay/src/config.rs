// meridian_replay/src/config.rs

use figment::{
    providers::{Format, Toml},
    Figment,
};
use meridian_core::prelude::FilterParams;
use serde::Deserialize;
use std::path::Path;

/// The root of the data parsed from a tracker TOML file. Every section has
/// defaults, so an absent file yields a usable config.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ReplayConfig {
    #[serde(default)]
    pub filter: FilterSection,

    #[serde(default)]
    pub synth: SynthSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Measurement-noise scale for the position sensor.
    pub g_variance: f64,
    /// Acceleration (process) noise scale.
    pub a_variance: f64,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            g_variance: 1.0,
            a_variance: 0.01,
        }
    }
}

impl FilterSection {
    pub fn params(&self) -> FilterParams {
        FilterParams {
            g_variance: self.g_variance,
            a_variance: self.a_variance,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthSection {
    /// Duration of the synthetic track in seconds.
    pub duration_seconds: f64,
    /// Interval between fixes in seconds.
    pub fix_interval_seconds: f64,
    /// Starting position `(x, y)`.
    pub start: [f64; 2],
    /// Ground-truth velocity `(vx, vy)`.
    pub velocity: [f64; 2],
    /// Standard deviation of the Gaussian noise added to each fix.
    pub noise_std: f64,
}

impl Default for SynthSection {
    fn default() -> Self {
        Self {
            duration_seconds: 60.0,
            fix_interval_seconds: 1.0,
            start: [0.0, 0.0],
            velocity: [1.5, -0.75],
            noise_std: 5.0,
        }
    }
}

pub fn load(path: &Path) -> Result<ReplayConfig, figment::Error> {
    Figment::new().merge(Toml::file(path)).extract()
}
