// meridian_core/src/track.rs

use serde::Serialize;
use tracing::{debug, warn};

use crate::belief::Belief;
use crate::errors::FilterError;
use crate::estimation::filters::tracking::{FilterParams, TrackingFilter};
use crate::estimation::Estimator;
use crate::types::{Observation, TrackHandle, STATE_VX, STATE_VY, STATE_X, STATE_Y};

/// A position/velocity snapshot readable between update cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackEstimate {
    /// Best position estimate, `(x, y)`.
    pub position: [f64; 2],
    /// Best velocity estimate, `(vx, vy)`.
    pub velocity: [f64; 2],
    /// Total posterior variance, a cheap scalar summary of uncertainty.
    pub covariance_trace: f64,
}

/// What a single accepted fix did to the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixOutcome {
    /// The posterior estimate after this fix.
    pub estimate: TrackEstimate,
    /// Euclidean norm of the innovation, in observation units. Whether a
    /// large value constitutes an alert is policy for the layer above.
    pub innovation_norm: f64,
}

/// One tracked entity: a filter, its belief, and the timestamp bookkeeping
/// needed to turn raw timestamped fixes into predict/measure cycles.
///
/// Fixes must arrive in timestamp order; a fix that does not advance time is
/// discarded rather than fed to the filter. Not safe for concurrent
/// mutation: one `Track` per entity, updated from one thread at a time.
#[derive(Debug)]
pub struct Track {
    handle: TrackHandle,
    filter: TrackingFilter,
    belief: Belief,
    last_timestamp: Option<f64>,
}

impl Track {
    pub fn new(handle: TrackHandle, params: FilterParams) -> Result<Self, FilterError> {
        let filter = TrackingFilter::new(params)?;
        let belief = filter.initial_belief();
        Ok(Self {
            handle,
            filter,
            belief,
            last_timestamp: None,
        })
    }

    pub fn handle(&self) -> TrackHandle {
        self.handle
    }

    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    pub fn filter(&self) -> &TrackingFilter {
        &self.filter
    }

    /// Feeds one timestamped fix through the filter.
    ///
    /// The first fix seeds the belief's position components directly (the
    /// velocity stays unknown). Later fixes run the full
    /// `set_time_diff → predict → measure` cycle. Returns `Ok(None)` when
    /// the fix was discarded for not advancing time.
    pub fn push_fix(
        &mut self,
        timestamp: f64,
        position: Observation,
    ) -> Result<Option<FixOutcome>, FilterError> {
        if !timestamp.is_finite() {
            return Err(FilterError::InvalidTimeDelta(timestamp));
        }
        if !(position[0].is_finite() && position[1].is_finite()) {
            return Err(FilterError::InvalidObservation(position[0], position[1]));
        }

        let Some(last) = self.last_timestamp else {
            self.belief.mean[STATE_X] = position[0];
            self.belief.mean[STATE_Y] = position[1];
            self.last_timestamp = Some(timestamp);
            debug!(handle = self.handle.0, timestamp, "track seeded from first fix");
            return Ok(Some(FixOutcome {
                estimate: self.estimate(),
                innovation_norm: 0.0,
            }));
        };

        let dt = timestamp - last;
        if dt <= 0.0 {
            warn!(
                handle = self.handle.0,
                timestamp, last, "fix does not advance time, discarding"
            );
            return Ok(None);
        }

        self.filter.set_time_diff(dt)?;
        self.filter.predict(&mut self.belief);
        // The belief now sits at `timestamp` even if the measurement below
        // gets rejected.
        self.last_timestamp = Some(timestamp);

        let innovation = self.filter.measure(&mut self.belief, &position)?;
        Ok(Some(FixOutcome {
            estimate: self.estimate(),
            innovation_norm: innovation.norm(),
        }))
    }

    pub fn estimate(&self) -> TrackEstimate {
        TrackEstimate {
            position: [self.belief.mean[STATE_X], self.belief.mean[STATE_Y]],
            velocity: [self.belief.mean[STATE_VX], self.belief.mean[STATE_VY]],
            covariance_trace: self.belief.covariance.trace(),
        }
    }
}
