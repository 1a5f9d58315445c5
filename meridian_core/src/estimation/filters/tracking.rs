// meridian_core/src/estimation/filters/tracking.rs

use serde::{Deserialize, Serialize};

use crate::belief::Belief;
use crate::errors::FilterError;
use crate::estimation::Estimator;
use crate::models::measurement::PositionSensor;
use crate::models::motion::ConstantVelocity2d;
use crate::types::{
    Observation, ObservationMatrix, StateCovariance, StateVector, TransitionMatrix,
};

/// Noise configuration for a [`TrackingFilter`]. Immutable after
/// construction; there is no runtime reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Measurement-noise scale: builds `R = g_variance * I2`.
    pub g_variance: f64,
    /// Acceleration (process) noise scale: scales the process covariance.
    pub a_variance: f64,
}

/// Discrete-time linear Kalman filter for 2-D position/velocity tracking.
///
/// The filter holds the noise parameters and the transition/process-noise
/// matrices for the most recently recorded elapsed time; the belief itself
/// lives with the caller and is mutated in place. Matrices are rebuilt
/// lazily inside `predict`, only when the recorded elapsed time differs from
/// the one used for the previous rebuild; consecutive updates at the same
/// cadence reuse them unchanged.
#[derive(Debug, Clone)]
pub struct TrackingFilter {
    params: FilterParams,
    sensor: PositionSensor,
    /// The dt to use for the next `predict`.
    current_time_diff: f64,
    /// The dt recorded before the most recent `set_time_diff`.
    prev_time_diff: f64,
    /// State transition `G`, built for `current_time_diff` once `predict`
    /// has observed the change.
    transition: TransitionMatrix,
    /// Process-noise covariance `A`, rebuilt together with `G`.
    process_noise: StateCovariance,
}

impl TrackingFilter {
    /// Builds a filter with the given noise parameters, with both matrices
    /// initialized at `dt = 1`.
    pub fn new(params: FilterParams) -> Result<Self, FilterError> {
        // `!(x >= 0)` also rejects NaN, which `x < 0` would let through.
        if !(params.g_variance >= 0.0 && params.a_variance >= 0.0) {
            return Err(FilterError::InvalidParameter {
                g_variance: params.g_variance,
                a_variance: params.a_variance,
            });
        }
        Ok(Self {
            sensor: PositionSensor::new(params.g_variance),
            current_time_diff: 1.0,
            prev_time_diff: 1.0,
            transition: ConstantVelocity2d::transition_matrix(1.0),
            process_noise: ConstantVelocity2d::process_covariance(1.0, params.a_variance),
            params,
        })
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// The dt the next `predict` will use.
    pub fn current_time_diff(&self) -> f64 {
        self.current_time_diff
    }

    pub fn prev_time_diff(&self) -> f64 {
        self.prev_time_diff
    }

    /// Current state transition matrix `G`.
    pub fn transition(&self) -> &TransitionMatrix {
        &self.transition
    }

    /// Current process-noise covariance `A`.
    pub fn process_noise(&self) -> &StateCovariance {
        &self.process_noise
    }

    /// Read accessor for the observation map `O`, for consumers that project
    /// state into the observable subspace (e.g. residual diagnostics).
    pub fn observation_matrix(&self) -> ObservationMatrix {
        ConstantVelocity2d::observation_matrix()
    }

    /// Records the elapsed time since the previous observation. Call before
    /// each `predict` whose interval differs from the last one. Matrices are
    /// not recomputed until `predict` runs.
    pub fn set_time_diff(&mut self, dt: f64) -> Result<(), FilterError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(FilterError::InvalidTimeDelta(dt));
        }
        self.prev_time_diff = self.current_time_diff;
        self.current_time_diff = dt;
        Ok(())
    }

    /// The cached matrices go stale exactly when the recorded elapsed time
    /// changed since the previous recording.
    pub fn needs_matrix_rebuild(&self) -> bool {
        self.current_time_diff != self.prev_time_diff
    }

    fn rebuild_matrices(&mut self) {
        self.process_noise =
            ConstantVelocity2d::process_covariance(self.current_time_diff, self.params.a_variance);
        self.transition = ConstantVelocity2d::transition_matrix(self.current_time_diff);
    }
}

impl Estimator for TrackingFilter {
    /// Time update: `mean' = G * mean`, `P' = G * P * G^T + A`.
    ///
    /// The mean goes through the transition matrix as of call entry; the
    /// rebuild happens between the mean and covariance propagation, matching
    /// the recursion this filter has always run.
    fn predict(&mut self, belief: &mut Belief) {
        // No control input contribution: B is the zero matrix.
        let mean_pred = self.transition * belief.mean;

        if self.needs_matrix_rebuild() {
            self.rebuild_matrices();
        }

        belief.covariance = self.transition * belief.covariance * self.transition.transpose()
            + self.process_noise;
        belief.mean = mean_pred;
    }

    /// Measurement update for a fresh position fix.
    ///
    /// Computes the innovation `y = z - O * mean` and its covariance
    /// `S = O * P * O^T + R`, then folds the fix into the belief through the
    /// Kalman gain `K = P * O^T * S^-1`. The updated covariance `(I - K * O) * P` is
    /// symmetrized to counter floating-point asymmetry drift.
    fn measure(
        &self,
        belief: &mut Belief,
        observation: &Observation,
    ) -> Result<Observation, FilterError> {
        if !(observation[0].is_finite() && observation[1].is_finite()) {
            return Err(FilterError::InvalidObservation(
                observation[0],
                observation[1],
            ));
        }

        let o = ConstantVelocity2d::observation_matrix();

        // How much the fix disagrees with what the model expected to see.
        let innovation = *observation - self.sensor.predict_observation(&belief.mean);
        let s = o * belief.covariance * o.transpose() + self.sensor.noise_covariance();

        // S can lose rank when g_variance is zero and P has collapsed along
        // the observed subspace. The caller keeps the prior belief.
        let s_inv = s
            .try_inverse()
            .ok_or(FilterError::SingularInnovationCovariance)?;

        let gain = belief.covariance * o.transpose() * s_inv;

        belief.mean += gain * innovation;
        belief.covariance = (StateCovariance::identity() - gain * o) * belief.covariance;
        belief.symmetrize();

        Ok(innovation)
    }

    /// Zero mean, covariance seeded with the process noise at `dt = 1`.
    fn initial_belief(&self) -> Belief {
        Belief::new(
            StateVector::zeros(),
            ConstantVelocity2d::process_covariance(1.0, self.params.a_variance),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateCovariance;

    fn params() -> FilterParams {
        FilterParams {
            g_variance: 1.0,
            a_variance: 0.01,
        }
    }

    #[test]
    fn rejects_negative_variances() {
        for (g, a) in [(-1.0, 0.01), (1.0, -0.01), (f64::NAN, 0.01), (1.0, f64::NAN)] {
            let result = TrackingFilter::new(FilterParams {
                g_variance: g,
                a_variance: a,
            });
            assert!(matches!(result, Err(FilterError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn accepts_zero_variances() {
        assert!(TrackingFilter::new(FilterParams {
            g_variance: 0.0,
            a_variance: 0.0,
        })
        .is_ok());
    }

    #[test]
    fn set_time_diff_rejects_bad_input() {
        let mut filter = TrackingFilter::new(params()).unwrap();
        for dt in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(
                    filter.set_time_diff(dt),
                    Err(FilterError::InvalidTimeDelta(_))
                ),
                "dt={dt}"
            );
        }
        // A rejected dt leaves the bookkeeping untouched.
        assert_eq!(filter.current_time_diff(), 1.0);
        assert_eq!(filter.prev_time_diff(), 1.0);
    }

    #[test]
    fn rebuild_flag_follows_dt_changes() {
        let mut filter = TrackingFilter::new(params()).unwrap();
        assert!(!filter.needs_matrix_rebuild());

        filter.set_time_diff(2.0).unwrap();
        assert!(filter.needs_matrix_rebuild());

        // Recording the same dt again settles the flag.
        filter.set_time_diff(2.0).unwrap();
        assert!(!filter.needs_matrix_rebuild());
    }

    #[test]
    fn measure_rejects_non_finite_observation_untouched() {
        let filter = TrackingFilter::new(params()).unwrap();
        let mut belief = filter.initial_belief();
        let before = belief.clone();

        let result = filter.measure(&mut belief, &Observation::new(f64::NAN, 0.0));
        assert!(matches!(result, Err(FilterError::InvalidObservation(..))));
        assert_eq!(belief, before);
    }

    #[test]
    fn measure_surfaces_singular_innovation_covariance() {
        // Zero measurement noise plus a rank-deficient covariance makes S
        // exactly zero.
        let filter = TrackingFilter::new(FilterParams {
            g_variance: 0.0,
            a_variance: 0.0,
        })
        .unwrap();
        let mut belief = Belief::new(StateVector::zeros(), StateCovariance::zeros());
        let before = belief.clone();

        let result = filter.measure(&mut belief, &Observation::new(1.0, 1.0));
        assert_eq!(result, Err(FilterError::SingularInnovationCovariance));
        assert_eq!(belief, before);
    }

    #[test]
    fn measure_returns_innovation() {
        let filter = TrackingFilter::new(params()).unwrap();
        let mut belief = filter.initial_belief();

        let innovation = filter
            .measure(&mut belief, &Observation::new(3.0, -2.0))
            .unwrap();
        // Predicted observation was (0, 0).
        assert_eq!(innovation, Observation::new(3.0, -2.0));
    }
}
