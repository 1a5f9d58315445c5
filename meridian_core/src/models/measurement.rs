// meridian_core/src/models/measurement.rs

use crate::models::motion::ConstantVelocity2d;
use crate::types::{Observation, ObservationCovariance, StateVector};

/// The single observation channel: a noisy 2-D position fix.
///
/// `z = O * x + v` with `v ~ N(0, R)` and `R = g_variance * I2`.
#[derive(Debug, Clone)]
pub struct PositionSensor {
    // The R matrix for this sensor
    noise_covariance: ObservationCovariance,
}

impl PositionSensor {
    pub fn new(g_variance: f64) -> Self {
        Self {
            noise_covariance: ObservationCovariance::identity() * g_variance,
        }
    }

    /// Measurement noise covariance `R`.
    pub fn noise_covariance(&self) -> ObservationCovariance {
        self.noise_covariance
    }

    /// Predicts the ideal measurement `z_pred = O * x` from the filter state.
    pub fn predict_observation(&self, state: &StateVector) -> Observation {
        ConstantVelocity2d::observation_matrix() * state
    }
}
