// meridian_core/src/errors.rs

use thiserror::Error;

/// Failures surfaced by filter construction and the update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FilterError {
    /// Variances are squared quantities; a negative (or NaN) value has no
    /// meaning and would silently corrupt every later estimate.
    #[error("variance parameters must be non-negative (g_variance={g_variance}, a_variance={a_variance})")]
    InvalidParameter { g_variance: f64, a_variance: f64 },

    /// Elapsed time between updates must be finite and non-negative.
    #[error("time delta must be finite and non-negative, got {0}")]
    InvalidTimeDelta(f64),

    /// Once a NaN enters the covariance it poisons all future estimates, so
    /// non-finite observations are rejected before touching the belief.
    #[error("observation has non-finite components ({0}, {1})")]
    InvalidObservation(f64, f64),

    /// The innovation covariance lost rank along the observed subspace.
    /// Recoverable: keep the prior belief and wait for the next fix.
    #[error("innovation covariance is singular, measurement update skipped")]
    SingularInnovationCovariance,
}
