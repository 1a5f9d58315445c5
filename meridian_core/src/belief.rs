// meridian_core/src/belief.rs

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::types::{StateCovariance, StateVector, STATE_VX, STATE_VY, STATE_X, STATE_Y};

/// The filter's current knowledge: a Gaussian over the `[x, vx, y, vy]`
/// state, as mean and covariance.
///
/// A `Belief` is owned by the caller (one per tracked entity) and mutated in
/// place by the filter's `predict` and `measure` operations. It is
/// serializable so callers can persist snapshots between update cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    /// The state estimate `x`.
    pub mean: StateVector,
    /// The covariance matrix `P`. Must stay symmetric positive-semi-definite.
    pub covariance: StateCovariance,
}

impl Belief {
    pub fn new(mean: StateVector, covariance: StateCovariance) -> Self {
        Self { mean, covariance }
    }

    /// The best position estimate, `(x, y)`.
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.mean[STATE_X], self.mean[STATE_Y])
    }

    /// The best velocity estimate, `(vx, vy)`.
    pub fn velocity(&self) -> Vector2<f64> {
        Vector2::new(self.mean[STATE_VX], self.mean[STATE_VY])
    }

    /// Forces exact symmetry on the covariance via `(P + P^T) / 2`.
    ///
    /// Tiny numerical errors can make P slightly non-symmetric; left alone
    /// they accumulate over a long-running filter.
    pub fn symmetrize(&mut self) {
        self.covariance = (self.covariance + self.covariance.transpose()) * 0.5;
    }

    /// Largest absolute difference between `P` and `P^T`, for diagnostics.
    pub fn max_asymmetry(&self) -> f64 {
        (self.covariance - self.covariance.transpose()).amax()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Vector4};

    #[test]
    fn accessors_follow_state_layout() {
        let belief = Belief::new(
            Vector4::new(1.0, 2.0, 3.0, 4.0),
            Matrix4::identity(),
        );
        assert_relative_eq!(belief.position(), Vector2::new(1.0, 3.0));
        assert_relative_eq!(belief.velocity(), Vector2::new(2.0, 4.0));
    }

    #[test]
    fn symmetrize_removes_asymmetry() {
        let mut p = Matrix4::identity();
        p[(0, 1)] = 1e-6;
        let mut belief = Belief::new(Vector4::zeros(), p);
        assert!(belief.max_asymmetry() > 0.0);

        belief.symmetrize();
        assert_relative_eq!(belief.max_asymmetry(), 0.0);
        assert_relative_eq!(belief.covariance[(0, 1)], 5e-7);
        assert_relative_eq!(belief.covariance[(1, 0)], 5e-7);
    }
}
