// meridian_core/src/models/motion.rs

use nalgebra::Vector4;

use crate::types::{ControlMatrix, ObservationMatrix, StateCovariance, TransitionMatrix};

// --- Constant Velocity Model ---
// Assumes the object keeps moving at its current velocity, perturbed by
// white-noise acceleration. The process noise matrix A models how wrong
// that assumption gets as more time passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantVelocity2d;

impl ConstantVelocity2d {
    /// Discrete state transition `G` for `dt` elapsed seconds:
    /// `x += dt * vx`, `y += dt * vy`, velocities carried over unchanged.
    pub fn transition_matrix(dt: f64) -> TransitionMatrix {
        let mut g = TransitionMatrix::identity();
        g[(0, 1)] = dt;
        g[(2, 3)] = dt;
        g
    }

    /// Process-noise covariance `A` for `dt` elapsed seconds.
    ///
    /// White-noise acceleration integrates twice into position and once into
    /// velocity, giving the half-matrix diagonal `[dt^2/2, dt, dt^2/2, dt]`.
    /// The Gram product `A_half * A_half^T` scaled by the acceleration
    /// variance is symmetric PSD by construction.
    pub fn process_covariance(dt: f64, accel_variance: f64) -> StateCovariance {
        let a_half = StateCovariance::from_diagonal(&Vector4::new(
            dt * dt / 2.0,
            dt,
            dt * dt / 2.0,
            dt,
        ));
        a_half * a_half.transpose() * accel_variance
    }

    /// Observation map `O` (2×4): row 0 selects `x`, row 1 selects `y`.
    /// Fixed for the lifetime of the process; velocity is never observed.
    pub fn observation_matrix() -> ObservationMatrix {
        let mut o = ObservationMatrix::zeros();
        o[(0, 0)] = 1.0;
        o[(1, 2)] = 1.0;
        o
    }

    /// Control matrix `B`. There is no external control input in this
    /// system, so it is the zero matrix.
    pub fn control_matrix() -> ControlMatrix {
        ControlMatrix::zeros()
    }
}
