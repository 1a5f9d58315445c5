// meridian_core/src/types.rs

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};

// --- Core Type Aliases ---
// The state dimension is fixed at 4, so everything is statically sized.
pub type StateVector = Vector4<f64>;
pub type StateCovariance = Matrix4<f64>;
pub type TransitionMatrix = Matrix4<f64>;
pub type ControlMatrix = Matrix4<f64>;
pub type Observation = Vector2<f64>;
pub type ObservationMatrix = Matrix2x4<f64>;
pub type ObservationCovariance = Matrix2<f64>;

// --- State Layout ---
// The state vector is ordered `[x, vx, y, vy]`: position and velocity along
// two independent orthogonal axes. Velocity is hidden state, never observed.
pub const STATE_X: usize = 0;
pub const STATE_VX: usize = 1;
pub const STATE_Y: usize = 2;
pub const STATE_VY: usize = 3;

// --- Core Identifier ---
/// A unique, hashable identifier for a tracked entity (e.g. one vehicle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackHandle(pub u64);
