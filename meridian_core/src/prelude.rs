// meridian_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::errors::FilterError;
pub use crate::estimation::Estimator;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::belief::Belief;
pub use crate::track::{FixOutcome, Track, TrackEstimate};
pub use crate::types::{Observation, StateVector, TrackHandle};

// --- Concrete Model and Filter Implementations ---
pub use crate::estimation::filters::tracking::{FilterParams, TrackingFilter};
pub use crate::models::measurement::PositionSensor;
pub use crate::models::motion::ConstantVelocity2d;
