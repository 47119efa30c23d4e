//! Approximate orbits for animating close approaches.
//!
//! Orbits here are visual reconstructions, not ephemerides:
//! - `estimator` derives plausible elements from an approach record, with
//!   every free choice drawn from a generator seeded by the object identifier.
//! - `kepler` turns elements plus a time offset into a 3D scene position.
//!
//! Coordinate frame:
//! - Scene units, Earth at the origin (rendered radius 2).

pub mod estimator;
pub mod kepler;
pub mod rng;

#[cfg(test)]
mod proptest_orbit;

pub use estimator::{OrbitScale, OrbitalElements, estimate, estimate_with};
pub use kepler::{
    KEPLER_ITERATIONS, PositionVector, eccentric_to_true_anomaly, mean_anomaly_at, position_at,
    sample_orbit_path, solve_eccentric_anomaly,
};
pub use rng::{OrbitRng, rng_for_identifier, seed_from_identifier};
