//! Approximate orbital elements from a single close approach.
//!
//! The approach record does not constrain a full orbit, so the estimator
//! builds a plausible one for display: periapsis from the miss distance,
//! eccentricity from the relative velocity, and the orientation angles
//! from a generator seeded by the object identifier.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rng::rng_for_identifier;
use crate::types::ApproachRecord;

/// Upper bound on estimated eccentricity.
pub const MAX_ECCENTRICITY: f64 = 0.85;

/// Eccentricity of an object with zero relative velocity.
const BASE_ECCENTRICITY: f64 = 0.15;

/// Relative velocity (km/s) that adds 1.0 to the eccentricity.
const ECCENTRICITY_VELOCITY_SCALE: f64 = 60.0;

/// Inclination floor for flagged hazardous objects (degrees).
const HAZARDOUS_BASE_INCLINATION_DEG: f64 = 5.0;

/// Inclination floor for other objects (degrees).
const DEFAULT_BASE_INCLINATION_DEG: f64 = 15.0;

/// Width of the random inclination spread (degrees).
const INCLINATION_SPREAD_DEG: f64 = 25.0;

/// Mapping of physical miss distance into scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitScale {
    /// Scene units per kilometer.
    pub vis_scale: f64,
    /// Scene-unit offset added to every periapsis so the orbit clears the
    /// rendered planet body (radius 2).
    pub clearance: f64,
}

impl Default for OrbitScale {
    fn default() -> Self {
        Self {
            vis_scale: 0.00004,
            clearance: 2.5,
        }
    }
}

impl OrbitScale {
    /// Periapsis distance in scene units for a miss distance in km.
    pub fn periapsis(&self, miss_distance_km: f64) -> f64 {
        self.clearance + miss_distance_km * self.vis_scale
    }
}

/// Keplerian elements of an estimated orbit.
/// Distances in scene units, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    /// In [0, 0.85].
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub argument_of_periapsis_deg: f64,
}

impl OrbitalElements {
    /// Closest distance to the focus.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus.
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }
}

/// Estimate elements with the default scene scale.
pub fn estimate(record: &ApproachRecord) -> OrbitalElements {
    estimate_with(record, &OrbitScale::default())
}

/// Estimate elements for a record.
///
/// Deterministic in `(record.identifier, record)`: the generator is created
/// fresh for every call and draws in a fixed order (inclination, ascending
/// node, argument of periapsis).
pub fn estimate_with(record: &ApproachRecord, scale: &OrbitScale) -> OrbitalElements {
    let mut rng = rng_for_identifier(&record.identifier);

    // Unknown miss distance collapses to the clearance radius.
    let rp = scale.periapsis(record.miss_distance_km().unwrap_or(0.0));

    let eccentricity = (BASE_ECCENTRICITY
        + record.sanitized_velocity_km_s() / ECCENTRICITY_VELOCITY_SCALE)
        .min(MAX_ECCENTRICITY);
    let semi_major_axis = rp / (1.0 - eccentricity);

    let base_inclination = if record.is_potentially_hazardous {
        HAZARDOUS_BASE_INCLINATION_DEG
    } else {
        DEFAULT_BASE_INCLINATION_DEG
    };
    let inclination_deg = base_inclination + rng.r#gen::<f64>() * INCLINATION_SPREAD_DEG;
    let ascending_node_deg = rng.gen_range(0.0..360.0);
    let argument_of_periapsis_deg = rng.gen_range(0.0..360.0);

    OrbitalElements {
        semi_major_axis,
        eccentricity,
        inclination_deg,
        ascending_node_deg,
        argument_of_periapsis_deg,
    }
}
