//! Kepler position solver using a fixed-iteration Newton's method.
//!
//! Called once per animated object per frame, so every path has a fixed
//! cost: no convergence loop, no allocation.

use std::f64::consts::TAU;

use bevy::math::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::estimator::OrbitalElements;
use crate::types::DEG_TO_RAD;

/// Newton iterations applied to Kepler's equation.
///
/// Starting from E = M, ten steps reach machine precision for every
/// eccentricity the estimator can produce (e <= 0.85).
pub const KEPLER_ITERATIONS: usize = 10;

/// Position in scene units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PositionVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Distance from the origin (the focus of every estimated orbit).
    pub fn length(&self) -> f64 {
        self.as_dvec3().length()
    }
}

impl From<DVec3> for PositionVector {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<PositionVector> for DVec3 {
    fn from(p: PositionVector) -> Self {
        p.as_dvec3()
    }
}

/// Mean anomaly after `time_offset` at `rate` rad per unit time, in [0, 2π).
pub fn mean_anomaly_at(time_offset: f64, rate: f64) -> f64 {
    (time_offset * rate).rem_euclid(TAU)
}

/// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E.
///
/// Runs exactly [`KEPLER_ITERATIONS`] Newton steps from E₀ = M.
///
/// # Arguments
/// * `mean_anomaly` - Mean anomaly M in radians
/// * `eccentricity` - Orbital eccentricity, 0 ≤ e < 1
///
/// # Returns
/// Eccentric anomaly E in radians
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e_anomaly = mean_anomaly;

    for _ in 0..KEPLER_ITERATIONS {
        // f(E) = E - e*sin(E) - M, f'(E) = 1 - e*cos(E)
        let f = e_anomaly - eccentricity * e_anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * e_anomaly.cos();
        e_anomaly -= f / f_prime;
    }

    e_anomaly
}

/// Compute true anomaly from eccentric anomaly.
///
/// ν = 2 * atan2(sqrt(1+e) * sin(E/2), sqrt(1-e) * cos(E/2)), which covers
/// the full circle without the quadrant loss of the tangent form.
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half_e = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half_e.sin();
    let x = (1.0 - eccentricity).sqrt() * half_e.cos();
    2.0 * y.atan2(x)
}

/// Rotation from the orbital plane into the scene frame:
/// ω about the orbit normal, then tilt by i, then Ω about the reference normal.
fn orientation(elements: &OrbitalElements) -> DMat3 {
    DMat3::from_rotation_z(elements.ascending_node_deg * DEG_TO_RAD)
        * DMat3::from_rotation_x(elements.inclination_deg * DEG_TO_RAD)
        * DMat3::from_rotation_z(elements.argument_of_periapsis_deg * DEG_TO_RAD)
}

/// Point on the ellipse in the orbital plane for a given true anomaly.
///
/// Periapsis lies on +x, the focus at the origin.
fn plane_position(elements: &OrbitalElements, true_anomaly: f64) -> DVec3 {
    let a = elements.semi_major_axis;
    let b = elements.semi_minor_axis();
    let c = a * elements.eccentricity;
    DVec3::new(a * true_anomaly.cos() - c, b * true_anomaly.sin(), 0.0)
}

/// Scene position of an orbit at `time_offset`.
///
/// # Arguments
/// * `elements` - Estimated orbit
/// * `time_offset` - Animation time since the orbit was placed
/// * `rate` - Mean anomaly advance in radians per unit of `time_offset`
pub fn position_at(elements: &OrbitalElements, time_offset: f64, rate: f64) -> PositionVector {
    let e = elements.eccentricity;
    let mean_anomaly = mean_anomaly_at(time_offset, rate);
    let eccentric_anomaly = solve_eccentric_anomaly(mean_anomaly, e);
    let true_anomaly = eccentric_to_true_anomaly(eccentric_anomaly, e);

    (orientation(elements) * plane_position(elements, true_anomaly)).into()
}

/// Points along the closed orbit for drawing its path.
///
/// Samples are evenly spaced in eccentric anomaly, which places more of
/// them near periapsis where the curve bends hardest.
pub fn sample_orbit_path(elements: &OrbitalElements, segments: usize) -> Vec<PositionVector> {
    let rotation = orientation(elements);
    let e = elements.eccentricity;

    (0..segments)
        .map(|i| {
            let eccentric_anomaly = TAU * i as f64 / segments as f64;
            let true_anomaly = eccentric_to_true_anomaly(eccentric_anomaly, e);
            PositionVector::from(rotation * plane_position(elements, true_anomaly))
        })
        .collect()
}
