//! Hypothetical impact consequences from user-chosen impactor parameters.
//!
//! Provides scaling-law estimates for a spherical impactor:
//! - Kinetic energy and TNT equivalent
//! - Transient crater diameter
//! - Seismic magnitude (capped at 10)
//! - Fireball radius
//! - Ejecta height (capped at 100 km)
//!
//! Inputs come straight from the simulation panel, so they are validated
//! strictly and a failure names the offending field.

use std::f64::consts::PI;

use bevy::log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{DEG_TO_RAD, MEGATON_TNT_JOULES};

/// Maximum reported seismic magnitude.
pub const MAX_QUAKE_MAGNITUDE: f64 = 10.0;

/// Maximum reported ejecta height (km).
pub const MAX_EJECTA_HEIGHT_KM: f64 = 100.0;

/// Accepted diameter range (km).
pub const DIAMETER_RANGE_KM: (f64, f64) = (0.01, 100.0);
/// Accepted velocity range (km/s).
pub const VELOCITY_RANGE_KM_S: (f64, f64) = (1.0, 72.0);
/// Accepted density range (kg/m³).
pub const DENSITY_RANGE_KG_M3: (f64, f64) = (1000.0, 8000.0);

/// Comparison bands as (lower bound in Mt, label), ascending.
///
/// Each band is half-open: it covers [lower, next lower).
const COMPARISON_BANDS: [(f64, &str); 8] = [
    (0.0, "large conventional bomb"),
    (1e-3, "tactical nuclear weapon"),
    (1.0, "strategic nuclear weapon"),
    (1e2, "largest nuclear test ever"),
    (1e4, "regional devastation"),
    (1e6, "small extinction event"),
    (1e8, "mass extinction event"),
    (1e9, "planet-shattering cataclysm"),
];

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("impactAngleDeg = {0} must be in (0, 90]")]
    InvalidAngle(f64),
}

impl ImpactError {
    /// Wire name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ImpactError::NonFinite { field } | ImpactError::OutOfRange { field, .. } => field,
            ImpactError::InvalidAngle(_) => "impactAngleDeg",
        }
    }
}

/// Impactor chosen on the simulation panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactParameters {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    pub density_kg_m3: f64,
    pub impact_angle_deg: f64,
}

impl ImpactParameters {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ImpactError> {
        check_range("diameterKm", self.diameter_km, DIAMETER_RANGE_KM)?;
        check_range("velocityKmS", self.velocity_km_s, VELOCITY_RANGE_KM_S)?;
        check_range("densityKgM3", self.density_kg_m3, DENSITY_RANGE_KG_M3)?;

        let angle = self.impact_angle_deg;
        if !angle.is_finite() {
            return Err(ImpactError::NonFinite {
                field: "impactAngleDeg",
            });
        }
        // A grazing 0° impact has no defined crater scaling.
        if angle <= 0.0 || angle > 90.0 {
            return Err(ImpactError::InvalidAngle(angle));
        }
        Ok(())
    }

    /// Impactor mass in kg, treating the body as a uniform sphere.
    pub fn mass_kg(&self) -> f64 {
        let radius_m = self.diameter_km * 500.0;
        self.density_kg_m3 * (4.0 / 3.0) * PI * radius_m.powi(3)
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ImpactError> {
    if !value.is_finite() {
        return Err(ImpactError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ImpactError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Estimated consequences of an impact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    pub energy_joules: f64,
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    /// At most 10.
    pub quake_magnitude: f64,
    pub fireball_radius_km: f64,
    /// At most 100 km.
    pub ejecta_height_km: f64,
    pub comparison_label: String,
    #[serde(skip)]
    pub mass_kg: f64,
}

/// Run the impact model.
///
/// # Errors
/// Returns [`ImpactError`] naming the first field outside its accepted range.
pub fn simulate(params: &ImpactParameters) -> Result<ImpactResult, ImpactError> {
    if let Err(err) = params.validate() {
        warn!("Rejected impact parameters ({}): {}", err.field(), err);
        return Err(err);
    }

    let mass_kg = params.mass_kg();
    let velocity_m_s = params.velocity_km_s * 1000.0;
    let energy_joules = 0.5 * mass_kg * velocity_m_s * velocity_m_s;
    let energy_megatons = energy_joules / MEGATON_TNT_JOULES;

    let angle_factor = (params.impact_angle_deg * DEG_TO_RAD).sin().powf(0.33);
    let crater_diameter_km = 0.07 * energy_joules.powf(0.29) * angle_factor;

    Ok(ImpactResult {
        energy_joules,
        energy_megatons,
        crater_diameter_km,
        quake_magnitude: quake_magnitude(energy_megatons),
        fireball_radius_km: 1.2 * energy_megatons.powf(0.4),
        ejecta_height_km: ejecta_height_km(crater_diameter_km),
        comparison_label: comparison_label(energy_megatons).to_string(),
        mass_kg,
    })
}

/// Seismic magnitude, 0.67·log10(Mt) + 5.87, capped at 10.
pub fn quake_magnitude(energy_megatons: f64) -> f64 {
    (0.67 * energy_megatons.log10() + 5.87).min(MAX_QUAKE_MAGNITUDE)
}

/// Ejecta plume height, 2.5 crater diameters, capped at 100 km.
pub fn ejecta_height_km(crater_diameter_km: f64) -> f64 {
    (crater_diameter_km * 2.5).min(MAX_EJECTA_HEIGHT_KM)
}

/// Everyday comparison for an energy in megatons.
pub fn comparison_label(energy_megatons: f64) -> &'static str {
    COMPARISON_BANDS
        .iter()
        .rev()
        .find(|(lower, _)| energy_megatons >= *lower)
        .map_or(COMPARISON_BANDS[0].1, |&(_, label)| label)
}
