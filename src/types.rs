//! Core input record and physical constants shared by the analytical modules.

use serde::{Deserialize, Deserializer, Serialize};

/// Physical constants and unit conversions

/// Mean Earth-Moon distance in kilometers (one lunar distance, LD).
pub const LUNAR_DISTANCE_KM: f64 = 384_400.0;

/// Joules released by one megaton of TNT.
pub const MEGATON_TNT_JOULES: f64 = 4.184e15;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Snapshot of one close approach as delivered by the ingestion process.
///
/// Upstream data is noisy: any numeric field may be missing, zero, negative
/// or non-finite. Consumers read it through the `sanitized_*` accessors,
/// which map unusable values to a well-defined fallback instead of failing.
/// A missing or `null` diameter or velocity deserializes as NaN.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproachRecord {
    /// Object identifier (also the seed source for orbit estimation).
    pub identifier: String,
    /// Estimated diameter in meters.
    #[serde(default = "missing_number", deserialize_with = "number_or_nan")]
    pub estimated_diameter_m: f64,
    /// Miss distance in lunar distances, `None` when unknown.
    #[serde(default)]
    pub miss_distance_lunar: Option<f64>,
    /// Relative velocity at closest approach in km/s.
    #[serde(default = "missing_number", deserialize_with = "number_or_nan")]
    pub relative_velocity_km_s: f64,
    /// Whether the object is flagged as a potentially hazardous asteroid.
    #[serde(default)]
    pub is_potentially_hazardous: bool,
}

impl ApproachRecord {
    /// Create a record from its raw fields.
    pub fn new(
        identifier: impl Into<String>,
        estimated_diameter_m: f64,
        miss_distance_lunar: Option<f64>,
        relative_velocity_km_s: f64,
        is_potentially_hazardous: bool,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            estimated_diameter_m,
            miss_distance_lunar,
            relative_velocity_km_s,
            is_potentially_hazardous,
        }
    }

    /// Diameter in meters, with non-finite and negative values mapped to 0.
    pub fn sanitized_diameter_m(&self) -> f64 {
        non_negative_or_zero(self.estimated_diameter_m)
    }

    /// Velocity in km/s, with non-finite and negative values mapped to 0.
    pub fn sanitized_velocity_km_s(&self) -> f64 {
        non_negative_or_zero(self.relative_velocity_km_s)
    }

    /// Miss distance in LD if it is a usable positive number.
    ///
    /// Zero, negative and non-finite distances are reported as unknown.
    pub fn known_miss_distance_lunar(&self) -> Option<f64> {
        self.miss_distance_lunar.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Miss distance converted to kilometers, `None` when unknown.
    pub fn miss_distance_km(&self) -> Option<f64> {
        self.known_miss_distance_lunar().map(|ld| ld * LUNAR_DISTANCE_KM)
    }
}

fn missing_number() -> f64 {
    f64::NAN
}

fn number_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
