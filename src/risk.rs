//! Hazard scoring for close approaches.
//!
//! The score is a weighted sum of four normalized factors, each in [0, 100]:
//! - Hazard flag (weight 0.40)
//! - Diameter on a log scale, saturating at 1 km (weight 0.25)
//! - Proximity, linear between 50 LD (0) and 1 LD (100) (weight 0.25)
//! - Relative velocity, saturating at 30 km/s (weight 0.10)
//!
//! Scoring never fails. Unusable inputs are clamped, and an unknown miss
//! distance is scored as the worst case.

use serde::{Deserialize, Serialize};

use crate::types::ApproachRecord;

/// Factor weights. They sum to 1 so the weighted score stays in [0, 100].
pub const HAZARD_WEIGHT: f64 = 0.40;
pub const DIAMETER_WEIGHT: f64 = 0.25;
pub const PROXIMITY_WEIGHT: f64 = 0.25;
pub const VELOCITY_WEIGHT: f64 = 0.10;

/// Diameter (m) at which the diameter factor saturates.
const DIAMETER_SATURATION_M: f64 = 1000.0;
/// Miss distance (LD) at or beyond which proximity contributes nothing.
const PROXIMITY_FAR_LD: f64 = 50.0;
/// Miss distance (LD) at or within which proximity is maximal.
const PROXIMITY_NEAR_LD: f64 = 1.0;
/// Velocity (km/s) at which the velocity factor saturates.
const VELOCITY_SATURATION_KM_S: f64 = 30.0;

/// Hazard band derived from the score value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// 1..=25
    Minimal,
    /// 26..=50
    Low,
    /// 51..=75
    Moderate,
    /// 76..=100
    High,
}

impl RiskCategory {
    /// Map a score value to its band. Each band includes its upper bound.
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=25 => RiskCategory::Minimal,
            26..=50 => RiskCategory::Low,
            51..=75 => RiskCategory::Moderate,
            _ => RiskCategory::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Minimal => "minimal",
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
        }
    }
}

/// The four normalized factors behind a score, each in [0, 100].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskFactors {
    pub hazard: f64,
    pub diameter: f64,
    pub proximity: f64,
    pub velocity: f64,
}

impl RiskFactors {
    /// Compute all factors for a record.
    pub fn from_record(record: &ApproachRecord) -> Self {
        Self {
            hazard: hazard_factor(record.is_potentially_hazardous),
            diameter: diameter_factor(record.sanitized_diameter_m()),
            proximity: proximity_factor(record.known_miss_distance_lunar()),
            velocity: velocity_factor(record.sanitized_velocity_km_s()),
        }
    }

    /// Weighted sum before rounding, in [0, 100].
    pub fn weighted_sum(&self) -> f64 {
        HAZARD_WEIGHT * self.hazard
            + DIAMETER_WEIGHT * self.diameter
            + PROXIMITY_WEIGHT * self.proximity
            + VELOCITY_WEIGHT * self.velocity
    }
}

/// Hazard score for a single approach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// Rounded score in [1, 100].
    pub value: u8,
    pub category: RiskCategory,
    /// Unrounded weighted sum, kept for explanation.
    #[serde(skip)]
    pub raw: f64,
}

impl RiskScore {
    /// Build a score from a weighted sum, rounding and flooring at 1.
    pub fn from_weighted_sum(raw: f64) -> Self {
        let clamped = if raw.is_finite() { raw.clamp(1.0, 100.0) } else { 1.0 };
        let value = clamped.round() as u8;
        Self {
            value,
            category: RiskCategory::from_value(value),
            raw,
        }
    }
}

/// Score a close approach.
pub fn score(record: &ApproachRecord) -> RiskScore {
    RiskScore::from_weighted_sum(RiskFactors::from_record(record).weighted_sum())
}

pub fn hazard_factor(is_hazardous: bool) -> f64 {
    if is_hazardous { 100.0 } else { 0.0 }
}

/// log10(max(d, 1)) / log10(1000) * 100, clamped to [0, 100].
pub fn diameter_factor(diameter_m: f64) -> f64 {
    let d = diameter_m.max(1.0);
    (d.log10() / DIAMETER_SATURATION_M.log10() * 100.0).clamp(0.0, 100.0)
}

/// Linear in miss distance between 50 LD and 1 LD. Unknown distance scores 100.
pub fn proximity_factor(miss_distance_lunar: Option<f64>) -> f64 {
    match miss_distance_lunar {
        Some(d) if d.is_finite() && d > 0.0 => ((PROXIMITY_FAR_LD - d)
            / (PROXIMITY_FAR_LD - PROXIMITY_NEAR_LD)
            * 100.0)
            .clamp(0.0, 100.0),
        _ => 100.0,
    }
}

pub fn velocity_factor(velocity_km_s: f64) -> f64 {
    if !velocity_km_s.is_finite() {
        return 0.0;
    }
    (velocity_km_s / VELOCITY_SATURATION_KM_S * 100.0).clamp(0.0, 100.0)
}
