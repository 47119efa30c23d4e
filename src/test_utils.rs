//! Test utilities for the scoring, orbit and impact modules.
//!
//! Provides fixtures for common approach records and impactors, and
//! assertions for the invariants every scored or estimated result must hold.

use crate::impact::ImpactParameters;
use crate::types::ApproachRecord;

/// Fixtures for creating test inputs.
pub mod fixtures {
    use super::*;

    /// Hazardous 200 m object passing at 10 LD and 18 km/s (score ≈ 85.6).
    pub fn reference_hazardous() -> ApproachRecord {
        ApproachRecord::new("2024 YR4", 200.0, Some(10.0), 18.0, true)
    }

    /// Small, distant, slow object that scores at the floor.
    pub fn benign() -> ApproachRecord {
        ApproachRecord::new("2019 AB1", 4.0, Some(48.0), 3.0, false)
    }

    /// 10 km stony impactor at 20 km/s and 45°.
    pub fn chicxulub_like() -> ImpactParameters {
        ImpactParameters {
            diameter_km: 10.0,
            velocity_km_s: 20.0,
            density_kg_m3: 3000.0,
            impact_angle_deg: 45.0,
        }
    }
}

/// Assertions for verifying output invariants.
pub mod assertions {
    use crate::orbit::{OrbitalElements, estimator::MAX_ECCENTRICITY};
    use crate::risk::{RiskCategory, RiskScore};

    /// Assert a score is in range and its category matches its value.
    ///
    /// # Panics
    /// Panics if either invariant is violated.
    pub fn assert_score_consistent(score: &RiskScore) {
        assert!(
            (1..=100).contains(&score.value),
            "Score out of range: {}",
            score.value
        );
        assert_eq!(
            score.category,
            RiskCategory::from_value(score.value),
            "Category does not match value {}",
            score.value
        );
    }

    /// Assert estimated elements describe a bound, capped ellipse.
    ///
    /// # Panics
    /// Panics if eccentricity or semi-major axis are out of bounds.
    pub fn assert_elements_valid(elements: &OrbitalElements) {
        assert!(
            (0.0..=MAX_ECCENTRICITY).contains(&elements.eccentricity),
            "Eccentricity out of range: {}",
            elements.eccentricity
        );
        assert!(
            elements.semi_major_axis.is_finite() && elements.semi_major_axis > 0.0,
            "Invalid semi-major axis: {}",
            elements.semi_major_axis
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::estimate;
    use crate::risk::score;

    #[test]
    fn test_fixture_scores_consistent() {
        for record in [fixtures::reference_hazardous(), fixtures::benign()] {
            assertions::assert_score_consistent(&score(&record));
        }
    }

    #[test]
    fn test_benign_fixture_minimal() {
        let s = score(&fixtures::benign());
        assert!(s.value <= 25, "benign fixture scored {}", s.value);
    }

    #[test]
    fn test_fixture_orbits_valid() {
        for record in [fixtures::reference_hazardous(), fixtures::benign()] {
            assertions::assert_elements_valid(&estimate(&record));
        }
    }

    #[test]
    fn test_impact_fixture_valid() {
        assert!(fixtures::chicxulub_like().validate().is_ok());
    }
}
