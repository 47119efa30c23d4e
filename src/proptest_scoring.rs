//! Property-based tests for risk scoring and impact estimates using proptest.

use proptest::prelude::*;

use crate::impact::{ImpactParameters, MAX_EJECTA_HEIGHT_KM, MAX_QUAKE_MAGNITUDE, simulate};
use crate::risk::{RiskFactors, score};
use crate::test_utils::assertions::assert_score_consistent;
use crate::types::ApproachRecord;

fn any_finite_or_not() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1e6f64..1e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Scores stay in [1, 100] with a matching category, whatever the input.
    #[test]
    fn prop_score_bounded(
        diameter in any_finite_or_not(),
        distance in prop::option::of(any_finite_or_not()),
        velocity in any_finite_or_not(),
        hazardous in any::<bool>(),
    ) {
        let record = ApproachRecord::new("p", diameter, distance, velocity, hazardous);
        let result = score(&record);
        assert_score_consistent(&result);

        let factors = RiskFactors::from_record(&record);
        for factor in [factors.hazard, factors.diameter, factors.proximity, factors.velocity] {
            prop_assert!((0.0..=100.0).contains(&factor), "factor out of range: {}", factor);
        }
    }

    /// Moving an object closer never lowers its score.
    #[test]
    fn prop_score_monotone_in_distance(
        diameter in 1.0f64..2000.0,
        near in 0.1f64..60.0,
        extra in 0.0f64..60.0,
        velocity in 0.0f64..40.0,
    ) {
        let at = |d: f64| ApproachRecord::new("m", diameter, Some(d), velocity, false);
        let closer = score(&at(near));
        let farther = score(&at(near + extra));
        prop_assert!(closer.value >= farther.value);
    }

    /// Caps on quake magnitude and ejecta height hold across the valid input space.
    #[test]
    fn prop_impact_caps(
        diameter_km in 0.01f64..=100.0,
        velocity_km_s in 1.0f64..=72.0,
        density_kg_m3 in 1000.0f64..=8000.0,
        impact_angle_deg in 0.001f64..=90.0,
    ) {
        let params = ImpactParameters {
            diameter_km,
            velocity_km_s,
            density_kg_m3,
            impact_angle_deg,
        };
        let result = simulate(&params).expect("parameters are in range");
        prop_assert!(result.quake_magnitude <= MAX_QUAKE_MAGNITUDE);
        prop_assert!(result.ejecta_height_km <= MAX_EJECTA_HEIGHT_KM);
        prop_assert!(result.energy_joules > 0.0);
        prop_assert!(!result.comparison_label.is_empty());
    }
}
