//! Property-based tests for orbit estimation and propagation using proptest.
//!
//! These tests verify that the estimator and the Kepler solver keep their
//! invariants across a wide range of inputs.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::estimator::{MAX_ECCENTRICITY, OrbitalElements, estimate};
use super::kepler::{position_at, solve_eccentric_anomaly};
use crate::types::ApproachRecord;

fn approach_record() -> impl Strategy<Value = ApproachRecord> {
    (
        "[A-Za-z0-9 ()]{1,16}",
        -10.0f64..5000.0,
        prop::option::of(-5.0f64..200.0),
        -5.0f64..120.0,
        any::<bool>(),
    )
        .prop_map(|(id, diameter, distance, velocity, hazardous)| {
            ApproachRecord::new(id, diameter, distance, velocity, hazardous)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Verify Kepler solver convergence for every eccentricity the estimator emits.
    ///
    /// The fixed 10-step solve should produce E such that M = E - e*sin(E).
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..=0.85,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;
        let e_anom = solve_eccentric_anomaly(mean_anomaly, eccentricity);

        let residual = (e_anom - eccentricity * e_anom.sin() - mean_anomaly).abs();
        prop_assert!(
            residual < 1e-9,
            "Kepler solver failed: M={}, e={}, E={}, residual={}",
            mean_anomaly, eccentricity, e_anom, residual
        );
    }

    /// Estimated eccentricity never exceeds the cap and never goes negative.
    #[test]
    fn prop_eccentricity_capped(record in approach_record()) {
        let elements = estimate(&record);
        prop_assert!(elements.eccentricity >= 0.0);
        prop_assert!(elements.eccentricity <= MAX_ECCENTRICITY);
        prop_assert!(elements.semi_major_axis.is_finite() && elements.semi_major_axis > 0.0);
    }

    /// Two estimates of the same record are bit-identical.
    #[test]
    fn prop_estimate_reproducible(record in approach_record()) {
        let first = estimate(&record);
        // Unrelated work in between must not disturb the second estimate.
        let _ = estimate(&ApproachRecord::new("other", 1.0, Some(1.0), 1.0, true));
        let second = estimate(&record);

        prop_assert_eq!(first.semi_major_axis.to_bits(), second.semi_major_axis.to_bits());
        prop_assert_eq!(first.eccentricity.to_bits(), second.eccentricity.to_bits());
        prop_assert_eq!(first.inclination_deg.to_bits(), second.inclination_deg.to_bits());
        prop_assert_eq!(first.ascending_node_deg.to_bits(), second.ascending_node_deg.to_bits());
        prop_assert_eq!(
            first.argument_of_periapsis_deg.to_bits(),
            second.argument_of_periapsis_deg.to_bits()
        );
    }

    /// Propagated positions stay between periapsis and apoapsis.
    #[test]
    fn prop_position_within_apsides(
        semi_major_axis in 2.5f64..500.0,
        eccentricity in 0.0f64..=0.85,
        inclination_deg in 0.0f64..180.0,
        ascending_node_deg in 0.0f64..360.0,
        argument_of_periapsis_deg in 0.0f64..360.0,
        time_offset in 0.0f64..10_000.0,
    ) {
        let elements = OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination_deg,
            ascending_node_deg,
            argument_of_periapsis_deg,
        };
        let r = position_at(&elements, time_offset, 0.05).length();
        let tolerance = 1e-9 * semi_major_axis;
        prop_assert!(r >= elements.periapsis() - tolerance, "r={} below periapsis", r);
        prop_assert!(r <= elements.apoapsis() + tolerance, "r={} above apoapsis", r);
    }
}
