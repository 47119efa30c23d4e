//! Common test utilities for integration tests.

#![allow(dead_code)]

use neowatch::types::ApproachRecord;
use neowatch::AlertThreshold;

/// Hazardous 200 m object passing at 10 LD and 18 km/s.
pub fn reference_hazardous() -> ApproachRecord {
    ApproachRecord::new("2024 YR4", 200.0, Some(10.0), 18.0, true)
}

/// A deterministic population of records covering the input space,
/// including malformed values.
pub fn population(count: usize) -> Vec<ApproachRecord> {
    (0..count)
        .map(|i| {
            let f = i as f64;
            let distance = match i % 7 {
                0 => None,
                1 => Some(0.0),
                2 => Some(-1.0),
                _ => Some((f * 0.37) % 80.0 + 0.05),
            };
            let diameter = if i % 11 == 0 { f64::NAN } else { (f * 13.0) % 3000.0 };
            let velocity = if i % 13 == 0 { -2.0 } else { (f * 0.7) % 75.0 };
            ApproachRecord::new(format!("neo-{i}"), diameter, distance, velocity, i % 3 == 0)
        })
        .collect()
}

/// Threshold that lets most approaches through.
pub fn permissive_threshold() -> AlertThreshold {
    AlertThreshold {
        min_diameter_m: 10.0,
        max_distance_lunar: 30.0,
        min_risk_score: 60,
    }
}
