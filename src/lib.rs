//! Neowatch - Near-Earth Object Analytics Core
//!
//! A library crate deriving analytical products from close-approach
//! snapshots: hazard scores, reproducible display orbits, hypothetical
//! impact consequences and per-user alert decisions.
//!
//! Every computation is a pure function of its arguments. Fetching data,
//! scheduling recomputation and persisting results belong to the caller.

pub mod alert;
pub mod animation;
pub mod impact;
pub mod orbit;
pub mod risk;
pub mod types;

pub use alert::{
    AlertConfig, AlertContext, AlertDecision, AlertEvent, AlertHistory, AlertMatcher,
    AlertSeverity, AlertThreshold, AlertType, InMemoryAlertHistory,
};
pub use impact::{ImpactError, ImpactParameters, ImpactResult, simulate};
pub use orbit::{OrbitalElements, PositionVector, estimate, position_at};
pub use risk::{RiskCategory, RiskScore, score};
pub use types::ApproachRecord;

#[cfg(test)]
mod proptest_scoring;

#[cfg(test)]
pub mod test_utils;
