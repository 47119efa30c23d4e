//! Alert matching for per-user notification thresholds.
//!
//! The matcher decides whether an approach should notify a user and with
//! which type and severity. Dedupe is a plain timestamp comparison against
//! supplied history (`evaluate`) or a single conditional insert into a
//! shared store (`evaluate_and_record`), so concurrent ingestion cycles
//! emit at most one alert per (subject, user, type) and window.
//!
//! Any doubt resolves to "suppress": a missed notification is preferred
//! over a spurious one.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use bevy::log::{debug, info};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::{RiskCategory, RiskScore};
use crate::types::{ApproachRecord, SECONDS_PER_DAY};

/// Why an alert fires.
///
/// Declaration order is priority order: when several types fire for the
/// same approach, the earliest one is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    NewHazardous,
    HighRisk,
    CloseApproach,
    WatchedUpdate,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::NewHazardous,
        AlertType::HighRisk,
        AlertType::CloseApproach,
        AlertType::WatchedUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::NewHazardous => "new_hazardous",
            AlertType::HighRisk => "high_risk",
            AlertType::CloseApproach => "close_approach",
            AlertType::WatchedUpdate => "watched_update",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
}

/// A user's notification thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertThreshold {
    /// Approaches by smaller objects never alert.
    pub min_diameter_m: f64,
    /// close_approach fires strictly below this distance (LD).
    pub max_distance_lunar: f64,
    /// high_risk fires at or above this score.
    pub min_risk_score: u8,
}

impl AlertThreshold {
    fn is_usable(&self) -> bool {
        self.min_diameter_m.is_finite() && !self.max_distance_lunar.is_nan()
    }
}

/// Per-user facts about the approach, resolved by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertContext {
    pub user_id: String,
    /// The subject is on the user's watch list.
    pub watched: bool,
    /// The record differs from the previous ingestion cycle.
    pub changed: bool,
    /// The subject was first seen in this ingestion cycle.
    pub newly_observed: bool,
}

impl AlertContext {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

/// An emitted alert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub subject_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    /// Whether `self` falls in the dedupe window of `other`, an alert for the
    /// same subject, user and type.
    pub fn duplicates(&self, other: &AlertEvent, window: TimeDelta) -> bool {
        self.subject_id == other.subject_id
            && self.user_id == other.user_id
            && self.alert_type == other.alert_type
            && within_window(other.timestamp, self.timestamp, window)
    }
}

/// Two alerts collide when their timestamps are less than `window` apart.
///
/// Symmetric, so a racing cycle stamped slightly earlier than an already
/// recorded alert is still suppressed.
pub fn within_window(recorded: DateTime<Utc>, now: DateTime<Utc>, window: TimeDelta) -> bool {
    (now - recorded).abs() < window
}

/// Why no alert was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuppressReason {
    /// No usable threshold for the user.
    MissingThreshold,
    /// The object is smaller than the user's minimum diameter.
    BelowDiameterGate,
    /// No alert type fired.
    NoCandidates,
    /// Every firing type was already alerted within the dedupe window.
    Duplicate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlertDecision {
    Emit(AlertEvent),
    Suppress(SuppressReason),
}

impl AlertDecision {
    pub fn is_emit(&self) -> bool {
        matches!(self, AlertDecision::Emit(_))
    }

    pub fn event(&self) -> Option<&AlertEvent> {
        match self {
            AlertDecision::Emit(event) => Some(event),
            AlertDecision::Suppress(_) => None,
        }
    }

    pub fn into_event(self) -> Option<AlertEvent> {
        match self {
            AlertDecision::Emit(event) => Some(event),
            AlertDecision::Suppress(_) => None,
        }
    }
}

/// Dedupe key as an external store would index it.
///
/// `bucket` is the window-sized time slot of the timestamp. Buckets are
/// fixed while the dedupe rule slides (`|t - t0| < window`), so two
/// duplicates can sit in adjacent buckets. A store indexing by this key
/// must look up every bucket in [`AlertKey::neighbouring_buckets`] and
/// compare the stored timestamps with [`within_window`] inside the same
/// transaction as the insert.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub subject_id: String,
    pub user_id: String,
    pub alert_type: AlertType,
    pub bucket: i64,
}

impl AlertKey {
    pub fn for_event(event: &AlertEvent, window: TimeDelta) -> Self {
        Self {
            subject_id: event.subject_id.clone(),
            user_id: event.user_id.clone(),
            alert_type: event.alert_type,
            bucket: Self::bucket(event.timestamp, window),
        }
    }

    /// Index of the window-sized slot containing `timestamp`.
    pub fn bucket(timestamp: DateTime<Utc>, window: TimeDelta) -> i64 {
        let width = window.num_seconds().max(1);
        timestamp.timestamp().div_euclid(width)
    }

    /// Buckets that can hold an alert within one window of this key.
    pub fn neighbouring_buckets(&self) -> [i64; 3] {
        [self.bucket - 1, self.bucket, self.bucket + 1]
    }
}

/// Store of previously emitted alerts.
///
/// `try_record` is the one check-and-insert step: it records `event` and
/// returns `true` only when no alert for the same subject, user and type
/// is recorded less than `window` away from it. Implementations must make the check and
/// the insert atomic with respect to each other.
pub trait AlertHistory: Send + Sync {
    fn try_record(&self, event: &AlertEvent, window: TimeDelta) -> bool;
}

type HistoryKey = (String, String, AlertType);

/// Process-local [`AlertHistory`] guarded by a single mutex.
#[derive(Default)]
pub struct InMemoryAlertHistory {
    entries: Mutex<HashMap<HistoryKey, Vec<DateTime<Utc>>>>,
}

impl InMemoryAlertHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded alerts.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recorded alerts, for handing back to [`AlertMatcher::evaluate`].
    pub fn snapshot(&self) -> Vec<AlertEvent> {
        // Severity is not part of the dedupe key and is not kept.
        self.lock()
            .iter()
            .flat_map(|((subject_id, user_id, alert_type), stamps)| {
                stamps.iter().map(move |timestamp| AlertEvent {
                    subject_id: subject_id.clone(),
                    user_id: user_id.clone(),
                    alert_type: *alert_type,
                    severity: AlertSeverity::Info,
                    timestamp: *timestamp,
                })
            })
            .collect()
    }

    /// Drop entries older than `window` before `now`.
    pub fn prune(&self, now: DateTime<Utc>, window: TimeDelta) {
        let mut entries = self.lock();
        for stamps in entries.values_mut() {
            stamps.retain(|t| now - *t < window);
        }
        entries.retain(|_, stamps| !stamps.is_empty());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<HistoryKey, Vec<DateTime<Utc>>>> {
        // Every critical section leaves the map consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertHistory for InMemoryAlertHistory {
    fn try_record(&self, event: &AlertEvent, window: TimeDelta) -> bool {
        let key = (
            event.subject_id.clone(),
            event.user_id.clone(),
            event.alert_type,
        );
        let mut entries = self.lock();
        let stamps = entries.entry(key).or_default();
        if stamps
            .iter()
            .any(|recorded| within_window(*recorded, event.timestamp, window))
        {
            return false;
        }
        stamps.push(event.timestamp);
        true
    }
}

/// Matcher tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertConfig {
    /// An alert suppresses repeats of itself for this long.
    pub dedupe_window: TimeDelta,
    /// Miss distance (LD) at or below which an alert is always `danger`.
    pub min_safe_distance_ld: f64,
    /// Miss distance (LD) at or below which an alert is at least `warning`.
    pub notable_distance_ld: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dedupe_window: TimeDelta::seconds(SECONDS_PER_DAY as i64),
            min_safe_distance_ld: 1.0,
            notable_distance_ld: 5.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AlertMatcher {
    pub config: AlertConfig,
}

impl AlertMatcher {
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Every alert type that fires for this approach, in priority order.
    ///
    /// Ignores the diameter gate and dedupe.
    pub fn candidates(
        &self,
        record: &ApproachRecord,
        score: &RiskScore,
        threshold: &AlertThreshold,
        context: &AlertContext,
    ) -> Vec<AlertType> {
        let distance = record.known_miss_distance_lunar();
        AlertType::ALL
            .into_iter()
            .filter(|alert_type| match alert_type {
                AlertType::NewHazardous => {
                    record.is_potentially_hazardous && context.newly_observed
                }
                AlertType::HighRisk => score.value >= threshold.min_risk_score,
                // Unknown distance never counts as close.
                AlertType::CloseApproach => {
                    distance.is_some_and(|d| d < threshold.max_distance_lunar)
                }
                AlertType::WatchedUpdate => context.watched && context.changed,
            })
            .collect()
    }

    /// Severity of any alert for this approach.
    pub fn severity(&self, record: &ApproachRecord, score: &RiskScore) -> AlertSeverity {
        let distance = record.known_miss_distance_lunar();
        let within = |limit: f64| distance.is_some_and(|d| d <= limit);

        if score.category == RiskCategory::High || within(self.config.min_safe_distance_ld) {
            AlertSeverity::Danger
        } else if score.category == RiskCategory::Moderate
            || within(self.config.notable_distance_ld)
        {
            AlertSeverity::Warning
        } else {
            AlertSeverity::Info
        }
    }

    /// Firing types that pass the threshold and diameter gates.
    fn gated_candidates(
        &self,
        record: &ApproachRecord,
        score: &RiskScore,
        threshold: Option<&AlertThreshold>,
        context: &AlertContext,
    ) -> Result<Vec<AlertType>, SuppressReason> {
        let Some(threshold) = threshold.filter(|t| t.is_usable()) else {
            debug!(
                "No usable alert threshold for user {}, suppressing {}",
                context.user_id, record.identifier
            );
            return Err(SuppressReason::MissingThreshold);
        };

        if record.sanitized_diameter_m() < threshold.min_diameter_m {
            debug!(
                "{} below diameter gate for user {} ({:.1} m < {:.1} m)",
                record.identifier,
                context.user_id,
                record.sanitized_diameter_m(),
                threshold.min_diameter_m
            );
            return Err(SuppressReason::BelowDiameterGate);
        }

        let candidates = self.candidates(record, score, threshold, context);
        if candidates.is_empty() {
            return Err(SuppressReason::NoCandidates);
        }
        Ok(candidates)
    }

    fn build_event(
        &self,
        record: &ApproachRecord,
        context: &AlertContext,
        alert_type: AlertType,
        severity: AlertSeverity,
        now: DateTime<Utc>,
    ) -> AlertEvent {
        AlertEvent {
            subject_id: record.identifier.clone(),
            user_id: context.user_id.clone(),
            alert_type,
            severity,
            timestamp: now,
        }
    }

    /// Decide against an already-fetched list of recent alerts.
    ///
    /// Pure: nothing is recorded. Emits the highest-priority firing type that
    /// has no alert for the same subject and user within the dedupe window.
    pub fn evaluate(
        &self,
        record: &ApproachRecord,
        score: &RiskScore,
        threshold: Option<&AlertThreshold>,
        context: &AlertContext,
        recent_alerts: &[AlertEvent],
        now: DateTime<Utc>,
    ) -> AlertDecision {
        let candidates = match self.gated_candidates(record, score, threshold, context) {
            Ok(candidates) => candidates,
            Err(reason) => return AlertDecision::Suppress(reason),
        };
        let severity = self.severity(record, score);

        let window = self.config.dedupe_window;
        for alert_type in candidates {
            let event = self.build_event(record, context, alert_type, severity, now);
            if recent_alerts.iter().any(|prior| event.duplicates(prior, window)) {
                debug!(
                    "Suppressing duplicate {} alert for {} / {}",
                    alert_type.as_str(),
                    record.identifier,
                    context.user_id
                );
                continue;
            }
            return AlertDecision::Emit(event);
        }
        AlertDecision::Suppress(SuppressReason::Duplicate)
    }

    /// Decide and record in one step against a shared history store.
    ///
    /// Safe to call concurrently: each candidate is claimed through
    /// [`AlertHistory::try_record`], so racing evaluations for the same
    /// subject, user and type emit at most one event per window.
    pub fn evaluate_and_record<H: AlertHistory + ?Sized>(
        &self,
        record: &ApproachRecord,
        score: &RiskScore,
        threshold: Option<&AlertThreshold>,
        context: &AlertContext,
        history: &H,
        now: DateTime<Utc>,
    ) -> AlertDecision {
        let candidates = match self.gated_candidates(record, score, threshold, context) {
            Ok(candidates) => candidates,
            Err(reason) => return AlertDecision::Suppress(reason),
        };
        let severity = self.severity(record, score);

        for alert_type in candidates {
            let event = self.build_event(record, context, alert_type, severity, now);
            if history.try_record(&event, self.config.dedupe_window) {
                info!(
                    "Alert {} ({:?}) for {} / {}",
                    alert_type.as_str(),
                    severity,
                    record.identifier,
                    context.user_id
                );
                return AlertDecision::Emit(event);
            }
        }
        AlertDecision::Suppress(SuppressReason::Duplicate)
    }
}
