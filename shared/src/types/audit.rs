//! Audit trail of confirmed demotions

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::member::LicensingSource;
use super::mode::ExecutionMode;

/// Which pipeline run produced an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub run_id: String,
    pub revision: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            run_id: "local".to_string(),
            revision: "unknown".to_string(),
        }
    }
}

/// One confirmed demotion, appended to the audit log exactly once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemotionEvent {
    pub timestamp_utc: DateTime<Utc>,
    pub org: String,
    pub entitlement_id: String,
    pub email: String,
    pub old_license: String,
    pub new_license: String,
    pub days_inactive: u32,
    pub threshold_days: u32,
    pub license_source: LicensingSource,
    pub mode: ExecutionMode,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl DemotionEvent {
    /// Truncate the event time to whole seconds
    pub fn stamp(at: DateTime<Utc>) -> DateTime<Utc> {
        at.trunc_subsecs(0)
    }
}

/// Human-facing audit row, derived entirely from a [`DemotionEvent`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditViewRow {
    #[serde(rename = "Timestamp (UTC)")]
    pub timestamp: String,
    #[serde(rename = "Organization")]
    pub org: String,
    #[serde(rename = "User")]
    pub email: String,
    #[serde(rename = "Entitlement ID")]
    pub entitlement_id: String,
    #[serde(rename = "Old License")]
    pub old_license: String,
    #[serde(rename = "New License")]
    pub new_license: String,
    #[serde(rename = "Days Inactive")]
    pub days_inactive: u32,
    #[serde(rename = "Threshold (days)")]
    pub threshold_days: u32,
    #[serde(rename = "License Source")]
    pub license_source: String,
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "Run ID")]
    pub run_id: String,
    #[serde(rename = "Revision")]
    pub revision: String,
}

impl From<&DemotionEvent> for AuditViewRow {
    fn from(event: &DemotionEvent) -> Self {
        Self {
            timestamp: event.timestamp_utc.format("%Y-%m-%d %H:%M:%S").to_string(),
            org: event.org.clone(),
            email: event.email.clone(),
            entitlement_id: event.entitlement_id.clone(),
            old_license: event.old_license.clone(),
            new_license: event.new_license.clone(),
            days_inactive: event.days_inactive,
            threshold_days: event.threshold_days,
            license_source: event.license_source.to_string(),
            mode: event.mode.to_string(),
            run_id: event.provenance.run_id.clone(),
            revision: event.provenance.revision.clone(),
        }
    }
}
