//! Test fixtures: canned members, rows, events and configurations

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use demoter::DemoterConfig;
use shared::{
    DecisionRow, DemotionEvent, DemotionStatus, ExecutionMode, LicensingSource, MemberRecord, Provenance,
};

pub struct TestFixtures;

impl TestFixtures {
    pub const ORG: &'static str = "contoso";
    pub const PAT: &'static str = "test-pat";
    pub const THRESHOLD_DAYS: u32 = 90;

    /// Paid, account-funded member inactive for `days`
    pub fn member(name: &str, days: u32) -> MemberRecord {
        MemberRecord {
            email: format!("{name}@contoso.com"),
            license: "Basic".to_string(),
            source: LicensingSource::Account,
            last_login: None,
            last_login_date: None,
            days_inactive: Some(days),
            entitlement_id: Some(format!("ent-{name}")),
            date_created: None,
        }
    }

    pub fn stakeholder(name: &str, days: u32) -> MemberRecord {
        MemberRecord {
            license: "Stakeholder".to_string(),
            ..Self::member(name, days)
        }
    }

    pub fn row(name: &str, days: u32, status: DemotionStatus) -> DecisionRow {
        DecisionRow::new(Self::member(name, days), status)
    }

    pub fn flagged_rows(count: usize) -> Vec<DecisionRow> {
        (0..count)
            .map(|i| Self::row(&format!("dormant{i}"), 500 - i as u32, DemotionStatus::Flagged))
            .collect()
    }

    /// Snapshot with two candidates, one active member and one already free
    pub fn mixed_snapshot() -> Vec<MemberRecord> {
        vec![
            Self::member("recent", 5),
            Self::member("dormant", 200),
            Self::stakeholder("viewer", 700),
            Self::member("ghost", shared::NEVER_ACCESSED_DAYS),
        ]
    }

    pub fn event(name: &str, at: DateTime<Utc>) -> DemotionEvent {
        DemotionEvent {
            timestamp_utc: DemotionEvent::stamp(at),
            org: Self::ORG.to_string(),
            entitlement_id: format!("ent-{name}"),
            email: format!("{name}@contoso.com"),
            old_license: "Basic".to_string(),
            new_license: "Stakeholder".to_string(),
            days_inactive: 200,
            threshold_days: Self::THRESHOLD_DAYS,
            license_source: LicensingSource::Account,
            mode: ExecutionMode::SingleStep,
            provenance: Provenance::default(),
        }
    }

    /// Configuration rooted at `output_dir`, talking to `licensing_url`
    pub fn config(output_dir: &Path, mode: ExecutionMode, licensing_url: &str) -> DemoterConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            ("ADO_ORG", Self::ORG.to_string()),
            ("ADO_PAT", Self::PAT.to_string()),
            ("EXECUTION_MODE", mode.as_str().to_string()),
            ("DEMOTE_THRESHOLD_DAYS", Self::THRESHOLD_DAYS.to_string()),
            ("GITHUB_RUN_ID", "run-7".to_string()),
            ("GITHUB_SHA", "cafebabe".to_string()),
            ("OUTPUT_DIR", output_dir.display().to_string()),
            ("ADO_LICENSING_URL", licensing_url.to_string()),
            ("ADO_HTTP_TIMEOUT_SECS", "5".to_string()),
        ]);
        DemoterConfig::from_lookup(&|key: &str| vars.get(key).cloned()).expect("valid test config")
    }
}
