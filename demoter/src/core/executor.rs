//! Reconciliation decisions: what a run does with the flagged candidates
//!
//! Everything here is synchronous and side-effect free. [`crate::Demoter`]
//! performs the I/O around these decisions.

use std::collections::HashSet;
use std::time::SystemTime;

use chrono::{DateTime, SubsecRound, Utc};
use shared::{DecisionRow, DemotionEvent, DemotionStatus, ExecutionMode};

use crate::config::DemoterConfig;
use crate::core::evaluator::EvaluationSummary;
use crate::traits::DemotionConfirmation;

/// What the selected mode asks for, given the current rows
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionStep {
    /// Nothing is flagged; every mode stops here
    NoCandidates,
    /// List the candidates in priority order
    Preview(Vec<DecisionRow>),
    /// Demote this row, the first flagged one in stored order
    Demote(DecisionRow),
    /// Batch mode is locked; report how many were left alone
    Refuse { candidates: usize },
}

/// Result of one demoter run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    NoCandidates,
    Previewed { candidates: Vec<DecisionRow> },
    Demoted { event: DemotionEvent },
    BatchRefused { candidates: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Whether the decision store was rebuilt from the snapshot
    pub recomputed: bool,
    /// Entitlements promoted to done from the audit log before acting
    pub recovered: Vec<String>,
    /// Store counts before this run's action
    pub summary: EvaluationSummary,
    pub outcome: RunOutcome,
}

/// Rows currently waiting for demotion, in stored order
pub fn flagged(rows: &[DecisionRow]) -> Vec<&DecisionRow> {
    rows.iter().filter(|row| row.is_flagged()).collect()
}

pub fn plan(mode: ExecutionMode, rows: &[DecisionRow]) -> ExecutionStep {
    let candidates = flagged(rows);
    if candidates.is_empty() {
        return ExecutionStep::NoCandidates;
    }

    match mode {
        ExecutionMode::Preview => ExecutionStep::Preview(candidates.into_iter().cloned().collect()),
        ExecutionMode::SingleStep => ExecutionStep::Demote(candidates[0].clone()),
        ExecutionMode::BatchAll => ExecutionStep::Refuse {
            candidates: candidates.len(),
        },
    }
}

/// Promote flagged rows whose demotion is already in the audit log
///
/// An event stamped no earlier than the store's last write (compared at
/// second precision) belongs to a run that died between appending the event
/// and rewriting the store. Returns the promoted entitlement ids.
pub fn recover_interrupted(
    rows: &mut [DecisionRow],
    events: &[DemotionEvent],
    store_written: Option<SystemTime>,
) -> Vec<String> {
    let Some(store_written) = store_written else {
        return Vec::new();
    };
    let cutoff = DateTime::<Utc>::from(store_written).trunc_subsecs(0);

    let confirmed: HashSet<&str> = events
        .iter()
        .filter(|event| event.timestamp_utc >= cutoff)
        .map(|event| event.entitlement_id.as_str())
        .collect();

    let mut recovered = Vec::new();
    for row in rows.iter_mut().filter(|row| row.is_flagged()) {
        if let Some(id) = row.entitlement() {
            if confirmed.contains(id) {
                let id = id.to_string();
                row.status = DemotionStatus::Done;
                recovered.push(id);
            }
        }
    }
    recovered
}

/// Mark the row for `entitlement_id` done; `false` if no row matched
pub fn mark_done(rows: &mut [DecisionRow], entitlement_id: &str) -> bool {
    let mut matched = false;
    for row in rows.iter_mut().filter(|row| row.entitlement() == Some(entitlement_id)) {
        row.status = DemotionStatus::Done;
        matched = true;
    }
    matched
}

pub fn build_event(
    row: &DecisionRow,
    entitlement_id: &str,
    confirmation: &DemotionConfirmation,
    config: &DemoterConfig,
    at: DateTime<Utc>,
) -> DemotionEvent {
    DemotionEvent {
        timestamp_utc: DemotionEvent::stamp(at),
        org: config.org().to_string(),
        entitlement_id: entitlement_id.to_string(),
        email: row.member.email.clone(),
        old_license: row.member.license.clone(),
        new_license: confirmation.new_license.clone(),
        days_inactive: row.member.days_inactive_or_zero(),
        threshold_days: config.threshold_days,
        license_source: row.member.source.clone(),
        mode: config.mode,
        provenance: config.provenance.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::{LicensingSource, MemberRecord, Provenance};
    use std::time::Duration;

    fn row(id: &str, status: DemotionStatus) -> DecisionRow {
        DecisionRow::new(
            MemberRecord {
                email: format!("{id}@contoso.com"),
                license: "Basic".to_string(),
                source: LicensingSource::Account,
                last_login: None,
                last_login_date: None,
                days_inactive: Some(120),
                entitlement_id: Some(id.to_string()),
                date_created: None,
            },
            status,
        )
    }

    fn event(id: &str, at: DateTime<Utc>) -> DemotionEvent {
        DemotionEvent {
            timestamp_utc: at,
            org: "contoso".to_string(),
            entitlement_id: id.to_string(),
            email: format!("{id}@contoso.com"),
            old_license: "Basic".to_string(),
            new_license: "Stakeholder".to_string(),
            days_inactive: 120,
            threshold_days: 90,
            license_source: LicensingSource::Account,
            mode: ExecutionMode::SingleStep,
            provenance: Provenance::default(),
        }
    }

    fn rows() -> Vec<DecisionRow> {
        vec![
            row("done-1", DemotionStatus::Done),
            row("unset-1", DemotionStatus::Unset),
            row("first", DemotionStatus::Flagged),
            row("second", DemotionStatus::Flagged),
        ]
    }

    #[test]
    fn test_no_candidates_short_circuits_every_mode() {
        let quiet = vec![row("a", DemotionStatus::Unset), row("b", DemotionStatus::Done)];
        for mode in [ExecutionMode::Preview, ExecutionMode::SingleStep, ExecutionMode::BatchAll] {
            assert_eq!(plan(mode, &quiet), ExecutionStep::NoCandidates);
        }
    }

    #[test]
    fn test_single_step_picks_first_flagged_in_stored_order() {
        match plan(ExecutionMode::SingleStep, &rows()) {
            ExecutionStep::Demote(row) => assert_eq!(row.entitlement(), Some("first")),
            other => panic!("expected Demote, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_lists_all_flagged() {
        match plan(ExecutionMode::Preview, &rows()) {
            ExecutionStep::Preview(list) => {
                let ids: Vec<_> = list.iter().filter_map(|r| r.entitlement()).collect();
                assert_eq!(ids, vec!["first", "second"]);
            }
            other => panic!("expected Preview, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_refuses_with_count() {
        assert_eq!(plan(ExecutionMode::BatchAll, &rows()), ExecutionStep::Refuse { candidates: 2 });
    }

    #[test]
    fn test_mark_done_matches_by_entitlement_not_position() {
        let mut rows = rows();
        rows.reverse();
        assert!(mark_done(&mut rows, "first"));
        let first = rows.iter().find(|r| r.entitlement() == Some("first")).unwrap();
        assert_eq!(first.status, DemotionStatus::Done);
        let second = rows.iter().find(|r| r.entitlement() == Some("second")).unwrap();
        assert_eq!(second.status, DemotionStatus::Flagged);
        assert!(!mark_done(&mut rows, "missing"));
    }

    #[test]
    fn test_recovery_only_uses_events_after_last_store_write() {
        let store_written = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let events = vec![
            event("first", store_written + chrono::Duration::seconds(5)),
            event("second", store_written - chrono::Duration::days(30)),
        ];
        let mut rows = rows();

        let recovered = recover_interrupted(&mut rows, &events, Some(SystemTime::from(store_written)));

        assert_eq!(recovered, vec!["first".to_string()]);
        assert_eq!(rows[2].status, DemotionStatus::Done);
        assert_eq!(rows[3].status, DemotionStatus::Flagged);
    }

    #[test]
    fn test_recovery_compares_at_second_precision() {
        let event_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        // store written 400ms into the same second the event was stamped
        let store_written = SystemTime::from(event_at) + Duration::from_millis(400);
        let mut rows = rows();

        let recovered = recover_interrupted(&mut rows, &[event("second", event_at)], Some(store_written));
        assert_eq!(recovered, vec!["second".to_string()]);
    }

    #[test]
    fn test_recovery_without_store_does_nothing() {
        let mut rows = rows();
        let recovered = recover_interrupted(&mut rows, &[event("first", Utc::now())], None);
        assert!(recovered.is_empty());
    }
}
