//! Projection of the audit log into the human-facing audit view
//!
//! The log is the source of truth; the view is disposable and can be rebuilt
//! from the log alone at any time.

use shared::{AuditViewRow, DemotionEvent};

/// Events recovered from a raw audit log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub events: Vec<DemotionEvent>,
    /// Non-blank lines that did not parse as an event
    pub skipped: usize,
}

/// Parse one event per line, skipping damaged lines
pub fn parse_audit_log(content: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<DemotionEvent>(line) {
            Ok(event) => parsed.events.push(event),
            Err(_) => parsed.skipped += 1,
        }
    }
    parsed
}

/// Newest first; identical timestamps are ordered by entitlement, run and
/// email, then by the whole row, so the result does not depend on append order
pub fn project(events: &[DemotionEvent]) -> Vec<AuditViewRow> {
    let mut keyed: Vec<_> = events
        .iter()
        .map(|event| (event.timestamp_utc, AuditViewRow::from(event)))
        .collect();

    keyed.sort_by(|(at_a, a), (at_b, b)| {
        at_b.cmp(at_a)
            .then_with(|| a.entitlement_id.cmp(&b.entitlement_id))
            .then_with(|| a.run_id.cmp(&b.run_id))
            .then_with(|| a.email.cmp(&b.email))
            .then_with(|| a.cmp(b))
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{ExecutionMode, LicensingSource, Provenance};

    fn event(entitlement: &str, hour: u32) -> DemotionEvent {
        DemotionEvent {
            timestamp_utc: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            org: "contoso".to_string(),
            entitlement_id: entitlement.to_string(),
            email: format!("{entitlement}@contoso.com"),
            old_license: "Basic".to_string(),
            new_license: "Stakeholder".to_string(),
            days_inactive: 100,
            threshold_days: 90,
            license_source: LicensingSource::Account,
            mode: ExecutionMode::SingleStep,
            provenance: Provenance::default(),
        }
    }

    fn to_lines(events: &[DemotionEvent]) -> String {
        events
            .iter()
            .map(|e| serde_json::to_string(e).unwrap() + "\n")
            .collect()
    }

    #[test]
    fn test_damaged_lines_are_skipped() {
        let mut content = to_lines(&[event("a", 1)]);
        content.push_str("{\"timestamp_utc\": \"2024-06-01T0\n");
        content.push_str("\n");
        content.push_str("not json at all\n");
        content.push_str(&to_lines(&[event("b", 2)]));

        let parsed = parse_audit_log(&content);
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_projection_is_newest_first() {
        let rows = project(&[event("a", 1), event("c", 3), event("b", 2)]);
        let order: Vec<&str> = rows.iter().map(|r| r.entitlement_id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_projection_ignores_append_order() {
        let forward = project(&[event("a", 5), event("b", 5), event("c", 1)]);
        let backward = project(&[event("c", 1), event("b", 5), event("a", 5)]);
        assert_eq!(forward, backward);
        assert_eq!(
            serde_json::to_vec_pretty(&forward).unwrap(),
            serde_json::to_vec_pretty(&backward).unwrap()
        );
    }

    #[test]
    fn test_empty_log_projects_to_empty_view() {
        let parsed = parse_audit_log("");
        assert!(project(&parsed.events).is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}
