//! Test helpers for preparing and inspecting an output folder

use std::path::Path;
use std::time::{Duration, SystemTime};

use shared::{AuditViewRow, DecisionRow, DemotionEvent, MemberRecord, OrgLayout};

pub struct TestHelpers;

impl TestHelpers {
    pub fn write_snapshot(layout: &OrgLayout, members: &[MemberRecord]) {
        std::fs::create_dir_all(layout.org_dir()).unwrap();
        std::fs::write(layout.snapshot_path(), serde_json::to_vec_pretty(members).unwrap()).unwrap();
    }

    pub fn write_decisions(layout: &OrgLayout, rows: &[DecisionRow]) {
        std::fs::create_dir_all(layout.org_dir()).unwrap();
        std::fs::write(layout.decisions_path(), serde_json::to_vec_pretty(rows).unwrap()).unwrap();
    }

    pub fn read_decisions(layout: &OrgLayout) -> Vec<DecisionRow> {
        serde_json::from_slice(&std::fs::read(layout.decisions_path()).unwrap()).unwrap()
    }

    pub fn read_events(layout: &OrgLayout) -> Vec<DemotionEvent> {
        std::fs::read_to_string(layout.audit_log_path())
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    pub fn read_view(layout: &OrgLayout) -> Vec<AuditViewRow> {
        serde_json::from_slice(&std::fs::read(layout.audit_view_path()).unwrap()).unwrap()
    }

    pub fn append_raw(path: &Path, text: &str) {
        use std::io::Write;
        let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    /// Move a file's modification time `secs` seconds into the past
    pub fn age(path: &Path, secs: u64) {
        let file = std::fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs)).unwrap();
    }

    pub fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }
}
