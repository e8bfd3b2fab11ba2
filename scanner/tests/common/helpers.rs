//! Helpers for wiring scanners in tests

use std::collections::HashMap;
use std::path::Path;

use scanner::ScannerConfig;
use shared::MemberRecord;

use super::fixtures::TestFixtures;

pub struct TestHelpers;

impl TestHelpers {
    pub fn config(output_dir: &Path, base_url: &str) -> ScannerConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            ("ADO_ORG", TestFixtures::ORG.to_string()),
            ("ADO_PAT", "test-pat".to_string()),
            ("ADO_LICENSING_URL", base_url.to_string()),
            ("ADO_CORE_URL", base_url.to_string()),
            ("OUTPUT_DIR", output_dir.display().to_string()),
        ]);
        ScannerConfig::from_lookup(&|key: &str| vars.get(key).cloned()).expect("valid test config")
    }

    pub fn read_snapshot(path: &Path) -> Vec<MemberRecord> {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }
}
