//! Service-specific tests
//!
//! Each service has its own test file; the licensing client runs against a
//! local mock HTTP server.


pub mod common {
    use std::collections::HashMap;

    use shared::config::AdoConnection;

    /// Connection pointing both endpoints at `base_url`
    pub fn test_connection(base_url: &str) -> AdoConnection {
        let vars: HashMap<&str, String> = HashMap::from([
            ("ADO_ORG", "contoso".to_string()),
            ("ADO_PAT", "secret".to_string()),
            ("ADO_LICENSING_URL", base_url.to_string()),
            ("ADO_CORE_URL", base_url.to_string()),
            ("ADO_HTTP_TIMEOUT_SECS", "5".to_string()),
        ]);
        AdoConnection::from_lookup(&|key: &str| vars.get(key).cloned()).expect("valid test connection")
    }
}
