//! Canned directory responses

use chrono::{DateTime, TimeZone, Utc};
use scanner::types::{AccessLevel, EntitlementItem, EntitlementListing, UserRef};

pub struct TestFixtures;

impl TestFixtures {
    pub const ORG: &'static str = "contoso";

    /// Fixed scan clock
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    pub fn item(name: &str, source: &str, last: Option<&str>) -> EntitlementItem {
        EntitlementItem {
            id: Some(format!("ent-{name}")),
            user: UserRef {
                principal_name: Some(format!("{name}@contoso.com")),
                display_name: Some(name.to_string()),
            },
            access_level: AccessLevel {
                license_display_name: Some("Basic".to_string()),
                licensing_source: Some(source.to_string()),
                account_license_type: Some("express".to_string()),
            },
            last_accessed_date: last.map(str::to_string),
            date_created: Some("2021-03-04T05:06:07Z".to_string()),
        }
    }

    pub fn listing(total_count: Option<u64>) -> EntitlementListing {
        EntitlementListing {
            items: vec![
                Self::item("active", "account", Some("2024-05-31T09:00:00Z")),
                Self::item("dormant", "account", Some("2023-12-01T00:00:00Z")),
                Self::item("ghost", "account", Some("0001-01-01T00:00:00Z")),
                Self::item("subscriber", "msdn", None),
            ],
            total_count,
        }
    }

    pub fn entitlement_json(name: &str, last: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("ent-{name}"),
            "user": { "principalName": format!("{name}@contoso.com") },
            "accessLevel": { "licenseDisplayName": "Basic", "licensingSource": "account" },
            "lastAccessedDate": last,
            "dateCreated": "2021-03-04T05:06:07Z"
        })
    }
}
