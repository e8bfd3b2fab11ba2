//! Wire types of the directory REST endpoints
//!
//! Every field is optional on the wire; absent values deserialize to their
//! defaults and are dealt with during mapping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRef {
    pub principal_name: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessLevel {
    pub license_display_name: Option<String>,
    pub licensing_source: Option<String>,
    pub account_license_type: Option<String>,
}

/// One license assignment as returned by the entitlements listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitlementItem {
    pub id: Option<String>,
    pub user: UserRef,
    pub access_level: AccessLevel,
    pub last_accessed_date: Option<String>,
    pub date_created: Option<String>,
}

/// One page of the entitlements listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitlementPage {
    pub items: Vec<EntitlementItem>,
    pub total_count: Option<u64>,
    pub continuation_token: Option<String>,
}

/// Every entitlement of the organization plus the server's count hint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitlementListing {
    pub items: Vec<EntitlementItem>,
    pub total_count: Option<u64>,
}

/// `{ "count": n, "value": [...] }` envelope of the core REST API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValueList<T> {
    pub count: Option<u64>,
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItemField {
    pub name: Option<String>,
    pub reference_name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub usage: Option<String>,
    pub is_identity: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
}
