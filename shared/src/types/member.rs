//! Member activity records as produced by the scanner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FREE_TIER_MARKER;

/// Days reported for members that never accessed the organization
pub const NEVER_ACCESSED_DAYS: u32 = 9999;

/// Who pays for a member's license
///
/// Only `Account` licenses are bought by the organization; the other sources
/// are granted through external programs and never qualify for demotion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicensingSource {
    Account,
    Msdn,
    Profile,
    Auto,
    Trial,
    None,
    /// Anything the licensing API reports that we do not recognize
    Other(String),
}

impl LicensingSource {
    pub fn as_str(&self) -> &str {
        match self {
            LicensingSource::Account => "account",
            LicensingSource::Msdn => "msdn",
            LicensingSource::Profile => "profile",
            LicensingSource::Auto => "auto",
            LicensingSource::Trial => "trial",
            LicensingSource::None => "none",
            LicensingSource::Other(raw) => raw,
        }
    }

    pub fn is_account_funded(&self) -> bool {
        matches!(self, LicensingSource::Account)
    }
}

impl Default for LicensingSource {
    fn default() -> Self {
        LicensingSource::Other(String::new())
    }
}

impl From<String> for LicensingSource {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "account" => LicensingSource::Account,
            "msdn" => LicensingSource::Msdn,
            "profile" => LicensingSource::Profile,
            "auto" => LicensingSource::Auto,
            "trial" => LicensingSource::Trial,
            "none" => LicensingSource::None,
            _ => LicensingSource::Other(raw),
        }
    }
}

impl From<&str> for LicensingSource {
    fn from(raw: &str) -> Self {
        LicensingSource::from(raw.to_string())
    }
}

impl From<LicensingSource> for String {
    fn from(source: LicensingSource) -> Self {
        source.as_str().to_string()
    }
}

impl fmt::Display for LicensingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One organization member as seen by the latest scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(default)]
    pub email: String,
    /// License display name, e.g. "Basic" or "Stakeholder"
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub source: LicensingSource,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_date: Option<String>,
    #[serde(default)]
    pub days_inactive: Option<u32>,
    /// Addressable key of the license assignment, required to demote
    #[serde(default)]
    pub entitlement_id: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl MemberRecord {
    /// Days inactive, with unknown treated as freshly active
    pub fn days_inactive_or_zero(&self) -> u32 {
        self.days_inactive.unwrap_or(0)
    }

    /// Whether the license already sits on the free tier
    pub fn is_free_tier(&self) -> bool {
        self.license.to_lowercase().contains(FREE_TIER_MARKER)
    }

    /// Entitlement id if present and non-blank
    pub fn entitlement(&self) -> Option<&str> {
        self.entitlement_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
