//! Environment-sourced connection settings shared by both binaries
//!
//! Values are read through a lookup closure instead of `std::env` directly so
//! callers can hand in a map in tests. Each binary loads `.env` first.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::{SharedError, SharedResult};

pub const ENV_ORG: &str = "ADO_ORG";
pub const ENV_PAT: &str = "ADO_PAT";
pub const ENV_LICENSING_URL: &str = "ADO_LICENSING_URL";
pub const ENV_CORE_URL: &str = "ADO_CORE_URL";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_HTTP_TIMEOUT: &str = "ADO_HTTP_TIMEOUT_SECS";

pub const DEFAULT_LICENSING_URL: &str = "https://vsaex.dev.azure.com";
pub const DEFAULT_CORE_URL: &str = "https://dev.azure.com";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Read a variable that must be present and non-blank
pub fn required<F>(lookup: &F, key: &str) -> SharedResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SharedError::MissingConfig { field: key.to_string() })
}

/// Read a variable, falling back to `default` when absent or blank
pub fn optional_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse a variable, falling back to `default` when absent or blank
pub fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> SharedResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|_| SharedError::InvalidConfig {
            field: key.to_string(),
            value: raw,
        }),
    }
}

/// Organization, credential and endpoints of the remote API
#[derive(Clone)]
pub struct AdoConnection {
    pub org: String,
    pub pat: String,
    pub licensing_url: Url,
    pub core_url: Url,
    pub timeout: Duration,
}

impl AdoConnection {
    pub fn from_lookup<F>(lookup: &F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let org = required(lookup, ENV_ORG)?;
        let pat = required(lookup, ENV_PAT)?;
        let licensing_url = parse_url(lookup, ENV_LICENSING_URL, DEFAULT_LICENSING_URL)?;
        let core_url = parse_url(lookup, ENV_CORE_URL, DEFAULT_CORE_URL)?;
        let timeout_secs: u64 = parse_or(lookup, ENV_HTTP_TIMEOUT, DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            org,
            pat,
            licensing_url,
            core_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `<licensing base>/<org>` without a trailing slash
    pub fn licensing_org_url(&self) -> String {
        format!("{}/{}", self.licensing_url.as_str().trim_end_matches('/'), self.org)
    }

    /// `<core base>/<org>` without a trailing slash
    pub fn core_org_url(&self) -> String {
        format!("{}/{}", self.core_url.as_str().trim_end_matches('/'), self.org)
    }
}

// The credential never reaches logs through Debug.
impl fmt::Debug for AdoConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdoConnection")
            .field("org", &self.org)
            .field("pat", &"***")
            .field("licensing_url", &self.licensing_url.as_str())
            .field("core_url", &self.core_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_url<F>(lookup: &F, key: &str, default: &str) -> SharedResult<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = optional_or(lookup, key, default);
    Url::parse(&raw).map_err(|_| SharedError::InvalidConfig {
        field: key.to_string(),
        value: raw,
    })
}
