//! Core types used throughout the seat reclamation tooling

pub mod audit;
pub mod decision;
pub mod member;
pub mod mode;
pub mod process;

pub use audit::{AuditViewRow, DemotionEvent, Provenance};
pub use decision::{DecisionRow, DemotionStatus};
pub use member::{LicensingSource, MemberRecord, NEVER_ACCESSED_DAYS};
pub use mode::ExecutionMode;
pub use process::ProcessId;

use serde::{Deserialize, Serialize};
use std::fmt;

/// License tier a demoted member is moved to, as sent to the licensing API
pub const DOWNGRADE_LICENSE_TYPE: &str = "stakeholder";

/// Display name the licensing API reports for the downgrade tier
pub const DOWNGRADE_LICENSE_DISPLAY: &str = "Stakeholder";

/// Substring that marks a license as already being on the free tier
pub const FREE_TIER_MARKER: &str = "stakeholder";

/// Default inactivity threshold in days
pub const DEFAULT_THRESHOLD_DAYS: u32 = 90;

/// Failure classification for calls against the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    /// Credential rejected (401/403)
    AuthenticationFailed,
    /// Target entitlement does not exist (404)
    NotFound(String),
    /// Request throttled (429)
    RateLimitExceeded,
    /// Unexpected status code
    UnexpectedStatus(u16),
    /// The remote reported the operation as unsuccessful
    Rejected(String),
    /// Response body could not be interpreted
    InvalidResponse(String),
    /// Network/connection error or timeout
    NetworkError(String),
}

impl ApiFailure {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, context: &str) -> Self {
        match status {
            401 | 403 => ApiFailure::AuthenticationFailed,
            404 => ApiFailure::NotFound(context.to_string()),
            429 => ApiFailure::RateLimitExceeded,
            other => ApiFailure::UnexpectedStatus(other),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::NotFound(what) => write!(f, "not found: {what}"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::UnexpectedStatus(code) => write!(f, "unexpected HTTP status {code}"),
            ApiFailure::Rejected(reason) => write!(f, "rejected by remote: {reason}"),
            ApiFailure::InvalidResponse(reason) => write!(f, "invalid response: {reason}"),
            ApiFailure::NetworkError(reason) => write!(f, "network error: {reason}"),
        }
    }
}
