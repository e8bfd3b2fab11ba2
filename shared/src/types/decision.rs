//! Demotion decisions persisted in the decision store

use serde::{Deserialize, Serialize};
use std::fmt;

use super::member::MemberRecord;

/// Where a member stands in the demotion workflow
///
/// `Done` is terminal: once a demotion has been confirmed by the licensing
/// API the row never goes back to `Flagged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemotionStatus {
    #[default]
    Unset,
    #[serde(alias = "demote")]
    Flagged,
    Done,
}

impl DemotionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DemotionStatus::Done)
    }
}

impl fmt::Display for DemotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemotionStatus::Unset => write!(f, "unset"),
            DemotionStatus::Flagged => write!(f, "flagged"),
            DemotionStatus::Done => write!(f, "done"),
        }
    }
}

/// One row of the decision store: the scanned member plus its status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRow {
    #[serde(flatten)]
    pub member: MemberRecord,
    #[serde(default)]
    pub status: DemotionStatus,
}

impl DecisionRow {
    pub fn new(member: MemberRecord, status: DemotionStatus) -> Self {
        Self { member, status }
    }

    pub fn is_flagged(&self) -> bool {
        self.status == DemotionStatus::Flagged
    }

    pub fn entitlement(&self) -> Option<&str> {
        self.member.entitlement()
    }
}
