//! Execution modes of the demoter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a demoter run treats flagged candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// List flagged candidates without touching anything
    #[default]
    #[serde(rename = "DRY_RUN")]
    Preview,
    /// Demote the highest-priority flagged candidate
    #[serde(rename = "DEMOTE_ONE")]
    SingleStep,
    /// Locked: reports the candidate count and refuses to act
    #[serde(rename = "DEMOTE_ALL")]
    BatchAll,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Preview => "DRY_RUN",
            ExecutionMode::SingleStep => "DEMOTE_ONE",
            ExecutionMode::BatchAll => "DEMOTE_ALL",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "dryrun" | "preview" => Ok(ExecutionMode::Preview),
            "demoteone" | "singlestep" => Ok(ExecutionMode::SingleStep),
            "demoteall" | "batchall" => Ok(ExecutionMode::BatchAll),
            _ => Err(format!(
                "Unknown execution mode '{s}'. Valid options: DRY_RUN, DEMOTE_ONE, DEMOTE_ALL (or Preview, SingleStep, BatchAll)"
            )),
        }
    }
}
