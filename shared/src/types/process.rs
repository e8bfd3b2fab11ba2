//! Process identity used to tag log events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifier of the binary emitting log events
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    Scanner,
    Demoter,
    /// Library code running before any binary registered itself (tests)
    Unassigned,
}

impl ProcessId {
    pub fn init_scanner() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Scanner)
    }

    pub fn init_demoter() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Demoter)
    }

    /// Get the global process ID, `Unassigned` until a binary initializes it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&ProcessId::Unassigned)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Scanner => write!(f, "scanner"),
            ProcessId::Demoter => write!(f, "demoter"),
            ProcessId::Unassigned => write!(f, "unassigned"),
        }
    }
}
