//! Trait definitions with mockall annotations for testing
//!
//! The demoter touches two outside resources: the per-organization output
//! folder and the licensing API. Both sit behind traits so the run pipeline
//! can be driven against mocks.

use std::time::SystemTime;

use async_trait::async_trait;
use shared::{ApiFailure, AuditViewRow, DecisionRow, DemotionEvent, MemberRecord};

use crate::error::DemoterResult;

/// What the licensing API confirmed after a successful demotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemotionConfirmation {
    /// License display name the entitlement now carries
    pub new_license: String,
}

/// File system abstraction over the organization's output folder
///
/// The decision store is replaced wholesale on every write; the audit log
/// only ever grows.
#[mockall::automock]
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Modification time of the raw activity snapshot, `None` if absent
    async fn snapshot_modified(&self) -> DemoterResult<Option<SystemTime>>;

    /// Read the raw activity snapshot
    async fn read_snapshot(&self) -> DemoterResult<Vec<MemberRecord>>;

    /// Modification time of the decision store, `None` if absent
    async fn decisions_modified(&self) -> DemoterResult<Option<SystemTime>>;

    /// Read the decision store, `None` if it has never been written
    async fn read_decisions(&self) -> DemoterResult<Option<Vec<DecisionRow>>>;

    /// Atomically replace the decision store
    async fn write_decisions(&self, rows: &[DecisionRow]) -> DemoterResult<()>;

    /// Append one event to the audit log
    async fn append_event(&self, event: &DemotionEvent) -> DemoterResult<()>;

    /// Raw audit log contents, empty if the log does not exist yet
    async fn read_audit_log(&self) -> DemoterResult<String>;

    /// Atomically replace the audit view
    async fn write_audit_view(&self, rows: &[AuditViewRow]) -> DemoterResult<()>;
}

/// Licensing API abstraction for the single terminal action
#[mockall::automock]
#[async_trait]
pub trait LicensingApi: Send + Sync {
    /// Move the entitlement to the downgrade tier
    ///
    /// # Returns
    /// The confirmed license on success; any failure means nothing changed
    /// on our side and the caller must not record the demotion. A response
    /// without a body (204) is taken as confirmation of the downgrade tier
    /// rather than read back from the service.
    async fn demote(&self, entitlement_id: &str) -> Result<DemotionConfirmation, ApiFailure>;
}
