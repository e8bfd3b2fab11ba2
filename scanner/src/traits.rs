//! Trait definitions with mockall annotations for testing

use std::path::PathBuf;

use async_trait::async_trait;
use shared::MemberRecord;

use crate::error::ScannerResult;
use crate::types::{EntitlementListing, Project, WorkItemField};

/// Read access to the organization's directory endpoints
#[mockall::automock]
#[async_trait]
pub trait OrgDirectory: Send + Sync {
    /// Every user entitlement, following continuation tokens
    async fn list_entitlements(&self) -> ScannerResult<EntitlementListing>;

    /// Work item fields defined at organization level
    async fn list_fields(&self) -> ScannerResult<Vec<WorkItemField>>;

    async fn list_projects(&self) -> ScannerResult<Vec<Project>>;
}

/// Destination of the activity snapshot
#[mockall::automock]
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Atomically replace the snapshot; returns where it was written
    async fn write_snapshot(&self, members: &[MemberRecord]) -> ScannerResult<PathBuf>;
}
