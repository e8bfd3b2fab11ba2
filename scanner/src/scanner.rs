//! Scanner pipeline: directory listing in, activity snapshot out

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use shared::{logging, process_debug, process_info, MemberRecord, ProcessId};

use crate::core::{count_hint_mismatch, source_breakdown, to_member, LastAccess};
use crate::error::ScannerResult;
use crate::traits::{FileSystem, OrgDirectory};
use crate::types::{Project, WorkItemField};

/// Rows echoed to the log after a scan
pub const PREVIEW_ROWS: usize = 20;

/// Rows echoed per listing by the inventory command
pub const INVENTORY_PREVIEW: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub members: Vec<MemberRecord>,
    /// Count the server announced, if any
    pub total_count: Option<u64>,
    pub sources: BTreeMap<String, usize>,
    /// Entitlements whose last access date could not be read
    pub unreadable_dates: usize,
    pub snapshot_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub fields: Vec<WorkItemField>,
    pub projects: Vec<Project>,
}

pub struct Scanner<D, F>
where
    D: OrgDirectory,
    F: FileSystem,
{
    directory: D,
    file_system: F,
}

impl<D, F> Scanner<D, F>
where
    D: OrgDirectory,
    F: FileSystem,
{
    pub fn new(directory: D, file_system: F) -> Self {
        Self { directory, file_system }
    }

    /// Fetch every entitlement, compute inactivity against `now` and write the snapshot
    pub async fn scan_users(&self, now: DateTime<Utc>) -> ScannerResult<ScanReport> {
        let listing = self.directory.list_entitlements().await?;

        let unreadable_dates = listing
            .items
            .iter()
            .filter(|item| LastAccess::classify(item.last_accessed_date.as_deref()) == LastAccess::Unreadable)
            .count();
        let members: Vec<MemberRecord> = listing.items.iter().map(|item| to_member(item, now)).collect();

        if count_hint_mismatch(listing.total_count, members.len()) {
            logging::log_warning(
                ProcessId::current(),
                "Entitlement count",
                &format!(
                    "server reported {} but {} were received",
                    listing.total_count.unwrap_or_default(),
                    members.len()
                ),
            );
        }
        if unreadable_dates > 0 {
            logging::log_warning(
                ProcessId::current(),
                "Last access",
                &format!("{unreadable_dates} entitlements have an unreadable date; inactivity left unknown"),
            );
        }

        let sources = source_breakdown(&members);
        logging::log_progress(ProcessId::current(), "Licensing sources", &format!("{sources:?}"));

        let snapshot_path = self.file_system.write_snapshot(&members).await?;
        logging::log_success(
            ProcessId::current(),
            &format!("Scan complete: {} members written to {}", members.len(), snapshot_path.display()),
        );

        for member in members.iter().take(PREVIEW_ROWS) {
            process_debug!(
                ProcessId::current(),
                "  {} | {} | {} | {} days",
                member.email,
                member.license,
                member.source,
                member
                    .days_inactive
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "?".to_string())
            );
        }

        Ok(ScanReport {
            members,
            total_count: listing.total_count,
            sources,
            unreadable_dates,
            snapshot_path,
        })
    }

    /// List organization fields and projects
    pub async fn inventory(&self) -> ScannerResult<InventoryReport> {
        let fields = self.directory.list_fields().await?;
        process_info!(ProcessId::current(), "🗂️ Found {} fields in org", fields.len());
        for field in fields.iter().take(INVENTORY_PREVIEW) {
            process_info!(
                ProcessId::current(),
                "  {} ({}) type={} usage={} identity={}",
                field.name.as_deref().unwrap_or("-"),
                field.reference_name.as_deref().unwrap_or("-"),
                field.field_type.as_deref().unwrap_or("-"),
                field.usage.as_deref().unwrap_or("-"),
                field.is_identity.unwrap_or(false)
            );
        }

        let projects = self.directory.list_projects().await?;
        process_info!(ProcessId::current(), "📁 Found {} projects in org", projects.len());
        for project in projects.iter().take(INVENTORY_PREVIEW) {
            process_info!(
                ProcessId::current(),
                "  {} [{}] state={}",
                project.name.as_deref().unwrap_or("-"),
                project.id.as_deref().unwrap_or("-"),
                project.state.as_deref().unwrap_or("-")
            );
        }

        Ok(InventoryReport { fields, projects })
    }
}
