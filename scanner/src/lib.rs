//! Scanner library: builds the organization's activity snapshot
//!
//! Lists every user entitlement, computes days of inactivity at scan time and
//! writes `users_latest.json` for the demoter. Also lists the organization's
//! work item fields and projects.

pub mod config;
pub mod core;
pub mod error;
pub mod scanner;
pub mod services;
pub mod traits;
pub mod types;

pub use config::ScannerConfig;
pub use error::{ScannerError, ScannerResult};
pub use scanner::{InventoryReport, ScanReport, Scanner};
pub use traits::{FileSystem, MockFileSystem, MockOrgDirectory, OrgDirectory};
