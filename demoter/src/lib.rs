//! Demoter library: decides which inactive members lose their paid license
//!
//! Evaluates the latest activity snapshot into a decision store, demotes one
//! flagged member per run through the licensing API, and records every
//! confirmed demotion in an append-only audit log with a rebuildable view.

pub mod config;
pub mod core;
pub mod demoter;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::DemoterConfig;
pub use crate::core::{Evaluator, RunOutcome, RunReport};
pub use demoter::Demoter;
pub use error::{DemoterError, DemoterResult};
pub use traits::{DemotionConfirmation, FileSystem, LicensingApi, MockFileSystem, MockLicensingApi};
