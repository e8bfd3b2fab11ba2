//! Shared types for the seat reclamation tooling
//!
//! Contains the member, decision and audit types exchanged between the
//! scanner and the demoter through the per-organization output folder,
//! plus the logging and file helpers both binaries use.

pub mod config;
pub mod errors;
pub mod fs;
pub mod layout;
pub mod logging;
pub mod types;

pub use errors::*;
pub use layout::OrgLayout;
pub use types::*;
