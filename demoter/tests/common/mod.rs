//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used by the demoter's unit and integration
//! suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::TestHelpers;
