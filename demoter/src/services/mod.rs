//! Service implementations
//!
//! Production implementations of the demoter's service traits: the output
//! folder on local disk and the licensing REST API.

pub mod file_system;
pub mod licensing_api;

#[cfg(test)]
mod tests;

pub use file_system::RealFileSystem;
pub use licensing_api::RealLicensingApi;
