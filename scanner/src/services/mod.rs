//! Service implementations
//!
//! Production implementations of the scanner's service traits.

pub mod ado_client;
pub mod file_system;

#[cfg(test)]
mod tests;

pub use ado_client::RealAdoClient;
pub use file_system::RealFileSystem;
