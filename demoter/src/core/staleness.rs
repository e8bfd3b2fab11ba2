//! Decides whether the decision store must be rebuilt from the snapshot

use std::time::SystemTime;

/// Recompute unless the store exists and is strictly newer than the input
///
/// Recomputing resets every non-terminal status, so an up-to-date store must
/// be reused as-is.
pub fn needs_recompute(input_modified: SystemTime, store_modified: Option<SystemTime>) -> bool {
    match store_modified {
        Some(store) => store <= input_modified,
        None => true,
    }
}
