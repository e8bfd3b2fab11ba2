//! Scanner core logic: mapping raw entitlements to member records

pub mod activity;

pub use activity::{count_hint_mismatch, days_inactive, source_breakdown, to_member, LastAccess};
