//! Activity math for scanned entitlements
//!
//! The directory reports "never signed in" either by omitting the last access
//! date or with the `0001-01-01` sentinel. Both map to [`NEVER_ACCESSED_DAYS`].

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use shared::{LicensingSource, MemberRecord, NEVER_ACCESSED_DAYS};

use crate::types::EntitlementItem;

/// Classified last-access value of one entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAccess {
    Never,
    At(DateTime<Utc>),
    /// Present but not a timestamp we understand; activity is left unknown
    Unreadable,
}

impl LastAccess {
    pub fn classify(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") => return LastAccess::Never,
            Some(raw) => raw,
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(at) if at.year() <= 1 => LastAccess::Never,
            Ok(at) => LastAccess::At(at.with_timezone(&Utc)),
            Err(_) => LastAccess::Unreadable,
        }
    }
}

/// Whole days between `last` and `now`, floored and never negative
pub fn days_inactive(last: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    (now - last).num_days().clamp(0, i64::from(u32::MAX)) as u32
}

pub fn to_member(item: &EntitlementItem, now: DateTime<Utc>) -> MemberRecord {
    let (last_login, days) = match LastAccess::classify(item.last_accessed_date.as_deref()) {
        LastAccess::Never => (None, Some(NEVER_ACCESSED_DAYS)),
        LastAccess::At(at) => (Some(at), Some(days_inactive(at, now))),
        LastAccess::Unreadable => (None, None),
    };

    MemberRecord {
        email: item.user.principal_name.clone().unwrap_or_default(),
        license: item.access_level.license_display_name.clone().unwrap_or_default(),
        source: item
            .access_level
            .licensing_source
            .as_deref()
            .map(LicensingSource::from)
            .unwrap_or_default(),
        last_login,
        last_login_date: last_login.map(|at| at.format("%Y-%m-%d").to_string()),
        days_inactive: days,
        entitlement_id: item.id.clone().filter(|id| !id.trim().is_empty()),
        date_created: item
            .date_created
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc)),
    }
}

/// Members per licensing source, keyed by the raw source name
pub fn source_breakdown(members: &[MemberRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        let key = match member.source.as_str() {
            "" => "unknown".to_string(),
            other => other.to_string(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// True when the server announced a count that differs from what arrived
pub fn count_hint_mismatch(total_count: Option<u64>, received: usize) -> bool {
    total_count.is_some_and(|total| total != received as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccessLevel, UserRef};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(last: Option<&str>) -> EntitlementItem {
        EntitlementItem {
            id: Some("e-1".to_string()),
            user: UserRef {
                principal_name: Some("a@contoso.com".to_string()),
                display_name: None,
            },
            access_level: AccessLevel {
                license_display_name: Some("Basic".to_string()),
                licensing_source: Some("account".to_string()),
                account_license_type: Some("express".to_string()),
            },
            last_accessed_date: last.map(str::to_string),
            date_created: Some("2020-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_days_are_floored() {
        let last = now() - chrono::Duration::hours(47);
        assert_eq!(days_inactive(last, now()), 1);
        assert_eq!(days_inactive(now() + chrono::Duration::hours(3), now()), 0);
    }

    #[test]
    fn test_never_accessed_sentinels() {
        for raw in [None, Some(""), Some("0001-01-01T00:00:00Z")] {
            let member = to_member(&item(raw), now());
            assert_eq!(member.days_inactive, Some(NEVER_ACCESSED_DAYS), "raw {raw:?}");
            assert_eq!(member.last_login, None);
            assert_eq!(member.last_login_date, None);
        }
    }

    #[test]
    fn test_maps_entitlement_fields() {
        let member = to_member(&item(Some("2024-02-22T08:15:00.5Z")), now());
        assert_eq!(member.email, "a@contoso.com");
        assert_eq!(member.license, "Basic");
        assert_eq!(member.source, LicensingSource::Account);
        assert_eq!(member.last_login_date.as_deref(), Some("2024-02-22"));
        assert_eq!(member.days_inactive, Some(100));
        assert_eq!(member.entitlement_id.as_deref(), Some("e-1"));
        assert!(member.date_created.is_some());
    }

    #[test]
    fn test_unreadable_date_leaves_activity_unknown() {
        assert_eq!(LastAccess::classify(Some("last tuesday")), LastAccess::Unreadable);
        let member = to_member(&item(Some("last tuesday")), now());
        assert_eq!(member.days_inactive, None);
    }

    #[test]
    fn test_source_breakdown_and_count_hint() {
        let mut members = vec![to_member(&item(None), now()), to_member(&item(None), now())];
        let mut msdn = item(None);
        msdn.access_level.licensing_source = Some("msdn".to_string());
        members.push(to_member(&msdn, now()));
        let mut bare = item(None);
        bare.access_level.licensing_source = None;
        members.push(to_member(&bare, now()));

        let counts = source_breakdown(&members);
        assert_eq!(counts.get("account"), Some(&2));
        assert_eq!(counts.get("msdn"), Some(&1));
        assert_eq!(counts.get("unknown"), Some(&1));

        assert!(count_hint_mismatch(Some(5), 4));
        assert!(!count_hint_mismatch(Some(4), 4));
        assert!(!count_hint_mismatch(None, 4));
    }
}
