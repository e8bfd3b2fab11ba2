//! Candidate evaluation: turns the activity snapshot into decision rows

use std::collections::HashSet;

use shared::{DecisionRow, DemotionStatus, MemberRecord};

/// Applies the demotion rule at a fixed inactivity threshold
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    threshold_days: u32,
}

/// Counts reported after an evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    pub total: usize,
    pub flagged: usize,
    pub done: usize,
}

impl EvaluationSummary {
    pub fn of(rows: &[DecisionRow]) -> Self {
        rows.iter().fold(Self { total: rows.len(), ..Self::default() }, |mut acc, row| {
            match row.status {
                DemotionStatus::Flagged => acc.flagged += 1,
                DemotionStatus::Done => acc.done += 1,
                DemotionStatus::Unset => {}
            }
            acc
        })
    }
}

impl Evaluator {
    pub fn new(threshold_days: u32) -> Self {
        Self { threshold_days }
    }

    pub fn threshold_days(&self) -> u32 {
        self.threshold_days
    }

    /// Account-funded, not already on the free tier, and inactive long enough
    ///
    /// Unknown inactivity never qualifies, whatever the threshold.
    pub fn should_demote(&self, member: &MemberRecord) -> bool {
        member.source.is_account_funded()
            && !member.is_free_tier()
            && member.days_inactive.is_some_and(|days| days >= self.threshold_days)
    }

    /// Evaluate every member and order the result by days inactive, longest first
    ///
    /// Rows marked done in `prior` (matched by entitlement id) stay done.
    /// The sort is stable, so members with equal inactivity keep snapshot order.
    pub fn evaluate(&self, members: Vec<MemberRecord>, prior: Option<&[DecisionRow]>) -> Vec<DecisionRow> {
        let done: HashSet<&str> = prior
            .unwrap_or_default()
            .iter()
            .filter(|row| row.status.is_terminal())
            .filter_map(|row| row.entitlement())
            .collect();

        let mut rows: Vec<DecisionRow> = members
            .into_iter()
            .map(|member| {
                let status = if member.entitlement().is_some_and(|id| done.contains(id)) {
                    DemotionStatus::Done
                } else if self.should_demote(&member) {
                    DemotionStatus::Flagged
                } else {
                    DemotionStatus::Unset
                };
                DecisionRow::new(member, status)
            })
            .collect();

        rows.sort_by(|a, b| b.member.days_inactive_or_zero().cmp(&a.member.days_inactive_or_zero()));
        rows
    }
}
