//! Main demoter pipeline
//!
//! One run is: staleness check, optional recompute of the decision store,
//! recovery of interrupted demotions, then the mode-specific step. File and
//! API access go through the injected services.

use chrono::Utc;
use shared::{logging, process_debug, process_error, process_info, process_warn, DecisionRow, ExecutionMode, ProcessId};

use crate::config::DemoterConfig;
use crate::core::executor::{self, ExecutionStep, RunOutcome, RunReport};
use crate::core::{needs_recompute, parse_audit_log, project, EvaluationSummary, Evaluator};
use crate::error::{DemoterError, DemoterResult};
use crate::traits::{FileSystem, LicensingApi};

/// Reconciles the decision store with the licensing API, one member at a time
pub struct Demoter<F, L>
where
    F: FileSystem,
    L: LicensingApi,
{
    config: DemoterConfig,
    evaluator: Evaluator,

    /// Injected services
    file_system: F,
    licensing: L,
}

impl<F, L> Demoter<F, L>
where
    F: FileSystem,
    L: LicensingApi,
{
    pub fn new(config: DemoterConfig, file_system: F, licensing: L) -> Self {
        let evaluator = Evaluator::new(config.threshold_days);
        Self {
            config,
            evaluator,
            file_system,
            licensing,
        }
    }

    pub fn config(&self) -> &DemoterConfig {
        &self.config
    }

    /// Execute one run in the configured mode
    pub async fn run(&self) -> DemoterResult<RunReport> {
        let layout = self.config.layout();
        let mode = self.config.mode;

        let snapshot_modified =
            self.file_system
                .snapshot_modified()
                .await?
                .ok_or_else(|| DemoterError::MissingInput {
                    path: layout.snapshot_path().display().to_string(),
                })?;
        let store_modified = self.file_system.decisions_modified().await?;

        let recomputed = needs_recompute(snapshot_modified, store_modified);
        let mut rows = if recomputed {
            process_info!(ProcessId::current(), "🔄 Snapshot is newer than the decision store, re-evaluating");
            let members = self.file_system.read_snapshot().await?;
            let prior = self.file_system.read_decisions().await?;
            self.evaluator.evaluate(members, prior.as_deref())
        } else {
            process_debug!(ProcessId::current(), "📂 Decision store is current, reusing it");
            self.file_system
                .read_decisions()
                .await?
                .ok_or_else(|| DemoterError::MissingInput {
                    path: layout.decisions_path().display().to_string(),
                })?
        };

        let recovered = self.recover(&mut rows, store_modified).await?;

        // A recompute always persists, carrying any recovered statuses with it.
        // Otherwise only a single-step run may rewrite the store.
        if recomputed || (!recovered.is_empty() && mode == ExecutionMode::SingleStep) {
            self.file_system.write_decisions(&rows).await?;
        }

        let summary = EvaluationSummary::of(&rows);
        logging::log_progress(
            ProcessId::current(),
            "Decision store",
            &format!(
                "{} members, {} flagged, {} done (threshold {} days, mode {})",
                summary.total,
                summary.flagged,
                summary.done,
                self.evaluator.threshold_days(),
                mode
            ),
        );

        let outcome = match executor::plan(mode, &rows) {
            ExecutionStep::NoCandidates => {
                logging::log_success(ProcessId::current(), "No demotion candidates, nothing to do");
                RunOutcome::NoCandidates
            }
            ExecutionStep::Preview(candidates) => {
                self.log_candidates(&candidates);
                RunOutcome::Previewed { candidates }
            }
            ExecutionStep::Refuse { candidates } => {
                process_warn!(
                    ProcessId::current(),
                    "🔒 {} is disabled; {} candidates left untouched",
                    ExecutionMode::BatchAll,
                    candidates
                );
                RunOutcome::BatchRefused { candidates }
            }
            ExecutionStep::Demote(candidate) => self.demote_one(candidate, rows).await?,
        };

        Ok(RunReport {
            recomputed,
            recovered,
            summary,
            outcome,
        })
    }

    /// Regenerate the audit view from the audit log
    ///
    /// # Returns
    /// Number of rows written to the view
    pub async fn rebuild_audit_view(&self) -> DemoterResult<usize> {
        let content = self.file_system.read_audit_log().await?;
        let parsed = parse_audit_log(&content);
        if parsed.skipped > 0 {
            process_debug!(ProcessId::current(), "🧹 Skipped {} unreadable audit lines", parsed.skipped);
        }

        let view = project(&parsed.events);
        self.file_system.write_audit_view(&view).await?;
        process_debug!(ProcessId::current(), "📝 Audit view rebuilt with {} rows", view.len());
        Ok(view.len())
    }

    async fn recover(
        &self,
        rows: &mut [DecisionRow],
        store_modified: Option<std::time::SystemTime>,
    ) -> DemoterResult<Vec<String>> {
        if store_modified.is_none() || !rows.iter().any(DecisionRow::is_flagged) {
            return Ok(Vec::new());
        }

        let events = parse_audit_log(&self.file_system.read_audit_log().await?).events;
        let recovered = executor::recover_interrupted(rows, &events, store_modified);
        for id in &recovered {
            logging::log_warning(
                ProcessId::current(),
                "Interrupted run",
                &format!("entitlement {id} is already in the audit log, marking done"),
            );
        }
        Ok(recovered)
    }

    /// Demote one candidate; nothing is written unless the API confirms
    async fn demote_one(&self, candidate: DecisionRow, rows: Vec<DecisionRow>) -> DemoterResult<RunOutcome> {
        let entitlement_id = candidate
            .entitlement()
            .ok_or_else(|| DemoterError::MissingEntitlement {
                email: candidate.member.email.clone(),
            })?
            .to_string();

        process_info!(
            ProcessId::current(),
            "🎯 Demoting {} ({}, {} days inactive)",
            candidate.member.email,
            candidate.member.license,
            candidate.member.days_inactive_or_zero()
        );

        let confirmation = match self.licensing.demote(&entitlement_id).await {
            Ok(confirmation) => confirmation,
            Err(reason) => {
                process_error!(
                    ProcessId::current(),
                    "❌ Licensing API refused {}: {}",
                    candidate.member.email,
                    reason
                );
                return Err(DemoterError::DemotionFailed { entitlement_id, reason });
            }
        };

        let event = executor::build_event(&candidate, &entitlement_id, &confirmation, &self.config, Utc::now());
        self.file_system.append_event(&event).await?;
        self.rebuild_audit_view().await?;

        // The store is re-read so a concurrent edit is not overwritten with stale rows
        let mut latest = match self.file_system.read_decisions().await? {
            Some(latest) => latest,
            None => rows,
        };
        if !executor::mark_done(&mut latest, &entitlement_id) {
            process_warn!(
                ProcessId::current(),
                "⚠️ Entitlement {} not found in the decision store after demotion",
                entitlement_id
            );
        }
        self.file_system.write_decisions(&latest).await?;

        logging::log_success(
            ProcessId::current(),
            &format!(
                "{} demoted from {} to {}",
                event.email, event.old_license, event.new_license
            ),
        );
        Ok(RunOutcome::Demoted { event })
    }

    fn log_candidates(&self, candidates: &[DecisionRow]) {
        process_info!(
            ProcessId::current(),
            "👀 Preview: {} members would be demoted",
            candidates.len()
        );
        for (index, row) in candidates.iter().enumerate() {
            process_info!(
                ProcessId::current(),
                "  {}. {} | {} | {} days | source {}",
                index + 1,
                row.member.email,
                row.member.license,
                row.member.days_inactive_or_zero(),
                row.member.source
            );
        }
    }
}
