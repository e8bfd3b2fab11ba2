//! Demoter core business logic
//!
//! Pure decision code with no I/O: the pipeline in [`crate::demoter`] feeds it
//! data read through the service traits.

pub mod audit_view;
pub mod evaluator;
pub mod executor;
pub mod staleness;

pub use audit_view::{parse_audit_log, project, ParsedLog};
pub use evaluator::{EvaluationSummary, Evaluator};
pub use executor::{plan, recover_interrupted, ExecutionStep, RunOutcome, RunReport};
pub use staleness::needs_recompute;
