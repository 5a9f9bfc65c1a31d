// konditional-core/src/interfaces/mod.rs
// ============================================================================
// Module: Konditional Interfaces
// Description: Backend-agnostic observability hooks invoked by the runtime.
// Purpose: Let embedding applications wire logging and metrics without the
//          core depending on any particular sink (`spec.md` §4.10).
// Dependencies: none
// ============================================================================

//! ## Overview
//! The core defines two hook traits, [`Logger`] and [`MetricsCollector`],
//! and invokes them inline from `crate::runtime`. It ships no logging or
//! metrics crate of its own — exporters, log sinks, and metrics backends
//! are external collaborators (`spec.md` §1). [`NoopLogger`] and
//! [`NoopMetricsCollector`] let the crate run with zero configuration.
//! Hooks are bundled per-namespace via [`Hooks`], never global, and MUST be
//! non-blocking — that is the caller's responsibility, not something this
//! module can enforce.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

// ============================================================================
// SECTION: Logger
// ============================================================================

/// A per-namespace logging sink.
///
/// `msg` is a closure rather than a pre-formatted string so callers that
/// install a no-op logger never pay the cost of building a message that
/// will be discarded.
pub trait Logger: Send + Sync {
    /// Logs a warning, optionally attaching the triggering error.
    fn warn(&self, msg: &dyn Fn() -> String, cause: Option<&(dyn std::error::Error + 'static)>);
}

/// A [`Logger`] that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn warn(&self, _msg: &dyn Fn() -> String, _cause: Option<&(dyn std::error::Error + 'static)>) {}
}

// ============================================================================
// SECTION: MetricsCollector
// ============================================================================

/// One evaluation's observability payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationEvent {
    /// The feature key evaluated, e.g. `"feature::core::darkMode"`.
    pub feature_key: String,
    /// The [`EvaluationDecision`](crate::core::decision::EvaluationDecision)
    /// kind, e.g. `"rule"`.
    pub decision_kind: &'static str,
    /// Wall-clock duration of the evaluation, in nanoseconds.
    pub duration_ns: u64,
    /// Generation counter of the configuration observed.
    pub config_version: u64,
}

/// One `load` call's observability payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoadEvent {
    /// Generation counter assigned to the newly installed configuration.
    pub config_version: u64,
    /// Number of features in the newly installed configuration.
    pub feature_count: usize,
    /// Advisory source label copied from the configuration's metadata.
    pub source: Option<String>,
}

/// One `rollback` call's observability payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRollbackEvent {
    /// Number of steps requested.
    pub requested_steps: usize,
    /// Number of steps actually popped.
    pub applied_steps: usize,
    /// Generation counter of the configuration now active.
    pub resulting_version: u64,
}

/// A per-namespace metrics sink.
pub trait MetricsCollector: Send + Sync {
    /// Records one evaluation.
    fn record_evaluation(&self, event: &EvaluationEvent);
    /// Records one configuration load.
    fn record_config_load(&self, event: &ConfigLoadEvent);
    /// Records one rollback.
    fn record_config_rollback(&self, event: &ConfigRollbackEvent);
}

/// A [`MetricsCollector`] that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsCollector;

impl MetricsCollector for NoopMetricsCollector {
    fn record_evaluation(&self, _event: &EvaluationEvent) {}
    fn record_config_load(&self, _event: &ConfigLoadEvent) {}
    fn record_config_rollback(&self, _event: &ConfigRollbackEvent) {}
}

// ============================================================================
// SECTION: Hooks
// ============================================================================

/// The pair of hooks a [`crate::runtime::namespace::NamespaceRegistry`]
/// invokes. Replaceable atomically via
/// [`crate::runtime::namespace::NamespaceRegistry::set_hooks`].
#[derive(Clone)]
pub struct Hooks {
    /// Logging sink.
    pub logger: Arc<dyn Logger>,
    /// Metrics sink.
    pub metrics: Arc<dyn MetricsCollector>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self { logger: Arc::new(NoopLogger), metrics: Arc::new(NoopMetricsCollector) }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
