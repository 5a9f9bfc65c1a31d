// konditional-core/src/runtime/namespace.rs
// ============================================================================
// Module: Konditional Namespace Registry
// Description: Atomic snapshot holder with bounded rollback history.
// Purpose: Give callers a single, named isolation boundary with exactly one
//          active configuration at any instant (spec.md §4.5).
// Dependencies: crate::{core, interfaces, runtime::evaluator}, std::sync
// ============================================================================

//! ## Overview
//! `NamespaceRegistry` holds `current: Arc<Configuration>` behind a
//! `RwLock` so reads never block on other reads, and a bounded
//! `VecDeque<Arc<Configuration>>` history. Writers (`load`, `rollback`,
//! `disable_all`, `enable_all`) are serialized through the same lock;
//! readers take a brief read guard, clone the `Arc`, and release it, so an
//! evaluation in flight always sees one whole configuration, never a
//! half-installed one (`spec.md` §5, invariant 8).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::core::configuration::Configuration;
use crate::core::context::Context;
use crate::core::decision::EvaluationResult;
use crate::core::feature::Feature;
use crate::interfaces::ConfigLoadEvent;
use crate::interfaces::ConfigRollbackEvent;
use crate::interfaces::EvaluationEvent;
use crate::interfaces::Hooks;
use crate::runtime::evaluator;

/// Default rollback history depth (`spec.md` §3).
pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

// ============================================================================
// SECTION: NamespaceRegistry
// ============================================================================

/// A named isolation boundary holding one active [`Configuration`] plus a
/// bounded history of prior ones.
pub struct NamespaceRegistry {
    name: String,
    current: RwLock<Arc<Configuration>>,
    history: RwLock<VecDeque<Arc<Configuration>>>,
    history_capacity: usize,
    kill_switch: AtomicBool,
    generation: AtomicU64,
    hooks: RwLock<Hooks>,
}

impl NamespaceRegistry {
    /// Creates a namespace with an empty initial configuration and the
    /// default history capacity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, Configuration::new(), DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a namespace with an explicit initial configuration and
    /// history capacity.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, initial: Configuration, history_capacity: usize) -> Self {
        Self {
            name: name.into(),
            current: RwLock::new(Arc::new(initial)),
            history: RwLock::new(VecDeque::with_capacity(history_capacity)),
            history_capacity,
            kill_switch: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            hooks: RwLock::new(Hooks::default()),
        }
    }

    /// Returns this namespace's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an immutable handle to the current configuration.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned by a prior panic in another
    /// thread while it was held.
    #[must_use]
    pub fn configuration(&self) -> Arc<Configuration> {
        Arc::clone(&self.current.read().expect("namespace current-config lock poisoned"))
    }

    /// Returns the generation counter of the current configuration.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns whether the kill-switch is currently on.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.kill_switch.load(Ordering::Acquire)
    }

    /// Atomically publishes `new` as the current configuration, pushing the
    /// previous one onto history (trimmed to capacity).
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    pub fn load(&self, new: Configuration) {
        let new = Arc::new(new);
        let feature_count = new.len();
        let source = new.metadata.source.clone();

        let previous = {
            let mut current = self.current.write().expect("namespace current-config lock poisoned");
            std::mem::replace(&mut *current, Arc::clone(&new))
        };

        {
            let mut history = self.history.write().expect("namespace history lock poisoned");
            if history.len() == self.history_capacity && self.history_capacity > 0 {
                history.pop_front();
            }
            if self.history_capacity > 0 {
                history.push_back(previous);
            }
        }

        let config_version = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.hooks().metrics.record_config_load(&ConfigLoadEvent { config_version, feature_count, source });
    }

    /// Pops up to `steps` entries off history into `current`.
    ///
    /// Returns `false` without effect if history holds fewer than `steps`
    /// entries.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    pub fn rollback(&self, steps: usize) -> bool {
        if steps == 0 {
            return true;
        }

        let popped = {
            let mut history = self.history.write().expect("namespace history lock poisoned");
            if history.len() < steps {
                return false;
            }
            let mut last = None;
            for _ in 0..steps {
                last = history.pop_back();
            }
            last
        };

        let Some(restored) = popped else {
            return false;
        };

        {
            let mut current = self.current.write().expect("namespace current-config lock poisoned");
            *current = restored;
        }

        let resulting_version = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.hooks().metrics.record_config_rollback(&ConfigRollbackEvent { requested_steps: steps, applied_steps: steps, resulting_version });
        true
    }

    /// Turns the kill-switch on. Never touches `current`.
    pub fn disable_all(&self) {
        self.kill_switch.store(true, Ordering::Release);
    }

    /// Turns the kill-switch off. Never touches `current`.
    pub fn enable_all(&self) {
        self.kill_switch.store(false, Ordering::Release);
    }

    /// Atomically replaces the installed hooks.
    ///
    /// # Panics
    ///
    /// Panics if the hooks lock is poisoned.
    pub fn set_hooks(&self, hooks: Hooks) {
        *self.hooks.write().expect("namespace hooks lock poisoned") = hooks;
    }

    fn hooks(&self) -> Hooks {
        self.hooks.read().expect("namespace hooks lock poisoned").clone()
    }

    /// Evaluates `feature` against `ctx` under the current configuration.
    ///
    /// # Panics
    ///
    /// Panics if `feature` has no entry in the current configuration.
    /// Features are declared statically and bound to a configuration at
    /// decode or build time, so a missing entry indicates a misused
    /// registry rather than a condition this call can recover from
    /// (`spec.md` §4.4). Also panics if an internal lock is poisoned.
    #[must_use]
    #[allow(clippy::expect_used, reason = "a missing feature definition is a caller programming error, not a runtime failure this API models")]
    pub fn evaluate(&self, feature: &Feature, ctx: &Context) -> EvaluationResult {
        let started = Instant::now();
        let config = self.configuration();
        let definition = config.get(&feature.id).expect("feature has no definition in the current configuration");
        let kill_switch = self.is_disabled();
        let feature_key = feature.id.to_string();

        let (value, decision) = evaluator::evaluate(definition, &feature_key, ctx, kill_switch, self.hooks().logger.as_ref());
        let duration_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let config_version = self.generation();

        self.hooks().metrics.record_evaluation(&EvaluationEvent {
            feature_key,
            decision_kind: decision.kind(),
            duration_ns,
            config_version,
        });

        EvaluationResult { value, decision, duration_ns, config_version }
    }
}
