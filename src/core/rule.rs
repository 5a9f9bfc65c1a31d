// konditional-core/src/core/rule.rs
// ============================================================================
// Module: Konditional Rules
// Description: Targeting predicates and gated values attached to a feature.
// Purpose: Model a rule as base (serializable) criteria plus an optional
//          in-memory-only extension predicate, per spec.md §9.
// Dependencies: crate::core::{identifiers, value, version}
// ============================================================================

//! ## Overview
//! A rule pairs a value with targeting criteria and a rollout gate. Rules
//! never mutate after construction (`spec.md` §3). Extension predicates are
//! closures over [`Context`](crate::core::context::Context) and are never
//! produced by JSON decode (`spec.md` §9) — only the in-process builder can
//! attach one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::context::Context;
use crate::core::identifiers::AxisId;
use crate::core::identifiers::AxisValueId;
use crate::core::identifiers::StableId;
use crate::core::value::FeatureValue;
use crate::core::version::VersionRange;

// ============================================================================
// SECTION: RampUp
// ============================================================================

/// A rollout percentage in `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampUp(f64);

/// Error raised when a ramp-up percentage falls outside `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("ramp_up {0} is outside [0.0, 100.0]")]
pub struct RampUpError(f64);

impl RampUp {
    /// Builds a ramp-up percentage.
    ///
    /// # Errors
    ///
    /// Returns [`RampUpError`] when `percentage` is outside `[0.0, 100.0]`
    /// or is not a finite number.
    pub fn new(percentage: f64) -> Result<Self, RampUpError> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(RampUpError(percentage));
        }
        Ok(Self(percentage))
    }

    /// A ramp-up of 0%: the rule never passes the rollout gate.
    #[must_use]
    pub const fn none() -> Self {
        Self(0.0)
    }

    /// A ramp-up of 100%: the rule always passes the rollout gate.
    #[must_use]
    pub const fn all() -> Self {
        Self(100.0)
    }

    /// Returns the raw percentage.
    #[must_use]
    pub const fn percentage(self) -> f64 {
        self.0
    }

    /// Converts the percentage into a basis-points threshold in `0..=10_000`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "percentage is clamped to [0.0, 100.0] so the scaled value fits u32"
    )]
    pub fn threshold_basis_points(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

// ============================================================================
// SECTION: BaseCriteria
// ============================================================================

/// Serializable targeting criteria for a rule. Every field absent matches
/// everything; every field present narrows the match (AND semantics,
/// `spec.md` §4.3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseCriteria {
    /// Locales that satisfy this rule, e.g. `{"EN_US"}`.
    pub locales: Option<HashSet<String>>,
    /// Platforms that satisfy this rule, e.g. `{"IOS"}`.
    pub platforms: Option<HashSet<String>>,
    /// Application version window.
    pub version_range: Option<VersionRange>,
    /// Per-axis allowed value sets; every listed axis must be present in the
    /// context and its value must be in the allowed set.
    pub axis_constraints: Option<HashMap<AxisId, HashSet<AxisValueId>>>,
}

impl BaseCriteria {
    /// An empty criteria set (matches every context).
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }
}

// ============================================================================
// SECTION: ExtensionPredicate
// ============================================================================

/// An in-memory-only predicate over [`Context`], attached by the builder.
///
/// Never serialized (`spec.md` §9): rules loaded from JSON have no
/// extension predicate. Implementations must be total and side-effect-free;
/// a panicking predicate is caught by [`crate::runtime::matcher`] and
/// treated as non-match.
#[derive(Clone)]
pub struct ExtensionPredicate {
    specificity: u32,
    predicate: Arc<dyn Fn(&Context) -> bool + Send + Sync>,
}

impl ExtensionPredicate {
    /// Wraps a predicate closure with the default specificity contribution of 1.
    pub fn new(predicate: impl Fn(&Context) -> bool + Send + Sync + 'static) -> Self {
        Self { specificity: 1, predicate: Arc::new(predicate) }
    }

    /// Wraps a predicate closure with an explicit specificity contribution.
    pub fn with_specificity(
        specificity: u32,
        predicate: impl Fn(&Context) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self { specificity, predicate: Arc::new(predicate) }
    }

    /// Returns this predicate's contribution to rule specificity.
    #[must_use]
    pub const fn specificity(&self) -> u32 {
        self.specificity
    }

    /// Invokes the predicate against a context.
    #[must_use]
    pub fn evaluate(&self, ctx: &Context) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for ExtensionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionPredicate")
            .field("specificity", &self.specificity)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ExtensionPredicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate) && self.specificity == other.specificity
    }
}

// ============================================================================
// SECTION: Rule
// ============================================================================

/// A targeting predicate set plus a gated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Value returned when this rule is selected.
    pub value: FeatureValue,
    /// Rollout percentage gate, consulted after the rule matches.
    pub ramp_up: RampUp,
    /// Stable ids that bypass the rollout gate once the rule matches.
    pub allowlist: HashSet<StableId>,
    /// Serializable targeting criteria.
    pub base: BaseCriteria,
    /// In-memory-only predicate, never present after a JSON round-trip.
    pub extension: Option<ExtensionPredicate>,
    /// Free-text note, used only as a deterministic tie-breaker.
    pub note: Option<String>,
}

impl Rule {
    /// Builds a match-all rule with the given value and ramp-up.
    #[must_use]
    pub fn new(value: FeatureValue, ramp_up: RampUp) -> Self {
        Self {
            value,
            ramp_up,
            allowlist: HashSet::new(),
            base: BaseCriteria::match_all(),
            extension: None,
            note: None,
        }
    }

    /// Builder-style setter for base criteria.
    #[must_use]
    pub fn with_base(mut self, base: BaseCriteria) -> Self {
        self.base = base;
        self
    }

    /// Builder-style setter for the allowlist.
    #[must_use]
    pub fn with_allowlist(mut self, allowlist: HashSet<StableId>) -> Self {
        self.allowlist = allowlist;
        self
    }

    /// Builder-style setter for the extension predicate.
    #[must_use]
    pub fn with_extension(mut self, extension: ExtensionPredicate) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Builder-style setter for the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::RampUp;

    #[test]
    fn threshold_basis_points_scales_by_100() {
        assert_eq!(RampUp::new(50.0).expect("valid").threshold_basis_points(), 5000);
        assert_eq!(RampUp::none().threshold_basis_points(), 0);
        assert_eq!(RampUp::all().threshold_basis_points(), 10_000);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(RampUp::new(-1.0).is_err());
        assert!(RampUp::new(100.1).is_err());
    }
}
