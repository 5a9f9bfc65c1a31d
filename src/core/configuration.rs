// konditional-core/src/core/configuration.rs
// ============================================================================
// Module: Konditional Configuration
// Description: Immutable snapshots of feature definitions, and patches.
// Purpose: Model the unit swapped atomically by NamespaceRegistry::load.
// Dependencies: crate::core::{feature, rule, value}
// ============================================================================

//! ## Overview
//! A [`Configuration`] is an immutable mapping from [`FeatureId`] to
//! [`FeatureDefinition`], plus optional [`Metadata`] (`spec.md` §3). Once
//! built, a configuration is never mutated; [`Patch::apply`] produces a new
//! configuration rather than editing one in place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use crate::core::feature::FeatureId;
use crate::core::rule::Rule;
use crate::core::value::FeatureValue;
use crate::core::value::ValueType;

// ============================================================================
// SECTION: FeatureDefinition
// ============================================================================

/// Per-feature runtime state held inside a [`Configuration`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDefinition {
    /// Value returned when no rule is selected.
    pub default_value: FeatureValue,
    /// Targeting rules, order-insensitive (precedence is computed, not
    /// positional).
    pub rules: Vec<Rule>,
    /// Bucketing salt. Non-empty; defaults to `"v1"`.
    pub salt: String,
    /// Whether this feature is active. When `false`, evaluation always
    /// returns the default.
    pub is_active: bool,
}

/// Raised when a [`FeatureDefinition`] violates an invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureDefinitionError {
    /// `salt` was empty.
    #[error("salt must be non-empty")]
    EmptySalt,
    /// The default value's type did not match the feature's declared type.
    #[error("default value type {actual:?} does not match declared type {expected:?}")]
    DefaultTypeMismatch {
        /// The feature's declared type.
        expected: ValueType,
        /// The default value's actual type.
        actual: ValueType,
    },
    /// A rule's value type did not match the feature's declared type.
    #[error("rule {index} value type {actual:?} does not match declared type {expected:?}")]
    RuleTypeMismatch {
        /// Index of the offending rule.
        index: usize,
        /// The feature's declared type.
        expected: ValueType,
        /// The rule's actual value type.
        actual: ValueType,
    },
}

impl FeatureDefinition {
    /// Builds a definition with the default salt `"v1"` and no rules.
    #[must_use]
    pub fn new(default_value: FeatureValue) -> Self {
        Self { default_value, rules: Vec::new(), salt: "v1".to_string(), is_active: true }
    }

    /// Builder-style setter for rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Builder-style setter for the salt.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Builder-style setter for activation.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Checks this definition's invariants against a feature's declared
    /// type: non-empty salt, and every value (default plus every rule) of
    /// exactly that type (`spec.md` §3).
    ///
    /// # Errors
    ///
    /// Returns [`FeatureDefinitionError`] on the first violation found.
    pub fn validate(&self, declared_type: ValueType) -> Result<(), FeatureDefinitionError> {
        if self.salt.is_empty() {
            return Err(FeatureDefinitionError::EmptySalt);
        }
        if self.default_value.value_type() != declared_type {
            return Err(FeatureDefinitionError::DefaultTypeMismatch {
                expected: declared_type,
                actual: self.default_value.value_type(),
            });
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.value.value_type() != declared_type {
                return Err(FeatureDefinitionError::RuleTypeMismatch {
                    index,
                    expected: declared_type,
                    actual: rule.value.value_type(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Optional, advisory metadata carried alongside a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Free-form version label assigned by the publisher.
    pub version: Option<String>,
    /// Unix-epoch milliseconds at which this snapshot was produced.
    pub timestamp: Option<i64>,
    /// Free-form description of where this snapshot came from.
    pub source: Option<String>,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// An immutable mapping from feature identifier to feature definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    definitions: HashMap<FeatureId, FeatureDefinition>,
    /// Optional metadata describing this snapshot's provenance.
    pub metadata: Metadata,
}

impl Configuration {
    /// Builds an empty configuration with no metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from an already-assembled map.
    #[must_use]
    pub fn from_definitions(definitions: HashMap<FeatureId, FeatureDefinition>) -> Self {
        Self { definitions, metadata: Metadata::default() }
    }

    /// Builder-style setter for metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Inserts or replaces one feature's definition.
    pub fn insert(&mut self, id: FeatureId, definition: FeatureDefinition) {
        self.definitions.insert(id, definition);
    }

    /// Looks up a feature's definition.
    #[must_use]
    pub fn get(&self, id: &FeatureId) -> Option<&FeatureDefinition> {
        self.definitions.get(id)
    }

    /// Iterates over every `(identifier, definition)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &FeatureDefinition)> {
        self.definitions.iter()
    }

    /// Returns the number of features held in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns whether this snapshot holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// ============================================================================
// SECTION: Patch
// ============================================================================

/// A partial update: features to add or replace, and identifiers to remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    /// Features to insert or overwrite.
    pub added: HashMap<FeatureId, FeatureDefinition>,
    /// Feature identifiers to remove.
    pub removed: HashSet<FeatureId>,
}

impl Patch {
    /// Builds an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies this patch to `base`, producing a new configuration. `base`
    /// is never mutated: removals are applied first, then additions, so a
    /// feature present in both `removed` and `added` ends up present.
    #[must_use]
    pub fn apply(&self, base: &Configuration) -> Configuration {
        let mut definitions = base.definitions.clone();
        for id in &self.removed {
            definitions.remove(id);
        }
        for (id, definition) in &self.added {
            definitions.insert(id.clone(), definition.clone());
        }
        Configuration { definitions, metadata: base.metadata.clone() }
    }
}
