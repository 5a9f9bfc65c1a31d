// konditional-core/src/core/feature.rs
// ============================================================================
// Module: Konditional Feature Registry
// Description: Typed feature declarations and the process-wide resolver.
// Purpose: Bind stable identifiers to typed feature objects once, at startup.
// Dependencies: crate::core::{identifiers, value, schema}
// ============================================================================

//! ## Overview
//! A [`Feature`] is declared once by application startup code and registered
//! into a [`FeatureResolver`]. The resolver is the decoder's only source of
//! truth for "does this identifier exist, and what type must its value be"
//! (`spec.md` §4.7).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::core::identifiers::FeatureKey;
use crate::core::identifiers::NamespaceSeed;
use crate::core::schema::Schema;
use crate::core::value::ValueType;

// ============================================================================
// SECTION: FeatureId
// ============================================================================

/// Canonical identifier `feature::<namespace_seed>::<feature_key>`.
///
/// Decode additionally accepts the legacy prefix `value::...` as equivalent,
/// for backward compatibility (`spec.md` §4.7, §4.6 step 2a); the legacy
/// form is never produced on encode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId {
    namespace_seed: NamespaceSeed,
    key: FeatureKey,
}

/// Errors raised when parsing a feature identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureIdError {
    /// The identifier did not use the `feature::` or `value::` prefix, or
    /// did not have exactly three `::`-separated segments.
    #[error("malformed feature identifier '{0}': expected 'feature::<seed>::<key>'")]
    Malformed(String),
    /// A segment of the identifier was empty.
    #[error("feature identifier '{0}' has an empty segment")]
    EmptySegment(String),
}

impl FeatureId {
    /// Builds an identifier directly from its two segments.
    #[must_use]
    pub fn new(namespace_seed: impl Into<NamespaceSeed>, key: impl Into<FeatureKey>) -> Self {
        Self { namespace_seed: namespace_seed.into(), key: key.into() }
    }

    /// Parses `feature::<seed>::<key>` or the legacy `value::<seed>::<key>`.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureIdError`] when the prefix, segment count, or any
    /// segment's non-emptiness requirement is violated.
    pub fn parse(raw: &str) -> Result<Self, FeatureIdError> {
        let rest = raw
            .strip_prefix("feature::")
            .or_else(|| raw.strip_prefix("value::"))
            .ok_or_else(|| FeatureIdError::Malformed(raw.to_string()))?;

        let mut segments = rest.splitn(2, "::");
        let seed = segments.next().ok_or_else(|| FeatureIdError::Malformed(raw.to_string()))?;
        let key = segments.next().ok_or_else(|| FeatureIdError::Malformed(raw.to_string()))?;

        if seed.is_empty() || key.is_empty() || key.contains("::") {
            return Err(FeatureIdError::EmptySegment(raw.to_string()));
        }

        Ok(Self { namespace_seed: NamespaceSeed::new(seed), key: FeatureKey::new(key) })
    }

    /// Returns the namespace seed segment.
    #[must_use]
    pub const fn namespace_seed(&self) -> &NamespaceSeed {
        &self.namespace_seed
    }

    /// Returns the feature key segment.
    #[must_use]
    pub const fn key(&self) -> &FeatureKey {
        &self.key
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature::{}::{}", self.namespace_seed, self.key)
    }
}

// ============================================================================
// SECTION: Feature
// ============================================================================

/// A typed feature declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Globally unique stable identifier.
    pub id: FeatureId,
    /// Declared value type, fixed once registered.
    pub value_type: ValueType,
    /// Validation schema, required when `value_type` is [`ValueType::Custom`].
    pub schema: Option<Schema>,
}

impl Feature {
    /// Declares a non-custom feature.
    #[must_use]
    pub const fn new(id: FeatureId, value_type: ValueType) -> Self {
        Self { id, value_type, schema: None }
    }

    /// Declares a custom feature backed by a validation schema.
    #[must_use]
    pub fn custom(id: FeatureId, schema: Schema) -> Self {
        Self { id, value_type: ValueType::Custom, schema: Some(schema) }
    }
}

// ============================================================================
// SECTION: FeatureResolver
// ============================================================================

/// Process-wide map from stable feature identifier to its typed declaration.
///
/// Populated once at startup; late registration after decode traffic begins
/// is a programming error because it would make previously failing decodes
/// start succeeding (`spec.md` §5).
#[derive(Debug, Default)]
pub struct FeatureResolver {
    features: RwLock<HashMap<FeatureId, Feature>>,
}

/// Raised when a colliding identifier is registered twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("feature identifier '{0}' is already registered")]
pub struct FeatureCollisionError(FeatureId);

impl FeatureResolver {
    /// Builds an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature declaration.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureCollisionError`] if `feature.id` is already
    /// registered; this is a programming error and should fail loudly at
    /// startup rather than be silently ignored.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned by a prior panic in another
    /// thread, which can only happen if a caller panicked while holding it.
    pub fn register(&self, feature: Feature) -> Result<(), FeatureCollisionError> {
        let mut features = self.features.write().expect("feature resolver lock poisoned");
        if features.contains_key(&feature.id) {
            return Err(FeatureCollisionError(feature.id));
        }
        features.insert(feature.id.clone(), feature);
        Ok(())
    }

    /// Looks up a feature by its canonical identifier.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn resolve(&self, id: &FeatureId) -> Option<Feature> {
        self.features.read().expect("feature resolver lock poisoned").get(id).cloned()
    }
}
