// konditional-core/src/json/loader.rs
// ============================================================================
// Module: Konditional Snapshot Loader
// Description: Side-effecting adapter between JSON text and a namespace.
// Purpose: Compose decode with NamespaceRegistry::load/rollback behind one
//          call, translating decode failures into load-site decisions
//          (spec.md §4.6 step 2, §4.9).
// Dependencies: crate::{core, json::codec, runtime::namespace}
// ============================================================================

//! ## Overview
//! `SnapshotLoader` is the only part of this crate that both decodes JSON
//! and touches a [`NamespaceRegistry`]. Everything in [`crate::json::codec`]
//! is pure; this module is the side-effecting seam applications call from a
//! polling loop or a push-update handler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::configuration::Configuration;
use crate::core::error::ParseError;
use crate::core::feature::FeatureResolver;
use crate::json::codec;
use crate::json::codec::DecodeOptions;
use crate::runtime::namespace::NamespaceRegistry;

// ============================================================================
// SECTION: SnapshotLoader
// ============================================================================

/// Decodes JSON snapshots or patches and publishes them into a namespace.
///
/// A failed decode never touches the namespace: `current` only changes on a
/// fully successful decode (`spec.md` §4.9, invariant 8).
pub struct SnapshotLoader<'a> {
    resolver: &'a FeatureResolver,
    options: DecodeOptions,
}

impl<'a> SnapshotLoader<'a> {
    /// Builds a loader bound to `resolver`, decoding strictly by default.
    #[must_use]
    pub fn new(resolver: &'a FeatureResolver) -> Self {
        Self { resolver, options: DecodeOptions::strict() }
    }

    /// Builder-style setter for decode options.
    #[must_use]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decodes `json` as a full snapshot and publishes it into `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] without touching `registry` if decode fails.
    pub fn load_snapshot(&self, registry: &NamespaceRegistry, json: &str) -> Result<(), ParseError> {
        let config = codec::decode(json, self.resolver, &self.options)?;
        registry.load(config);
        Ok(())
    }

    /// Decodes `json` as a patch and publishes `base.apply(patch)` into
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] without touching `registry` if decode fails.
    pub fn apply_patch(&self, registry: &NamespaceRegistry, json: &str) -> Result<(), ParseError> {
        let base = registry.configuration();
        let next = codec::apply_patch_json(&base, json, self.resolver, &self.options)?;
        registry.load(next);
        Ok(())
    }

    /// Decodes `json` as a full snapshot without publishing it anywhere.
    ///
    /// Useful for validating an incoming payload before deciding whether to
    /// load it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on the first violation found.
    pub fn decode_only(&self, json: &str) -> Result<Configuration, ParseError> {
        codec::decode(json, self.resolver, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotLoader;
    use crate::core::feature::Feature;
    use crate::core::feature::FeatureId;
    use crate::core::value::ValueType;
    use crate::runtime::namespace::NamespaceRegistry;

    fn resolver() -> crate::core::feature::FeatureResolver {
        let resolver = crate::core::feature::FeatureResolver::new();
        resolver.register(Feature::new(FeatureId::new("core", "darkMode"), ValueType::Boolean)).expect("no collision");
        resolver
    }

    #[test]
    fn failed_decode_never_touches_the_namespace() {
        let resolver = resolver();
        let loader = SnapshotLoader::new(&resolver);
        let registry = NamespaceRegistry::new("test");
        let generation_before = registry.generation();

        let err = loader.load_snapshot(&registry, "{not json").expect_err("invalid json");
        assert!(matches!(err, crate::core::error::ParseError::InvalidJson { .. }));
        assert_eq!(registry.generation(), generation_before);
    }

    #[test]
    fn successful_snapshot_load_bumps_generation() {
        let resolver = resolver();
        let loader = SnapshotLoader::new(&resolver);
        let registry = NamespaceRegistry::new("test");

        let json = r#"{"flags":[{"key":"feature::core::darkMode","defaultValue":{"type":"boolean","value":false},"isActive":true,"salt":"v1","values":[]}]}"#;
        loader.load_snapshot(&registry, json).expect("valid snapshot");
        assert_eq!(registry.generation(), 1);
    }

    #[test]
    fn patch_is_applied_against_current_configuration() {
        let resolver = resolver();
        let loader = SnapshotLoader::new(&resolver);
        let registry = NamespaceRegistry::new("test");

        let snapshot = r#"{"flags":[{"key":"feature::core::darkMode","defaultValue":{"type":"boolean","value":false},"isActive":true,"salt":"v1","values":[]}]}"#;
        loader.load_snapshot(&registry, snapshot).expect("valid snapshot");

        let patch = r#"{"flags":[{"key":"feature::core::darkMode","defaultValue":{"type":"boolean","value":true},"isActive":true,"salt":"v1","values":[]}],"removeKeys":[]}"#;
        loader.apply_patch(&registry, patch).expect("valid patch");

        assert_eq!(registry.generation(), 2);
        let config = registry.configuration();
        let def = config.get(&FeatureId::new("core", "darkMode")).expect("present");
        assert_eq!(def.default_value, crate::core::value::FeatureValue::Boolean(true));
    }
}
