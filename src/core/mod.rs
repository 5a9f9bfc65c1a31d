// konditional-core/src/core/mod.rs
// ============================================================================
// Module: Konditional Core Types
// Description: Canonical data model: identifiers, features, rules, contexts,
//              configurations, schemas, decisions, and parse errors.
// Purpose: Provide the types every other module builds on, with no
//          evaluation behavior of their own (`spec.md` §3).
// Dependencies: serde, serde_json, sha2, regex, thiserror
// ============================================================================

//! ## Overview
//! `core` holds the data model from `spec.md` §3: `Feature`/`FeatureId`,
//! `Rule`/`BaseCriteria`/`RampUp`, `Context`, `Configuration`/
//! `FeatureDefinition`/`Patch`, `Schema`/`ValidationError`,
//! `EvaluationDecision`/`EvaluationResult`, and `ParseError`. None of these
//! types know how to evaluate anything; that lives in `crate::runtime`.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod configuration;
pub mod context;
pub mod decision;
pub mod error;
pub mod feature;
pub mod hashing;
pub mod identifiers;
pub mod rule;
pub mod schema;
pub mod value;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use configuration::Configuration;
pub use configuration::FeatureDefinition;
pub use configuration::FeatureDefinitionError;
pub use configuration::Metadata;
pub use configuration::Patch;
pub use context::Context;
pub use decision::EvaluationDecision;
pub use decision::EvaluationResult;
pub use error::ParseError;
pub use error::ParseResult;
pub use feature::Feature;
pub use feature::FeatureCollisionError;
pub use feature::FeatureId;
pub use feature::FeatureIdError;
pub use feature::FeatureResolver;
pub use identifiers::AxisId;
pub use identifiers::AxisValueId;
pub use identifiers::FeatureKey;
pub use identifiers::NamespaceSeed;
pub use identifiers::StableId;
pub use identifiers::StableIdError;
pub use rule::BaseCriteria;
pub use rule::ExtensionPredicate;
pub use rule::RampUp;
pub use rule::RampUpError;
pub use rule::Rule;
pub use schema::EnumConstant;
pub use schema::Schema;
pub use schema::ValidationError;
pub use schema::ValidationResult;
pub use schema::validate;
pub use value::FeatureValue;
pub use value::ValueType;
pub use version::AppVersion;
pub use version::VersionRange;
