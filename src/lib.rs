// konditional-core/src/lib.rs
// ============================================================================
// Module: Konditional Core Library
// Description: Public API surface for the Konditional evaluation engine.
// Purpose: Expose core types, runtime, JSON boundary, and observability hooks.
// Dependencies: crate::{core, interfaces, json, runtime}
// ============================================================================

//! ## Overview
//! Konditional is a deterministic feature-flag and structured-configuration
//! evaluation engine. Given a declared feature, a targeting context, and a
//! configuration snapshot, evaluation always produces the same value for the
//! same inputs — the same stable id lands in the same bucket for the same
//! feature and salt regardless of process, platform, or language
//! implementation. The crate is backend-agnostic: it has no opinion on where
//! snapshots come from or where observability events go, and integrates
//! through [`interfaces::Logger`] and [`interfaces::MetricsCollector`] rather
//! than embedding a particular sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod json;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::AppVersion;
pub use core::AxisId;
pub use core::AxisValueId;
pub use core::BaseCriteria;
pub use core::Configuration;
pub use core::Context;
pub use core::EnumConstant;
pub use core::EvaluationDecision;
pub use core::EvaluationResult;
pub use core::ExtensionPredicate;
pub use core::Feature;
pub use core::FeatureCollisionError;
pub use core::FeatureDefinition;
pub use core::FeatureDefinitionError;
pub use core::FeatureId;
pub use core::FeatureIdError;
pub use core::FeatureKey;
pub use core::FeatureResolver;
pub use core::FeatureValue;
pub use core::Metadata;
pub use core::NamespaceSeed;
pub use core::Patch;
pub use core::ParseError;
pub use core::ParseResult;
pub use core::RampUp;
pub use core::RampUpError;
pub use core::Rule;
pub use core::Schema;
pub use core::StableId;
pub use core::StableIdError;
pub use core::ValidationError;
pub use core::ValidationResult;
pub use core::ValueType;
pub use core::VersionRange;
pub use core::validate;

pub use interfaces::ConfigLoadEvent;
pub use interfaces::ConfigRollbackEvent;
pub use interfaces::EvaluationEvent;
pub use interfaces::Hooks;
pub use interfaces::Logger;
pub use interfaces::MetricsCollector;
pub use interfaces::NoopLogger;
pub use interfaces::NoopMetricsCollector;

pub use json::DecodeOptions;
pub use json::SnapshotLoader;
pub use json::apply_patch_json;
pub use json::decode;
pub use json::decode_patch;
pub use json::encode;
pub use json::encode_patch;

pub use runtime::BUCKET_SPACE;
pub use runtime::DEFAULT_HISTORY_CAPACITY;
pub use runtime::MISSING_STABLE_ID_BUCKET;
pub use runtime::NamespaceRegistry;
