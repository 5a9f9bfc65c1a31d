// konditional-core/src/runtime/mod.rs
// ============================================================================
// Module: Konditional Runtime
// Description: Deterministic evaluation engine and namespace registry.
// Purpose: Implement spec.md §4.1-§4.5: bucketing, specificity, matching,
//          the evaluator, and the namespace registry.
// Dependencies: crate::{core, interfaces}, sha2
// ============================================================================

//! ## Overview
//! `runtime` is the only module with evaluation behavior. It is layered
//! bottom-up: [`bucketing`] and [`specificity`] are pure free functions,
//! [`matcher`] builds on `core::context`/`core::rule`, [`evaluator`]
//! orchestrates all three, and [`namespace`] wraps the evaluator in an
//! atomically-swappable, observable registry.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bucketing;
pub mod evaluator;
pub mod matcher;
pub mod namespace;
pub mod specificity;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bucketing::BUCKET_SPACE;
pub use bucketing::MISSING_STABLE_ID_BUCKET;
pub use namespace::DEFAULT_HISTORY_CAPACITY;
pub use namespace::NamespaceRegistry;
