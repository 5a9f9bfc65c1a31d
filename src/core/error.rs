// konditional-core/src/core/error.rs
// ============================================================================
// Module: Konditional Parse Errors
// Description: Typed taxonomy for JSON-boundary decode failures.
// Purpose: Give every decode failure mode a distinct, structured variant.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! `ParseError` is the single error type returned by every decode path in
//! `crate::json`. There is no partial-success path: a decode attempt either
//! fully succeeds or returns exactly one of these variants (`spec.md` §3,
//! §7).

// ============================================================================
// SECTION: ParseError
// ============================================================================

/// Taxonomy of JSON-boundary decode failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input was not syntactically valid JSON.
    #[error("invalid json: {reason}")]
    InvalidJson {
        /// Description of the syntax error.
        reason: String,
    },
    /// The JSON was syntactically valid but violated snapshot structure,
    /// type, or schema constraints.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// Description of the structural or schema violation.
        reason: String,
    },
    /// A flag referenced a feature identifier not present in the resolver.
    #[error("feature not found: {0}")]
    FeatureNotFound(String),
    /// A required key was absent from a JSON object.
    #[error("missing key: {0}")]
    MissingKey(String),
    /// A value's declared type did not match the type found on the wire.
    #[error("invalid type: expected {expected}, found {actual}")]
    InvalidType {
        /// The type required by the feature's declaration.
        expected: String,
        /// The type discriminant actually present on the wire.
        actual: String,
    },
}

/// Result of a decode attempt: either a fully assembled value, or exactly
/// one typed failure. There is no partial-success arm.
pub type ParseResult<T> = Result<T, ParseError>;
