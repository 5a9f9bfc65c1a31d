// konditional-core/src/core/value.rs
// ============================================================================
// Module: Konditional Value Types
// Description: The tagged value union carried by features, rules, and defaults.
// Purpose: Recover typed access over a sealed value hierarchy without `Any`.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The reference hierarchy is a sealed class over primitive feature types plus
//! a schema-backed `Custom` variant. This module maps that onto a tagged sum
//! (`ValueType` witness + `FeatureValue` payload), matching the `{"type":
//! ..., "value": ...}` wire shape in `spec.md` §6 exactly so the JSON
//! boundary needs no special-casing per type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

// ============================================================================
// SECTION: ValueType
// ============================================================================

/// Declared type tag for a feature, fixed for the lifetime of the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// `true`/`false`.
    Boolean,
    /// UTF-8 text.
    Str,
    /// 64-bit signed integer (wire types `int` and `long` both decode here).
    Integer,
    /// 64-bit floating point.
    Double,
    /// One of a closed set of string constants.
    Enum,
    /// A structured value validated against a declared [`Schema`](crate::core::schema::Schema).
    Custom,
}

impl ValueType {
    /// Returns the wire discriminant string for this type.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Str => "string",
            Self::Integer => "int",
            Self::Double => "double",
            Self::Enum => "enum",
            Self::Custom => "json",
        }
    }
}

// ============================================================================
// SECTION: FeatureValue
// ============================================================================

/// A concrete value of one of the declared feature types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FeatureValue {
    /// Boolean value.
    Boolean(bool),
    /// String value.
    #[serde(rename = "string")]
    Str(String),
    /// Integer value (wire `int`/`long`).
    #[serde(rename = "int")]
    Integer(i64),
    /// Floating point value.
    #[serde(rename = "double")]
    Double(f64),
    /// Enum constant, validated against the feature's declared enum set.
    Enum(String),
    /// Structured value validated against a declared schema.
    #[serde(rename = "json")]
    Custom(Json),
}

impl FeatureValue {
    /// Returns the [`ValueType`] witness for this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Str(_) => ValueType::Str,
            Self::Integer(_) => ValueType::Integer,
            Self::Double(_) => ValueType::Double,
            Self::Enum(_) => ValueType::Enum,
            Self::Custom(_) => ValueType::Custom,
        }
    }
}
