// konditional-core/src/core/schema.rs
// ============================================================================
// Module: Konditional Schema Validator
// Description: Structured-value schema declarations and validation.
// Purpose: Validate `custom` feature values at the JSON boundary.
// Dependencies: serde_json, regex, thiserror
// ============================================================================

//! ## Overview
//! `Schema` is a closed set of variants (object/array/string/integer/double/
//! boolean/null/enum), each carrying its own constraints, plus a `nullable`
//! flag honored uniformly across variants. `validate` never panics and
//! always returns a path-qualified error on failure (`spec.md` §4.8).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use regex::Regex;
use serde_json::Value as Json;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// A structured-value schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// An object with named, individually-schema'd fields.
    Object {
        /// Field name to (schema, required) mapping.
        fields: BTreeMap<String, (Schema, bool)>,
        /// Whether unknown fields cause a validation failure.
        reject_unknown_fields: bool,
        /// Whether `null` is accepted in place of an object.
        nullable: bool,
    },
    /// An array of uniformly-schema'd elements.
    Array {
        /// Schema every element must satisfy.
        element: Box<Schema>,
        /// Minimum element count, inclusive.
        min_items: Option<usize>,
        /// Maximum element count, inclusive.
        max_items: Option<usize>,
        /// Whether elements must be pairwise distinct.
        unique_items: bool,
        /// Whether `null` is accepted in place of an array.
        nullable: bool,
    },
    /// A UTF-8 string.
    Str {
        /// Minimum length in Unicode scalar values, inclusive.
        min_length: Option<usize>,
        /// Maximum length in Unicode scalar values, inclusive.
        max_length: Option<usize>,
        /// Full-match regular expression constraint.
        pattern: Option<String>,
        /// Advisory format tag (not enforced, carried for documentation).
        format: Option<String>,
        /// Allowed constant values, if restricted.
        enum_values: Option<BTreeSet<String>>,
        /// Whether `null` is accepted in place of a string.
        nullable: bool,
    },
    /// A 64-bit integer.
    Integer {
        /// Inclusive minimum.
        minimum: Option<i64>,
        /// Inclusive maximum.
        maximum: Option<i64>,
        /// Allowed constant values, if restricted.
        enum_values: Option<BTreeSet<i64>>,
        /// Whether `null` is accepted in place of an integer.
        nullable: bool,
    },
    /// A 64-bit float.
    Double {
        /// Inclusive minimum.
        minimum: Option<f64>,
        /// Inclusive maximum.
        maximum: Option<f64>,
        /// Whether `null` is accepted in place of a double.
        nullable: bool,
    },
    /// A boolean.
    Boolean {
        /// Whether `null` is accepted in place of a boolean.
        nullable: bool,
    },
    /// The JSON null literal, matched only by `Json::Null`.
    Null,
    /// An explicit enumeration of allowed constants of one primitive type.
    Enum {
        /// Allowed constants, compared by JSON equality.
        values: BTreeSet<EnumConstant>,
        /// Whether `null` is accepted in addition to `values`.
        nullable: bool,
    },
}

/// A primitive constant usable inside a [`Schema::Enum`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumConstant {
    /// String constant.
    Str(String),
    /// Integer constant.
    Integer(i64),
}

// ============================================================================
// SECTION: ValidationError
// ============================================================================

/// A path-qualified schema validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Dotted/bracketed path to the offending value, e.g. `address.country`.
    pub path: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ValidationError {
    fn at(path: &str, message: impl Into<String>) -> Self {
        Self { path: path.to_string(), message: message.into() }
    }
}

/// Result of a schema validation pass.
pub type ValidationResult = Result<(), ValidationError>;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `value` against `schema`, returning the first failure found.
///
/// # Errors
///
/// Returns [`ValidationError`] describing the first constraint violated,
/// path-qualified from the root.
pub fn validate(value: &Json, schema: &Schema) -> ValidationResult {
    validate_at(value, schema, "$")
}

fn validate_at(value: &Json, schema: &Schema, path: &str) -> ValidationResult {
    match schema {
        Schema::Object { fields, reject_unknown_fields, nullable } => {
            validate_object(value, fields, *reject_unknown_fields, *nullable, path)
        }
        Schema::Array { element, min_items, max_items, unique_items, nullable } => {
            validate_array(value, element, *min_items, *max_items, *unique_items, *nullable, path)
        }
        Schema::Str { min_length, max_length, pattern, format: _, enum_values, nullable } => {
            validate_str(value, *min_length, *max_length, pattern.as_deref(), enum_values.as_ref(), *nullable, path)
        }
        Schema::Integer { minimum, maximum, enum_values, nullable } => {
            validate_integer(value, *minimum, *maximum, enum_values.as_ref(), *nullable, path)
        }
        Schema::Double { minimum, maximum, nullable } => {
            validate_double(value, *minimum, *maximum, *nullable, path)
        }
        Schema::Boolean { nullable } => validate_boolean(value, *nullable, path),
        Schema::Null => {
            if value.is_null() {
                Ok(())
            } else {
                Err(ValidationError::at(path, format!("value '{value}' is not null")))
            }
        }
        Schema::Enum { values, nullable } => validate_enum(value, values, *nullable, path),
    }
}

fn validate_object(
    value: &Json,
    fields: &BTreeMap<String, (Schema, bool)>,
    reject_unknown_fields: bool,
    nullable: bool,
    path: &str,
) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let Json::Object(map) = value else {
        return Err(ValidationError::at(path, format!("value '{value}' is not an object")));
    };

    for (name, (field_schema, required)) in fields {
        let field_path = format!("{path}.{name}");
        match map.get(name) {
            Some(field_value) => validate_at(field_value, field_schema, &field_path)?,
            None if *required => {
                return Err(ValidationError::at(&field_path, "required field is missing"));
            }
            None => {}
        }
    }

    if reject_unknown_fields {
        for key in map.keys() {
            if !fields.contains_key(key) {
                return Err(ValidationError::at(path, format!("unknown field '{key}'")));
            }
        }
    }

    Ok(())
}

fn validate_array(
    value: &Json,
    element: &Schema,
    min_items: Option<usize>,
    max_items: Option<usize>,
    unique_items: bool,
    nullable: bool,
    path: &str,
) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let Json::Array(items) = value else {
        return Err(ValidationError::at(path, format!("value '{value}' is not an array")));
    };

    if let Some(min) = min_items {
        if items.len() < min {
            return Err(ValidationError::at(path, format!("array length {} is less than minimum {min}", items.len())));
        }
    }
    if let Some(max) = max_items {
        if items.len() > max {
            return Err(ValidationError::at(path, format!("array length {} is greater than maximum {max}", items.len())));
        }
    }
    if unique_items {
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if a == b {
                    return Err(ValidationError::at(path, "array elements are not unique"));
                }
            }
        }
    }

    for (index, item) in items.iter().enumerate() {
        validate_at(item, element, &format!("{path}[{index}]"))?;
    }

    Ok(())
}

fn validate_str(
    value: &Json,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&str>,
    enum_values: Option<&BTreeSet<String>>,
    nullable: bool,
    path: &str,
) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let Json::String(text) = value else {
        return Err(ValidationError::at(path, format!("value '{value}' is not a string")));
    };

    let length = text.chars().count();
    if let Some(min) = min_length {
        if length < min {
            return Err(ValidationError::at(path, format!("value '{text}' length {length} is less than minimum length {min}")));
        }
    }
    if let Some(max) = max_length {
        if length > max {
            return Err(ValidationError::at(path, format!("value '{text}' length {length} is greater than maximum length {max}")));
        }
    }
    if let Some(pattern) = pattern {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|err| ValidationError::at(path, format!("invalid pattern '{pattern}': {err}")))?;
        if !regex.is_match(text) {
            return Err(ValidationError::at(path, format!("value '{text}' does not match pattern '{pattern}'")));
        }
    }
    if let Some(allowed) = enum_values {
        if !allowed.contains(text) {
            return Err(ValidationError::at(path, format!("value '{text}' is not one of the allowed values")));
        }
    }

    Ok(())
}

fn validate_integer(
    value: &Json,
    minimum: Option<i64>,
    maximum: Option<i64>,
    enum_values: Option<&BTreeSet<i64>>,
    nullable: bool,
    path: &str,
) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let Some(number) = value.as_i64() else {
        return Err(ValidationError::at(path, format!("value '{value}' is not an integer")));
    };

    if let Some(min) = minimum {
        if number < min {
            return Err(ValidationError::at(path, format!("value {number} is less than minimum {min}")));
        }
    }
    if let Some(max) = maximum {
        if number > max {
            return Err(ValidationError::at(path, format!("value {number} is greater than maximum {max}")));
        }
    }
    if let Some(allowed) = enum_values {
        if !allowed.contains(&number) {
            return Err(ValidationError::at(path, format!("value {number} is not one of the allowed values")));
        }
    }

    Ok(())
}

fn validate_double(value: &Json, minimum: Option<f64>, maximum: Option<f64>, nullable: bool, path: &str) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let Some(number) = value.as_f64() else {
        return Err(ValidationError::at(path, format!("value '{value}' is not a number")));
    };

    if let Some(min) = minimum {
        if number < min {
            return Err(ValidationError::at(path, format!("value {number} is less than minimum {min}")));
        }
    }
    if let Some(max) = maximum {
        if number > max {
            return Err(ValidationError::at(path, format!("value {number} is greater than maximum {max}")));
        }
    }

    Ok(())
}

fn validate_boolean(value: &Json, nullable: bool, path: &str) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    if value.is_boolean() {
        Ok(())
    } else {
        Err(ValidationError::at(path, format!("value '{value}' is not a boolean")))
    }
}

fn validate_enum(value: &Json, values: &BTreeSet<EnumConstant>, nullable: bool, path: &str) -> ValidationResult {
    if value.is_null() && nullable {
        return Ok(());
    }
    let matches = values.iter().any(|constant| match (constant, value) {
        (EnumConstant::Str(expected), Json::String(actual)) => expected == actual,
        (EnumConstant::Integer(expected), Json::Number(actual)) => actual.as_i64() == Some(*expected),
        _ => false,
    });
    if matches {
        Ok(())
    } else {
        Err(ValidationError::at(path, format!("value '{value}' is not one of the allowed enum constants")))
    }
}

#[cfg(test)]
mod tests {
    use super::Schema;
    use super::validate;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn rejects_nested_field_with_path() {
        let mut country_fields = BTreeMap::new();
        country_fields.insert(
            "country".to_string(),
            (Schema::Str { min_length: None, max_length: Some(2), pattern: None, format: None, enum_values: None, nullable: false }, true),
        );
        let mut fields = BTreeMap::new();
        fields.insert(
            "address".to_string(),
            (Schema::Object { fields: country_fields, reject_unknown_fields: false, nullable: false }, true),
        );
        let schema = Schema::Object { fields, reject_unknown_fields: false, nullable: false };

        let value = json!({ "address": { "country": "USA" } });
        let err = validate(&value, &schema).expect_err("too long");
        assert_eq!(err.path, "$.address.country");
        assert!(err.message.contains("greater than maximum length 2"));
    }

    #[test]
    fn nullable_accepts_null() {
        let schema = Schema::Integer { minimum: None, maximum: None, enum_values: None, nullable: true };
        assert!(validate(&json!(null), &schema).is_ok());
    }

    #[test]
    fn missing_required_field() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), (Schema::Str { min_length: None, max_length: None, pattern: None, format: None, enum_values: None, nullable: false }, true));
        let schema = Schema::Object { fields, reject_unknown_fields: false, nullable: false };
        let err = validate(&json!({}), &schema).expect_err("missing");
        assert_eq!(err.path, "$.name");
    }
}
