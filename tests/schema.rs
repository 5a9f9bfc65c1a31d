// konditional-core/tests/schema.rs
// ============================================================================
// Test: Structured value schema validation
// Covers: spec.md §4.8
// ============================================================================
//! Structured value schema validation.


use konditional_core::EnumConstant;
use konditional_core::Schema;
use konditional_core::validate;
use serde_json::json;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

fn address_schema() -> Schema {
    let mut fields = BTreeMap::new();
    fields.insert(
        "country".to_string(),
        (Schema::Str { min_length: Some(2), max_length: Some(2), pattern: None, format: None, enum_values: None, nullable: false }, true),
    );
    fields.insert(
        "zip".to_string(),
        (Schema::Str { min_length: None, max_length: None, pattern: Some(r"\d{5}".to_string()), format: None, enum_values: None, nullable: true }, false),
    );
    Schema::Object { fields, reject_unknown_fields: true, nullable: false }
}

#[test]
fn a_fully_valid_object_passes() {
    let value = json!({ "country": "US", "zip": "94107" });
    assert!(validate(&value, &address_schema()).is_ok());
}

#[test]
fn a_missing_required_field_fails_with_a_qualified_path() {
    let value = json!({ "zip": "94107" });
    let err = validate(&value, &address_schema()).expect_err("country is required");
    assert_eq!(err.path, "$.country");
}

#[test]
fn an_unknown_field_fails_when_unknown_fields_are_rejected() {
    let value = json!({ "country": "US", "extra": true });
    assert!(validate(&value, &address_schema()).is_err());
}

#[test]
fn a_pattern_violation_is_reported_at_the_field_path() {
    let value = json!({ "country": "US", "zip": "not-a-zip" });
    let err = validate(&value, &address_schema()).expect_err("pattern mismatch");
    assert_eq!(err.path, "$.zip");
}

#[test]
fn nullable_optional_field_accepts_explicit_null() {
    let value = json!({ "country": "US", "zip": null });
    assert!(validate(&value, &address_schema()).is_ok());
}

#[test]
fn array_schema_enforces_bounds_and_uniqueness() {
    let schema = Schema::Array {
        element: Box::new(Schema::Integer { minimum: Some(0), maximum: None, enum_values: None, nullable: false }),
        min_items: Some(1),
        max_items: Some(3),
        unique_items: true,
        nullable: false,
    };
    assert!(validate(&json!([1, 2]), &schema).is_ok());
    assert!(validate(&json!([]), &schema).is_err(), "below min_items");
    assert!(validate(&json!([1, 2, 3, 4]), &schema).is_err(), "above max_items");
    assert!(validate(&json!([1, 1]), &schema).is_err(), "duplicate elements");
}

#[test]
fn enum_schema_compares_by_json_equality_across_types() {
    let schema = Schema::Enum {
        values: BTreeSet::from([EnumConstant::Str("GOLD".to_string()), EnumConstant::Integer(3)]),
        nullable: false,
    };
    assert!(validate(&json!("GOLD"), &schema).is_ok());
    assert!(validate(&json!(3), &schema).is_ok());
    assert!(validate(&json!("SILVER"), &schema).is_err());
}

#[test]
fn nested_object_failures_report_the_full_dotted_path() {
    let mut inner_fields = BTreeMap::new();
    inner_fields.insert("country".to_string(), (Schema::Str { min_length: None, max_length: Some(2), pattern: None, format: None, enum_values: None, nullable: false }, true));
    let mut outer_fields = BTreeMap::new();
    outer_fields.insert("address".to_string(), (Schema::Object { fields: inner_fields, reject_unknown_fields: false, nullable: false }, true));
    let schema = Schema::Object { fields: outer_fields, reject_unknown_fields: false, nullable: false };

    let value = json!({ "address": { "country": "USA" } });
    let err = validate(&value, &schema).expect_err("country too long");
    assert_eq!(err.path, "$.address.country");
}
