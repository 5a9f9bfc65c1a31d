// konditional-core/tests/matcher.rs
// ============================================================================
// Test: Rule targeting predicate matching
// Covers: spec.md §4.3, §8 invariant 5
// ============================================================================
//! Rule targeting predicate matching.


use konditional_core::runtime::matcher::matches;
use konditional_core::AppVersion;
use konditional_core::AxisId;
use konditional_core::AxisValueId;
use konditional_core::BaseCriteria;
use konditional_core::Context;
use konditional_core::ExtensionPredicate;
use konditional_core::FeatureValue;
use konditional_core::RampUp;
use konditional_core::Rule;
use konditional_core::VersionRange;
use konditional_core::interfaces::NoopLogger;
use std::collections::HashMap;
use std::collections::HashSet;

fn logger() -> NoopLogger {
    NoopLogger
}

#[test]
fn every_present_criterion_must_match_simultaneously() {
    let base = BaseCriteria {
        locales: Some(HashSet::from(["EN_US".to_string()])),
        platforms: Some(HashSet::from(["IOS".to_string()])),
        version_range: Some(VersionRange::min_bound(AppVersion::new(2, 0, 0))),
        axis_constraints: None,
    };
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all()).with_base(base);

    let full_match = Context::default().with_locale("EN_US").with_platform("IOS").with_app_version(AppVersion::new(2, 1, 0));
    assert!(matches(&rule, &full_match, &logger()));

    let wrong_version = Context::default().with_locale("EN_US").with_platform("IOS").with_app_version(AppVersion::new(1, 9, 0));
    assert!(!matches(&rule, &wrong_version, &logger()));

    let missing_version = Context::default().with_locale("EN_US").with_platform("IOS");
    assert!(!matches(&rule, &missing_version, &logger()), "an absent field required by the rule must not match");
}

#[test]
fn axis_constraints_require_every_listed_axis_to_be_present_and_allowed() {
    let mut axes = HashMap::new();
    axes.insert(AxisId::new("plan"), HashSet::from([AxisValueId::new("pro"), AxisValueId::new("enterprise")]));
    axes.insert(AxisId::new("region"), HashSet::from([AxisValueId::new("us")]));
    let base = BaseCriteria { axis_constraints: Some(axes), ..BaseCriteria::match_all() };
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all()).with_base(base);

    let both_present = Context::default()
        .with_axis_value(AxisId::new("plan"), AxisValueId::new("pro"))
        .with_axis_value(AxisId::new("region"), AxisValueId::new("us"));
    assert!(matches(&rule, &both_present, &logger()));

    let only_one_present = Context::default().with_axis_value(AxisId::new("plan"), AxisValueId::new("pro"));
    assert!(!matches(&rule, &only_one_present, &logger()));

    let wrong_value = Context::default()
        .with_axis_value(AxisId::new("plan"), AxisValueId::new("free"))
        .with_axis_value(AxisId::new("region"), AxisValueId::new("us"));
    assert!(!matches(&rule, &wrong_value, &logger()));
}

#[test]
fn an_empty_base_criteria_matches_an_empty_context() {
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all());
    assert!(matches(&rule, &Context::default(), &logger()));
}

#[test]
fn extension_predicate_is_evaluated_after_base_criteria_pass() {
    let base = BaseCriteria { platforms: Some(HashSet::from(["IOS".to_string()])), ..BaseCriteria::match_all() };
    let extension = ExtensionPredicate::new(|ctx| ctx.locale.as_deref() == Some("EN_US"));
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all()).with_base(base).with_extension(extension);

    let ios_en = Context::default().with_platform("IOS").with_locale("EN_US");
    assert!(matches(&rule, &ios_en, &logger()));

    let ios_fr = Context::default().with_platform("IOS").with_locale("FR_FR");
    assert!(!matches(&rule, &ios_fr, &logger()));

    let android_en = Context::default().with_platform("ANDROID").with_locale("EN_US");
    assert!(!matches(&rule, &android_en, &logger()), "base criteria must be checked even when the extension would pass");
}

#[test]
fn a_panicking_extension_predicate_never_unwinds_into_the_caller() {
    let extension = ExtensionPredicate::new(|_ctx| panic!("simulated targeting bug"));
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all()).with_extension(extension);
    assert!(!matches(&rule, &Context::default(), &logger()));
}
