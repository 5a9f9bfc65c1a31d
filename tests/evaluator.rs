// konditional-core/tests/evaluator.rs
// ============================================================================
// Test: Evaluation order — kill-switch, activation, rule precedence, default
// Covers: spec.md §4.4, §8 invariants 1, 2, 6, 7; scenarios S2, S3, S6, S7
// ============================================================================
//! Evaluation order: kill-switch, activation, rule precedence, default.


use konditional_core::runtime::evaluator::evaluate;
use konditional_core::BaseCriteria;
use konditional_core::Context;
use konditional_core::EvaluationDecision;
use konditional_core::FeatureDefinition;
use konditional_core::FeatureValue;
use konditional_core::RampUp;
use konditional_core::Rule;
use konditional_core::StableId;
use konditional_core::interfaces::NoopLogger;
use std::collections::HashSet;

fn logger() -> NoopLogger {
    NoopLogger
}

#[test]
fn scenario_s2_kill_switch_overrides_everything_else() {
    let def = FeatureDefinition::new(FeatureValue::Str("DEFAULT".to_string()))
        .with_rules(vec![Rule::new(FeatureValue::Str("TREATMENT".to_string()), RampUp::all())]);
    let (value, decision) = evaluate(&def, "feature::core::x", &Context::default(), true, &logger());
    assert_eq!(value, FeatureValue::Str("DEFAULT".to_string()));
    assert_eq!(decision, EvaluationDecision::RegistryDisabled);
}

#[test]
fn scenario_s3_inactive_feature_returns_default_even_with_matching_rules() {
    let def = FeatureDefinition::new(FeatureValue::Boolean(false))
        .with_rules(vec![Rule::new(FeatureValue::Boolean(true), RampUp::all())])
        .with_active(false);
    let (value, decision) = evaluate(&def, "feature::core::x", &Context::default(), false, &logger());
    assert_eq!(value, FeatureValue::Boolean(false));
    assert_eq!(decision, EvaluationDecision::Inactive);
}

#[test]
fn scenario_s6_higher_specificity_rule_wins_over_broader_rule() {
    let narrow = BaseCriteria { locales: Some(HashSet::from(["EN_US".to_string()])), platforms: Some(HashSet::from(["IOS".to_string()])), ..BaseCriteria::match_all() };
    let broad = BaseCriteria { platforms: Some(HashSet::from(["IOS".to_string()])), ..BaseCriteria::match_all() };

    let def = FeatureDefinition::new(FeatureValue::Str("DEFAULT".to_string())).with_rules(vec![
        Rule::new(FeatureValue::Str("BROAD".to_string()), RampUp::all()).with_base(broad),
        Rule::new(FeatureValue::Str("NARROW".to_string()), RampUp::all()).with_base(narrow),
    ]);

    let ctx = Context::default().with_platform("IOS").with_locale("EN_US");
    let (value, decision) = evaluate(&def, "feature::core::x", &ctx, false, &logger());
    assert_eq!(value, FeatureValue::Str("NARROW".to_string()));
    assert!(matches!(decision, EvaluationDecision::Rule { matched_index: 1, .. }));
}

#[test]
fn scenario_s7_allowlisted_stable_id_bypasses_a_zero_rollout() {
    let vip = StableId::from_bytes(b"vip-user");
    let rule = Rule::new(FeatureValue::Boolean(true), RampUp::none()).with_allowlist(HashSet::from([vip.clone()]));
    let def = FeatureDefinition::new(FeatureValue::Boolean(false)).with_rules(vec![rule]);

    let ctx = Context::with_stable_id(vip);
    let (value, decision) = evaluate(&def, "feature::core::x", &ctx, false, &logger());
    assert_eq!(value, FeatureValue::Boolean(true));
    assert!(matches!(decision, EvaluationDecision::Rule { .. }));
}

#[test]
fn a_rule_that_matches_but_fails_rollout_falls_through_to_the_next_candidate() {
    let first = Rule::new(FeatureValue::Integer(1), RampUp::none());
    let second = Rule::new(FeatureValue::Integer(2), RampUp::all());
    let def = FeatureDefinition::new(FeatureValue::Integer(0)).with_rules(vec![first, second]);

    let ctx = Context::with_stable_id(StableId::from_bytes(b"anyone"));
    let (value, decision) = evaluate(&def, "feature::core::x", &ctx, false, &logger());
    assert_eq!(value, FeatureValue::Integer(2));
    match decision {
        EvaluationDecision::Rule { matched_index, skipped_by_rollout_index, .. } => {
            assert_eq!(matched_index, 1);
            assert_eq!(skipped_by_rollout_index, Some(0));
        }
        other => panic!("expected a Rule decision, got {other:?}"),
    }
}

#[test]
fn no_matching_rule_falls_back_to_the_declared_default() {
    let def = FeatureDefinition::new(FeatureValue::Str("DEFAULT".to_string()))
        .with_rules(vec![Rule::new(FeatureValue::Str("X".to_string()), RampUp::none())]);
    let (value, decision) = evaluate(&def, "feature::core::x", &Context::default(), false, &logger());
    assert_eq!(value, FeatureValue::Str("DEFAULT".to_string()));
    assert!(matches!(decision, EvaluationDecision::Default { .. }));
}

#[test]
fn tie_breaking_between_equal_specificity_rules_is_lexicographic_by_note() {
    let def = FeatureDefinition::new(FeatureValue::Str("DEFAULT".to_string())).with_rules(vec![
        Rule::new(FeatureValue::Str("Z".to_string()), RampUp::all()).with_note("zz-later"),
        Rule::new(FeatureValue::Str("A".to_string()), RampUp::all()).with_note("aa-earlier"),
    ]);
    let (value, _) = evaluate(&def, "feature::core::x", &Context::default(), false, &logger());
    assert_eq!(value, FeatureValue::Str("A".to_string()), "lexicographically smaller note breaks the tie first");
}
