// konditional-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Konditional Evaluator
// Description: Orchestrates kill-switch, activation, and rule precedence.
// Purpose: Produce a total, deterministic value and decision for one
//          (feature, context) pair under one configuration (spec.md §4.4).
// Dependencies: crate::{core, runtime::{bucketing, matcher, specificity}}
// ============================================================================

//! ## Overview
//! `evaluate` never fails: every input that could cause a failure (an
//! unregistered feature, a type mismatch) is eliminated upstream by the
//! feature registry and the JSON decode contract. The bucket is computed at
//! most once per call and reused across every candidate rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::configuration::FeatureDefinition;
use crate::core::context::Context;
use crate::core::decision::EvaluationDecision;
use crate::core::rule::Rule;
use crate::core::value::FeatureValue;
use crate::interfaces::Logger;
use crate::runtime::bucketing;
use crate::runtime::matcher;
use crate::runtime::specificity::specificity_of;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates one feature definition against one context.
///
/// Step order follows `spec.md` §4.4 exactly: kill-switch, then activation,
/// then the specificity-ordered rule loop, then the declared default.
#[must_use]
pub fn evaluate(definition: &FeatureDefinition, feature_key: &str, ctx: &Context, kill_switch: bool, logger: &dyn Logger) -> (FeatureValue, EvaluationDecision) {
    if kill_switch {
        return (definition.default_value.clone(), EvaluationDecision::RegistryDisabled);
    }
    if !definition.is_active {
        return (definition.default_value.clone(), EvaluationDecision::Inactive);
    }

    let ordered = ordered_candidates(&definition.rules);
    let mut bucket_cache: Option<u32> = None;
    let mut first_skipped: Option<usize> = None;

    for (original_index, rule) in ordered {
        if !matcher::matches(rule, ctx, logger) {
            continue;
        }

        let bucket = *bucket_cache.get_or_insert_with(|| bucketing::bucket_for(&definition.salt, feature_key, ctx.stable_id.as_ref()));

        let bypassed_by_allowlist = ctx.stable_id.as_ref().is_some_and(|id| rule.allowlist.contains(id));
        if bypassed_by_allowlist || bucketing::in_rollout(rule.ramp_up, bucket) {
            return (
                rule.value.clone(),
                EvaluationDecision::Rule { matched_index: original_index, skipped_by_rollout_index: first_skipped, bucket },
            );
        }

        if first_skipped.is_none() {
            first_skipped = Some(original_index);
        }
    }

    (
        definition.default_value.clone(),
        EvaluationDecision::Default { skipped_by_rollout_index: first_skipped, bucket: bucket_cache },
    )
}

/// Orders `rules` by descending specificity, breaking ties lexicographically
/// by `note` (`None` sorts first). Insertion order is never used as a
/// tie-breaker (`spec.md` §9 Open Question 2).
fn ordered_candidates(rules: &[Rule]) -> Vec<(usize, &Rule)> {
    let mut indexed: Vec<(usize, &Rule)> = rules.iter().enumerate().collect();
    indexed.sort_by(|(_, a), (_, b)| specificity_of(b).cmp(&specificity_of(a)).then_with(|| a.note.cmp(&b.note)));
    indexed
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::core::configuration::FeatureDefinition;
    use crate::core::context::Context;
    use crate::core::decision::EvaluationDecision;
    use crate::core::identifiers::StableId;
    use crate::core::rule::BaseCriteria;
    use crate::core::rule::RampUp;
    use crate::core::rule::Rule;
    use crate::core::value::FeatureValue;
    use crate::interfaces::NoopLogger;
    use std::collections::HashSet;

    fn logger() -> NoopLogger {
        NoopLogger
    }

    #[test]
    fn kill_switch_always_wins() {
        let def = FeatureDefinition::new(FeatureValue::Boolean(false))
            .with_rules(vec![Rule::new(FeatureValue::Boolean(true), RampUp::all())]);
        let (value, decision) = evaluate(&def, "feature::core::darkMode", &Context::default(), true, &logger());
        assert_eq!(value, FeatureValue::Boolean(false));
        assert_eq!(decision, EvaluationDecision::RegistryDisabled);
    }

    #[test]
    fn inactive_definition_returns_default() {
        let def = FeatureDefinition::new(FeatureValue::Boolean(false))
            .with_rules(vec![Rule::new(FeatureValue::Boolean(true), RampUp::all())])
            .with_active(false);
        let (value, decision) = evaluate(&def, "feature::core::darkMode", &Context::default(), false, &logger());
        assert_eq!(value, FeatureValue::Boolean(false));
        assert_eq!(decision, EvaluationDecision::Inactive);
    }

    #[test]
    fn scenario_s6_precedence_prefers_more_specific_rule() {
        let locale_and_platform = BaseCriteria {
            locales: Some(HashSet::from(["EN_US".to_string()])),
            platforms: Some(HashSet::from(["IOS".to_string()])),
            ..BaseCriteria::match_all()
        };
        let platform_only = BaseCriteria { platforms: Some(HashSet::from(["IOS".to_string()])), ..BaseCriteria::match_all() };

        let def = FeatureDefinition::new(FeatureValue::Str("DEFAULT".to_string())).with_rules(vec![
            Rule::new(FeatureValue::Str("B".to_string()), RampUp::all()).with_base(platform_only),
            Rule::new(FeatureValue::Str("A".to_string()), RampUp::all()).with_base(locale_and_platform),
        ]);

        let ios_en_us = Context::default().with_platform("IOS").with_locale("EN_US");
        let (value, _) = evaluate(&def, "feature::checkout::variant", &ios_en_us, false, &logger());
        assert_eq!(value, FeatureValue::Str("A".to_string()));

        let ios_fr_fr = Context::default().with_platform("IOS").with_locale("FR_FR");
        let (value, _) = evaluate(&def, "feature::checkout::variant", &ios_fr_fr, false, &logger());
        assert_eq!(value, FeatureValue::Str("B".to_string()));
    }

    #[test]
    fn scenario_s7_allowlist_bypasses_rollout() {
        let tester = StableId::from_bytes(b"tester");
        let rule = Rule::new(FeatureValue::Boolean(true), RampUp::new(10.0).expect("valid"))
            .with_allowlist(HashSet::from([tester.clone()]));
        let def = FeatureDefinition::new(FeatureValue::Boolean(false)).with_rules(vec![rule]);

        let ctx = Context::with_stable_id(tester);
        let (value, decision) = evaluate(&def, "feature::core::beta", &ctx, false, &logger());
        assert_eq!(value, FeatureValue::Boolean(true));
        assert!(matches!(decision, EvaluationDecision::Rule { .. }));
    }

    #[test]
    fn bucket_is_computed_at_most_once_per_call() {
        let rules = vec![
            Rule::new(FeatureValue::Integer(1), RampUp::none()),
            Rule::new(FeatureValue::Integer(2), RampUp::none()),
        ];
        let def = FeatureDefinition::new(FeatureValue::Integer(0)).with_rules(rules);
        let ctx = Context::with_stable_id(StableId::from_bytes(b"anyone"));
        let (value, decision) = evaluate(&def, "feature::core::counter", &ctx, false, &logger());
        assert_eq!(value, FeatureValue::Integer(0));
        match decision {
            EvaluationDecision::Default { skipped_by_rollout_index, bucket } => {
                assert_eq!(skipped_by_rollout_index, Some(0));
                assert!(bucket.is_some());
            }
            other => panic!("expected Default decision, got {other:?}"),
        }
    }
}
