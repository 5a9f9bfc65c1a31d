// konditional-core/src/runtime/specificity.rs
// ============================================================================
// Module: Konditional Specificity Calculator
// Description: Scores a rule's targeting breadth for precedence ordering.
// Purpose: Give the Evaluator a total order over candidate rules.
// Dependencies: crate::core::rule
// ============================================================================

//! ## Overview
//! `specificity_of` implements the exact formula from `spec.md` §4.2: one
//! point each for non-empty locales, non-empty platforms, a bounded version
//! range, one point per axis constraint, plus the extension predicate's own
//! contribution. Ramp-up is deliberately excluded — it is a post-match gate,
//! not a targeting criterion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::rule::ExtensionPredicate;
use crate::core::rule::Rule;

// ============================================================================
// SECTION: Specificity
// ============================================================================

/// Computes a rule's specificity score (`spec.md` §4.2).
#[must_use]
pub fn specificity_of(rule: &Rule) -> u32 {
    let mut score = 0;
    if rule.base.locales.as_ref().is_some_and(|set| !set.is_empty()) {
        score += 1;
    }
    if rule.base.platforms.as_ref().is_some_and(|set| !set.is_empty()) {
        score += 1;
    }
    if rule.base.version_range.is_some_and(|range| range.is_bounded()) {
        score += 1;
    }
    if let Some(axes) = &rule.base.axis_constraints {
        score += u32::try_from(axes.len()).unwrap_or(u32::MAX);
    }
    score += rule.extension.as_ref().map_or(0, ExtensionPredicate::specificity);
    score
}

#[cfg(test)]
mod tests {
    use super::specificity_of;
    use crate::core::rule::BaseCriteria;
    use crate::core::rule::RampUp;
    use crate::core::rule::Rule;
    use crate::core::value::FeatureValue;
    use std::collections::HashMap;
    use std::collections::HashSet;

    #[test]
    fn match_all_rule_has_zero_specificity() {
        let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all());
        assert_eq!(specificity_of(&rule), 0);
    }

    #[test]
    fn locales_and_platforms_each_contribute_one() {
        let base = BaseCriteria {
            locales: Some(HashSet::from(["EN_US".to_string()])),
            platforms: Some(HashSet::from(["IOS".to_string()])),
            version_range: None,
            axis_constraints: None,
        };
        let rule = Rule::new(FeatureValue::Str("A".to_string()), RampUp::all()).with_base(base);
        assert_eq!(specificity_of(&rule), 2);
    }

    #[test]
    fn axis_constraints_count_individually() {
        let mut axes = HashMap::new();
        axes.insert("plan".into(), HashSet::from(["pro".into()]));
        axes.insert("region".into(), HashSet::from(["us".into()]));
        let base = BaseCriteria { axis_constraints: Some(axes), ..BaseCriteria::match_all() };
        let rule = Rule::new(FeatureValue::Boolean(true), RampUp::all()).with_base(base);
        assert_eq!(specificity_of(&rule), 2);
    }
}
