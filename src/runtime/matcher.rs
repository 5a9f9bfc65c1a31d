// konditional-core/src/runtime/matcher.rs
// ============================================================================
// Module: Konditional Rule Matcher
// Description: Tests a rule's targeting predicates against a context.
// Purpose: Decide, per candidate rule, whether every present criterion
//          matches (AND semantics, spec.md §4.3).
// Dependencies: crate::core::{context, rule}, crate::interfaces
// ============================================================================

//! ## Overview
//! `matches` is a pure AND over whichever criteria a rule actually declares;
//! an absent criterion matches everything. The extension predicate, if
//! present, is invoked last and wrapped in [`std::panic::catch_unwind`]: a
//! panicking predicate is treated as non-match and reported through the
//! [`Logger`](crate::interfaces::Logger) hook rather than unwinding into the
//! evaluator (`spec.md` §4.3).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::panic::AssertUnwindSafe;

use crate::core::context::Context;
use crate::core::rule::Rule;
use crate::interfaces::Logger;

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Tests whether every criterion present on `rule` matches `ctx`.
#[must_use]
pub fn matches(rule: &Rule, ctx: &Context, logger: &dyn Logger) -> bool {
    locales_match(rule, ctx) && platforms_match(rule, ctx) && version_matches(rule, ctx) && axes_match(rule, ctx) && extension_matches(rule, ctx, logger)
}

fn locales_match(rule: &Rule, ctx: &Context) -> bool {
    match &rule.base.locales {
        None => true,
        Some(allowed) => ctx.locale.as_deref().is_some_and(|locale| allowed.contains(locale)),
    }
}

fn platforms_match(rule: &Rule, ctx: &Context) -> bool {
    match &rule.base.platforms {
        None => true,
        Some(allowed) => ctx.platform.as_deref().is_some_and(|platform| allowed.contains(platform)),
    }
}

fn version_matches(rule: &Rule, ctx: &Context) -> bool {
    match &rule.base.version_range {
        None => true,
        Some(range) => ctx.app_version.is_some_and(|version| range.contains(version)),
    }
}

fn axes_match(rule: &Rule, ctx: &Context) -> bool {
    let Some(constraints) = &rule.base.axis_constraints else {
        return true;
    };
    constraints.iter().all(|(axis, allowed)| ctx.axis_values.get(axis).is_some_and(|value| allowed.contains(value)))
}

#[allow(
    clippy::panic_in_result_fn,
    reason = "catch_unwind intentionally traps a panicking extension predicate; it never propagates"
)]
fn extension_matches(rule: &Rule, ctx: &Context, logger: &dyn Logger) -> bool {
    let Some(extension) = &rule.extension else {
        return true;
    };
    match std::panic::catch_unwind(AssertUnwindSafe(|| extension.evaluate(ctx))) {
        Ok(result) => result,
        Err(_) => {
            logger.warn(&|| "extension predicate panicked during rule matching; treating as non-match".to_string(), None);
            false
        }
    }
}
