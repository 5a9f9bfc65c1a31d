// konditional-core/src/core/context.rs
// ============================================================================
// Module: Konditional Context
// Description: Runtime record supplying the capabilities rules may inspect.
// Purpose: Carry per-evaluation targeting inputs without any lifecycle beyond the call.
// Dependencies: crate::core::identifiers, crate::core::version
// ============================================================================

//! ## Overview
//! A `Context` is constructed fresh for each `evaluate` call. Only
//! `stable_id` is required; every other field is optional and an absent
//! field simply means the corresponding rule criterion can never match
//! (`RuleMatcher`, `spec.md` §4.3).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use crate::core::identifiers::AxisId;
use crate::core::identifiers::AxisValueId;
use crate::core::identifiers::StableId;
use crate::core::version::AppVersion;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Runtime inputs available to rule matching and bucketing for one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Stable identifier driving deterministic bucketing. Required for
    /// bucketing purposes, but structurally optional: a missing id maps
    /// deterministically to the maximum bucket (`spec.md` §3, §9).
    pub stable_id: Option<StableId>,
    /// Locale, e.g. `"EN_US"`.
    pub locale: Option<String>,
    /// Platform, e.g. `"IOS"`.
    pub platform: Option<String>,
    /// Caller's application version.
    pub app_version: Option<AppVersion>,
    /// Custom targeting axis values supplied by the caller.
    pub axis_values: HashMap<AxisId, AxisValueId>,
}

impl Context {
    /// Builds a context with only a stable id set.
    #[must_use]
    pub fn with_stable_id(stable_id: StableId) -> Self {
        Self { stable_id: Some(stable_id), ..Self::default() }
    }

    /// Builder-style setter for locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Builder-style setter for platform.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Builder-style setter for the application version.
    #[must_use]
    pub const fn with_app_version(mut self, version: AppVersion) -> Self {
        self.app_version = Some(version);
        self
    }

    /// Builder-style inserter for a single axis value.
    #[must_use]
    pub fn with_axis_value(mut self, axis: AxisId, value: AxisValueId) -> Self {
        self.axis_values.insert(axis, value);
        self
    }
}
