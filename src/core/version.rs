// konditional-core/src/core/version.rs
// ============================================================================
// Module: Konditional Version Ranges
// Description: Semantic version triples and half-open version ranges.
// Purpose: Support the `versionRange` targeting criterion.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! `AppVersion` is a plain `{major, minor, patch}` triple; `VersionRange`
//! models the four wire variants (`UNBOUNDED`, `MIN_BOUND`, `MAX_BOUND`,
//! `MIN_AND_MAX_BOUND`) as one tagged struct rather than four separate
//! types, since the bound fields are simply optional.
//!
//! Per `spec.md` §9 Open Questions, the upper bound is exclusive: `max =
//! 2.0.0` excludes `2.0.0` itself. This is implemented as specified; no
//! inclusive variant is offered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: AppVersion
// ============================================================================

/// A `{major, minor, patch}` application version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
    /// Patch version component.
    pub patch: u32,
}

impl AppVersion {
    /// Builds a version triple.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

// ============================================================================
// SECTION: VersionRange
// ============================================================================

/// Half-open version range: `min <= version < max`, either bound optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    /// Inclusive lower bound, if any.
    pub min: Option<AppVersion>,
    /// Exclusive upper bound, if any.
    pub max: Option<AppVersion>,
}

impl VersionRange {
    /// Builds an unbounded range (matches every version).
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    /// Builds a range bounded below only.
    #[must_use]
    pub const fn min_bound(min: AppVersion) -> Self {
        Self { min: Some(min), max: None }
    }

    /// Builds a range bounded above only.
    #[must_use]
    pub const fn max_bound(max: AppVersion) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// Builds a range bounded on both ends.
    #[must_use]
    pub const fn bounded(min: AppVersion, max: AppVersion) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Returns whether this range is bounded on at least one side.
    ///
    /// Used by `SpecificityCalculator` (`spec.md` §4.2): a bounded range
    /// contributes to specificity, an unbounded one does not.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Tests whether `version` falls within `[min, max)`.
    #[must_use]
    pub fn contains(&self, version: AppVersion) -> bool {
        let above_min = self.min.is_none_or(|min| min <= version);
        let below_max = self.max.is_none_or(|max| version < max);
        above_min && below_max
    }
}
