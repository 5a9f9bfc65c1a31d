// konditional-core/src/runtime/bucketing.rs
// ============================================================================
// Module: Konditional Bucketing Engine
// Description: Deterministic SHA-256 bucket placement and rollout gating.
// Purpose: Give every language port of Konditional bit-identical A/B
//          assignments for the same (stable_id, feature_key, salt) tuple.
// Dependencies: crate::core::{hashing, identifiers, rule}
// ============================================================================

//! ## Overview
//! [`bucket_for`] composes `"{salt}:{feature_key}:{stable_id_hex}"`, hashes
//! it with SHA-256, and reduces the first four big-endian bytes modulo
//! `10_000` (`spec.md` §4.1). A missing stable id maps to bucket `9999` so
//! every rollout under 100% excludes anonymous callers (`spec.md` §9).
//! [`in_rollout`] applies the `RampUp` short-circuits before falling back to
//! the threshold comparison.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::hashing::sha256;
use crate::core::identifiers::StableId;
use crate::core::rule::RampUp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of discrete buckets. Every bucket is in `[0, BUCKET_SPACE)`.
pub const BUCKET_SPACE: u32 = 10_000;

/// The bucket assigned when a context carries no stable id (`spec.md` §9).
pub const MISSING_STABLE_ID_BUCKET: u32 = 9_999;

// ============================================================================
// SECTION: Bucket Placement
// ============================================================================

/// Computes the deterministic bucket for `(salt, feature_key, stable_id)`.
///
/// Pure: the same three inputs always produce the same bucket, and no two
/// distinct inputs are treated as equivalent. Missing `stable_id` maps to
/// [`MISSING_STABLE_ID_BUCKET`].
#[must_use]
pub fn bucket_for(salt: &str, feature_key: &str, stable_id: Option<&StableId>) -> u32 {
    let Some(stable_id) = stable_id else {
        return MISSING_STABLE_ID_BUCKET;
    };
    let composed = format!("{salt}:{feature_key}:{}", stable_id.as_hex());
    let digest = sha256(&composed);
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    prefix % BUCKET_SPACE
}

// ============================================================================
// SECTION: Rollout Gate
// ============================================================================

/// Tests whether `bucket` falls inside the rollout for `ramp_up`.
///
/// Short-circuits at the extremes so floating-point rounding of the
/// threshold can never exclude a 100% rollout or include a 0% one
/// (`spec.md` §4.1).
#[must_use]
pub fn in_rollout(ramp_up: RampUp, bucket: u32) -> bool {
    if ramp_up.percentage() <= 0.0 {
        return false;
    }
    if ramp_up.percentage() >= 100.0 {
        return true;
    }
    bucket < ramp_up.threshold_basis_points()
}
