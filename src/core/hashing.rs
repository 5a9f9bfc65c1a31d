// konditional-core/src/core/hashing.rs
// ============================================================================
// Module: Konditional Hashing
// Description: SHA-256 digest helpers shared by bucketing and identifiers.
// Purpose: Provide a single, auditable hashing primitive for the core.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! The core hashes exactly one kind of input: the delimited bucketing string
//! `"{salt}:{feature_key}:{stable_id_hex}"`. This module owns the SHA-256
//! call site so [`crate::runtime::bucketing`] stays free of hashing details.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Digest
// ============================================================================

/// Computes the SHA-256 digest of `input`'s UTF-8 bytes.
#[must_use]
pub fn sha256(input: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
