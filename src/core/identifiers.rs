// konditional-core/src/core/identifiers.rs
// ============================================================================
// Module: Konditional Identifiers
// Description: Stable, opaque identifiers used by the evaluation core.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque newtypes over `String`. Validation beyond "is this
//! the right shape of string" (hex decoding, `::`-free segments) happens at
//! construction; once built, an identifier is immutable and carries no
//! further invariants to check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: StableId
// ============================================================================

/// Hex-encoded identifier whose byte form is stable across platforms.
///
/// The sole bucketing input contributed by a runtime [`Context`](crate::core::context::Context).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StableId(String);

/// Errors raised when a stable id does not round-trip through hex decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stable id '{0}' is not valid lowercase hex")]
pub struct StableIdError(String);

impl StableId {
    /// Builds a stable id from an already hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns [`StableIdError`] when `hex` does not round-trip through
    /// `hex_decode -> hex_encode`.
    pub fn from_hex(hex: impl Into<String>) -> Result<Self, StableIdError> {
        let hex = hex.into();
        let decoded = decode_hex(&hex).ok_or_else(|| StableIdError(hex.clone()))?;
        if encode_hex(&decoded) != hex.to_ascii_lowercase() {
            return Err(StableIdError(hex));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Builds a stable id by hex-encoding raw bytes (for example a user id).
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(encode_hex(bytes))
    }

    /// Returns the hex string form.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Decodes a lowercase or uppercase hex string into bytes, or `None` if malformed.
fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if !input.len().is_multiple_of(2) {
        return None;
    }
    let mut out = Vec::with_capacity(input.len() / 2);
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let hi = (bytes[i] as char).to_digit(16)?;
        let lo = (bytes[i + 1] as char).to_digit(16)?;
        out.push(((hi << 4) | lo) as u8);
        i += 2;
    }
    Some(out)
}

/// Encodes bytes as a lowercase hex string.
pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: AxisId / AxisValueId
// ============================================================================

/// Stable, opaque, case-sensitive identifier for a custom targeting dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(String);

impl AxisId {
    /// Creates a new axis identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AxisId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AxisId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Stable, opaque, case-sensitive identifier for one value of an [`AxisId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisValueId(String);

impl AxisValueId {
    /// Creates a new axis value identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AxisValueId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AxisValueId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: FeatureKey / NamespaceSeed
// ============================================================================

/// Logical, human-assigned feature key (the last segment of a [`FeatureId`](crate::core::feature::FeatureId)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureKey(String);

impl FeatureKey {
    /// Creates a new feature key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FeatureKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Namespace seed segment of a [`FeatureId`](crate::core::feature::FeatureId).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceSeed(String);

impl NamespaceSeed {
    /// Creates a new namespace seed.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    /// Returns the seed as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for NamespaceSeed {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::StableId;

    #[test]
    fn stable_id_round_trips_lowercase_hex() {
        let id = StableId::from_hex("757365722d313233").expect("valid hex");
        assert_eq!(id.as_hex(), "757365722d313233");
    }

    #[test]
    fn stable_id_rejects_odd_length() {
        assert!(StableId::from_hex("abc").is_err());
    }

    #[test]
    fn stable_id_from_bytes_matches_scenario_s1() {
        let id = StableId::from_bytes(b"user-123");
        assert_eq!(id.as_hex(), "757365722d313233");
    }
}
