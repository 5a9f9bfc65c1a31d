// konditional-core/src/json/mod.rs
// ============================================================================
// Module: Konditional JSON Boundary
// Description: Encode/decode of snapshots and patches, plus a loading adapter.
// Purpose: Be the single crossing point between untrusted wire bytes and
//          validated in-memory types (spec.md §4.6, §6).
// Dependencies: crate::{core, runtime}, serde_json
// ============================================================================

//! ## Overview
//! [`codec`] is pure: it parses and validates, never touching a namespace.
//! [`loader`] is the thin, side-effecting wrapper that applications call to
//! push a decoded snapshot or patch into a
//! [`crate::runtime::namespace::NamespaceRegistry`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod codec;
pub mod loader;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codec::DecodeOptions;
pub use codec::apply_patch_json;
pub use codec::decode;
pub use codec::decode_patch;
pub use codec::encode;
pub use codec::encode_patch;
pub use loader::SnapshotLoader;
