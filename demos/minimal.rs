// konditional-core/demos/minimal.rs
// ============================================================================
// Example: Minimal end-to-end usage
// Description: Declares a feature, loads a JSON snapshot, evaluates it.
// ============================================================================
//! Minimal end-to-end usage: declares a feature, loads a JSON snapshot, evaluates it.

use konditional_core::Context;
use konditional_core::DecodeOptions;
use konditional_core::Feature;
use konditional_core::FeatureId;
use konditional_core::FeatureResolver;
use konditional_core::NamespaceRegistry;
use konditional_core::SnapshotLoader;
use konditional_core::StableId;
use konditional_core::ValueType;

const SNAPSHOT: &str = r#"
{
  "meta": { "version": "2026-08-01", "source": "demo" },
  "flags": [
    {
      "key": "feature::core::darkMode",
      "defaultValue": { "type": "boolean", "value": false },
      "isActive": true,
      "salt": "v1",
      "values": [
        {
          "rule": { "rampUp": 25.0, "note": "beta-ramp" },
          "value": { "type": "boolean", "value": true }
        }
      ]
    }
  ]
}
"#;

#[allow(clippy::print_stdout, reason = "a runnable example is expected to print its result")]
fn main() {
    let resolver = FeatureResolver::new();
    let dark_mode = Feature::new(FeatureId::new("core", "darkMode"), ValueType::Boolean);
    resolver.register(dark_mode.clone()).expect("darkMode registered exactly once");

    let registry = NamespaceRegistry::new("demo");
    let loader = SnapshotLoader::new(&resolver).with_options(DecodeOptions::strict());
    loader.load_snapshot(&registry, SNAPSHOT).expect("demo snapshot is well-formed");

    let ctx = Context::with_stable_id(StableId::from_bytes(b"user-123"));
    let result = registry.evaluate(&dark_mode, &ctx);
    println!("darkMode for user-123: {:?} ({:?})", result.value, result.decision);
}
