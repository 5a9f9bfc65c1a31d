// konditional-core/src/json/codec.rs
// ============================================================================
// Module: Konditional JSON Boundary
// Description: Pure encode/decode of snapshots and patches.
// Purpose: Validate JSON structure and value types against feature
//          declarations, never touching a namespace (spec.md §4.6).
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! `decode`/`decode_patch` walk a parsed [`serde_json::Value`] tree field by
//! field rather than relying on `#[derive(Deserialize)]` for the outer
//! shape, so every failure mode maps to a distinct [`ParseError`] variant
//! with the structured payload `spec.md` §3 calls for (missing key vs.
//! wrong type vs. unknown feature), rather than one opaque serde message.
//! `encode`/`encode_patch` go the other way through small `*Wire` structs
//! that exist only at this boundary — the wire shape is camelCase and flat;
//! the internal types are snake_case and nested differently — so neither
//! direction ever derives `serde` traits directly on `Configuration`,
//! `Rule`, or `FeatureDefinition`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value as Json;

use crate::core::configuration::Configuration;
use crate::core::configuration::FeatureDefinition;
use crate::core::configuration::Metadata;
use crate::core::configuration::Patch;
use crate::core::error::ParseError;
use crate::core::error::ParseResult;
use crate::core::feature::Feature;
use crate::core::feature::FeatureId;
use crate::core::feature::FeatureResolver;
use crate::core::identifiers::AxisId;
use crate::core::identifiers::AxisValueId;
use crate::core::identifiers::StableId;
use crate::core::rule::BaseCriteria;
use crate::core::rule::RampUp;
use crate::core::rule::Rule;
use crate::core::schema;
use crate::core::schema::Schema;
use crate::core::value::FeatureValue;
use crate::core::value::ValueType;
use crate::core::version::AppVersion;
use crate::core::version::VersionRange;

// ============================================================================
// SECTION: DecodeOptions
// ============================================================================

/// Controls how `decode`/`decode_patch` handle keys they do not recognize.
pub struct DecodeOptions {
    /// When `true` (the default), an unrecognized key at any level is an
    /// [`ParseError::InvalidSnapshot`]. When `false`, unrecognized keys are
    /// skipped and reported through `on_unknown_key`.
    pub strict: bool,
    on_unknown_key: Box<dyn Fn(String) + Send + Sync>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { strict: true, on_unknown_key: Box::new(|_path| {}) }
    }
}

impl DecodeOptions {
    /// The default, strict mode: any unknown key fails the decode.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Forward-compatible mode: unknown keys are skipped and reported
    /// through `warn_cb`, which receives a dotted path to the offending
    /// key (`spec.md` §4.6 option d).
    #[must_use]
    pub fn skip_unknown_keys(warn_cb: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self { strict: false, on_unknown_key: Box::new(warn_cb) }
    }

    fn report_unknown(&self, obj: &Map<String, Json>, known: &[&str], path: &str) -> ParseResult<()> {
        let unknown: Vec<&str> = obj.keys().map(String::as_str).filter(|k| !known.contains(k)).collect();
        if unknown.is_empty() {
            return Ok(());
        }
        if self.strict {
            return Err(ParseError::InvalidSnapshot { reason: format!("unknown key(s) at {path}: {}", unknown.join(", ")) });
        }
        for key in unknown {
            (self.on_unknown_key)(format!("{path}.{key}"));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

#[derive(Serialize)]
struct WireValue {
    #[serde(rename = "type")]
    type_tag: String,
    value: Json,
}

// ============================================================================
// SECTION: Decode — Snapshot
// ============================================================================

/// Decodes a snapshot JSON document into a [`Configuration`].
///
/// Validates both JSON structure and per-feature value types against
/// declarations resolved via `resolver`. Never mutates any namespace.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; there is no partial
/// success.
pub fn decode(json: &str, resolver: &FeatureResolver, options: &DecodeOptions) -> ParseResult<Configuration> {
    let root: Json = serde_json::from_str(json).map_err(|err| ParseError::InvalidJson { reason: err.to_string() })?;
    let obj = as_object(&root, "$")?;
    options.report_unknown(obj, &["meta", "flags"], "$")?;

    let metadata = match obj.get("meta") {
        None | Some(Json::Null) => Metadata::default(),
        Some(meta_val) => decode_meta(meta_val, options)?,
    };

    let flags_val = obj.get("flags").ok_or_else(|| ParseError::MissingKey("flags".to_string()))?;
    let flags = flags_val.as_array().ok_or_else(|| ParseError::InvalidSnapshot { reason: "flags must be an array".to_string() })?;

    let mut config = Configuration::new().with_metadata(metadata);
    for (index, flag_val) in flags.iter().enumerate() {
        let (id, definition) = decode_flag(flag_val, resolver, options, &format!("$.flags[{index}]"))?;
        config.insert(id, definition);
    }
    Ok(config)
}

fn decode_meta(meta_val: &Json, options: &DecodeOptions) -> ParseResult<Metadata> {
    let obj = as_object(meta_val, "$.meta")?;
    options.report_unknown(obj, &["version", "timestamp", "source"], "$.meta")?;
    let version = obj.get("version").and_then(Json::as_str).map(ToString::to_string);
    let timestamp = obj.get("timestamp").and_then(Json::as_i64);
    let source = obj.get("source").and_then(Json::as_str).map(ToString::to_string);
    Ok(Metadata { version, timestamp, source })
}

fn decode_flag(flag_val: &Json, resolver: &FeatureResolver, options: &DecodeOptions, path: &str) -> ParseResult<(FeatureId, FeatureDefinition)> {
    let obj = as_object(flag_val, path)?;
    options.report_unknown(obj, &["key", "defaultValue", "isActive", "salt", "values"], path)?;

    let key_str = obj.get("key").and_then(Json::as_str).ok_or_else(|| ParseError::MissingKey(format!("{path}.key")))?;
    let id = FeatureId::parse(key_str).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?;
    let feature: Feature = resolver.resolve(&id).ok_or_else(|| ParseError::FeatureNotFound(id.to_string()))?;

    let default_raw = obj.get("defaultValue").ok_or_else(|| ParseError::MissingKey(format!("{path}.defaultValue")))?;
    let default_value = decode_value(default_raw, feature.value_type, feature.schema.as_ref())?;

    let is_active = obj.get("isActive").and_then(Json::as_bool).ok_or_else(|| ParseError::MissingKey(format!("{path}.isActive")))?;

    let salt = match obj.get("salt") {
        None => "v1".to_string(),
        Some(Json::String(s)) if !s.is_empty() => s.clone(),
        Some(Json::String(_)) => return Err(ParseError::InvalidSnapshot { reason: format!("{path}.salt must be non-empty") }),
        Some(_) => return Err(ParseError::InvalidType { expected: "string".to_string(), actual: "other".to_string() }),
    };

    let values = match obj.get("values") {
        None => Vec::new(),
        Some(values_val) => values_val
            .as_array()
            .ok_or_else(|| ParseError::InvalidSnapshot { reason: format!("{path}.values must be an array") })?
            .clone(),
    };

    let mut rules = Vec::with_capacity(values.len());
    for (index, rule_val) in values.iter().enumerate() {
        rules.push(decode_rule(rule_val, feature.value_type, feature.schema.as_ref(), options, &format!("{path}.values[{index}]"))?);
    }

    let definition = FeatureDefinition { default_value, rules, salt, is_active };
    definition.validate(feature.value_type).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?;

    Ok((id, definition))
}

fn decode_rule(rule_val: &Json, declared_type: ValueType, schema: Option<&Schema>, options: &DecodeOptions, path: &str) -> ParseResult<Rule> {
    let obj = as_object(rule_val, path)?;
    options.report_unknown(obj, &["rule", "value"], path)?;

    let rule_meta = obj.get("rule").ok_or_else(|| ParseError::MissingKey(format!("{path}.rule")))?;
    let value_raw = obj.get("value").ok_or_else(|| ParseError::MissingKey(format!("{path}.value")))?;
    let value = decode_value(value_raw, declared_type, schema)?;

    let meta_obj = as_object(rule_meta, &format!("{path}.rule"))?;
    options.report_unknown(meta_obj, &["rampUp", "note", "allowlist", "baseEvaluable"], &format!("{path}.rule"))?;

    let ramp_up_raw = meta_obj.get("rampUp").and_then(Json::as_f64).ok_or_else(|| ParseError::MissingKey(format!("{path}.rule.rampUp")))?;
    let ramp_up = RampUp::new(ramp_up_raw).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?;

    let note = meta_obj.get("note").and_then(Json::as_str).map(ToString::to_string);

    let allowlist = match meta_obj.get("allowlist") {
        None => HashSet::new(),
        Some(list_val) => {
            let items = list_val.as_array().ok_or_else(|| ParseError::InvalidSnapshot { reason: format!("{path}.rule.allowlist must be an array") })?;
            let mut set = HashSet::with_capacity(items.len());
            for item in items {
                let hex = item.as_str().ok_or_else(|| ParseError::InvalidType { expected: "string".to_string(), actual: "other".to_string() })?;
                set.insert(StableId::from_hex(hex).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?);
            }
            set
        }
    };

    let base = match meta_obj.get("baseEvaluable") {
        None | Some(Json::Null) => BaseCriteria::match_all(),
        Some(base_val) => decode_base(base_val, options, &format!("{path}.rule.baseEvaluable"))?,
    };

    Ok(Rule { value, ramp_up, allowlist, base, extension: None, note })
}

fn decode_base(base_val: &Json, options: &DecodeOptions, path: &str) -> ParseResult<BaseCriteria> {
    let obj = as_object(base_val, path)?;
    options.report_unknown(obj, &["locales", "platforms", "versionRange", "axes"], path)?;

    let locales = obj.get("locales").map(|v| decode_string_set(v, &format!("{path}.locales"))).transpose()?;
    let platforms = obj.get("platforms").map(|v| decode_string_set(v, &format!("{path}.platforms"))).transpose()?;
    let version_range = obj.get("versionRange").map(|v| decode_version_range(v, options, &format!("{path}.versionRange"))).transpose()?;
    let axis_constraints = obj.get("axes").map(|v| decode_axes(v, &format!("{path}.axes"))).transpose()?;

    Ok(BaseCriteria { locales, platforms, version_range, axis_constraints })
}

fn decode_string_set(value: &Json, path: &str) -> ParseResult<HashSet<String>> {
    let items = value.as_array().ok_or_else(|| ParseError::InvalidSnapshot { reason: format!("{path} must be an array") })?;
    items
        .iter()
        .map(|item| item.as_str().map(ToString::to_string).ok_or_else(|| ParseError::InvalidType { expected: "string".to_string(), actual: "other".to_string() }))
        .collect()
}

fn decode_axes(value: &Json, path: &str) -> ParseResult<HashMap<AxisId, HashSet<AxisValueId>>> {
    let obj = as_object(value, path)?;
    let mut axes = HashMap::with_capacity(obj.len());
    for (axis, values_val) in obj {
        let values = decode_string_set(values_val, &format!("{path}.{axis}"))?;
        axes.insert(AxisId::new(axis.clone()), values.into_iter().map(AxisValueId::new).collect());
    }
    Ok(axes)
}

fn decode_version_range(value: &Json, options: &DecodeOptions, path: &str) -> ParseResult<VersionRange> {
    let obj = as_object(value, path)?;
    options.report_unknown(obj, &["type", "min", "max"], path)?;

    let kind = obj.get("type").and_then(Json::as_str).ok_or_else(|| ParseError::MissingKey(format!("{path}.type")))?;
    let min = obj.get("min").map(|v| decode_app_version(v, &format!("{path}.min"))).transpose()?;
    let max = obj.get("max").map(|v| decode_app_version(v, &format!("{path}.max"))).transpose()?;

    match kind {
        "UNBOUNDED" => Ok(VersionRange::unbounded()),
        "MIN_BOUND" => Ok(VersionRange::min_bound(min.ok_or_else(|| ParseError::MissingKey(format!("{path}.min")))?)),
        "MAX_BOUND" => Ok(VersionRange::max_bound(max.ok_or_else(|| ParseError::MissingKey(format!("{path}.max")))?)),
        "MIN_AND_MAX_BOUND" => Ok(VersionRange::bounded(
            min.ok_or_else(|| ParseError::MissingKey(format!("{path}.min")))?,
            max.ok_or_else(|| ParseError::MissingKey(format!("{path}.max")))?,
        )),
        other => Err(ParseError::InvalidSnapshot { reason: format!("{path}.type: unknown version range kind '{other}'") }),
    }
}

fn decode_app_version(value: &Json, path: &str) -> ParseResult<AppVersion> {
    let obj = as_object(value, path)?;
    let component = |name: &str| -> ParseResult<u32> {
        let raw = obj.get(name).and_then(Json::as_u64).ok_or_else(|| ParseError::MissingKey(format!("{path}.{name}")))?;
        u32::try_from(raw).map_err(|_| ParseError::InvalidSnapshot { reason: format!("{path}.{name} exceeds u32 range") })
    };
    Ok(AppVersion::new(component("major")?, component("minor")?, component("patch")?))
}

fn decode_value(value_val: &Json, declared_type: ValueType, schema: Option<&Schema>) -> ParseResult<FeatureValue> {
    let obj = value_val.as_object().ok_or_else(|| ParseError::InvalidSnapshot { reason: "value entry is not an object".to_string() })?;
    let type_tag = obj.get("type").and_then(Json::as_str).ok_or_else(|| ParseError::MissingKey("value.type".to_string()))?;
    let raw = obj.get("value").ok_or_else(|| ParseError::MissingKey("value.value".to_string()))?;

    let wire_type = match type_tag {
        "boolean" => ValueType::Boolean,
        "string" => ValueType::Str,
        "int" | "long" => ValueType::Integer,
        "double" => ValueType::Double,
        "enum" => ValueType::Enum,
        "json" => ValueType::Custom,
        other => return Err(ParseError::InvalidSnapshot { reason: format!("unknown value type discriminant '{other}'") }),
    };

    if wire_type != declared_type {
        return Err(ParseError::InvalidType { expected: declared_type.wire_name().to_string(), actual: type_tag.to_string() });
    }

    match declared_type {
        ValueType::Boolean => raw.as_bool().map(FeatureValue::Boolean).ok_or_else(|| not_a(raw, "boolean")),
        ValueType::Str => raw.as_str().map(|s| FeatureValue::Str(s.to_string())).ok_or_else(|| not_a(raw, "string")),
        ValueType::Integer => raw.as_i64().map(FeatureValue::Integer).ok_or_else(|| not_a(raw, "integer")),
        ValueType::Double => raw.as_f64().map(FeatureValue::Double).ok_or_else(|| not_a(raw, "double")),
        ValueType::Enum => raw.as_str().map(|s| FeatureValue::Enum(s.to_string())).ok_or_else(|| not_a(raw, "string")),
        ValueType::Custom => {
            let schema = schema.ok_or_else(|| ParseError::InvalidSnapshot { reason: "custom feature has no declared schema".to_string() })?;
            schema::validate(raw, schema).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?;
            Ok(FeatureValue::Custom(raw.clone()))
        }
    }
}

fn not_a(value: &Json, expected: &str) -> ParseError {
    ParseError::InvalidSnapshot { reason: format!("value '{value}' is not a {expected}") }
}

fn as_object<'a>(value: &'a Json, path: &str) -> ParseResult<&'a Map<String, Json>> {
    value.as_object().ok_or_else(|| ParseError::InvalidSnapshot { reason: format!("{path} must be an object") })
}

// ============================================================================
// SECTION: Decode — Patch
// ============================================================================

/// Decodes a patch JSON document into a [`Patch`].
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn decode_patch(json: &str, resolver: &FeatureResolver, options: &DecodeOptions) -> ParseResult<Patch> {
    let root: Json = serde_json::from_str(json).map_err(|err| ParseError::InvalidJson { reason: err.to_string() })?;
    let obj = as_object(&root, "$")?;
    options.report_unknown(obj, &["flags", "removeKeys"], "$")?;

    let mut patch = Patch::new();

    if let Some(flags_val) = obj.get("flags") {
        let flags = flags_val.as_array().ok_or_else(|| ParseError::InvalidSnapshot { reason: "flags must be an array".to_string() })?;
        for (index, flag_val) in flags.iter().enumerate() {
            let (id, definition) = decode_flag(flag_val, resolver, options, &format!("$.flags[{index}]"))?;
            patch.added.insert(id, definition);
        }
    }

    if let Some(remove_val) = obj.get("removeKeys") {
        let keys = remove_val.as_array().ok_or_else(|| ParseError::InvalidSnapshot { reason: "removeKeys must be an array".to_string() })?;
        for key_val in keys {
            let key_str = key_val.as_str().ok_or_else(|| ParseError::InvalidType { expected: "string".to_string(), actual: "other".to_string() })?;
            let id = FeatureId::parse(key_str).map_err(|err| ParseError::InvalidSnapshot { reason: err.to_string() })?;
            patch.removed.insert(id);
        }
    }

    Ok(patch)
}

/// Decodes a patch JSON document and applies it to `current`.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; `current` is never
/// consulted during decode, only during `apply`.
pub fn apply_patch_json(current: &Configuration, json: &str, resolver: &FeatureResolver, options: &DecodeOptions) -> ParseResult<Configuration> {
    let patch = decode_patch(json, resolver, options)?;
    Ok(patch.apply(current))
}

// ============================================================================
// SECTION: Encode
// ============================================================================

/// Serializes a snapshot to the stable JSON shape from `spec.md` §6.
#[must_use]
pub fn encode(config: &Configuration) -> String {
    let mut flags: Vec<(String, Json)> = config.iter().map(|(id, def)| (id.to_string(), encode_flag(id, def))).collect();
    flags.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut root = Map::new();
    if let Some(meta) = encode_meta(&config.metadata) {
        root.insert("meta".to_string(), meta);
    }
    root.insert("flags".to_string(), Json::Array(flags.into_iter().map(|(_, value)| value).collect()));
    serde_json::to_string(&Json::Object(root)).unwrap_or_default()
}

/// Serializes a patch to the stable JSON shape from `spec.md` §6.
#[must_use]
pub fn encode_patch(patch: &Patch) -> String {
    let mut flags: Vec<(String, Json)> = patch.added.iter().map(|(id, def)| (id.to_string(), encode_flag(id, def))).collect();
    flags.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut remove_keys: Vec<String> = patch.removed.iter().map(ToString::to_string).collect();
    remove_keys.sort();

    let mut root = Map::new();
    root.insert("flags".to_string(), Json::Array(flags.into_iter().map(|(_, value)| value).collect()));
    root.insert("removeKeys".to_string(), Json::Array(remove_keys.into_iter().map(Json::String).collect()));
    serde_json::to_string(&Json::Object(root)).unwrap_or_default()
}

fn encode_meta(metadata: &Metadata) -> Option<Json> {
    if metadata.version.is_none() && metadata.timestamp.is_none() && metadata.source.is_none() {
        return None;
    }
    let mut obj = Map::new();
    if let Some(version) = &metadata.version {
        obj.insert("version".to_string(), Json::String(version.clone()));
    }
    if let Some(timestamp) = metadata.timestamp {
        obj.insert("timestamp".to_string(), Json::Number(timestamp.into()));
    }
    if let Some(source) = &metadata.source {
        obj.insert("source".to_string(), Json::String(source.clone()));
    }
    Some(Json::Object(obj))
}

fn encode_flag(id: &FeatureId, def: &FeatureDefinition) -> Json {
    let mut obj = Map::new();
    obj.insert("key".to_string(), Json::String(id.to_string()));
    obj.insert("defaultValue".to_string(), encode_value(&def.default_value));
    obj.insert("isActive".to_string(), Json::Bool(def.is_active));
    obj.insert("salt".to_string(), Json::String(def.salt.clone()));
    obj.insert("values".to_string(), Json::Array(def.rules.iter().map(encode_rule).collect()));
    Json::Object(obj)
}

fn encode_rule(rule: &Rule) -> Json {
    let mut rule_meta = Map::new();
    rule_meta.insert("rampUp".to_string(), json_number_f64(rule.ramp_up.percentage()));
    if let Some(note) = &rule.note {
        rule_meta.insert("note".to_string(), Json::String(note.clone()));
    }
    let mut allowlist: Vec<String> = rule.allowlist.iter().map(|id| id.as_hex().to_string()).collect();
    allowlist.sort();
    rule_meta.insert("allowlist".to_string(), Json::Array(allowlist.into_iter().map(Json::String).collect()));
    if let Some(base) = encode_base(&rule.base) {
        rule_meta.insert("baseEvaluable".to_string(), base);
    }

    let mut obj = Map::new();
    obj.insert("rule".to_string(), Json::Object(rule_meta));
    obj.insert("value".to_string(), encode_value(&rule.value));
    Json::Object(obj)
}

fn encode_base(base: &BaseCriteria) -> Option<Json> {
    if base.locales.is_none() && base.platforms.is_none() && base.version_range.is_none() && base.axis_constraints.is_none() {
        return None;
    }
    let mut obj = Map::new();
    if let Some(locales) = &base.locales {
        let mut values: Vec<String> = locales.iter().cloned().collect();
        values.sort();
        obj.insert("locales".to_string(), Json::Array(values.into_iter().map(Json::String).collect()));
    }
    if let Some(platforms) = &base.platforms {
        let mut values: Vec<String> = platforms.iter().cloned().collect();
        values.sort();
        obj.insert("platforms".to_string(), Json::Array(values.into_iter().map(Json::String).collect()));
    }
    if let Some(range) = base.version_range {
        obj.insert("versionRange".to_string(), encode_version_range(range));
    }
    if let Some(axes) = &base.axis_constraints {
        let mut axes_obj = Map::new();
        for (axis, values) in axes {
            let mut sorted: Vec<String> = values.iter().map(|v| v.as_str().to_string()).collect();
            sorted.sort();
            axes_obj.insert(axis.as_str().to_string(), Json::Array(sorted.into_iter().map(Json::String).collect()));
        }
        obj.insert("axes".to_string(), Json::Object(axes_obj));
    }
    Some(Json::Object(obj))
}

fn encode_version_range(range: VersionRange) -> Json {
    let kind = match (range.min, range.max) {
        (None, None) => "UNBOUNDED",
        (Some(_), None) => "MIN_BOUND",
        (None, Some(_)) => "MAX_BOUND",
        (Some(_), Some(_)) => "MIN_AND_MAX_BOUND",
    };
    let mut obj = Map::new();
    obj.insert("type".to_string(), Json::String(kind.to_string()));
    if let Some(min) = range.min {
        obj.insert("min".to_string(), encode_app_version(min));
    }
    if let Some(max) = range.max {
        obj.insert("max".to_string(), encode_app_version(max));
    }
    Json::Object(obj)
}

fn encode_app_version(version: AppVersion) -> Json {
    let mut obj = Map::new();
    obj.insert("major".to_string(), Json::Number(version.major.into()));
    obj.insert("minor".to_string(), Json::Number(version.minor.into()));
    obj.insert("patch".to_string(), Json::Number(version.patch.into()));
    Json::Object(obj)
}

fn encode_value(value: &FeatureValue) -> Json {
    let (type_tag, raw) = match value {
        FeatureValue::Boolean(b) => (ValueType::Boolean.wire_name(), Json::Bool(*b)),
        FeatureValue::Str(s) => (ValueType::Str.wire_name(), Json::String(s.clone())),
        FeatureValue::Integer(i) => (ValueType::Integer.wire_name(), Json::Number((*i).into())),
        FeatureValue::Double(d) => (ValueType::Double.wire_name(), json_number_f64(*d)),
        FeatureValue::Enum(s) => (ValueType::Enum.wire_name(), Json::String(s.clone())),
        FeatureValue::Custom(v) => (ValueType::Custom.wire_name(), v.clone()),
    };
    serde_json::to_value(WireValue { type_tag: type_tag.to_string(), value: raw }).unwrap_or(Json::Null)
}

fn json_number_f64(value: f64) -> Json {
    serde_json::Number::from_f64(value).map_or(Json::Null, Json::Number)
}

#[cfg(test)]
mod tests {
    use super::DecodeOptions;
    use super::decode;
    use super::encode;
    use crate::core::configuration::Configuration;
    use crate::core::configuration::FeatureDefinition;
    use crate::core::feature::Feature;
    use crate::core::feature::FeatureId;
    use crate::core::feature::FeatureResolver;
    use crate::core::rule::RampUp;
    use crate::core::rule::Rule;
    use crate::core::value::FeatureValue;
    use crate::core::value::ValueType;

    fn resolver_with(features: Vec<Feature>) -> FeatureResolver {
        let resolver = FeatureResolver::new();
        for feature in features {
            resolver.register(feature).expect("no collision");
        }
        resolver
    }

    #[test]
    fn round_trips_a_builder_configuration() {
        let id = FeatureId::new("core", "darkMode");
        let resolver = resolver_with(vec![Feature::new(id.clone(), ValueType::Boolean)]);

        let def = FeatureDefinition::new(FeatureValue::Boolean(false))
            .with_rules(vec![Rule::new(FeatureValue::Boolean(true), RampUp::new(50.0).expect("valid"))]);
        let mut config = Configuration::new();
        config.insert(id.clone(), def);

        let json = encode(&config);
        let decoded = decode(&json, &resolver, &DecodeOptions::strict()).expect("valid snapshot");
        assert_eq!(decoded.get(&id), config.get(&id));
    }

    #[test]
    fn legacy_value_prefix_and_long_alias_are_accepted() {
        let id = FeatureId::new("core", "counter");
        let resolver = resolver_with(vec![Feature::new(id, ValueType::Integer)]);
        let json = r#"{"flags":[{"key":"value::core::counter","defaultValue":{"type":"long","value":3},"isActive":true,"salt":"v1","values":[]}]}"#;
        let config = decode(json, &resolver, &DecodeOptions::strict()).expect("valid");
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn scenario_s4_type_mismatch_is_rejected() {
        let id = FeatureId::new("core", "darkMode");
        let resolver = resolver_with(vec![Feature::new(id, ValueType::Boolean)]);
        let json = r#"{"flags":[{"key":"feature::core::darkMode","defaultValue":{"type":"int","value":1},"isActive":true,"salt":"v1","values":[]}]}"#;
        let err = decode(json, &resolver, &DecodeOptions::strict()).expect_err("type mismatch");
        assert!(matches!(err, crate::core::error::ParseError::InvalidType { .. }));
    }

    #[test]
    fn scenario_s5_unknown_feature_is_rejected() {
        let resolver = FeatureResolver::new();
        let json = r#"{"flags":[{"key":"feature::unknown::x","defaultValue":{"type":"boolean","value":true},"isActive":true,"salt":"v1","values":[]}]}"#;
        let err = decode(json, &resolver, &DecodeOptions::strict()).expect_err("unknown feature");
        assert_eq!(err, crate::core::error::ParseError::FeatureNotFound("feature::unknown::x".to_string()));
    }

    #[test]
    fn syntax_error_is_invalid_json() {
        let resolver = FeatureResolver::new();
        let err = decode("{not json", &resolver, &DecodeOptions::strict()).expect_err("syntax error");
        assert!(matches!(err, crate::core::error::ParseError::InvalidJson { .. }));
    }

    #[test]
    fn strict_mode_rejects_unknown_top_level_key() {
        let resolver = FeatureResolver::new();
        let json = r#"{"flags":[],"bogus":true}"#;
        assert!(decode(json, &resolver, &DecodeOptions::strict()).is_err());
    }

    #[test]
    fn skip_unknown_keys_reports_and_succeeds() {
        let resolver = FeatureResolver::new();
        let json = r#"{"flags":[],"bogus":true}"#;
        let seen = std::sync::Mutex::new(Vec::new());
        let options = DecodeOptions::skip_unknown_keys(move |path| {
            seen.lock().expect("lock").push(path);
        });
        let config = decode(json, &resolver, &options).expect("forward compatible");
        assert!(config.is_empty());
    }
}
