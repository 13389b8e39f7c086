// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration schema descriptions.
//!
//! A [`ConfigSchema`] is an ordered list of [`ConfigField`] descriptors
//! declaring the keys a plugin accepts, their kinds, defaults, and
//! required-ness. Schemas can be rendered as JSON-Schema objects for the
//! strict validator and for host-side configuration UIs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::PlugkitError;
use crate::types::ConfigMap;

/// The kind of value a configuration field accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Membership in a fixed set of allowed values.
    Enum(Vec<Value>),
}

impl FieldKind {
    /// Returns true if `value` structurally matches this kind.
    ///
    /// For `Enum` this checks membership, the one constraint that can be
    /// verified without a schema-validation library.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Enum(allowed) => allowed.contains(value),
        }
    }
}

/// Declaration of a single configuration key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub kind: FieldKind,
    /// Default value applied when the key is absent from a supplied config.
    pub default: Option<Value>,
    pub required: bool,
    pub description: Option<String>,
}

impl ConfigField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: false,
            description: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered description of the configuration keys a plugin accepts.
///
/// An empty schema means "no constraint": any well-formed config passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub fields: Vec<ConfigField>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style field registration, preserving declaration order.
    pub fn with_field(mut self, field: ConfigField) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field declaration by key name.
    pub fn field(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Extracts the declared defaults: every field with a default contributes
    /// it, fields without one are omitted.
    pub fn defaults(&self) -> ConfigMap {
        let mut defaults = Map::new();
        for field in &self.fields {
            if let Some(value) = &field.default {
                defaults.insert(field.name.clone(), value.clone());
            }
        }
        defaults
    }

    /// Renders this schema as a JSON-Schema object
    /// (`type: object` with `properties` and `required`).
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            let mut prop = Map::new();
            match &field.kind {
                FieldKind::String => {
                    prop.insert("type".to_string(), json!("string"));
                }
                FieldKind::Integer => {
                    prop.insert("type".to_string(), json!("integer"));
                }
                FieldKind::Number => {
                    prop.insert("type".to_string(), json!("number"));
                }
                FieldKind::Boolean => {
                    prop.insert("type".to_string(), json!("boolean"));
                }
                FieldKind::Enum(allowed) => {
                    prop.insert("enum".to_string(), Value::Array(allowed.clone()));
                }
            }
            if let Some(default) = &field.default {
                prop.insert("default".to_string(), default.clone());
            }
            if let Some(description) = &field.description {
                prop.insert("description".to_string(), json!(description));
            }
            if field.required {
                required.push(json!(field.name));
            }
            properties.insert(field.name.clone(), Value::Object(prop));
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

/// Shallow merge of two configs: every key of `overrides` replaces the same
/// key in `defaults`. Neither input is mutated; nested objects are replaced
/// wholesale, not deep-merged.
pub fn merge_config(defaults: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Merges the schema's defaults with a supplied config (supplied values win)
/// and validates the result. Returns the merged config ready to store.
///
/// This is the canonical `initialize` helper: plugins call it, keep the
/// returned map, and raise the `Config` error unchanged on failure.
pub fn resolve_config(
    schema: &ConfigSchema,
    supplied: Option<&ConfigMap>,
) -> Result<ConfigMap, PlugkitError> {
    let merged = match supplied {
        Some(config) => merge_config(&schema.defaults(), config),
        None => schema.defaults(),
    };
    crate::validation::validate_config(&merged, schema)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whisper_schema() -> ConfigSchema {
        ConfigSchema::new()
            .with_field(
                ConfigField::new(
                    "model",
                    FieldKind::Enum(vec![json!("tiny"), json!("base")]),
                )
                .with_default(json!("base"))
                .required(),
            )
            .with_field(ConfigField::new("language", FieldKind::String))
            .with_field(
                ConfigField::new("beam_size", FieldKind::Integer).with_default(json!(5)),
            )
    }

    #[test]
    fn defaults_include_only_fields_with_defaults() {
        let defaults = whisper_schema().defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["model"], json!("base"));
        assert_eq!(defaults["beam_size"], json!(5));
        assert!(!defaults.contains_key("language"));
    }

    #[test]
    fn empty_schema_has_empty_defaults() {
        assert!(ConfigSchema::new().defaults().is_empty());
    }

    #[test]
    fn merge_config_override_wins() {
        let mut defaults = Map::new();
        defaults.insert("model".to_string(), json!("base"));
        let mut overrides = Map::new();
        overrides.insert("language".to_string(), json!("en"));

        let merged = merge_config(&defaults, &overrides);
        assert_eq!(merged["model"], json!("base"));
        assert_eq!(merged["language"], json!("en"));

        // Inputs are untouched.
        assert_eq!(defaults.len(), 1);
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn merge_config_replaces_nested_objects_wholesale() {
        let mut defaults = Map::new();
        defaults.insert("decode".to_string(), json!({"beam": 5, "patience": 1.0}));
        let mut overrides = Map::new();
        overrides.insert("decode".to_string(), json!({"beam": 2}));

        let merged = merge_config(&defaults, &overrides);
        assert_eq!(merged["decode"], json!({"beam": 2}));
    }

    #[test]
    fn to_json_schema_shape() {
        let schema = whisper_schema().to_json_schema();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(
            schema["properties"]["model"]["enum"],
            json!(["tiny", "base"])
        );
        assert_eq!(schema["properties"]["model"]["default"], json!("base"));
        assert_eq!(schema["properties"]["language"]["type"], json!("string"));
        assert_eq!(schema["required"], json!(["model"]));
    }

    #[test]
    fn to_json_schema_omits_required_when_none() {
        let schema = ConfigSchema::new()
            .with_field(ConfigField::new("verbose", FieldKind::Boolean))
            .to_json_schema();
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn resolve_config_overlays_supplied_on_defaults() {
        let mut supplied = Map::new();
        supplied.insert("language".to_string(), json!("en"));
        let resolved = resolve_config(&whisper_schema(), Some(&supplied)).unwrap();
        assert_eq!(resolved["model"], json!("base"));
        assert_eq!(resolved["language"], json!("en"));
        assert_eq!(resolved["beam_size"], json!(5));
    }

    #[test]
    fn resolve_config_without_supplied_uses_defaults() {
        let resolved = resolve_config(&whisper_schema(), None).unwrap();
        assert_eq!(resolved["model"], json!("base"));
    }

    #[test]
    fn resolve_config_rejects_invalid_override() {
        let mut supplied = Map::new();
        supplied.insert("model".to_string(), json!("huge"));
        let err = resolve_config(&whisper_schema(), Some(&supplied)).unwrap_err();
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn field_kind_matches() {
        assert!(FieldKind::String.matches(&json!("x")));
        assert!(!FieldKind::String.matches(&json!(1)));
        assert!(FieldKind::Integer.matches(&json!(3)));
        assert!(!FieldKind::Integer.matches(&json!(3.5)));
        assert!(FieldKind::Number.matches(&json!(3.5)));
        assert!(FieldKind::Boolean.matches(&json!(true)));
        let kind = FieldKind::Enum(vec![json!("tiny"), json!("base")]);
        assert!(kind.matches(&json!("tiny")));
        assert!(!kind.matches(&json!("huge")));
    }
}
