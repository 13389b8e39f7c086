// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration validation against a [`ConfigSchema`].
//!
//! With the `jsonschema` feature (on by default) validation delegates to the
//! `jsonschema` crate and surfaces its first error message verbatim. Without
//! it, [`validate_structural`] performs a reduced best-effort check: declared
//! keys must match their declared kinds and required keys must be present.
//! Unknown keys are accepted in both modes; this is graceful degradation for
//! configuration hygiene, not a trust boundary.

use crate::error::PlugkitError;
use crate::schema::ConfigSchema;
use crate::types::ConfigMap;

/// Validates `config` against `schema`, reporting the first error found.
///
/// Never mutates its inputs. An empty schema accepts any config.
pub fn validate_config(config: &ConfigMap, schema: &ConfigSchema) -> Result<(), PlugkitError> {
    #[cfg(feature = "jsonschema")]
    {
        validate_strict(config, schema)
    }
    #[cfg(not(feature = "jsonschema"))]
    {
        validate_structural(config, schema)
    }
}

#[cfg(feature = "jsonschema")]
fn validate_strict(config: &ConfigMap, schema: &ConfigSchema) -> Result<(), PlugkitError> {
    let schema_json = schema.to_json_schema();
    let validator = match jsonschema::validator_for(&schema_json) {
        Ok(validator) => validator,
        Err(e) => {
            // A schema our own renderer produced failed to compile; fall back
            // to the structural check rather than rejecting every config.
            tracing::warn!(error = %e, "schema compilation failed, using structural validation");
            return validate_structural(config, schema);
        }
    };
    let instance = serde_json::Value::Object(config.clone());
    if let Err(error) = validator.validate(&instance) {
        return Err(PlugkitError::Config(error.to_string()));
    }
    Ok(())
}

/// Best-effort structural validation used when the `jsonschema` capability is
/// unavailable: declared keys must match their declared kind (enum fields
/// check membership), required keys must be present, unknown keys pass.
pub fn validate_structural(config: &ConfigMap, schema: &ConfigSchema) -> Result<(), PlugkitError> {
    for field in &schema.fields {
        match config.get(&field.name) {
            Some(value) => {
                if !field.kind.matches(value) {
                    return Err(PlugkitError::Config(format!(
                        "invalid value {value} for key `{}`",
                        field.name
                    )));
                }
            }
            None => {
                if field.required {
                    return Err(PlugkitError::Config(format!(
                        "missing required key `{}`",
                        field.name
                    )));
                }
            }
        }
    }
    Ok(())
}
