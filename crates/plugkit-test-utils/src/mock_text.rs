// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-processing mock plugins.
//!
//! `UppercasePlugin` and `ReversePlugin` mirror the canonical example
//! plugins of a text-processing plugin system: tiny boolean-configured
//! transforms over string input.

use serde_json::{Value, json};

use plugkit_core::error::PlugkitError;
use plugkit_core::schema::{ConfigField, ConfigSchema, FieldKind, merge_config, resolve_config};
use plugkit_core::traits::Plugin;
use plugkit_core::types::ConfigMap;

fn input_text(input: &Value) -> Result<&str, PlugkitError> {
    input
        .as_str()
        .ok_or_else(|| PlugkitError::execution("input must be a string"))
}

/// Converts input text to uppercase.
#[derive(Default)]
pub struct UppercasePlugin {
    config: ConfigMap,
}

impl UppercasePlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for UppercasePlugin {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> Option<&str> {
        Some("Converts text to uppercase")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new().with_field(
            ConfigField::new("preserve_newlines", FieldKind::Boolean)
                .with_default(json!(true))
                .with_description("Preserve newline characters"),
        )
    }

    fn initialize(&mut self, config: Option<&ConfigMap>) -> Result<(), PlugkitError> {
        self.config = resolve_config(&self.config_schema(), config)?;
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        merge_config(&self.config_defaults(), &self.config)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&mut self, input: Value, _options: &ConfigMap) -> Result<Value, PlugkitError> {
        let text = input_text(&input)?;
        let preserve = self
            .config
            .get("preserve_newlines")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let upper = if !preserve {
            text.replace('\n', " ").to_uppercase()
        } else {
            text.to_uppercase()
        };
        Ok(json!(upper))
    }
}

/// Reverses input text, either whole or word by word.
#[derive(Default)]
pub struct ReversePlugin {
    config: ConfigMap,
}

impl ReversePlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for ReversePlugin {
    fn name(&self) -> &str {
        "reverse"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> Option<&str> {
        Some("Reverses text")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new().with_field(
            ConfigField::new("reverse_words", FieldKind::Boolean)
                .with_default(json!(false))
                .with_description("Reverse individual words instead of the entire text"),
        )
    }

    fn initialize(&mut self, config: Option<&ConfigMap>) -> Result<(), PlugkitError> {
        self.config = resolve_config(&self.config_schema(), config)?;
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        merge_config(&self.config_defaults(), &self.config)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&mut self, input: Value, _options: &ConfigMap) -> Result<Value, PlugkitError> {
        let text = input_text(&input)?;
        let word_mode = self
            .config
            .get("reverse_words")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let reversed = if word_mode {
            text.split(' ')
                .map(|word| word.chars().rev().collect::<String>())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            text.chars().rev().collect::<String>()
        };
        Ok(json!(reversed))
    }
}

impl UppercasePlugin {
    /// Convenience for registering in tests.
    pub fn boxed() -> Box<dyn Plugin> {
        Box::new(Self::new())
    }
}

impl ReversePlugin {
    pub fn boxed() -> Box<dyn Plugin> {
        Box::new(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    #[test]
    fn uppercase_transforms_input() {
        let mut plugin = UppercasePlugin::new();
        plugin.initialize(None).unwrap();
        let out = plugin.execute(json!("Hello World"), &Map::new()).unwrap();
        assert_eq!(out, json!("HELLO WORLD"));
    }

    #[test]
    fn reverse_respects_word_mode() {
        let mut plugin = ReversePlugin::new();
        plugin.initialize(None).unwrap();
        assert_eq!(
            plugin.execute(json!("Hello World"), &Map::new()).unwrap(),
            json!("dlroW olleH")
        );

        let mut config = Map::new();
        config.insert("reverse_words".to_string(), json!(true));
        plugin.initialize(Some(&config)).unwrap();
        assert_eq!(
            plugin.execute(json!("Hello World"), &Map::new()).unwrap(),
            json!("olleH dlroW")
        );
    }

    #[test]
    fn non_string_input_is_an_execution_error() {
        let mut plugin = UppercasePlugin::new();
        plugin.initialize(None).unwrap();
        let err = plugin.execute(json!(42), &Map::new()).unwrap_err();
        assert!(matches!(err, PlugkitError::Execution { .. }));
    }
}
