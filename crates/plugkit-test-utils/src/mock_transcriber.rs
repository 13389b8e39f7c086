// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A fake transcription engine with an enum-constrained configuration and
//! streaming output, shaped like the real engines the plugin runtime hosts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value, json};

use plugkit_core::error::PlugkitError;
use plugkit_core::schema::{ConfigField, ConfigSchema, FieldKind, merge_config, resolve_config};
use plugkit_core::traits::{Plugin, PluginStream};
use plugkit_core::types::ConfigMap;

/// Mock transcription plugin.
///
/// Schema: `model` (enum `tiny`/`base`, default `base`, required) and
/// `language` (optional string). `execute` "transcribes" the input string
/// into a result object; `execute_stream` yields one chunk per word.
pub struct FakeTranscriber {
    config: ConfigMap,
    /// Set to false when a streaming pass is underway or was abandoned; used
    /// by tests to observe deterministic stream teardown.
    stream_closed: Arc<AtomicBool>,
}

impl FakeTranscriber {
    pub fn new() -> Self {
        Self {
            config: Map::new(),
            stream_closed: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn boxed() -> Box<dyn Plugin> {
        Box::new(Self::new())
    }

    /// Handle observing whether the most recent stream has been torn down.
    pub fn stream_closed_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stream_closed)
    }

    fn model(&self) -> String {
        self.config
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or("base")
            .to_string()
    }
}

impl Default for FakeTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for FakeTranscriber {
    fn name(&self) -> &str {
        "fake-transcriber"
    }

    fn version(&self) -> &str {
        "0.2.0"
    }

    fn author(&self) -> Option<&str> {
        Some("Plugkit Contributors")
    }

    fn description(&self) -> Option<&str> {
        Some("Deterministic transcription engine for tests")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new()
            .with_field(
                ConfigField::new(
                    "model",
                    FieldKind::Enum(vec![json!("tiny"), json!("base")]),
                )
                .with_default(json!("base"))
                .required()
                .with_description("Model size to load"),
            )
            .with_field(
                ConfigField::new("language", FieldKind::String)
                    .with_description("Transcription language hint"),
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
        let text = input
            .as_str()
            .ok_or_else(|| PlugkitError::execution("input must be a string"))?;
        Ok(json!({ "text": text, "model": self.model() }))
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    fn execute_stream(
        &mut self,
        input: Value,
        _options: &ConfigMap,
    ) -> Result<PluginStream<'_>, PlugkitError> {
        let text = input
            .as_str()
            .ok_or_else(|| PlugkitError::execution("input must be a string"))?;
        let chunks: Vec<Value> = text
            .split_whitespace()
            .map(|word| json!({ "text": word }))
            .collect();
        self.stream_closed.store(false, Ordering::SeqCst);
        Ok(Box::new(ChunkStream {
            chunks: chunks.into_iter(),
            closed: Arc::clone(&self.stream_closed),
        }))
    }

    fn cleanup(&mut self) {
        self.config.clear();
    }
}

/// Finite chunk producer with deterministic teardown: the closed flag flips
/// on drop whether the consumer finished or abandoned the stream early.
struct ChunkStream {
    chunks: std::vec::IntoIter<Value>,
    closed: Arc<AtomicBool>,
}

impl Iterator for ChunkStream {
    type Item = Result<Value, PlugkitError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(Ok)
    }
}

impl Drop for ChunkStream {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_reports_configured_model() {
        let mut plugin = FakeTranscriber::new();
        let mut config = Map::new();
        config.insert("model".to_string(), json!("tiny"));
        plugin.initialize(Some(&config)).unwrap();

        let out = plugin.execute(json!("hello there"), &Map::new()).unwrap();
        assert_eq!(out["model"], json!("tiny"));
        assert_eq!(out["text"], json!("hello there"));
    }

    #[test]
    fn stream_yields_one_chunk_per_word() {
        let mut plugin = FakeTranscriber::new();
        plugin.initialize(None).unwrap();

        let chunks: Vec<Value> = plugin
            .execute_stream(json!("a b c"), &Map::new())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0]["text"], json!("a"));
    }

    #[test]
    fn abandoned_stream_still_closes() {
        let mut plugin = FakeTranscriber::new();
        plugin.initialize(None).unwrap();
        let closed = plugin.stream_closed_handle();

        let mut stream = plugin.execute_stream(json!("a b c"), &Map::new()).unwrap();
        let _first = stream.next();
        assert!(!closed.load(Ordering::SeqCst));
        drop(stream);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn rejects_model_outside_enum() {
        let mut plugin = FakeTranscriber::new();
        let mut config = Map::new();
        config.insert("model".to_string(), json!("huge"));
        let err = plugin.initialize(Some(&config)).unwrap_err();
        assert!(err.to_string().contains("huge"));
    }
}
