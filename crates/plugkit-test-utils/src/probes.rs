// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle probe plugins: a counting plugin that records how often its
//! hooks ran, and a plugin that always fails to initialize.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value};

use plugkit_core::error::PlugkitError;
use plugkit_core::schema::{ConfigSchema, merge_config, resolve_config};
use plugkit_core::traits::Plugin;
use plugkit_core::types::ConfigMap;

/// Shared counters observed by tests across plugin re-instantiations.
#[derive(Clone, Debug, Default)]
pub struct LifecycleCounters {
    initialized: Arc<AtomicUsize>,
    cleaned_up: Arc<AtomicUsize>,
}

impl LifecycleCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn cleaned_up(&self) -> usize {
        self.cleaned_up.load(Ordering::SeqCst)
    }
}

/// Passthrough plugin that counts `initialize` and `cleanup` invocations.
pub struct CountingPlugin {
    counters: LifecycleCounters,
    config: ConfigMap,
}

impl CountingPlugin {
    pub fn new(counters: LifecycleCounters) -> Self {
        Self {
            counters,
            config: Map::new(),
        }
    }
}

impl Plugin for CountingPlugin {
    fn name(&self) -> &str {
        "counting"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new()
    }

    fn initialize(&mut self, config: Option<&ConfigMap>) -> Result<(), PlugkitError> {
        self.config = resolve_config(&self.config_schema(), config)?;
        self.counters.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        merge_config(&self.config_defaults(), &self.config)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&mut self, input: Value, _options: &ConfigMap) -> Result<Value, PlugkitError> {
        Ok(input)
    }

    fn cleanup(&mut self) {
        self.counters.cleaned_up.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plugin whose backing resource is never satisfiable: `initialize` always
/// fails with a configuration error and `is_available` reports false.
pub struct FailingPlugin;

impl Plugin for FailingPlugin {
    fn name(&self) -> &str {
        "failing"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new()
    }

    fn initialize(&mut self, _config: Option<&ConfigMap>) -> Result<(), PlugkitError> {
        Err(PlugkitError::Config(
            "backing model unavailable".to_string(),
        ))
    }

    fn current_config(&self) -> ConfigMap {
        Map::new()
    }

    fn is_available(&self) -> bool {
        false
    }

    fn execute(&mut self, _input: Value, _options: &ConfigMap) -> Result<Value, PlugkitError> {
        Err(PlugkitError::execution("failing plugin cannot execute"))
    }
}
