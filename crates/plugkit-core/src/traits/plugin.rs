// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin contract every Plugkit plugin must satisfy.
//!
//! Domain packages define subtraits of [`Plugin`] with domain methods, and
//! register factories producing `Box<dyn Plugin>`; the manager only ever
//! speaks this contract.

use serde_json::Value;

use crate::error::PlugkitError;
use crate::schema::ConfigSchema;
use crate::types::ConfigMap;

/// A finite, non-restartable sequence of partial execution results.
///
/// Produced lazily on the calling thread; consumers cancel by dropping the
/// iterator. Producers that hold resources during streaming should release
/// them in their `Drop` impl so abandonment is deterministic.
pub type PluginStream<'a> = Box<dyn Iterator<Item = Result<Value, PlugkitError>> + 'a>;

/// Capability set every plugin instance must expose.
///
/// Lifecycle of an instance: constructed (unconfigured) -> [`initialize`]
/// applies validated configuration and acquires backing resources -> zero or
/// more [`execute`]/[`execute_stream`] calls -> [`cleanup`] releases
/// resources -> instance discarded. `initialize` may be called again to
/// re-apply configuration; a repeated call fully supersedes the prior config
/// and resources.
///
/// [`initialize`]: Plugin::initialize
/// [`execute`]: Plugin::execute
/// [`execute_stream`]: Plugin::execute_stream
/// [`cleanup`]: Plugin::cleanup
pub trait Plugin: Send + 'static {
    /// Unique plugin name, immutable for the lifetime of the instance.
    fn name(&self) -> &str;

    /// Declared version string. Free-form; no semantic parsing is performed.
    fn version(&self) -> &str;

    fn author(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    /// Declarative description of the configuration keys this plugin accepts.
    fn config_schema(&self) -> ConfigSchema;

    /// Defaults derived from the schema: every key with a default, omitted
    /// otherwise.
    fn config_defaults(&self) -> ConfigMap {
        self.config_schema().defaults()
    }

    /// Checks a proposed configuration against the schema without applying it.
    fn validate_config(&self, config: &ConfigMap) -> Result<(), PlugkitError> {
        crate::validation::validate_config(config, &self.config_schema())
    }

    /// Merges defaults with `config` (supplied values win), validates the
    /// merge, stores it, and performs plugin-specific setup such as acquiring
    /// a backing model. Implementations typically delegate the merge and
    /// validation to [`crate::schema::resolve_config`].
    fn initialize(&mut self, config: Option<&ConfigMap>) -> Result<(), PlugkitError>;

    /// The effective configuration: defaults overlaid with the stored config.
    fn current_config(&self) -> ConfigMap;

    /// Non-throwing probe of whether this plugin's runtime dependencies are
    /// satisfiable, usable without a load attempt.
    fn is_available(&self) -> bool;

    /// The domain operation. Only invoked after a successful `initialize`.
    fn execute(&mut self, input: Value, options: &ConfigMap) -> Result<Value, PlugkitError>;

    fn supports_streaming(&self) -> bool {
        false
    }

    /// Streaming counterpart of [`execute`](Plugin::execute). The default
    /// refuses with [`PlugkitError::StreamingUnsupported`].
    fn execute_stream(
        &mut self,
        _input: Value,
        _options: &ConfigMap,
    ) -> Result<PluginStream<'_>, PlugkitError> {
        Err(PlugkitError::StreamingUnsupported {
            name: self.name().to_string(),
        })
    }

    /// Releases resources acquired by `initialize`. Must be safe to call
    /// repeatedly and after a failed `initialize`. Default is a no-op.
    fn cleanup(&mut self) {}
}
