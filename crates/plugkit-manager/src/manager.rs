// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin lifecycle management and execution dispatch.
//!
//! The [`PluginManager`] owns the registry of plugin records, mediates every
//! lifecycle transition, and is the sole execution entry point for
//! collaborators. It is a single-threaded synchronous component: every
//! mutating operation takes `&mut self`, nothing is locked internally, and
//! execution blocks the calling thread for the duration of the plugin's own
//! work. Collaborators needing concurrency must serialize access externally.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use plugkit_core::error::PlugkitError;
use plugkit_core::schema::ConfigSchema;
use plugkit_core::traits::{Plugin, PluginStream};
use plugkit_core::types::{ConfigMap, PluginSource, PluginState};

use crate::entry_point::{EntryPoint, PluginFactory};
use crate::loader::{self, LoadedLibrary};
use crate::metadata::{PluginMeta, PluginRecord};

/// Orchestrates discovery, loading, lifecycle transitions, and execution
/// across a registry of plugin records.
///
/// Constructed with a group identifier; only entry points registered under
/// that group are discovered. All state is scoped to this instance, so
/// multiple managers with different groups compose in one process.
pub struct PluginManager {
    group: String,
    entry_points: Vec<EntryPoint>,
    registry: HashMap<String, PluginRecord>,
    /// Registry keys in first-discovery order.
    order: Vec<String>,
    /// Open plugin libraries. Kept for the manager's lifetime so factory
    /// pointers stay valid across unload/reload.
    libraries: Vec<LoadedLibrary>,
}

impl PluginManager {
    /// Creates a manager discovering entry points under `group`.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            entry_points: Vec::new(),
            registry: HashMap::new(),
            order: Vec::new(),
            libraries: Vec::new(),
        }
    }

    /// Creates a manager with an initial registration table.
    pub fn with_entry_points(group: impl Into<String>, entry_points: Vec<EntryPoint>) -> Self {
        let mut manager = Self::new(group);
        manager.entry_points = entry_points;
        manager
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Adds a registration to this manager's table. Takes effect on the next
    /// [`discover_plugins`](Self::discover_plugins) call.
    pub fn register_entry_point(&mut self, entry: EntryPoint) {
        self.entry_points.push(entry);
    }

    /// Enumerates entry points matching this manager's group and builds
    /// metadata records for them. Candidates whose factory fails are skipped
    /// with a warning, never fatal to the batch. Returns the resulting
    /// records in enumeration order; no plugin is loaded.
    ///
    /// A later entry point re-using an earlier name overwrites the earlier
    /// record (last-write-wins) unless that record is currently loaded, in
    /// which case the existing record is kept and a warning is emitted.
    pub fn discover_plugins(&mut self) -> Vec<PluginMeta> {
        let candidates: Vec<(String, Arc<dyn PluginFactory>)> = self
            .entry_points
            .iter()
            .filter(|e| e.group == self.group)
            .map(|e| (e.name.clone(), Arc::clone(&e.factory)))
            .collect();

        let mut seen: Vec<String> = Vec::new();
        for (name, factory) in candidates {
            let source = PluginSource::Registry {
                group: self.group.clone(),
            };
            match self.discover_candidate(&name, factory, source) {
                Ok(_) => {
                    if !seen.contains(&name) {
                        seen.push(name);
                    }
                }
                Err(e) => {
                    warn!(plugin = %name, error = %e, "skipping plugin candidate");
                }
            }
        }

        // Snapshot from the registry after the pass so that a duplicated
        // name yields one record, reflecting whichever candidate won.
        let found: Vec<PluginMeta> = seen
            .iter()
            .filter_map(|name| self.registry.get(name))
            .map(|record| record.meta.clone())
            .collect();
        info!(group = %self.group, count = found.len(), "plugin discovery complete");
        found
    }

    /// Opens a dynamic library, resolves its plugin constructor, and registers
    /// a metadata record for it. The record is `Discovered`; call
    /// [`load_plugin`](Self::load_plugin) to initialize it.
    pub fn discover_from_file(&mut self, path: &Path) -> Result<PluginMeta, PlugkitError> {
        let loaded = loader::load_library(path)?;
        let create = loaded.create;
        let source = PluginSource::File {
            path: loaded.path.clone(),
        };
        self.libraries.push(loaded);

        // Harvest the declared name from a transient instance; for file
        // plugins there is no entry-point declaration to take it from.
        let transient = create();
        let name = transient.name().to_string();
        drop(transient);

        self.discover_candidate(&name, Arc::new(create), source)
    }

    /// Convenience for development workflows: discover a plugin library and
    /// immediately load it. Returns false on either failure.
    pub fn load_plugin_from_file(&mut self, path: &Path, config: Option<ConfigMap>) -> bool {
        match self.discover_from_file(path) {
            Ok(meta) => self.load_plugin(&meta.name, config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to discover plugin from file");
                false
            }
        }
    }

    /// Builds a record for one candidate, applying the duplicate-name policy.
    fn discover_candidate(
        &mut self,
        name: &str,
        factory: Arc<dyn PluginFactory>,
        source: PluginSource,
    ) -> Result<PluginMeta, PlugkitError> {
        if let Some(existing) = self.registry.get(name) {
            if existing.is_loaded() {
                warn!(
                    plugin = %name,
                    "re-discovered plugin is currently loaded; keeping existing record"
                );
                return Ok(existing.meta.clone());
            }
        }

        let transient = factory.create()?;
        if transient.name() != name {
            warn!(
                declared = %name,
                reported = %transient.name(),
                "entry point name differs from plugin-reported name"
            );
        }
        let meta = PluginMeta::discovered(
            name.to_string(),
            transient.version().to_string(),
            transient.author().map(str::to_string),
            transient.description().map(str::to_string),
            source,
        );
        let schema = transient.config_schema();
        drop(transient);

        debug!(plugin = %name, "discovered plugin");
        let record = PluginRecord::new(meta.clone(), schema, factory);
        if self.registry.insert(name.to_string(), record).is_none() {
            self.order.push(name.to_string());
        }
        Ok(meta)
    }

    /// Instantiates and initializes a discovered plugin.
    ///
    /// On success the record transitions to `Initialized` (or `Disabled` if
    /// the enabled flag is off) and the supplied config is remembered for
    /// reloads. On failure the instance is cleaned up and discarded, the
    /// record transitions to `Failed` with the error message retained, and
    /// `false` is returned. Load failures are expected (missing backing
    /// models, bad config); callers must check the result.
    pub fn load_plugin(&mut self, name: &str, config: Option<ConfigMap>) -> bool {
        let Some(record) = self.registry.get_mut(name) else {
            warn!(plugin = %name, "cannot load unknown plugin");
            return false;
        };

        let mut instance = match record.instance.take() {
            Some(instance) => instance,
            None => match record.factory.create() {
                Ok(instance) => {
                    record.meta.state = PluginState::Loaded;
                    instance
                }
                Err(e) => {
                    record.meta.state = PluginState::Failed;
                    record.meta.last_error = Some(e.to_string());
                    warn!(plugin = %name, error = %e, "plugin construction failed");
                    return false;
                }
            },
        };

        let config = config.or_else(|| record.config.clone());
        match instance.initialize(config.as_ref()) {
            Ok(()) => {
                record.instance = Some(instance);
                record.meta.state = if record.meta.enabled {
                    PluginState::Initialized
                } else {
                    PluginState::Disabled
                };
                record.meta.last_error = None;
                record.config = config;
                info!(plugin = %name, "plugin loaded");
                true
            }
            Err(e) => {
                instance.cleanup();
                record.meta.state = PluginState::Failed;
                record.meta.last_error = Some(e.to_string());
                warn!(plugin = %name, error = %e, "plugin initialization failed");
                false
            }
        }
    }

    /// Runs the plugin's cleanup hook, discards the instance, and reverts the
    /// record to `Discovered`. A no-op when the plugin is unknown or already
    /// unloaded; the remembered config survives for a later reload.
    pub fn unload_plugin(&mut self, name: &str) {
        let Some(record) = self.registry.get_mut(name) else {
            debug!(plugin = %name, "unload requested for unknown plugin");
            return;
        };

        match record.instance.take() {
            Some(mut instance) => {
                instance.cleanup();
                record.meta.state = PluginState::Discovered;
                record.meta.last_error = None;
                info!(plugin = %name, "plugin unloaded");
            }
            None => {
                // Covers Failed records too: unload clears the failure state.
                record.meta.state = PluginState::Discovered;
                record.meta.last_error = None;
                debug!(plugin = %name, "plugin already unloaded");
            }
        }
    }

    /// Unload followed by load. `config` of `None` reuses the config from the
    /// previous load. Single-threaded, so externally atomic: no observer can
    /// see a half-reloaded record.
    pub fn reload_plugin(&mut self, name: &str, config: Option<ConfigMap>) -> bool {
        if !self.registry.contains_key(name) {
            warn!(plugin = %name, "cannot reload unknown plugin");
            return false;
        }
        self.unload_plugin(name);
        self.load_plugin(name, config)
    }

    /// Sets the enabled flag, restoring `Initialized` state if an instance is
    /// present. Instance and resources are untouched.
    pub fn enable_plugin(&mut self, name: &str) -> Result<(), PlugkitError> {
        let record = self.record_mut(name)?;
        record.meta.enabled = true;
        if record.meta.state == PluginState::Disabled {
            record.meta.state = PluginState::Initialized;
        }
        debug!(plugin = %name, "plugin enabled");
        Ok(())
    }

    /// Clears the enabled flag. A loaded plugin keeps its instance and
    /// resources but is refused by execution dispatch.
    pub fn disable_plugin(&mut self, name: &str) -> Result<(), PlugkitError> {
        let record = self.record_mut(name)?;
        record.meta.enabled = false;
        if record.meta.state == PluginState::Initialized {
            record.meta.state = PluginState::Disabled;
        }
        debug!(plugin = %name, "plugin disabled");
        Ok(())
    }

    /// Executes a loaded, enabled plugin. One synchronous call: no retries,
    /// no timeout. Errors from the plugin itself propagate unmodified.
    pub fn execute_plugin(
        &mut self,
        name: &str,
        input: Value,
        options: &ConfigMap,
    ) -> Result<Value, PlugkitError> {
        let instance = self.dispatchable_instance(name)?;
        instance.execute(input, options)
    }

    /// Streaming counterpart of [`execute_plugin`](Self::execute_plugin).
    /// Fails before producing any element when the plugin does not stream.
    pub fn execute_plugin_stream(
        &mut self,
        name: &str,
        input: Value,
        options: &ConfigMap,
    ) -> Result<PluginStream<'_>, PlugkitError> {
        let instance = self.dispatchable_instance(name)?;
        if !instance.supports_streaming() {
            return Err(PlugkitError::StreamingUnsupported {
                name: name.to_string(),
            });
        }
        instance.execute_stream(input, options)
    }

    /// Resolves a name to an instance eligible for execution dispatch.
    /// Check order matters: unknown names, disabled plugins, and not-loaded
    /// plugins must each surface their own error.
    fn dispatchable_instance(&mut self, name: &str) -> Result<&mut Box<dyn Plugin>, PlugkitError> {
        let record = self
            .registry
            .get_mut(name)
            .ok_or_else(|| PlugkitError::NotFound {
                name: name.to_string(),
            })?;
        if !record.meta.enabled {
            return Err(PlugkitError::Disabled {
                name: name.to_string(),
            });
        }
        match record.instance.as_mut() {
            Some(instance) if record.meta.state == PluginState::Initialized => Ok(instance),
            _ => Err(PlugkitError::NotLoaded {
                name: name.to_string(),
            }),
        }
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut PluginRecord, PlugkitError> {
        self.registry
            .get_mut(name)
            .ok_or_else(|| PlugkitError::NotFound {
                name: name.to_string(),
            })
    }

    fn record(&self, name: &str) -> Result<&PluginRecord, PlugkitError> {
        self.registry
            .get(name)
            .ok_or_else(|| PlugkitError::NotFound {
                name: name.to_string(),
            })
    }

    /// Metadata snapshots for all known plugins, sorted by name.
    pub fn list_plugins(&self) -> Vec<PluginMeta> {
        let mut plugins: Vec<PluginMeta> =
            self.registry.values().map(|r| r.meta.clone()).collect();
        plugins.sort_by(|a, b| a.name.cmp(&b.name));
        plugins
    }

    /// Metadata snapshot for one plugin.
    pub fn get_plugin(&self, name: &str) -> Option<&PluginMeta> {
        self.registry.get(name).map(|r| &r.meta)
    }

    /// Aggregates configuration schemas across all discovered (not
    /// necessarily loaded) plugins, for host-side configuration UIs.
    pub fn get_all_plugin_schemas(&self) -> HashMap<String, ConfigSchema> {
        self.registry
            .iter()
            .map(|(name, record)| (name.clone(), record.schema.clone()))
            .collect()
    }

    /// The effective configuration of a loaded plugin: schema defaults
    /// overlaid with the applied config.
    pub fn get_plugin_config(&self, name: &str) -> Result<ConfigMap, PlugkitError> {
        let record = self.record(name)?;
        match record.instance.as_ref() {
            Some(instance) => Ok(instance.current_config()),
            None => Err(PlugkitError::NotLoaded {
                name: name.to_string(),
            }),
        }
    }

    /// Re-initializes a loaded plugin in place with a new configuration.
    /// On validation failure the plugin keeps its previous configuration and
    /// `false` is returned; the record does not transition to `Failed`.
    pub fn update_plugin_config(&mut self, name: &str, config: ConfigMap) -> bool {
        let Some(record) = self.registry.get_mut(name) else {
            warn!(plugin = %name, "cannot update config of unknown plugin");
            return false;
        };
        let Some(instance) = record.instance.as_mut() else {
            warn!(plugin = %name, "cannot update config of unloaded plugin");
            return false;
        };
        match instance.initialize(Some(&config)) {
            Ok(()) => {
                record.config = Some(config);
                info!(plugin = %name, "plugin configuration updated");
                true
            }
            Err(e) => {
                warn!(plugin = %name, error = %e, "configuration update rejected");
                false
            }
        }
    }

    /// Validates a proposed configuration against a plugin's schema without
    /// applying it. Works for unloaded plugins.
    pub fn validate_plugin_config(
        &self,
        name: &str,
        config: &ConfigMap,
    ) -> Result<(), PlugkitError> {
        let record = self.record(name)?;
        plugkit_core::validation::validate_config(config, &record.schema)
    }

    /// Whether a plugin supports streaming execution, probed without loading:
    /// a transient instance is constructed when none is loaded.
    pub fn check_streaming_support(&self, name: &str) -> Result<bool, PlugkitError> {
        let record = self.record(name)?;
        match record.instance.as_ref() {
            Some(instance) => Ok(instance.supports_streaming()),
            None => Ok(record.factory.create()?.supports_streaming()),
        }
    }

    /// Names of loaded plugins that support streaming, sorted.
    pub fn get_streaming_plugins(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .values()
            .filter(|r| {
                r.instance
                    .as_ref()
                    .is_some_and(|i| i.supports_streaming())
            })
            .map(|r| r.meta.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Non-throwing availability probe. Uses the loaded instance when
    /// present, otherwise a transient one; a failing factory means
    /// unavailable rather than an error.
    pub fn is_plugin_available(&self, name: &str) -> Result<bool, PlugkitError> {
        let record = self.record(name)?;
        match record.instance.as_ref() {
            Some(instance) => Ok(instance.is_available()),
            None => Ok(record
                .factory
                .create()
                .map(|i| i.is_available())
                .unwrap_or(false)),
        }
    }

    /// Number of known plugin records.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("group", &self.group)
            .field("entry_points", &self.entry_points)
            .field("plugins", &self.order)
            .field("libraries", &self.libraries.len())
            .finish()
    }
}
