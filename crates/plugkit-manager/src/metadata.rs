// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bookkeeping records for discovered and loaded plugins.
//!
//! [`PluginMeta`] is the public identity and state snapshot handed to
//! collaborators; [`PluginRecord`] is the manager's owning record, which adds
//! the harvested schema, the factory, and the exclusively-owned instance.

use std::sync::Arc;

use serde::Serialize;

use plugkit_core::schema::ConfigSchema;
use plugkit_core::traits::Plugin;
use plugkit_core::types::{ConfigMap, PluginSource, PluginState};

use crate::entry_point::PluginFactory;

/// Identity and lifecycle snapshot for one plugin in a manager's registry.
#[derive(Debug, Clone, Serialize)]
pub struct PluginMeta {
    /// Unique name within the owning manager.
    pub name: String,
    /// Declared version string; not semantically parsed.
    pub version: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// How this plugin was found.
    pub source: PluginSource,
    /// Execution is refused while false.
    pub enabled: bool,
    pub state: PluginState,
    /// Message of the last load/initialize failure, kept for inspection.
    pub last_error: Option<String>,
}

impl PluginMeta {
    pub(crate) fn discovered(
        name: String,
        version: String,
        author: Option<String>,
        description: Option<String>,
        source: PluginSource,
    ) -> Self {
        Self {
            name,
            version,
            author,
            description,
            source,
            enabled: true,
            state: PluginState::Discovered,
            last_error: None,
        }
    }
}

/// The manager's owning record for one plugin.
///
/// Invariant: `instance` is `Some` iff `meta.state` is `Loaded`,
/// `Initialized`, or `Disabled`.
pub(crate) struct PluginRecord {
    pub(crate) meta: PluginMeta,
    /// Schema harvested at discovery, available without loading.
    pub(crate) schema: ConfigSchema,
    pub(crate) factory: Arc<dyn PluginFactory>,
    /// Exclusively owned once loaded; absent before load and after unload.
    pub(crate) instance: Option<Box<dyn Plugin>>,
    /// Last config supplied to `load_plugin`; survives unload so a plain
    /// reload reuses it.
    pub(crate) config: Option<ConfigMap>,
}

impl PluginRecord {
    pub(crate) fn new(meta: PluginMeta, schema: ConfigSchema, factory: Arc<dyn PluginFactory>) -> Self {
        Self {
            meta,
            schema,
            factory,
            instance: None,
            config: None,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.instance.is_some()
    }
}

impl std::fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRecord")
            .field("meta", &self.meta)
            .field("schema", &self.schema)
            .field("instance", &self.instance.is_some())
            .field("config", &self.config)
            .finish()
    }
}
