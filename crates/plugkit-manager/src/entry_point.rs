// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit entry-point registrations.
//!
//! An [`EntryPoint`] is a named declaration mapping a plugin name to a
//! factory under a group identifier. Registrations are scoped to a single
//! manager instance; there is no ambient process-wide registry, so multiple
//! independent managers compose in one process.

use std::sync::Arc;

use plugkit_core::error::PlugkitError;
use plugkit_core::traits::Plugin;

/// Factory producing unconfigured plugin instances.
///
/// The `Box<dyn Plugin>` return type is the required-base check: anything a
/// factory can produce satisfies the contract by construction.
pub trait PluginFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn Plugin>, PlugkitError>;
}

impl<F> PluginFactory for F
where
    F: Fn() -> Box<dyn Plugin> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn Plugin>, PlugkitError> {
        Ok(self())
    }
}

/// A named plugin registration under a group identifier.
pub struct EntryPoint {
    /// Declared plugin name; used as the registry key.
    pub name: String,
    /// Group identifier the registration belongs to. Managers only discover
    /// entry points matching their own group.
    pub group: String,
    pub factory: Arc<dyn PluginFactory>,
}

impl EntryPoint {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        factory: impl PluginFactory + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            factory: Arc::new(factory),
        }
    }
}

impl std::fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Map, Value};

    use plugkit_core::schema::ConfigSchema;
    use plugkit_core::types::ConfigMap;

    struct NoopPlugin;

    impl Plugin for NoopPlugin {
        fn name(&self) -> &str {
            "noop"
        }
        fn version(&self) -> &str {
            "0.0.1"
        }
        fn config_schema(&self) -> ConfigSchema {
            ConfigSchema::new()
        }
        fn initialize(&mut self, _config: Option<&ConfigMap>) -> Result<(), PlugkitError> {
            Ok(())
        }
        fn current_config(&self) -> ConfigMap {
            Map::new()
        }
        fn is_available(&self) -> bool {
            true
        }
        fn execute(&mut self, input: Value, _options: &ConfigMap) -> Result<Value, PlugkitError> {
            Ok(input)
        }
    }

    #[test]
    fn closures_are_factories() {
        let entry = EntryPoint::new("noop", "test.plugins", || {
            Box::new(NoopPlugin) as Box<dyn Plugin>
        });
        let instance = entry.factory.create().unwrap();
        assert_eq!(instance.name(), "noop");
    }
}
