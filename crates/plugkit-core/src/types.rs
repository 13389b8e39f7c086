// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the plugin contract and the manager.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A plugin configuration: string keys mapped to JSON values.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Lifecycle state of a plugin record in a manager's registry.
///
/// Transitions: `Discovered -> Loaded -> Initialized <-> Disabled`, with
/// `Failed` reachable from `Loaded` or `Initialized` on error and
/// `Discovered` reachable from any state via unload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// Known to the registry; no instance exists.
    Discovered,
    /// Instance constructed but not yet initialized.
    Loaded,
    /// Instance initialized and eligible for execution dispatch.
    Initialized,
    /// Instance present but execution is refused.
    Disabled,
    /// Load or initialization failed; excluded from dispatch until reloaded.
    Failed,
}

/// How a plugin was found by the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginSource {
    /// Discovered through an entry-point registration under a group identifier.
    Registry { group: String },
    /// Loaded from a dynamic library on disk (development mode).
    File { path: PathBuf },
}

impl std::fmt::Display for PluginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginSource::Registry { group } => write!(f, "registry:{group}"),
            PluginSource::File { path } => write!(f, "file:{}", path.display()),
        }
    }
}
