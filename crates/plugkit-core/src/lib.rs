// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plugkit plugin runtime.
//!
//! This crate provides the plugin contract trait, the typed configuration
//! schema and its validator, and the error taxonomy shared by every Plugkit
//! crate. Domain-specific plugin packages depend only on this crate.

pub mod error;
pub mod schema;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlugkitError;
pub use schema::{ConfigField, ConfigSchema, FieldKind, merge_config, resolve_config};
pub use traits::{Plugin, PluginStream};
pub use types::{ConfigMap, PluginSource, PluginState};
