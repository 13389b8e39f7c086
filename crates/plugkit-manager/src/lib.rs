// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, lifecycle management, and execution dispatch.
//!
//! The [`PluginManager`] discovers plugins from an explicit entry-point
//! table (or from dynamic libraries in development mode), mediates their
//! lifecycle transitions, and dispatches blocking and streaming execution.
//! Every plugin is addressed through the `Plugin` contract defined in
//! `plugkit-core`.

pub mod entry_point;
pub mod loader;
pub mod manager;
pub mod metadata;

pub use entry_point::{EntryPoint, PluginFactory};
pub use loader::CREATE_SYMBOL;
pub use manager::PluginManager;
pub use metadata::PluginMeta;
