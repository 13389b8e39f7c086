// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Plugkit plugin contract.

pub mod plugin;

pub use plugin::{Plugin, PluginStream};
