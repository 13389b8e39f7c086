// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plugkit plugin runtime.

use thiserror::Error;

/// The primary error type used across the plugin contract and manager operations.
#[derive(Debug, Error)]
pub enum PlugkitError {
    /// A candidate could not be resolved to a valid plugin during discovery.
    /// Always recovered per-candidate; never fatal to a discovery batch.
    #[error("discovery error: {0}")]
    Discovery(String),

    /// Configuration validation failed (missing required keys, type mismatches,
    /// values outside a declared enumeration).
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation referenced a plugin name unknown to the manager.
    #[error("plugin not found: {name}")]
    NotFound { name: String },

    /// An operation required an initialized plugin instance.
    #[error("plugin not loaded: {name}")]
    NotLoaded { name: String },

    /// An operation referenced a plugin whose enabled flag is off.
    #[error("plugin disabled: {name}")]
    Disabled { name: String },

    /// Streaming execution was requested on a plugin that does not stream.
    #[error("plugin does not support streaming: {name}")]
    StreamingUnsupported { name: String },

    /// Opaque failure surfaced from a plugin's own execution. Propagated to
    /// the caller unmodified; the manager does not interpret domain failures.
    #[error("execution error: {message}")]
    Execution {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugkitError {
    /// Wraps a domain-level failure produced inside a plugin's `execute`.
    pub fn execution(message: impl Into<String>) -> Self {
        PlugkitError::Execution {
            message: message.into(),
            source: None,
        }
    }
}
