// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugins for Plugkit tests.
//!
//! Provides deterministic plugin implementations for fast, CI-runnable tests
//! of the manager and contract without real backing models.
//!
//! # Components
//!
//! - [`UppercasePlugin`] / [`ReversePlugin`] - simple text processors
//! - [`FakeTranscriber`] - enum-constrained config plus streaming output
//! - [`CountingPlugin`] - records initialize/cleanup call counts
//! - [`FailingPlugin`] - always fails to initialize

pub mod mock_text;
pub mod mock_transcriber;
pub mod probes;

pub use mock_text::{ReversePlugin, UppercasePlugin};
pub use mock_transcriber::FakeTranscriber;
pub use probes::{CountingPlugin, FailingPlugin, LifecycleCounters};
