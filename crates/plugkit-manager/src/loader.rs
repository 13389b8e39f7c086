// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic-library plugin loading (development mode).
//!
//! A plugin library exports a single constructor symbol:
//!
//! ```ignore
//! #[unsafe(no_mangle)]
//! pub fn plugkit_create() -> Box<dyn plugkit_core::Plugin> {
//!     Box::new(MyPlugin::new())
//! }
//! ```
//!
//! Resolution failures (missing file, unreadable library, missing symbol)
//! are [`PlugkitError::Discovery`] errors for that path only, never fatal to
//! a wider scan.

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use plugkit_core::error::PlugkitError;
use plugkit_core::traits::Plugin;

/// Symbol every plugin library must export.
pub const CREATE_SYMBOL: &[u8] = b"plugkit_create";

pub(crate) type CreateFn = fn() -> Box<dyn Plugin>;

/// An opened plugin library and its resolved constructor.
///
/// The `Library` must stay alive for as long as any instance or factory
/// pointer obtained from it; the manager keeps loaded libraries for its own
/// lifetime and never unmaps them.
pub(crate) struct LoadedLibrary {
    #[allow(dead_code)]
    library: Library,
    pub(crate) create: CreateFn,
    pub(crate) path: PathBuf,
}

impl std::fmt::Debug for LoadedLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedLibrary")
            .field("path", &self.path)
            .finish()
    }
}

pub(crate) fn load_library(path: &Path) -> Result<LoadedLibrary, PlugkitError> {
    let library = unsafe { Library::new(path) }.map_err(|e| {
        PlugkitError::Discovery(format!(
            "failed to open plugin library {}: {e}",
            path.display()
        ))
    })?;
    let create = unsafe {
        let symbol: Symbol<'_, CreateFn> = library.get(CREATE_SYMBOL).map_err(|e| {
            PlugkitError::Discovery(format!(
                "no plugin constructor in {}: {e}",
                path.display()
            ))
        })?;
        *symbol
    };
    Ok(LoadedLibrary {
        library,
        create,
        path: path.to_path_buf(),
    })
}
