//! One-time load of the catalog and playlists
//!
//! `Library` is built once at startup and never invalidated: the source
//! files are treated as immutable for the life of the process.

use crate::catalog::Catalog;
use crate::config::LibraryPaths;
use crate::playlist::{self, RawPlaylists, ResolvedPlaylists};
use crate::{Error, Result};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Library {
    paths: LibraryPaths,
    catalog: Catalog,
    playlists: ResolvedPlaylists,
}

impl Library {
    /// Load and resolve everything under the root folder
    ///
    /// Any failure here is fatal: without a catalog and playlists there is
    /// nothing to serve.
    pub fn load(paths: LibraryPaths) -> Result<Self> {
        let metadata_path = paths.metadata_path();
        let catalog = Catalog::load(&metadata_path)
            .map_err(|e| with_source(e, "catalog", &metadata_path))?;
        catalog.ensure_not_empty(&metadata_path)?;

        let playlists_path = paths.playlists_path();
        let raw = RawPlaylists::load(&playlists_path)
            .map_err(|e| with_source(e, "playlists", &playlists_path))?;
        if raw.is_empty() {
            return Err(Error::EmptyPlaylists(playlists_path.display().to_string()));
        }

        let playlists = playlist::resolve(&catalog, &raw)?;
        info!(
            "Library ready: {} songs, {} playlists",
            catalog.len(),
            playlists.len()
        );

        Ok(Self {
            paths,
            catalog,
            playlists,
        })
    }

    pub fn paths(&self) -> &LibraryPaths {
        &self.paths
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playlists(&self) -> &ResolvedPlaylists {
        &self.playlists
    }
}

/// Name the file a load error came from
fn with_source(error: Error, what: &str, path: &std::path::Path) -> Error {
    match error {
        Error::Io(e) => Error::Io(std::io::Error::new(
            e.kind(),
            format!("reading {} {}: {}", what, path.display(), e),
        )),
        Error::Json(e) => Error::Config(format!("parsing {} {}: {}", what, path.display(), e)),
        other => other,
    }
}
