//! Playlist table loading and resolution
//!
//! User playlists come from `playlists/playlists.json`, an object mapping a
//! playlist name to an ordered array of song ids. Resolution prepends the
//! synthetic "All Songs" playlist built from the catalog.

use crate::catalog::{Catalog, OrderedEntries};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the synthetic playlist holding every catalog song
pub const ALL_SONGS: &str = "All Songs";

/// Playlists exactly as stored on disk, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPlaylists(Vec<(String, Vec<String>)>);

impl RawPlaylists {
    /// Build from `(name, ids)` pairs; a repeated name keeps its first
    /// position and takes the later ids
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut playlists: Vec<(String, Vec<String>)> = Vec::new();
        for (name, ids) in entries {
            match playlists.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = ids,
                None => playlists.push((name, ids)),
            }
        }
        Self(playlists)
    }

    /// Read and parse a playlist file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading playlists from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let entries: OrderedEntries<Vec<String>> = serde_json::from_str(&content)?;
        let playlists = Self::from_entries(entries.0);
        info!("Loaded {} playlists from {}", playlists.len(), path.display());
        Ok(playlists)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Every playlist available to the player, "All Songs" first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaylists {
    entries: Vec<(String, Vec<String>)>,
}

impl ResolvedPlaylists {
    /// Song ids of a playlist
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Playlist names in selector order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge the synthetic "All Songs" playlist with the user playlists
///
/// A user playlist named "All Songs" is dropped in favour of the synthetic
/// one. Fails when either input is empty: there is nothing to play.
pub fn resolve(catalog: &Catalog, raw: &RawPlaylists) -> Result<ResolvedPlaylists> {
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog("no songs to resolve playlists from".to_string()));
    }
    if raw.is_empty() {
        return Err(Error::EmptyPlaylists("no playlists defined".to_string()));
    }

    let all_ids: Vec<String> = catalog.ids().map(str::to_string).collect();
    let mut entries = Vec::with_capacity(raw.len() + 1);
    entries.push((ALL_SONGS.to_string(), all_ids));

    let mut reported = HashSet::new();
    for (name, ids) in &raw.0 {
        if name == ALL_SONGS {
            warn!("Playlist '{}' is reserved; using the full catalog instead", ALL_SONGS);
            continue;
        }
        for id in ids {
            if !catalog.contains(id) && reported.insert(id.as_str()) {
                warn!("Playlist '{}' references unknown song '{}'", name, id);
            }
        }
        entries.push((name.clone(), ids.clone()));
    }

    Ok(ResolvedPlaylists { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SongRecord;

    fn catalog(ids: &[&str]) -> Catalog {
        Catalog::from_records(ids.iter().map(|id| (id.to_string(), SongRecord::default())))
    }

    fn raw(entries: &[(&str, &[&str])]) -> RawPlaylists {
        RawPlaylists::from_entries(entries.iter().map(|(name, ids)| {
            (name.to_string(), ids.iter().map(|s| s.to_string()).collect())
        }))
    }

    fn ids(list: &[String]) -> Vec<&str> {
        list.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_all_songs_first_in_catalog_order() {
        let resolved = resolve(
            &catalog(&["a.mp3", "b.mp3"]),
            &raw(&[("Favorites", &["b.mp3"])]),
        )
        .unwrap();

        let names: Vec<&str> = resolved.names().collect();
        assert_eq!(names, vec![ALL_SONGS, "Favorites"]);
        assert_eq!(ids(resolved.get(ALL_SONGS).unwrap()), vec!["a.mp3", "b.mp3"]);
        assert_eq!(ids(resolved.get("Favorites").unwrap()), vec!["b.mp3"]);
    }

    #[test]
    fn test_synthetic_all_songs_wins() {
        let resolved = resolve(
            &catalog(&["a.mp3", "b.mp3", "c.mp3"]),
            &raw(&[("All Songs", &["c.mp3"]), ("Road Trip", &["a.mp3", "c.mp3"])]),
        )
        .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            ids(resolved.get(ALL_SONGS).unwrap()),
            vec!["a.mp3", "b.mp3", "c.mp3"]
        );
        let names: Vec<&str> = resolved.names().collect();
        assert_eq!(names, vec![ALL_SONGS, "Road Trip"]);
    }

    #[test]
    fn test_unknown_ids_are_kept_in_order() {
        let resolved = resolve(
            &catalog(&["a.mp3"]),
            &raw(&[("Mixed", &["ghost.mp3", "a.mp3"])]),
        )
        .unwrap();

        assert_eq!(ids(resolved.get("Mixed").unwrap()), vec!["ghost.mp3", "a.mp3"]);
    }

    #[test]
    fn test_empty_inputs_fail() {
        assert!(matches!(
            resolve(&catalog(&[]), &raw(&[("P", &[] as &[&str])])),
            Err(Error::EmptyCatalog(_))
        ));
        assert!(matches!(
            resolve(&catalog(&["a.mp3"]), &RawPlaylists::default()),
            Err(Error::EmptyPlaylists(_))
        ));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let c = catalog(&["x.mp3", "y.mp3"]);
        let r = raw(&[("One", &["y.mp3"]), ("Two", &["x.mp3"])]);
        assert_eq!(resolve(&c, &r).unwrap(), resolve(&c, &r).unwrap());
    }

    #[test]
    fn test_load_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlists.json");
        std::fs::write(&path, r#"{"Zed": ["a.mp3"], "Alpha": [], "Mid": ["b.mp3", "a.mp3"]}"#)
            .unwrap();

        let loaded = RawPlaylists::load(&path).unwrap();
        let resolved = resolve(&catalog(&["a.mp3", "b.mp3"]), &loaded).unwrap();
        let names: Vec<&str> = resolved.names().collect();
        assert_eq!(names, vec![ALL_SONGS, "Zed", "Alpha", "Mid"]);
        assert!(resolved.get("Alpha").unwrap().is_empty());
    }
}
