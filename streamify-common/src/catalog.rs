//! Song catalog loaded from `metadata.json`
//!
//! The catalog file is a JSON object keyed by song id (the audio filename).
//! Each value may carry `title`, `singer` and `movie`. Document order is kept:
//! it defines the order of the "All Songs" playlist.

use crate::{Error, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info};

/// Artist shown when the catalog does not name one
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album shown when the catalog does not name one
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One catalog entry as stored on disk
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SongRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "singer")]
    pub artist: Option<String>,
    #[serde(default, rename = "movie")]
    pub album: Option<String>,
}

/// Song metadata with display defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongMetadata {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl SongMetadata {
    /// Apply defaults to a stored record
    pub fn from_record(id: &str, record: SongRecord) -> Self {
        Self {
            id: id.to_string(),
            title: record.title.unwrap_or_else(|| derive_title(id).to_string()),
            artist: record.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: record.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        }
    }

    /// Metadata for an id the catalog does not know
    pub fn fallback(id: &str) -> Self {
        Self::from_record(id, SongRecord::default())
    }
}

/// Title derived from a song id: the file name without its final extension
///
/// `"b.mp3"` becomes `"b"`; names with no extension or a leading dot only
/// (`".hidden"`) are returned unchanged.
pub fn derive_title(id: &str) -> &str {
    let name_start = id.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match id[name_start..].rfind('.') {
        Some(dot) if id[name_start..][..dot].chars().any(|c| c != '.') => {
            &id[..name_start + dot]
        }
        _ => id,
    }
}

/// Immutable, ordered song catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<SongMetadata>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from `(id, record)` pairs in catalog order
    ///
    /// A repeated id keeps its first position and takes the later record.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, SongRecord)>,
    {
        let mut catalog = Self::default();
        for (id, record) in records {
            let song = SongMetadata::from_record(&id, record);
            match catalog.index.get(&id) {
                Some(&pos) => catalog.songs[pos] = song,
                None => {
                    catalog.index.insert(id, catalog.songs.len());
                    catalog.songs.push(song);
                }
            }
        }
        catalog
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading catalog from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let entries: OrderedEntries<SongRecord> = serde_json::from_str(&content)?;
        let catalog = Self::from_records(entries.0);
        info!("Loaded {} songs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Song ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.songs.iter().map(|s| s.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&SongMetadata> {
        self.index.get(id).map(|&pos| &self.songs[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Metadata for `id`, or id-derived defaults when the catalog lacks it
    pub fn metadata_or_default(&self, id: &str) -> SongMetadata {
        self.get(id)
            .cloned()
            .unwrap_or_else(|| SongMetadata::fallback(id))
    }

    /// Fail when the catalog holds no songs
    pub fn ensure_not_empty(&self, source: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyCatalog(source.display().to_string()));
        }
        Ok(())
    }
}

/// JSON object read as `(key, value)` pairs in document order
///
/// Repeated keys are kept as they appear; callers decide how to merge them.
#[derive(Debug)]
pub(crate) struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
