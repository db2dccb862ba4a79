//! On-disk response cache
//!
//! JSON blobs live under `<root>/<namespace>/<key>.json`, wrapped with the
//! time they were written and the unsanitized key. Raw byte blobs (torrent
//! files) sit next to them with their own extension.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Namespace for discography responses
pub const DISCOGS_NAMESPACE: &str = "discogs";

/// Namespace for created torrent files
pub const TORRENT_NAMESPACE: &str = "torrents";

/// Longest key stored verbatim
const MAX_KEY_LEN: usize = 200;

/// Characters that force a key to be hashed
const UNSAFE_KEY_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\n', '\r'];

/// Extensions removed by [`Cache::clear`]
const CLEARED_EXTENSIONS: &[&str] = &["json", "torrent"];

#[derive(Serialize)]
struct EntryRef<'a, T> {
    timestamp: DateTime<Utc>,
    data: &'a T,
    original_key: &'a str,
}

#[derive(Deserialize)]
struct Entry<T> {
    timestamp: DateTime<Utc>,
    data: T,
    original_key: String,
}

/// Filesystem-safe form of a cache key
///
/// Keys that are too long or contain path or shell metacharacters are
/// replaced by their md5 digest.
pub fn sanitize_key(key: &str) -> String {
    if key.is_empty() || key.len() > MAX_KEY_LEN || key.contains(UNSAFE_KEY_CHARS) {
        format!("{:x}", md5::compute(key.as_bytes()))
    } else {
        key.to_string()
    }
}

/// Typed blob store with a time-to-live.
#[derive(Debug, Clone)]
pub struct Cache {
    root: PathBuf,
    ttl: Duration,
}

impl Cache {
    /// Create a cache rooted at `root`; a zero `ttl` never expires entries
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    /// `$XDG_CACHE_HOME/classical-tagger`, when a cache directory is known
    pub fn default_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("classical-tagger"))
    }

    /// Cache root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// File holding `key` in `namespace` with the given extension
    pub fn entry_path(&self, key: &str, namespace: &str, extension: &str) -> PathBuf {
        self.root
            .join(namespace)
            .join(format!("{}.{extension}", sanitize_key(key)))
    }

    /// Store `value` as JSON
    pub fn save<T: Serialize>(&self, key: &str, value: &T, namespace: &str) -> Result<()> {
        let entry = EntryRef {
            timestamp: Utc::now(),
            data: value,
            original_key: key,
        };
        let json = serde_json::to_vec_pretty(&entry)?;
        self.write(&self.entry_path(key, namespace, "json"), &json)?;
        debug!(key, namespace, "Cached entry");
        Ok(())
    }

    /// Fresh, decodable value for `key`, if any
    pub fn load<T: DeserializeOwned>(&self, key: &str, namespace: &str) -> Option<T> {
        let path = self.entry_path(key, namespace, "json");
        let bytes = fs::read(&path).ok()?;

        let entry: Entry<T> = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, namespace, error = %e, "Ignoring undecodable cache entry");
                return None;
            }
        };

        if !self.ttl.is_zero() {
            let age = Utc::now().signed_duration_since(entry.timestamp);
            let fresh = age
                .to_std()
                .map(|age| age < self.ttl)
                .unwrap_or(true);
            if !fresh {
                debug!(key, namespace, "Cache entry expired");
                return None;
            }
        }

        debug!(key, namespace, "Cache hit");
        Some(entry.data)
    }

    /// Whether the entry is missing or older than the time-to-live, by mtime
    pub fn is_expired(&self, key: &str, namespace: &str) -> bool {
        let path = self.entry_path(key, namespace, "json");
        let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) else {
            return true;
        };
        if self.ttl.is_zero() {
            return false;
        }
        SystemTime::now()
            .duration_since(modified)
            .map(|age| age >= self.ttl)
            .unwrap_or(false)
    }

    /// Store raw bytes under `key` with `extension`
    pub fn save_bytes(
        &self,
        key: &str,
        bytes: &[u8],
        namespace: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        let path = self.entry_path(key, namespace, extension);
        self.write(&path, bytes)?;
        Ok(path)
    }

    /// Raw bytes stored under `key`, if present
    pub fn load_bytes(&self, key: &str, namespace: &str, extension: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(key, namespace, extension)).ok()
    }

    /// Remove every JSON and torrent entry of `namespace`; returns the count
    pub fn clear(&self, namespace: &str) -> Result<usize> {
        let dir = self.root.join(namespace);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let clearable = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| CLEARED_EXTENSIONS.contains(&ext));
            if clearable && path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        debug!(namespace, removed, "Cleared cache namespace");
        Ok(removed)
    }

    /// Remove one JSON entry; missing entries are fine
    pub fn clear_key(&self, key: &str, namespace: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key, namespace, "json")) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}
