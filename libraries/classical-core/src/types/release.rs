//! Release aggregate

use crate::error::{CoreError, Result};
use crate::types::{Artist, Edition, FileEntry, SiteMetadata, Track};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// An album-like object: its files, tags, and optional tracker view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Release {
    /// Release directory (absolute or relative to the working directory)
    pub root_path: String,

    /// Album title
    pub title: String,

    /// Year of the original recording/release
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_year: Option<u32>,

    /// Specific issue being described
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<Edition>,

    /// Album-level artists, derivable from the tracks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub album_artist: Vec<Artist>,

    /// Tracks and plain files, in ingestion order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<FileEntry>,

    /// Tracker-side descriptors (upload path only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_metadata: Option<SiteMetadata>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<FileEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FileEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Release {
    /// Create an empty release
    pub fn new(root_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Tracks in file-list order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.files.iter().filter_map(FileEntry::as_track)
    }

    /// Mutable tracks in file-list order
    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.files.iter_mut().filter_map(FileEntry::as_track_mut)
    }

    /// Number of tracks
    pub fn track_count(&self) -> usize {
        self.tracks().count()
    }

    /// Number of distinct discs
    pub fn disc_count(&self) -> usize {
        let mut discs: Vec<u32> = self.tracks().map(|t| t.disc).collect();
        discs.sort_unstable();
        discs.dedup();
        discs.len()
    }

    /// Final component of the root path
    pub fn folder_name(&self) -> &str {
        self.root_path
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.root_path)
    }

    /// Performer-like artists credited on every track, by first appearance
    ///
    /// Names match case-insensitively whatever the performer-like role on
    /// each track; the role of the first credit is kept.
    pub fn derive_album_artists(&self) -> Vec<Artist> {
        let tracks: Vec<&Track> = self.tracks().collect();
        let Some(first) = tracks.first() else {
            return Vec::new();
        };

        let mut derived: Vec<Artist> = Vec::new();
        for artist in first.performers() {
            if derived.iter().any(|d| d.same_name(&artist.name)) {
                continue;
            }
            let everywhere = tracks
                .iter()
                .all(|t| t.performers().any(|p| p.same_name(&artist.name)));
            if everywhere {
                derived.push(artist.clone());
            }
        }
        derived
    }

    /// Replace the album-level artists with the derived set
    pub fn refresh_album_artists(&mut self) {
        self.album_artist = self.derive_album_artists();
    }

    /// Every distinct artist across album level and tracks, by first appearance
    pub fn all_artists(&self) -> Vec<Artist> {
        let mut all: Vec<Artist> = Vec::new();
        let candidates = self
            .album_artist
            .iter()
            .chain(self.tracks().flat_map(|t| t.artists.iter()));
        for artist in candidates {
            if !all.contains(artist) {
                all.push(artist.clone());
            }
        }
        all
    }

    /// Check structural invariants
    pub fn validate_structure(&self) -> Result<()> {
        for track in self.tracks() {
            if track.disc < 1 || track.track < 1 {
                return Err(CoreError::invalid_release(format!(
                    "track {:?} has disc {} track {}; both must be at least 1",
                    track.path(),
                    track.disc,
                    track.track
                )));
            }
            for artist in &track.artists {
                artist.validate()?;
            }
        }
        for artist in &self.album_artist {
            artist.validate()?;
        }
        Ok(())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write pretty JSON to `path`
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a release from a JSON file
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
