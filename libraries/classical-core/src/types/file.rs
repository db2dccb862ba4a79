//! Release files and tracks
//!
//! A release's file list is heterogeneous: most entries are tracks, some are
//! plain files (logs, cue sheets, scans). `FileEntry` is the sum of the two.
//! On the wire both shapes are plain JSON objects; an object carrying any
//! track-specific field is read back as a track.

use crate::role::Role;
use crate::types::Artist;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A file relative to the release root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    /// Path relative to the release root, always with forward slashes
    pub path: String,

    /// Size in bytes
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u64,
}

fn is_zero(size: &u64) -> bool {
    *size == 0
}

impl File {
    /// Create a file entry, normalizing separators to forward slashes
    pub fn new(path: impl AsRef<str>, size: u64) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            size,
        }
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.')
            .filter(|idx| *idx > 0)
            .map(|idx| &name[idx + 1..])
    }

    /// Directory components between the release root and the file
    pub fn directories(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = self.path.split('/').filter(|p| !p.is_empty()).collect();
        parts.pop();
        parts
    }

    /// Number of directories between the release root and the file
    pub fn depth(&self) -> usize {
        self.directories().len()
    }
}

/// Convert any host path string to the forward-slash form used in releases
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches("./").to_string()
}

/// A file that carries track metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// The underlying file
    #[serde(flatten)]
    pub file: File,

    /// Disc number, starting at 1
    pub disc: u32,

    /// Track number, starting at 1
    pub track: u32,

    /// Free-form title
    pub title: String,

    /// Credited artists in source order
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
    /// Create a track with no artists and no known size
    pub fn new(path: impl AsRef<str>, disc: u32, track: u32, title: impl Into<String>) -> Self {
        Self {
            file: File::new(path, 0),
            disc: disc.max(1),
            track,
            title: title.into(),
            artists: Vec::new(),
        }
    }

    /// Builder-style artist addition
    pub fn with_artist(mut self, name: impl AsRef<str>, role: Role) -> Self {
        self.artists.push(Artist::new(name, role));
        self
    }

    /// Relative path of the track file
    pub fn path(&self) -> &str {
        &self.file.path
    }

    /// Artists credited with `role`
    pub fn artists_with_role(&self, role: Role) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(move |a| a.role == role)
    }

    /// Composer credits
    pub fn composers(&self) -> impl Iterator<Item = &Artist> {
        self.artists_with_role(Role::Composer)
    }

    /// Performer-like credits
    pub fn performers(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(|a| a.is_performer_like())
    }
}

/// One element of a release's file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// A non-track file (log, cue sheet, artwork)
    File(File),
    /// An audio track
    Track(Track),
}

impl FileEntry {
    /// Relative path
    pub fn path(&self) -> &str {
        &self.file().path
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.file().size
    }

    /// The underlying file
    pub fn file(&self) -> &File {
        match self {
            FileEntry::File(file) => file,
            FileEntry::Track(track) => &track.file,
        }
    }

    /// Mutable access to the underlying file
    pub fn file_mut(&mut self) -> &mut File {
        match self {
            FileEntry::File(file) => file,
            FileEntry::Track(track) => &mut track.file,
        }
    }

    /// The track, if this entry is one
    pub fn as_track(&self) -> Option<&Track> {
        match self {
            FileEntry::Track(track) => Some(track),
            FileEntry::File(_) => None,
        }
    }

    /// Mutable track access
    pub fn as_track_mut(&mut self) -> Option<&mut Track> {
        match self {
            FileEntry::Track(track) => Some(track),
            FileEntry::File(_) => None,
        }
    }

    /// Whether this entry is a track
    pub fn is_track(&self) -> bool {
        matches!(self, FileEntry::Track(_))
    }
}

impl From<File> for FileEntry {
    fn from(file: File) -> Self {
        FileEntry::File(file)
    }
}

impl From<Track> for FileEntry {
    fn from(track: Track) -> Self {
        FileEntry::Track(track)
    }
}

impl Serialize for FileEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FileEntry::File(file) => file.serialize(serializer),
            FileEntry::Track(track) => track.serialize(serializer),
        }
    }
}

/// Superset of both wire shapes, used for discrimination.
#[derive(Deserialize)]
struct RawEntry {
    path: Option<String>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    disc: u32,
    #[serde(default)]
    track: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    artists: Vec<Artist>,
}

impl<'de> Deserialize<'de> for FileEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntry::deserialize(deserializer)?;

        let path = raw.path.ok_or_else(|| {
            de::Error::custom("file entry has no path: neither a file nor a track")
        })?;
        let file = File::new(path, raw.size);

        let is_track =
            raw.disc != 0 || raw.track != 0 || !raw.title.is_empty() || !raw.artists.is_empty();

        if is_track {
            Ok(FileEntry::Track(Track {
                file,
                disc: raw.disc.max(1),
                track: raw.track,
                title: raw.title,
                artists: raw.artists,
            }))
        } else {
            Ok(FileEntry::File(file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        let file = File::new("CD1\\01 - Aria.flac", 10);
        assert_eq!(file.path, "CD1/01 - Aria.flac");
        assert_eq!(file.file_name(), "01 - Aria.flac");
        assert_eq!(file.extension(), Some("flac"));
        assert_eq!(file.directories(), vec!["CD1"]);
        assert_eq!(file.depth(), 1);
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(File::new(".hidden", 0).extension(), None);
    }

    #[test]
    fn plain_file_stays_plain() {
        let entry: FileEntry = serde_json::from_str(r#"{"path":"rip.log","size":42}"#).unwrap();
        assert_eq!(entry, FileEntry::File(File::new("rip.log", 42)));

        let entry: FileEntry = serde_json::from_str(r#"{"path":"cover.jpg"}"#).unwrap();
        assert!(!entry.is_track());
        assert_eq!(entry.size(), 0);
    }

    #[test]
    fn any_track_field_makes_a_track() {
        let entry: FileEntry =
            serde_json::from_str(r#"{"path":"01.flac","title":"Aria"}"#).unwrap();
        let track = entry.as_track().unwrap();
        assert_eq!(track.disc, 1);
        assert_eq!(track.title, "Aria");

        let entry: FileEntry = serde_json::from_str(
            r#"{"path":"02.flac","artists":[{"name":"Gould","role":"soloist"}]}"#,
        )
        .unwrap();
        assert!(entry.is_track());
    }

    #[test]
    fn entry_without_path_is_rejected() {
        let result: Result<FileEntry, _> = serde_json::from_str(r#"{"size":3}"#);
        assert!(result.is_err());

        let result: Result<FileEntry, _> = serde_json::from_str("17");
        assert!(result.is_err());
    }

    #[test]
    fn track_serializes_flat() {
        let track = Track::new("01.flac", 1, 1, "Aria").with_artist("Gould", Role::Soloist);
        let json = serde_json::to_value(FileEntry::Track(track)).unwrap();
        assert_eq!(json["path"], "01.flac");
        assert_eq!(json["disc"], 1);
        assert_eq!(json["artists"][0]["role"], "soloist");
        assert!(json.get("size").is_none());
    }
}
