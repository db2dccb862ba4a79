//! Tracker-assigned descriptors

use serde::{Deserialize, Serialize};

/// Descriptors the tracker holds for an existing torrent.
///
/// Carried verbatim through reconciliation; only the description is
/// rewritten for a trump upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteMetadata {
    /// Torrent identifier
    #[serde(default)]
    pub torrent_id: u64,

    /// Torrent group identifier
    #[serde(default)]
    pub group_id: u64,

    /// Group tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Release description
    #[serde(default)]
    pub description: String,

    /// Source medium (CD, WEB, Vinyl)
    #[serde(default)]
    pub media: String,

    /// Audio format (FLAC)
    #[serde(default)]
    pub format: String,

    /// Encoding (Lossless, 24bit Lossless)
    #[serde(default)]
    pub encoding: String,

    /// Whether a rip log is attached
    #[serde(default)]
    pub has_log: bool,

    /// Whether a cue sheet is attached
    #[serde(default)]
    pub has_cue: bool,

    /// Log checker score
    #[serde(default)]
    pub log_score: i32,

    /// Tracker release type code
    #[serde(default)]
    pub release_type: u32,

    /// Announce URL for the new torrent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub announce_url: String,
}
