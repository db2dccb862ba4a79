//! Tracklist flattening
//!
//! Parent works with movements become one track per movement. A movement is
//! titled `"<parent>: <movement>"` and inherits the parent's credits ahead of
//! its own. Entries whose position does not parse (video bonus material,
//! headings) are dropped.

use classical_core::{parse_position, Position, ScrapedArtist, ScrapedTrack};
use tracing::debug;

/// A playable tracklist entry after hierarchy resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTrack {
    /// Parsed position
    pub position: Position,
    /// Title, prefixed with parent titles
    pub title: String,
    /// Main credits, inherited ones first
    pub artists: Vec<ScrapedArtist>,
    /// Secondary credits, inherited ones first
    pub extra_artists: Vec<ScrapedArtist>,
}

/// Flatten a tracklist into playable tracks in source order
pub fn flatten_tracklist(tracklist: &[ScrapedTrack]) -> Vec<FlatTrack> {
    let mut flat = Vec::new();
    for entry in tracklist {
        flatten_entry(entry, None, &[], &[], &mut flat);
    }
    flat
}

fn flatten_entry(
    entry: &ScrapedTrack,
    parent_title: Option<&str>,
    inherited_artists: &[ScrapedArtist],
    inherited_extra: &[ScrapedArtist],
    out: &mut Vec<FlatTrack>,
) {
    let title = match parent_title {
        Some(parent) if !parent.trim().is_empty() => {
            format!("{}: {}", parent.trim(), entry.title.trim())
        }
        _ => entry.title.trim().to_string(),
    };

    let mut artists = inherited_artists.to_vec();
    artists.extend(entry.artists.iter().cloned());
    let mut extra_artists = inherited_extra.to_vec();
    extra_artists.extend(entry.extra_artists.iter().cloned());

    if !entry.sub_tracks.is_empty() {
        for sub in &entry.sub_tracks {
            flatten_entry(sub, Some(&title), &artists, &extra_artists, out);
        }
        return;
    }

    let position = parse_position(&entry.position);
    if !position.is_valid() {
        debug!(position = %entry.position, title = %title, "Skipping non-track entry");
        return;
    }

    out.push(FlatTrack {
        position,
        title,
        artists,
        extra_artists,
    });
}
