//! Track filenames

use crate::sanitize::sanitize_title;
use classical_core::Track;

/// Extension used when a track path has none
const DEFAULT_EXTENSION: &str = "flac";

/// Track number as it appears in a filename
///
/// Zero-padded to two digits when the release has more than nine tracks.
pub fn track_number(track: u32, total_tracks: usize) -> String {
    if total_tracks > 9 {
        format!("{track:02}")
    } else {
        track.to_string()
    }
}

/// Compliant filename for `track`: `NN - Title.ext`
pub fn track_filename(track: &Track, total_tracks: usize) -> String {
    let extension = track
        .file
        .extension()
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!(
        "{} - {}.{}",
        track_number(track.track, total_tracks),
        sanitize_title(&track.title),
        extension
    )
}
