//! Release directory names
//!
//! The name is assembled from optional parts in a fixed decision order:
//! title, ` [FLAC]`, ` - <year>`, `<composer> - ` prefix, then ` (<performers>)`
//! before the year. A part is kept only if the rendered name still fits in
//! [`MAX_DIRECTORY_CHARS`], so the same release always yields the same name.

use crate::sanitize::{char_len, sanitize_component, truncate_chars, UNTITLED};
use classical_core::{last_name, Artist, Release};

/// Longest directory name, in characters
pub const MAX_DIRECTORY_CHARS: usize = 180;

/// Longest performer list, in characters, ellipsis included
pub const MAX_PERFORMER_CHARS: usize = 50;

/// Most performers named in a directory
pub const MAX_PERFORMERS: usize = 3;

/// Format marker appended to the name
const FORMAT_MARKER: &str = "[FLAC]";

#[derive(Debug, Default)]
struct NameParts {
    composer: Option<String>,
    title: String,
    performers: Option<String>,
    year: Option<u32>,
    format: bool,
}

impl NameParts {
    fn render(&self) -> String {
        let mut name = String::new();
        if let Some(composer) = &self.composer {
            name.push_str(composer);
            name.push_str(" - ");
        }
        name.push_str(&self.title);
        if let Some(performers) = &self.performers {
            name.push_str(" (");
            name.push_str(performers);
            name.push(')');
        }
        if let Some(year) = self.year {
            name.push_str(&format!(" - {year}"));
        }
        if self.format {
            name.push(' ');
            name.push_str(FORMAT_MARKER);
        }
        name
    }

    fn fits(&self) -> bool {
        char_len(&self.render()) <= MAX_DIRECTORY_CHARS
    }

    /// Apply `set`, undoing it with `unset` if the name no longer fits
    fn try_add(&mut self, set: impl FnOnce(&mut Self), unset: impl FnOnce(&mut Self)) {
        set(self);
        if !self.fits() {
            unset(self);
        }
    }
}

/// Compliant directory name for a release, at most 180 characters
pub fn directory_name(release: &Release) -> String {
    let title = sanitize_component(&release.title);
    let title = if title.is_empty() { UNTITLED.to_string() } else { title };

    let mut parts = NameParts {
        title: truncate_chars(&title, MAX_DIRECTORY_CHARS).trim_end().to_string(),
        ..NameParts::default()
    };

    parts.try_add(|p| p.format = true, |p| p.format = false);

    let year = release
        .original_year
        .or_else(|| release.edition.as_ref().and_then(|e| e.year));
    if let Some(year) = year {
        parts.try_add(|p| p.year = Some(year), |p| p.year = None);
    }

    let composer = composer_label(&select_composers(release));
    if !composer.is_empty() {
        parts.try_add(|p| p.composer = Some(composer), |p| p.composer = None);
    }

    let performers = performer_label(&select_performers(release));
    if !performers.is_empty() {
        parts.try_add(|p| p.performers = Some(performers), |p| p.performers = None);
    }

    parts.render()
}

/// Composers to name in the directory
///
/// One composer credited on more than half of the tracks wins alone;
/// otherwise every distinct composer is listed by first appearance.
pub fn select_composers(release: &Release) -> Vec<String> {
    let total = release.track_count();
    let counts = count_tracks_per_name(release, |artist| artist.is_composer());

    if let Some((name, _)) = counts.iter().find(|(_, count)| count * 2 > total) {
        return vec![name.clone()];
    }
    counts.into_iter().map(|(name, _)| name).collect()
}

/// Performers to name in the directory
///
/// Performer-like artists credited on at least half of the tracks (rounded
/// up), the first three by first appearance.
pub fn select_performers(release: &Release) -> Vec<String> {
    let threshold = release.track_count().div_ceil(2);
    count_tracks_per_name(release, |artist| artist.is_performer_like())
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(name, _)| name)
        .take(MAX_PERFORMERS)
        .collect()
}

/// Comma-joined composer last names
pub fn composer_label(composers: &[String]) -> String {
    sanitize_component(&join_last_names(composers))
}

/// Comma-joined performer last names, capped at 50 characters with an ellipsis
pub fn performer_label(performers: &[String]) -> String {
    let label = sanitize_component(&join_last_names(performers));
    if char_len(&label) <= MAX_PERFORMER_CHARS {
        return label;
    }
    let cut = truncate_chars(&label, MAX_PERFORMER_CHARS - 1).trim_end_matches([',', ' ']);
    format!("{cut}…")
}

fn join_last_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| last_name(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct names matching `filter`, with the number of tracks crediting them
fn count_tracks_per_name(
    release: &Release,
    filter: impl Fn(&Artist) -> bool,
) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for track in release.tracks() {
        let mut seen_on_track: Vec<&str> = Vec::new();
        for artist in track.artists.iter().filter(|a| filter(a)) {
            if seen_on_track.contains(&artist.name.as_str()) {
                continue;
            }
            seen_on_track.push(&artist.name);
            match counts.iter_mut().find(|(name, _)| *name == artist.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((artist.name.clone(), 1)),
            }
        }
    }
    counts
}
