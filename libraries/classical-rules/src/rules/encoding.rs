//! Character-encoding rules
//!
//! Catches the replacement character, stray control characters, and the
//! digraphs UTF-8 text produces when it is decoded as Latin-1 or CP1252.

use crate::rule::{Rule, RuleContext};
use classical_core::{Issue, Scope};

/// UTF-8 sequences misread as Latin-1 / CP1252
const MOJIBAKE: &[&str] = &[
    "Ã©", "Ã¨", "Ã¶", "Ã¡", "Ã¤", "Ã¼", "Ã³", "Ã­", "Ãº", "Ã±", "Ã§", "Ã¢", "Ãª", "Ã®", "Ã´",
    "Ã»", "Ã«", "Ã¯", "Ã¸", "Ã¥", "Ã¦", "Ã\u{9f}", "Ã\u{89}", "Ã\u{96}", "Ã\u{9c}", "â€™",
    "â€œ", "â€\u{9d}", "â€“", "â€”", "â€¦", "Ä\u{8d}", "Å¡", "Å¾", "Å™", "Ã…",
];

/// The Unicode replacement character
const REPLACEMENT: char = '\u{FFFD}';

/// Describe the first encoding problem in `text`, if any
pub fn encoding_problem(text: &str) -> Option<String> {
    if text.contains(REPLACEMENT) {
        return Some("contains the replacement character U+FFFD".to_string());
    }
    if let Some(c) = text
        .chars()
        .find(|c| (*c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r'))
    {
        return Some(format!("contains control character U+{:04X}", c as u32));
    }
    MOJIBAKE
        .iter()
        .find(|digraph| text.contains(**digraph))
        .map(|digraph| format!("contains mojibake {digraph:?}"))
}

/// enc.album: the album title is clean.
pub struct AlbumEncoding;

impl Rule for AlbumEncoding {
    fn id(&self) -> &'static str {
        "enc.album"
    }

    fn description(&self) -> &'static str {
        "Album title must be free of encoding damage"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        encoding_problem(&ctx.release.title)
            .map(|problem| {
                Issue::error(
                    Scope::Album,
                    self.id(),
                    format!("album title {:?} {problem}", ctx.release.title),
                )
            })
            .into_iter()
            .collect()
    }
}

/// enc.track: track titles, artist names and filenames are clean.
pub struct TrackEncoding;

impl Rule for TrackEncoding {
    fn id(&self) -> &'static str {
        "enc.track"
    }

    fn description(&self) -> &'static str {
        "Track titles, artist names and filenames must be free of encoding damage"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (ordinal, track) in ctx.tracks() {
            let fields = std::iter::once(("title", track.title.as_str()))
                .chain(track.artists.iter().map(|a| ("artist", a.name.as_str())))
                .chain(std::iter::once(("filename", track.file.file_name())));

            for (field, value) in fields {
                if let Some(problem) = encoding_problem(value) {
                    issues.push(Issue::error(
                        Scope::Track(ordinal),
                        self.id(),
                        format!("{field} {value:?} {problem}"),
                    ));
                }
            }
        }

        issues
    }
}
