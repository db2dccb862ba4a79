//! Per-track naming rules

use crate::rule::{Rule, RuleContext};
use classical_core::{last_name, Issue, Scope};
use once_cell::sync::Lazy;
use regex::Regex;

static TRACK_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}[\s\-._]?.*\.\w+$").expect("track filename pattern")
});

/// 2.3.8: composers stay out of track titles.
pub struct ComposerInTitle;

impl Rule for ComposerInTitle {
    fn id(&self) -> &'static str {
        "2.3.8"
    }

    fn description(&self) -> &'static str {
        "Track titles must not contain the composer's name"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (ordinal, track) in ctx.tracks() {
            let title = track.title.to_lowercase();
            let mut reported: Vec<&str> = Vec::new();

            for composer in track.composers() {
                if reported.contains(&composer.name.as_str()) {
                    continue;
                }
                let full = composer.name.to_lowercase();
                let last = last_name(&composer.name).to_lowercase();
                if title.contains(&full) || contains_word(&title, &last) {
                    reported.push(&composer.name);
                    issues.push(Issue::error(
                        Scope::Track(ordinal),
                        self.id(),
                        format!(
                            "title {:?} contains composer {:?}",
                            track.title, composer.name
                        ),
                    ));
                }
            }
        }

        issues
    }
}

/// Whether `word` occurs in `haystack` delimited by non-alphanumerics
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// 2.3.13: filenames start with the track number.
pub struct FilenameFormat;

impl Rule for FilenameFormat {
    fn id(&self) -> &'static str {
        "2.3.13"
    }

    fn description(&self) -> &'static str {
        "Track filenames must start with the track number"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        ctx.tracks()
            .filter(|(_, track)| !TRACK_FILENAME.is_match(track.file.file_name()))
            .map(|(ordinal, track)| {
                Issue::error(
                    Scope::Track(ordinal),
                    self.id(),
                    format!(
                        "filename {:?} does not start with a track number",
                        track.file.file_name()
                    ),
                )
            })
            .collect()
    }
}

/// 2.3.14: two-digit track numbers on releases with more than nine tracks.
pub struct NumberPadding;

impl Rule for NumberPadding {
    fn id(&self) -> &'static str {
        "2.3.14"
    }

    fn description(&self) -> &'static str {
        "Track numbers must be zero-padded when there are more than nine tracks"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        if ctx.release.track_count() <= 9 {
            return Vec::new();
        }

        ctx.tracks()
            .filter(|(_, track)| {
                let digits = track
                    .file
                    .file_name()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .count();
                digits == 1
            })
            .map(|(ordinal, track)| {
                Issue::info(
                    Scope::Track(ordinal),
                    self.id(),
                    format!(
                        "filename {:?} should use a two-digit track number",
                        track.file.file_name()
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classical_core::{Level, Release, Role, Track};

    fn single(title: &str, composer: &str) -> Release {
        let mut release = Release::new("/m/x", "x");
        release.files.push(
            Track::new("01 - t.flac", 1, 1, title)
                .with_artist(composer, Role::Composer)
                .into(),
        );
        release
    }

    #[test]
    fn last_name_at_word_boundary_matches() {
        let release = single("Bach: Goldberg Variations", "Johann Sebastian Bach");
        let issues = ComposerInTitle.check(&RuleContext::new(&release));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].scope, Scope::Track(1));
        assert_eq!(issues[0].level, Level::Error);
    }

    #[test]
    fn last_name_inside_a_word_does_not_match() {
        let release = single("Offenbacher Suite", "Bach");
        assert!(ComposerInTitle.check(&RuleContext::new(&release)).is_empty());
    }

    #[test]
    fn word_matching() {
        assert!(contains_word("bach: aria", "bach"));
        assert!(contains_word("after bach", "bach"));
        assert!(!contains_word("bachianas", "bach"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn filename_needs_leading_number() {
        let mut release = Release::new("/m/x", "x");
        release.files.push(Track::new("01 - Aria.flac", 1, 1, "Aria").into());
        release.files.push(Track::new("1.Aria.flac", 1, 2, "Aria").into());
        release.files.push(Track::new("Aria.flac", 1, 3, "Aria").into());
        release.files.push(Track::new("01 - Aria", 1, 4, "Aria").into());

        let issues = FilenameFormat.check(&RuleContext::new(&release));
        let scopes: Vec<Scope> = issues.iter().map(|i| i.scope).collect();
        assert_eq!(scopes, vec![Scope::Track(3), Scope::Track(4)]);
    }

    #[test]
    fn padding_only_matters_past_nine_tracks() {
        let mut release = Release::new("/m/x", "x");
        for n in 1..=9 {
            release
                .files
                .push(Track::new(format!("{n} - t.flac"), 1, n, "t").into());
        }
        assert!(NumberPadding.check(&RuleContext::new(&release)).is_empty());

        release.files.push(Track::new("10 - t.flac", 1, 10, "t").into());
        let issues = NumberPadding.check(&RuleContext::new(&release));
        assert_eq!(issues.len(), 9);
        assert!(issues.iter().all(|i| i.level == Level::Info));
    }
}
