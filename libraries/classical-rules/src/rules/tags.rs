//! Required tag rules

use crate::rule::{Rule, RuleContext};
use classical_core::{Issue, Scope};

/// 2.3.16.4: title, artist, album, track number and composer are present.
pub struct RequiredTags;

impl Rule for RequiredTags {
    fn id(&self) -> &'static str {
        "2.3.16.4"
    }

    fn description(&self) -> &'static str {
        "Every track carries title, artist, album, track number and composer"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut missing = |message: String| {
            issues.push(Issue::error(Scope::Album, "2.3.16.4", message));
        };

        if ctx.release.title.trim().is_empty() {
            missing("missing album title".to_string());
        }

        for (ordinal, track) in ctx.tracks() {
            if track.title.trim().is_empty() {
                missing(format!("track {ordinal} ({}) is missing a title", track.path()));
            }
            if track.track == 0 {
                missing(format!(
                    "track {ordinal} ({}) is missing a track number",
                    track.path()
                ));
            }
            if !track.artists.iter().any(|a| !a.is_composer()) {
                missing(format!("track {ordinal} ({}) is missing an artist", track.path()));
            }
            if track.composers().next().is_none() {
                missing(format!("track {ordinal} ({}) is missing a composer", track.path()));
            }
        }

        issues
    }
}

/// album.empty: a release needs at least one track.
pub struct EmptyAlbum;

impl Rule for EmptyAlbum {
    fn id(&self) -> &'static str {
        "album.empty"
    }

    fn description(&self) -> &'static str {
        "A release must contain at least one track"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        if ctx.release.track_count() > 0 {
            return Vec::new();
        }
        vec![Issue::error(Scope::Album, self.id(), "empty album")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classical_core::{File, Release, Role, Track};

    #[test]
    fn complete_track_passes() {
        let mut release = Release::new("/m/x", "Album");
        release.files.push(
            Track::new("01.flac", 1, 1, "Aria")
                .with_artist("Gould", Role::Soloist)
                .with_artist("Bach", Role::Composer)
                .into(),
        );
        assert!(RequiredTags.check(&RuleContext::new(&release)).is_empty());
    }

    #[test]
    fn each_missing_tag_is_reported() {
        let mut release = Release::new("/m/x", " ");
        release.files.push(Track::new("01.flac", 1, 0, "").into());

        let issues = RequiredTags.check(&RuleContext::new(&release));
        assert_eq!(issues.len(), 5);
        assert!(issues.iter().all(|i| i.scope == Scope::Album));
        assert!(issues[4].message.contains("composer"));
    }

    #[test]
    fn composer_alone_is_not_an_artist() {
        let mut release = Release::new("/m/x", "Album");
        release.files.push(
            Track::new("01.flac", 1, 1, "Aria")
                .with_artist("Bach", Role::Composer)
                .into(),
        );
        let issues = RequiredTags.check(&RuleContext::new(&release));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("artist"));
    }

    #[test]
    fn release_without_tracks_is_empty() {
        let mut release = Release::new("/m/x", "Album");
        release.files.push(File::new("rip.log", 1).into());

        let issues = EmptyAlbum.check(&RuleContext::new(&release));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "empty album");
    }
}
