//! Rule engine

use crate::report::Report;
use crate::rule::{Rule, RuleContext};
use crate::rules::{
    AlbumEncoding, CatalogNumber, ComposerFolder, ComposerInTitle, EmptyAlbum, FilenameFormat,
    FolderTitle, LeadingSpace, MissingEdition, Nesting, NumberPadding, PathLength, RequiredTags,
    TrackEncoding, TrackerArtists,
};
use classical_core::{Issue, Release, TrackerView};
use tracing::debug;

/// Runs a fixed catalog of rules against a release.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleEngine {
    /// Engine with the full style-guide catalog
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Box::new(EmptyAlbum),
                Box::new(FolderTitle),
                Box::new(Nesting),
                Box::new(ComposerInTitle),
                Box::new(PathLength),
                Box::new(FilenameFormat),
                Box::new(NumberPadding),
                Box::new(RequiredTags),
                Box::new(LeadingSpace),
                Box::new(AlbumEncoding),
                Box::new(TrackEncoding),
                Box::new(CatalogNumber),
                Box::new(MissingEdition),
                Box::new(ComposerFolder),
                Box::new(TrackerArtists),
            ],
        }
    }

    /// Engine with a custom rule list
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Ids of the configured rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Run every rule, concatenating issues in rule order
    pub fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(ctx);
            debug!(rule = rule.id(), issues = found.len(), "Rule evaluated");
            issues.extend(found);
        }
        issues
    }

    /// Validate a release, optionally against the tracker's record
    pub fn validate(&self, release: &Release, tracker: Option<&TrackerView>) -> Report {
        let mut ctx = RuleContext::new(release);
        if let Some(tracker) = tracker {
            ctx = ctx.with_tracker(tracker);
        }
        Report::new(self.run(&ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classical_core::{Edition, Level, Role, Track};

    fn compliant_release() -> Release {
        let mut release = Release::new(
            "/music/Bach - Goldberg Variations (Gould) - 1981 [FLAC]",
            "Goldberg Variations",
        );
        release.original_year = Some(1981);
        release.edition = Edition::new(Some("CBS".into()), Some("MK 37779".into()), Some(1982));
        release.files.push(
            Track::new("1 - Aria.flac", 1, 1, "Aria")
                .with_artist("Glenn Gould", Role::Soloist)
                .with_artist("Johann Sebastian Bach", Role::Composer)
                .into(),
        );
        release.files.push(
            Track::new("2 - Variatio 1.flac", 1, 2, "Variatio 1")
                .with_artist("Glenn Gould", Role::Soloist)
                .with_artist("Johann Sebastian Bach", Role::Composer)
                .into(),
        );
        release
    }

    #[test]
    fn compliant_release_is_clean() {
        let report = RuleEngine::standard().validate(&compliant_release(), None);
        assert!(report.is_clean(), "{}", report.render());
    }

    #[test]
    fn empty_release_reports_empty_album() {
        let release = Release::new("/music/Nothing", "Nothing");
        let report = RuleEngine::standard().validate(&release, None);

        assert!(report.has_errors());
        assert!(report
            .issues()
            .iter()
            .any(|i| i.rule == "album.empty" && i.level == Level::Error));
    }

    #[test]
    fn catalog_contains_every_rule_id() {
        let ids = RuleEngine::standard().rule_ids();
        for id in [
            "2.3.2", "2.3.3", "2.3.8", "2.3.12", "2.3.13", "2.3.14", "2.3.16.4", "2.3.20",
            "enc.album", "enc.track", "ed.catalog", "ed.missing", "cls.folder", "album.empty",
            "trk.artists",
        ] {
            assert!(ids.contains(&id), "missing rule {id}");
        }
    }
}
