//! Merging scraped, local and tracker views into one release

use crate::hierarchy::{flatten_tracklist, FlatTrack};
use crate::roles::RoleResolver;
use classical_core::{
    Artist, ArtistMap, FileEntry, Issue, Level, Release, ScrapeView, Scope, SiteMetadata, Track,
    TrackerView,
};
use tracing::{debug, info, warn};

/// Rule id of issues raised for unresolved roles
pub const RULE_ROLES: &str = "rec.roles";
/// Rule id of issues raised when scraped and local tracks disagree
pub const RULE_PAIRING: &str = "rec.pairing";
/// Rule id of issues raised when there is nothing to reconcile
pub const RULE_SOURCE: &str = "rec.source";
/// Rule id of issues raised by the tracker superset check
pub const RULE_TRACKER: &str = "trk.artists";

/// How hard the engine fails on incomplete data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Unresolved roles and unpaired tracks are errors; no release is produced
    #[default]
    Strict,
    /// Those problems are warnings and the release keeps the gaps
    Lenient,
}

/// Release plus the issues found while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Merged release, absent when an error-level issue was raised
    pub release: Option<Release>,
    /// Issues in discovery order
    pub issues: Vec<Issue>,
}

impl Reconciliation {
    /// Whether any error-level issue was raised
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }
}

/// The reconciliation engine.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    mode: Mode,
    trump_reason: Option<String>,
}

impl Reconciler {
    /// Engine with the given failure mode
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            trump_reason: None,
        }
    }

    /// Reason appended to the tracker description of a trump upload
    pub fn with_trump_reason(mut self, reason: impl Into<String>) -> Self {
        self.trump_reason = Some(reason.into());
        self
    }

    /// Failure mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Merge up to three views of the same release
    pub fn reconcile(
        &self,
        scrape: Option<&ScrapeView>,
        local: Option<&Release>,
        tracker: Option<&TrackerView>,
    ) -> Reconciliation {
        let mut issues = Vec::new();
        let resolver = RoleResolver::new(scrape, local);

        let mut release = match (scrape, local) {
            (Some(scrape), _) => self.from_scrape(scrape, local, &resolver, &mut issues),
            (None, Some(local)) => self.from_local(local, &resolver),
            (None, None) => {
                issues.push(Issue::error(
                    Scope::Album,
                    RULE_SOURCE,
                    "no scraped, local or tracker-backed release to reconcile",
                ));
                return Reconciliation {
                    release: None,
                    issues,
                };
            }
        };

        for track in release.tracks_mut() {
            track.artists = dedup(&track.artists);
        }
        release.refresh_album_artists();
        release.album_artist = dedup(&release.album_artist);

        self.check_unknown_roles(&release, &mut issues);

        if let Some(tracker) = tracker {
            check_tracker(&release, tracker, &mut issues);
            release.site_metadata = Some(self.site_metadata(&tracker.site_metadata));
        }

        let failed = issues.iter().any(Issue::is_error);
        info!(
            tracks = release.track_count(),
            issues = issues.len(),
            failed,
            "Reconciled release"
        );

        Reconciliation {
            release: (!failed).then_some(release),
            issues,
        }
    }

    fn from_scrape(
        &self,
        scrape: &ScrapeView,
        local: Option<&Release>,
        resolver: &RoleResolver<'_>,
        issues: &mut Vec<Issue>,
    ) -> Release {
        let release_artists: Vec<Artist> = scrape
            .artists
            .iter()
            .map(|credit| Artist::new(&credit.name, resolver.resolve_scraped(credit)))
            .collect();

        let mut tracks: Vec<Track> = flatten_tracklist(&scrape.tracklist)
            .into_iter()
            .map(|flat| scraped_track(flat, &release_artists, resolver))
            .collect();
        debug!(tracks = tracks.len(), "Flattened scraped tracklist");

        let mut release = Release::new(
            local.map(|l| l.root_path.clone()).unwrap_or_default(),
            non_empty(&scrape.title)
                .or_else(|| local.and_then(|l| non_empty(&l.title)))
                .unwrap_or_default(),
        );
        release.original_year = scrape.year.or_else(|| local.and_then(|l| l.original_year));
        release.edition = scrape
            .edition()
            .or_else(|| local.and_then(|l| l.edition.clone()));
        release.site_metadata = local.and_then(|l| l.site_metadata.clone());

        match local {
            Some(local) => {
                self.pair_with_local(&mut tracks, local, issues);
                release.files = merge_files(tracks, local);
            }
            None => release.files = tracks.into_iter().map(FileEntry::Track).collect(),
        }
        release
    }

    fn from_local(&self, local: &Release, resolver: &RoleResolver<'_>) -> Release {
        let mut release = local.clone();
        for track in release.tracks_mut() {
            for artist in &mut track.artists {
                artist.role = resolver.resolve(&artist.name, artist.known_role());
            }
        }
        release
    }

    /// Copy local paths and sizes onto scraped tracks with the same position
    fn pair_with_local(&self, tracks: &mut [Track], local: &Release, issues: &mut Vec<Issue>) {
        let level = self.degraded_level();

        for (ordinal, track) in (1u32..).zip(tracks.iter_mut()) {
            let matching = local
                .tracks()
                .find(|l| l.disc == track.disc && l.track == track.track);
            match matching {
                Some(local_track) => track.file = local_track.file.clone(),
                None => issues.push(Issue::new(
                    level,
                    Scope::Track(ordinal),
                    RULE_PAIRING,
                    format!(
                        "no local file for disc {} track {} ({:?})",
                        track.disc, track.track, track.title
                    ),
                )),
            }
        }

        for local_track in local.tracks() {
            let paired = tracks
                .iter()
                .any(|t| t.disc == local_track.disc && t.track == local_track.track);
            if !paired {
                issues.push(Issue::new(
                    level,
                    Scope::Album,
                    RULE_PAIRING,
                    format!(
                        "local file {} (disc {} track {}) is not in the scraped tracklist",
                        local_track.path(),
                        local_track.disc,
                        local_track.track
                    ),
                ));
            }
        }
    }

    fn check_unknown_roles(&self, release: &Release, issues: &mut Vec<Issue>) {
        let mut reported: Vec<&str> = Vec::new();
        let unknown = release
            .album_artist
            .iter()
            .chain(release.tracks().flat_map(|t| t.artists.iter()))
            .filter(|artist| !artist.role.is_known());

        for artist in unknown {
            if reported.contains(&artist.name.as_str()) {
                continue;
            }
            reported.push(&artist.name);
            warn!(artist = %artist.name, "Artist role could not be resolved");
            issues.push(Issue::new(
                self.degraded_level(),
                Scope::Album,
                RULE_ROLES,
                format!("could not determine a role for artist {:?}", artist.name),
            ));
        }
    }

    fn site_metadata(&self, tracker: &SiteMetadata) -> SiteMetadata {
        let mut metadata = tracker.clone();
        if let Some(reason) = &self.trump_reason {
            metadata.description = merged_description(&tracker.description, reason);
        }
        metadata
    }

    fn degraded_level(&self) -> Level {
        match self.mode {
            Mode::Strict => Level::Error,
            Mode::Lenient => Level::Warning,
        }
    }
}

/// Description of a trump upload: the original plus the fix reason
pub fn merged_description(original: &str, reason: &str) -> String {
    format!("{original}\n\n[Trump Upload] Fixed: {reason}")
}

/// Build a track from a flattened entry
///
/// Entries whose own main credits name no performer are credited with the
/// release-level main artists first. Secondary credits whose role stays
/// unknown (engineers, liner notes) are left off the track.
fn scraped_track(
    flat: FlatTrack,
    release_artists: &[Artist],
    resolver: &RoleResolver<'_>,
) -> Track {
    let own: Vec<Artist> = flat
        .artists
        .iter()
        .map(|credit| Artist::new(&credit.name, resolver.resolve_scraped(credit)))
        .collect();
    let mut track = Track::new("", flat.position.disc, flat.position.track, flat.title);

    if own.iter().all(Artist::is_composer) {
        track.artists.extend(release_artists.iter().cloned());
    }
    track.artists.extend(own);

    for credit in &flat.extra_artists {
        match resolver.resolve_extra(credit).known() {
            Some(role) => track.artists.push(Artist::new(&credit.name, role)),
            None => debug!(
                artist = %credit.name,
                role = credit.role.as_deref().unwrap_or_default(),
                "Skipping secondary credit without a known role"
            ),
        }
    }
    track
}

/// Scraped tracks followed by the local non-track files
fn merge_files(tracks: Vec<Track>, local: &Release) -> Vec<FileEntry> {
    tracks
        .into_iter()
        .map(FileEntry::Track)
        .chain(
            local
                .files
                .iter()
                .filter(|entry| !entry.is_track())
                .cloned(),
        )
        .collect()
}

fn dedup(artists: &[Artist]) -> Vec<Artist> {
    let mut map: ArtistMap = artists.iter().collect();
    map.remove_unknown_roles();
    map.flatten()
}

fn check_tracker(release: &Release, tracker: &TrackerView, issues: &mut Vec<Issue>) {
    for (name, role) in tracker.missing_from(&release.all_artists()) {
        issues.push(Issue::error(
            Scope::Album,
            RULE_TRACKER,
            format!("tracker artist {name} ({role}) has no compatible local artist"),
        ));
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use classical_core::{Role, ScrapedArtist, ScrapedTrack};

    #[test]
    fn nothing_to_reconcile_is_an_error() {
        let result = Reconciler::default().reconcile(None, None, None);
        assert!(result.release.is_none());
        assert_eq!(result.issues[0].rule, RULE_SOURCE);
    }

    #[test]
    fn release_artists_fill_tracks_without_performers() {
        let scrape = ScrapeView {
            title: "Goldberg Variations".into(),
            artists: vec![ScrapedArtist::new("Glenn Gould", Some("Soloist"))],
            tracklist: vec![
                ScrapedTrack::new("1", "Aria")
                    .with_artist("Johann Sebastian Bach", Some("Composed By")),
                ScrapedTrack::new("2", "Variatio 1"),
            ],
            ..ScrapeView::default()
        };

        let result = Reconciler::default().reconcile(Some(&scrape), None, None);
        let release = result.release.unwrap();
        let tracks: Vec<&Track> = release.tracks().collect();

        assert_eq!(
            tracks[0].artists,
            vec![
                Artist::new("Glenn Gould", Role::Soloist),
                Artist::new("Johann Sebastian Bach", Role::Composer),
            ]
        );
        assert_eq!(tracks[1].artists, vec![Artist::new("Glenn Gould", Role::Soloist)]);
        assert_eq!(release.album_artist, vec![Artist::new("Glenn Gould", Role::Soloist)]);
    }

    #[test]
    fn unknown_roles_fail_strict_and_warn_lenient() {
        let scrape = ScrapeView {
            title: "Recital".into(),
            tracklist: vec![ScrapedTrack::new("1", "Etude").with_artist("Mystery Pianist", None)],
            ..ScrapeView::default()
        };

        let strict = Reconciler::new(Mode::Strict).reconcile(Some(&scrape), None, None);
        assert!(strict.release.is_none());
        assert_eq!(strict.issues.len(), 1);
        assert!(strict.issues[0].message.contains("Mystery Pianist"));

        let lenient = Reconciler::new(Mode::Lenient).reconcile(Some(&scrape), None, None);
        let release = lenient.release.unwrap();
        assert_eq!(lenient.issues[0].level, Level::Warning);
        assert_eq!(
            release.tracks().next().unwrap().artists[0].role,
            Role::Unknown
        );
    }

    #[test]
    fn duplicate_credits_collapse() {
        let scrape = ScrapeView {
            title: "X".into(),
            tracklist: vec![ScrapedTrack::new("1", "A")
                .with_artist("Gould", Some("Soloist"))
                .with_artist("Gould", Some("Solo"))
                .with_artist("Bach", Some("Composed By"))],
            ..ScrapeView::default()
        };
        let release = Reconciler::default()
            .reconcile(Some(&scrape), None, None)
            .release
            .unwrap();
        assert_eq!(release.tracks().next().unwrap().artists.len(), 2);
    }

    #[test]
    fn trump_description_is_appended() {
        assert_eq!(
            merged_description("Ripped with EAC", "composer tags"),
            "Ripped with EAC\n\n[Trump Upload] Fixed: composer tags"
        );
    }
}
