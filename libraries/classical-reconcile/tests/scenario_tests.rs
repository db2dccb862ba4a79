//! Reconciliation scenarios: movement hoisting, album artists, tracker superset

use classical_core::{
    Artist, FileEntry, File, Level, Release, Role, ScrapeView, ScrapedArtist, ScrapedTrack,
    SiteMetadata, Track, TrackerArtist, TrackerView,
};
use classical_reconcile::{Mode, Reconciler};

// ===== Helpers =====

fn poulenc_tracklist() -> Vec<ScrapedTrack> {
    vec![
        ScrapedTrack::new("11", "Track 11").with_artist("Composer1", Some("Composed By")),
        ScrapedTrack::new("", "Parent")
            .with_artist("Poulenc", Some("Composed By"))
            .with_sub_track(ScrapedTrack::new("16", "O Mag"))
            .with_sub_track(ScrapedTrack::new("17", "Quem"))
            .with_sub_track(ScrapedTrack::new("18", "Vid"))
            .with_sub_track(ScrapedTrack::new("19", "Hod")),
        ScrapedTrack::new("20", "Track 20").with_artist("Composer2", Some("Composed By")),
    ]
}

fn choir_release(with_conductor: bool) -> Release {
    let mut track = Track::new("01 - Psalm 1.flac", 1, 1, "Psalm 1")
        .with_artist("RIAS-Kammerchor", Role::Ensemble)
        .with_artist("Heinrich Schütz", Role::Composer);
    if with_conductor {
        track = track.with_artist("Rademann", Role::Conductor);
    }

    let mut release = Release::new("/music/Psalmen", "Psalmen Davids");
    release.files.push(track.into());
    release.files.push(File::new("Psalmen.log", 4096).into());
    release
}

fn tracker_view() -> TrackerView {
    TrackerView {
        site_metadata: SiteMetadata {
            torrent_id: 42,
            group_id: 7,
            description: "Original rip".into(),
            media: "CD".into(),
            format: "FLAC".into(),
            encoding: "Lossless".into(),
            has_log: true,
            log_score: 100,
            ..SiteMetadata::default()
        },
        group_name: "Psalmen Davids".into(),
        artists: vec![
            TrackerArtist::new("RIAS-Kammerchor", "artists"),
            TrackerArtist::new("Rademann", "conductor"),
        ],
        ..TrackerView::default()
    }
}

// ===== Sub-track hoisting =====

#[test]
fn movements_are_hoisted_with_parent_composer() {
    let scrape = ScrapeView {
        title: "Choral Works".into(),
        tracklist: poulenc_tracklist(),
        ..ScrapeView::default()
    };

    let result = Reconciler::new(Mode::Strict).reconcile(Some(&scrape), None, None);
    assert!(result.issues.is_empty(), "{:?}", result.issues);
    let release = result.release.unwrap();

    let tracks: Vec<&Track> = release.tracks().collect();
    assert_eq!(tracks.len(), 6);

    let numbers: Vec<u32> = tracks.iter().map(|t| t.track).collect();
    assert_eq!(numbers, vec![11, 16, 17, 18, 19, 20]);

    assert_eq!(tracks[0].title, "Track 11");
    assert_eq!(tracks[0].artists, vec![Artist::new("Composer1", Role::Composer)]);

    for (track, sub) in tracks[1..5].iter().zip(["O Mag", "Quem", "Vid", "Hod"]) {
        assert_eq!(track.title, format!("Parent: {sub}"));
        assert_eq!(track.artists, vec![Artist::new("Poulenc", Role::Composer)]);
    }

    assert_eq!(tracks[5].title, "Track 20");
    assert_eq!(tracks[5].artists, vec![Artist::new("Composer2", Role::Composer)]);
}

// ===== Local pairing =====

#[test]
fn scraped_tracks_take_local_paths_and_keep_plain_files() {
    let scrape = ScrapeView {
        title: "Psalmen Davids".into(),
        tracklist: vec![ScrapedTrack::new("1", "Psalm 1")
            .with_artist("Heinrich Schütz", Some("Composed By"))
            .with_artist("RIAS-Kammerchor", None)
            .with_artist("Rademann", Some("Conductor"))],
        ..ScrapeView::default()
    };
    let local = choir_release(true);

    let result = Reconciler::default().reconcile(Some(&scrape), Some(&local), None);
    let release = result.release.unwrap();

    assert_eq!(release.root_path, "/music/Psalmen");
    assert_eq!(release.files.len(), 2);
    assert_eq!(release.files[0].path(), "01 - Psalm 1.flac");
    assert!(matches!(release.files[1], FileEntry::File(_)));

    // Role inferred from the local view
    let track = release.tracks().next().unwrap();
    assert!(track
        .artists
        .contains(&Artist::new("RIAS-Kammerchor", Role::Ensemble)));
}

#[test]
fn unmatched_positions_are_pairing_errors() {
    let scrape = ScrapeView {
        title: "Psalmen Davids".into(),
        tracklist: vec![ScrapedTrack::new("2", "Psalm 2")
            .with_artist("Heinrich Schütz", Some("Composed By"))],
        ..ScrapeView::default()
    };
    let local = choir_release(true);

    let result = Reconciler::default().reconcile(Some(&scrape), Some(&local), None);
    assert!(result.release.is_none());
    assert_eq!(
        result
            .issues
            .iter()
            .filter(|i| i.rule == "rec.pairing" && i.level == Level::Error)
            .count(),
        2
    );
}

// ===== Album-artist filter =====

fn three_track_local(soloists: [&str; 3]) -> Release {
    let mut release = Release::new("/music/Recital", "Recital");
    for (index, (soloist, composer)) in soloists
        .iter()
        .zip(["Bach", "Haydn", "Mozart"])
        .enumerate()
    {
        let number = u32::try_from(index + 1).unwrap();
        release.files.push(
            Track::new(format!("{number} - Piece.flac"), 1, number, "Piece")
                .with_artist(soloist, Role::Soloist)
                .with_artist(composer, Role::Composer)
                .into(),
        );
    }
    release
}

#[test]
fn universal_soloist_becomes_album_artist() {
    let local = three_track_local(["Gould", "Gould", "Gould"]);
    let release = Reconciler::default()
        .reconcile(None, Some(&local), None)
        .release
        .unwrap();
    assert_eq!(release.album_artist, vec![Artist::new("Gould", Role::Soloist)]);
}

#[test]
fn differing_soloist_empties_album_artists() {
    let local = three_track_local(["Gould", "Pollini", "Gould"]);
    let release = Reconciler::default()
        .reconcile(None, Some(&local), None)
        .release
        .unwrap();
    assert!(release.album_artist.is_empty());
}

// ===== Secondary credits =====

#[test]
fn instrument_credits_pass_strict_mode() {
    let sonata = ScrapedTrack {
        extra_artists: vec![
            ScrapedArtist::new("Jane Doe", Some("Violin")),
            ScrapedArtist::new("Bob Smith", Some("Engineer")),
        ],
        ..ScrapedTrack::new("1", "Sonata No. 1")
            .with_artist("Johann Sebastian Bach", Some("Composed By"))
    };
    let scrape = ScrapeView {
        title: "Violin Sonatas".into(),
        tracklist: vec![sonata],
        ..ScrapeView::default()
    };

    let result = Reconciler::new(Mode::Strict).reconcile(Some(&scrape), None, None);

    assert!(result.issues.is_empty(), "{:?}", result.issues);
    let release = result.release.unwrap();
    let track = release.tracks().next().unwrap();
    assert_eq!(
        track.artists,
        vec![
            Artist::new("Johann Sebastian Bach", Role::Composer),
            Artist::new("Jane Doe", Role::Performer),
        ]
    );
    assert_eq!(release.album_artist, vec![Artist::new("Jane Doe", Role::Performer)]);
}

// ===== Tracker reconciliation =====

#[test]
fn compatible_tracker_artists_pass() {
    let local = choir_release(true);
    let tracker = tracker_view();

    let result = Reconciler::new(Mode::Strict)
        .with_trump_reason("composer tags")
        .reconcile(None, Some(&local), Some(&tracker));

    assert!(result.issues.is_empty(), "{:?}", result.issues);
    let release = result.release.unwrap();
    let metadata = release.site_metadata.unwrap();
    assert_eq!(metadata.torrent_id, 42);
    assert_eq!(metadata.media, "CD");
    assert_eq!(metadata.log_score, 100);
    assert_eq!(
        metadata.description,
        "Original rip\n\n[Trump Upload] Fixed: composer tags"
    );
}

#[test]
fn missing_tracker_artist_is_one_error() {
    let local = choir_release(false);
    let tracker = tracker_view();

    let result = Reconciler::new(Mode::Strict).reconcile(None, Some(&local), Some(&tracker));

    assert!(result.release.is_none());
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].level, Level::Error);
    assert!(result.issues[0].message.contains("Rademann"));
}
