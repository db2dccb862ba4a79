
use classical_core::{Artist, Role};
use classical_metadata::{load_release, MetadataError};
use std::path::Path;
use test_helpers::{block, touch, MemoryCodec};

// ===== Directory walking =====

#[test]
fn loads_tracks_and_plain_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let codec = MemoryCodec::new();

    let second = touch(dir.path(), "02 - Variatio 1.flac", 20);
    let first = touch(dir.path(), "01 - Aria.flac", 10);
    touch(dir.path(), "rip.log", 5);
    touch(dir.path(), ".DS_Store", 1);

    codec.insert(
        &first,
        block(&[
            ("TITLE", "Aria"),
            ("ALBUM", "Goldberg Variations"),
            ("TRACKNUMBER", "1/2"),
            ("COMPOSER", "Johann Sebastian Bach"),
            ("SOLOIST", "Glenn Gould"),
            ("ORIGINALDATE", "1955"),
            ("DATE", "2002-08-27"),
            ("LABEL", "Sony Classical"),
            ("CATALOGNUMBER", "SMK 87703"),
        ]),
    );
    codec.insert(
        &second,
        block(&[
            ("TITLE", "Variatio 1"),
            ("TRACKNUMBER", "2/2"),
            ("COMPOSER", "Johann Sebastian Bach"),
            ("ARTIST", "Glenn Gould"),
            ("SOLOIST", "Glenn Gould"),
        ]),
    );

    let release = load_release(dir.path(), &codec).unwrap();

    let paths: Vec<&str> = release.files.iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["01 - Aria.flac", "02 - Variatio 1.flac", "rip.log"]);
    assert_eq!(release.track_count(), 2);
    assert_eq!(release.files[2].size(), 5);

    assert_eq!(release.title, "Goldberg Variations");
    assert_eq!(release.original_year, Some(1955));
    let edition = release.edition.as_ref().unwrap();
    assert_eq!(edition.year, Some(2002));
    assert_eq!(edition.catalog_number.as_deref(), Some("SMK 87703"));

    let tracks: Vec<_> = release.tracks().collect();
    assert_eq!(tracks[1].track, 2);
    assert_eq!(tracks[1].file.size, 20);
    assert!(tracks[1]
        .artists
        .contains(&Artist::new("Glenn Gould", Role::Soloist)));
    assert_eq!(
        release.album_artist,
        vec![Artist::new("Glenn Gould", Role::Soloist)]
    );
}

#[test]
fn disc_folders_keep_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let codec = MemoryCodec::new();
    let track = touch(dir.path(), "CD2/01 - Sinfonia.flac", 1);
    codec.insert(
        &track,
        block(&[("TITLE", "Sinfonia"), ("DISCNUMBER", "2/2"), ("TRACKNUMBER", "1")]),
    );

    let release = load_release(dir.path(), &codec).unwrap();
    let track = release.tracks().next().unwrap();
    assert_eq!(track.path(), "CD2/01 - Sinfonia.flac");
    assert_eq!(track.disc, 2);
}

#[test]
fn album_artist_tag_takes_roles_from_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let codec = MemoryCodec::new();
    let track = touch(dir.path(), "01.flac", 1);
    codec.insert(
        &track,
        block(&[
            ("TITLE", "Psalm 1"),
            ("TRACKNUMBER", "1"),
            ("CONDUCTOR", "Hans-Christoph Rademann"),
            ("ALBUMARTIST", "Hans-Christoph Rademann; Dresdner Kammerchor"),
        ]),
    );

    let release = load_release(dir.path(), &codec).unwrap();
    assert_eq!(
        release.album_artist,
        vec![
            Artist::new("Hans-Christoph Rademann", Role::Conductor),
            Artist::new("Dresdner Kammerchor", Role::Ensemble),
        ]
    );
}

// ===== Error paths =====

#[test]
fn missing_directory_is_an_error() {
    let result = load_release(Path::new("/nonexistent/release"), &MemoryCodec::new());
    assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
}

#[test]
fn empty_directory_is_an_empty_release() {
    let dir = tempfile::tempdir().unwrap();
    let release = load_release(dir.path(), &MemoryCodec::new()).unwrap();
    assert!(release.files.is_empty());
    assert!(release.title.is_empty());
}
