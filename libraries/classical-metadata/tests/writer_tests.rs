
use classical_core::{Edition, Release, Role, Track};
use classical_metadata::{load_release, FieldStatus, MetadataError, TagWriter};
use test_helpers::{block, touch, MemoryCodec};

fn release_in(root: &std::path::Path) -> Release {
    let mut release = Release::new(root.display().to_string(), "Goldberg Variations");
    release.original_year = Some(1955);
    release.edition = Edition::new(Some("Sony Classical".into()), None, Some(2002));
    for (n, title) in [(1, "Aria"), (2, "Variatio 1")] {
        release.files.push(
            Track::new(format!("0{n}.flac"), 1, n, title)
                .with_artist("Johann Sebastian Bach", Role::Composer)
                .with_artist("Glenn Gould", Role::Soloist)
                .into(),
        );
    }
    release.refresh_album_artists();
    release
}

// ===== Planning =====

#[test]
fn plans_cover_every_track() {
    let dir = tempfile::tempdir().unwrap();
    let codec = MemoryCodec::new();
    let first = touch(dir.path(), "01.flac", 1);
    touch(dir.path(), "02.flac", 1);
    codec.insert(&first, block(&[("TITLE", "Aria"), ("ENCODER", "flac 1.4")]));

    let writer = TagWriter::new(codec);
    let plans = writer.plan_release(&release_in(dir.path())).unwrap();
    assert_eq!(plans.len(), 2);

    let status = |key: &str| {
        plans[0]
            .changes()
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.status)
    };
    assert_eq!(status("TITLE"), Some(FieldStatus::Unchanged));
    assert_eq!(status("ARTIST"), Some(FieldStatus::Added));
    assert_eq!(status("ENCODER"), Some(FieldStatus::Preserved));
    assert_eq!(plans[0].block().get("ALBUMARTIST"), Some("Glenn Gould"));
    assert_eq!(plans[0].block().get("DATE"), Some("2002"));
}

// ===== Writing =====

#[test]
fn writes_changed_tracks_only() {
    let dir = tempfile::tempdir().unwrap();
    let first = touch(dir.path(), "01.flac", 1);
    touch(dir.path(), "02.flac", 1);

    let writer = TagWriter::new(MemoryCodec::new());
    let release = release_in(dir.path());
    assert_eq!(writer.write_release(&release).unwrap(), 2);
    assert_eq!(writer.write_release(&release).unwrap(), 0);

    let written = writer.codec().block(&first).unwrap();
    assert_eq!(written.get("COMPOSER"), Some("Johann Sebastian Bach"));
    assert_eq!(written.get("SOLOIST"), Some("Glenn Gould"));
    assert_eq!(writer.codec().writes().len(), 2);
}

#[test]
fn written_roles_read_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "01.flac", 1);

    let mut release = Release::new(dir.path().display().to_string(), "Trio Sonatas");
    release.files.push(
        Track::new("01.flac", 1, 1, "Sonata in G")
            .with_artist("Johann Sebastian Bach", Role::Composer)
            .with_artist("Jane Doe", Role::Performer)
            .with_artist("Bob Guest", Role::Guest)
            .into(),
    );
    release.refresh_album_artists();

    let writer = TagWriter::new(MemoryCodec::new());
    writer.write_release(&release).unwrap();
    let loaded = load_release(dir.path(), writer.codec()).unwrap();

    let track = loaded.tracks().next().unwrap();
    for artist in &release.tracks().next().unwrap().artists {
        assert!(track.artists.contains(artist), "{artist:?} in {:?}", track.artists);
    }
    assert_eq!(loaded.album_artist, release.album_artist);
}

#[test]
fn data_loss_aborts_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "01.flac", 1);
    let second = touch(dir.path(), "02.flac", 1);

    let codec = MemoryCodec::new();
    codec.insert(&second, block(&[("ARTIST", "Glenn Gould; Columbia Symphony")]));
    let writer = TagWriter::new(codec);

    let result = writer.write_release(&release_in(dir.path()));
    match result {
        Err(MetadataError::WouldLoseData { keys, .. }) => assert_eq!(keys, vec!["ARTIST"]),
        other => panic!("expected data-loss refusal, got {other:?}"),
    }
    assert!(writer.codec().writes().is_empty());
}

#[test]
fn force_overrides_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "01.flac", 1);
    let second = touch(dir.path(), "02.flac", 1);

    let codec = MemoryCodec::new();
    codec.insert(&second, block(&[("ARTIST", "Glenn Gould; Columbia Symphony")]));
    let writer = TagWriter::new(codec).with_force(true);

    assert_eq!(writer.write_release(&release_in(dir.path())).unwrap(), 2);
    assert_eq!(
        writer.codec().block(&second).unwrap().get("ARTIST"),
        Some("Glenn Gould")
    );
}

#[test]
fn missing_track_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "01.flac", 1);

    let writer = TagWriter::new(MemoryCodec::new());
    let result = writer.plan_release(&release_in(dir.path()));
    assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
}
