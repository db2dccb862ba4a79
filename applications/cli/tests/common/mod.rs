/// Common test utilities and fixtures
use classical_core::{Edition, Release, Role, Track};
use classical_tagger::{CommandKind, TaggerConfig};
use std::path::{Path, PathBuf};

/// Folder name that satisfies the directory rules for [`compliant_release`]
pub const RELEASE_FOLDER: &str = "Bach - Goldberg Variations (Gould) - 1981 [FLAC]";

/// Two-track release with no issues
pub fn compliant_release() -> Release {
    let mut release = Release::new(format!("/music/{RELEASE_FOLDER}"), "Goldberg Variations");
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

/// Create `<root>/<name>` and return it
pub fn release_dir(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Save `release` as JSON next to the release directories
pub fn write_metadata(root: &Path, release: &Release) -> PathBuf {
    let path = root.join("metadata.json");
    release.save_json(&path).unwrap();
    path
}

/// Configuration valid for every command, caching under `root`
pub fn config(root: &Path, server_uri: &str) -> TaggerConfig {
    let mut config = TaggerConfig::default();
    config.discogs.token = "secret".into();
    config.discogs.base_url = server_uri.to_string();
    config.tracker.base_url = server_uri.to_string();
    config.tracker.api_key = "api-key".into();
    config.tracker.announce_url = "https://tracker.example/announce/abc".into();
    config.cache.directory = Some(root.join("cache"));

    for kind in [
        CommandKind::Extract,
        CommandKind::Validate,
        CommandKind::Tag,
        CommandKind::Upload,
    ] {
        assert!(config.missing_keys(kind).is_empty(), "{kind:?}");
    }
    config
}
