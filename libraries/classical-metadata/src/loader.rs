//! Release directory loader
//!
//! Walks a release directory and builds the local view: supported audio files
//! become tracks read through a [`TagCodec`], everything else becomes a plain
//! file. Hidden entries are skipped and paths are relative to the root.

use crate::block::TagBlock;
use crate::codec::TagCodec;
use crate::error::{MetadataError, Result};
use crate::mapping::{album_artists_from_block, album_from_block, track_from_block};
use classical_core::{normalize_path, File, FileEntry, Release};
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Load the release rooted at `dir`
pub fn load_release(dir: &Path, codec: &impl TagCodec) -> Result<Release> {
    if !dir.is_dir() {
        return Err(MetadataError::FileNotFound(dir.display().to_string()));
    }

    let mut release = Release::new(dir.display().to_string(), "");
    let mut first_block: Option<TagBlock> = None;

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy();
        let relative = normalize_path(&relative);
        let size = entry.metadata()?.len();

        if codec.supports(entry.path()) {
            let block = codec.read(entry.path()).map_err(|e| {
                MetadataError::ParseError(format!("{}: {e}", entry.path().display()))
            })?;
            debug!(path = %relative, "Loaded track");
            release
                .files
                .push(FileEntry::Track(track_from_block(&relative, size, &block)));
            if first_block.is_none() {
                first_block = Some(block);
            }
        } else {
            release.files.push(FileEntry::File(File::new(&relative, size)));
        }
    }

    if let Some(block) = first_block {
        let (title, original_year, edition) = album_from_block(&block);
        release.title = title;
        release.original_year = original_year;
        release.edition = edition;

        let known = release.all_artists();
        release.album_artist = album_artists_from_block(&block, &known);
    }
    if release.album_artist.is_empty() {
        release.refresh_album_artists();
    }

    info!(
        dir = %dir.display(),
        tracks = release.track_count(),
        files = release.files.len(),
        "Loaded release"
    );
    Ok(release)
}
