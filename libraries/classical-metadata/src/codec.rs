//! Tag codecs
//!
//! A [`TagCodec`] reads and writes the comment block of one audio file. The
//! FLAC implementation goes through `lofty` and replaces the file atomically:
//! the new tags are written to a sibling copy which is then renamed over the
//! original, so the audio payload is never rewritten in place.

use crate::block::TagBlock;
use crate::error::{MetadataError, Result};
use lofty::flac::FlacFile;
use lofty::{AudioFile, ParseOptions};
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes an audio file's key-value comment block.
pub trait TagCodec {
    /// Whether the codec handles files with this path
    fn supports(&self, path: &Path) -> bool;

    /// Read the comment block; an untagged file yields an empty block
    fn read(&self, path: &Path) -> Result<TagBlock>;

    /// Replace the comment block with `block`
    fn write(&self, path: &Path, block: &TagBlock) -> Result<()>;
}

/// FLAC Vorbis-comment codec backed by lofty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlacCodec;

impl FlacCodec {
    /// Create a codec
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<FlacFile> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }
        let mut file = fs::File::open(path)?;
        Ok(FlacFile::read_from(&mut file, ParseOptions::new())?)
    }
}

impl TagCodec for FlacCodec {
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("flac"))
    }

    fn read(&self, path: &Path) -> Result<TagBlock> {
        if !self.supports(path) {
            return Err(MetadataError::UnsupportedFormat(path.display().to_string()));
        }

        let flac = Self::open(path)?;
        let block = flac
            .vorbis_comments()
            .map(|comments| comments.items().collect::<TagBlock>())
            .unwrap_or_default();

        debug!(path = %path.display(), keys = block.len(), "Read tags");
        Ok(block)
    }

    fn write(&self, path: &Path, block: &TagBlock) -> Result<()> {
        if !self.supports(path) {
            return Err(MetadataError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let temp_path = temp_path(path);
        fs::copy(path, &temp_path)?;

        if let Err(e) = write_comments(&temp_path, block) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            MetadataError::WriteError(format!("failed to replace {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), keys = block.len(), "Wrote tags");
        Ok(())
    }
}

fn write_comments(path: &Path, block: &TagBlock) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut flac = FlacFile::read_from(&mut file, ParseOptions::new())?;

    let mut comments = flac.vorbis_comments().cloned().unwrap_or_default();
    let existing: Vec<String> = comments.items().map(|(key, _)| key.to_string()).collect();
    for key in existing {
        let _ = comments.remove(&key).count();
    }
    for (key, value) in block.iter() {
        comments.push(key.to_string(), value.to_string());
    }
    flac.set_vorbis_comments(comments);

    file.seek(SeekFrom::Start(0))?;
    flac.save_to(&mut file)?;
    Ok(())
}

/// Sibling path used while rewriting `original`
fn temp_path(original: &Path) -> PathBuf {
    let name = original
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("track.flac");
    original.with_file_name(format!(".{name}.{}.tagging", std::process::id()))
}
