//! Torrent file creation through `mktorrent`

use crate::cache::{Cache, TORRENT_NAMESPACE};
use crate::error::{ClientError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Piece length exponent: 2^18 = 256 KiB
pub const PIECE_LENGTH_EXPONENT: u32 = 18;

/// Runs an external `mktorrent`-compatible program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMaker {
    program: PathBuf,
    announce_url: String,
    source: Option<String>,
}

impl TorrentMaker {
    /// Maker invoking `program` with `announce_url`
    pub fn new(program: impl Into<PathBuf>, announce_url: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            announce_url: announce_url.into(),
            source: None,
        }
    }

    /// Tag the torrent with a source string
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source.filter(|s| !s.trim().is_empty());
        self
    }

    /// Command-line arguments for one invocation
    pub fn args(&self, source_dir: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(),
            "-l".to_string(),
            PIECE_LENGTH_EXPONENT.to_string(),
            "-a".to_string(),
            self.announce_url.clone(),
        ];
        if let Some(source) = &self.source {
            args.push("-s".to_string());
            args.push(source.clone());
        }
        args.push("-o".to_string());
        args.push(output.display().to_string());
        args.push(source_dir.display().to_string());
        args
    }

    /// Create `output` from `source_dir`, replacing an existing file
    pub async fn create(
        &self,
        source_dir: &Path,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        if !source_dir.is_dir() {
            return Err(ClientError::Subprocess(format!(
                "source directory not found: {}",
                source_dir.display()
            )));
        }
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if output.exists() {
            tokio::fs::remove_file(output).await?;
        }

        let args = self.args(source_dir, output);
        debug!(program = %self.program.display(), ?args, "Running torrent maker");

        let child = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = child => result,
        };
        let output_status = result.map_err(|e| {
            ClientError::Subprocess(format!("failed to run {}: {e}", self.program.display()))
        })?;

        if !output_status.status.success() {
            let stderr = String::from_utf8_lossy(&output_status.stderr);
            return Err(ClientError::Subprocess(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output_status.status,
                stderr.trim()
            )));
        }
        if !output.is_file() {
            return Err(ClientError::Subprocess(format!(
                "{} did not produce {}",
                self.program.display(),
                output.display()
            )));
        }

        info!(torrent = %output.display(), "Torrent created");
        Ok(output.to_path_buf())
    }

    /// Create the torrent inside the cache's torrent namespace
    pub async fn create_cached(
        &self,
        cache: &Cache,
        key: &str,
        source_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        let output = cache.entry_path(key, TORRENT_NAMESPACE, "torrent");
        self.create(source_dir, &output, cancel).await
    }
}
