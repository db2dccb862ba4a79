//! Release layout planning and execution
//!
//! A [`LayoutPlan`] lists the renames that bring a release to the compliant
//! shape: `NN - Title.ext` filenames, `CD<n>/` subfolders for multi-disc
//! releases, and a derived directory name. Plain files keep their paths.

use crate::directory::directory_name;
use crate::error::{NamingError, Result};
use crate::filename::track_filename;
use classical_core::{FileEntry, Release};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix of intermediate names used during two-phase renames
const STAGING_PREFIX: &str = ".classical-tagger-staging-";

/// One file move, relative to the release root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Current relative path
    pub from: String,
    /// Target relative path
    pub to: String,
}

impl Rename {
    /// Whether the file already has its target path
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Target directory name plus per-file renames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Compliant release directory name
    pub directory: String,
    /// One entry per track, in file-list order
    pub renames: Vec<Rename>,
}

impl LayoutPlan {
    /// Build the plan for `release`
    pub fn for_release(release: &Release) -> Result<Self> {
        let total = release.track_count();
        let multi_disc = release.disc_count() > 1;

        let mut renames = Vec::with_capacity(total);
        for track in release.tracks() {
            let filename = track_filename(track, total);
            let to = if multi_disc {
                format!("CD{}/{}", track.disc, filename)
            } else {
                filename
            };
            renames.push(Rename {
                from: track.path().to_string(),
                to,
            });
        }

        let plan = Self {
            directory: directory_name(release),
            renames,
        };
        plan.check_collisions(release)?;
        Ok(plan)
    }

    /// Renames that actually move a file
    pub fn changes(&self) -> impl Iterator<Item = &Rename> {
        self.renames.iter().filter(|r| !r.is_noop())
    }

    /// Whether nothing needs to move
    pub fn is_noop(&self) -> bool {
        self.changes().next().is_none()
    }

    fn check_collisions(&self, release: &Release) -> Result<()> {
        let mut targets: Vec<String> = release
            .files
            .iter()
            .filter(|entry| !entry.is_track())
            .map(|entry| entry.path().to_lowercase())
            .collect();

        for rename in &self.renames {
            let target = rename.to.to_lowercase();
            if targets.contains(&target) {
                return Err(NamingError::Collision(rename.to.clone()));
            }
            targets.push(target);
        }
        Ok(())
    }

    /// Rewrite the track paths of `release` to their targets
    pub fn apply_to_release(&self, release: &mut Release) {
        for entry in &mut release.files {
            if let FileEntry::Track(track) = entry {
                if let Some(rename) = self.renames.iter().find(|r| r.from == track.file.path) {
                    track.file.path = rename.to.clone();
                }
            }
        }
    }

    /// Move the files under `root`
    ///
    /// Changed files are first moved to staging names, then to their
    /// targets, so swaps between two tracks cannot clobber each other.
    /// Directories left empty afterwards are removed. When a move fails,
    /// files already moved are put back at their original paths.
    pub fn execute(&self, root: &Path) -> Result<()> {
        let changes: Vec<&Rename> = self.changes().collect();

        for rename in &changes {
            let source = root.join(&rename.from);
            if !source.is_file() {
                return Err(NamingError::MissingFile(source.display().to_string()));
            }
        }

        let mut moves = Vec::with_capacity(changes.len());
        if let Err(err) = move_all(root, &changes, &mut moves) {
            warn!(error = %err, "Layout change failed, restoring original paths");
            roll_back(root, &moves);
            return Err(err);
        }

        for rename in &changes {
            remove_empty_parents(root, &rename.from);
        }

        info!(count = changes.len(), "Renamed tracks");
        Ok(())
    }

    /// Rename the release directory itself, returning its new path
    pub fn rename_root(&self, root: &Path) -> Result<PathBuf> {
        let target = match root.parent() {
            Some(parent) => parent.join(&self.directory),
            None => PathBuf::from(&self.directory),
        };

        if target == root {
            return Ok(target);
        }
        if target.exists() {
            return Err(NamingError::DirectoryExists(target.display().to_string()));
        }

        info!(from = %root.display(), to = %target.display(), "Renaming release directory");
        std::fs::rename(root, &target)?;
        Ok(target)
    }
}

/// A file moved by [`LayoutPlan::execute`]
struct Move<'a> {
    rename: &'a Rename,
    staging: PathBuf,
    placed: bool,
}

fn move_all<'a>(root: &Path, changes: &[&'a Rename], moves: &mut Vec<Move<'a>>) -> Result<()> {
    for (index, rename) in changes.iter().enumerate() {
        let staging = root.join(format!("{STAGING_PREFIX}{index}"));
        std::fs::rename(root.join(&rename.from), &staging)?;
        moves.push(Move {
            rename: *rename,
            staging,
            placed: false,
        });
    }

    for entry in moves.iter_mut() {
        let target = root.join(&entry.rename.to);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(from = %entry.rename.from, to = %entry.rename.to, "Renaming track");
        std::fs::rename(&entry.staging, &target)?;
        entry.placed = true;
    }
    Ok(())
}

/// Return every moved file to its original path
///
/// Placed files go back through their staging names first, so a target that
/// is another file's original path is free again before anything lands there.
fn roll_back(root: &Path, moves: &[Move<'_>]) {
    for entry in moves.iter().rev().filter(|m| m.placed) {
        if let Err(err) = std::fs::rename(root.join(&entry.rename.to), &entry.staging) {
            warn!(path = %entry.rename.to, error = %err, "Could not restore file");
        }
        remove_empty_parents(root, &entry.rename.to);
    }
    for entry in moves.iter().rev() {
        if let Err(err) = std::fs::rename(&entry.staging, root.join(&entry.rename.from)) {
            warn!(
                staging = %entry.staging.display(),
                path = %entry.rename.from,
                error = %err,
                "Could not restore file"
            );
        }
    }
}

fn remove_empty_parents(root: &Path, relative: &str) {
    let mut current = root.join(relative);
    while let Some(parent) = current.parent() {
        if parent == root || !parent.starts_with(root) {
            break;
        }
        // Fails on non-empty directories, which ends the walk
        if std::fs::remove_dir(parent).is_err() {
            break;
        }
        current = parent.to_path_buf();
    }
}
