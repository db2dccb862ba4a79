//! Command-line surface

use crate::config::CommandKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "classical-tagger")]
#[command(about = "Tag, validate and upload classical music releases", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/classical-tagger/config.yaml)
    #[arg(long, global = true, env = "CLASSICAL_TAGGER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build release metadata from Discogs and the local tags
    Extract(ExtractArgs),

    /// Check a release against the style guide
    Validate(ValidateArgs),

    /// Rewrite tags and filenames
    Tag(TagArgs),

    /// Create a torrent and upload it as a replacement
    Upload(UploadArgs),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Extract(_) => CommandKind::Extract,
            Command::Validate(_) => CommandKind::Validate,
            Command::Tag(_) => CommandKind::Tag,
            Command::Upload(_) => CommandKind::Upload,
        }
    }

    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Extract(args) => &args.common,
            Command::Validate(args) => &args.common,
            Command::Tag(args) => &args.common,
            Command::Upload(args) => &args.common,
        }
    }
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Release directory
    #[arg(long)]
    pub dir: PathBuf,

    /// Debug logging for every crate
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would change without touching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Discogs release id; skips the search
    #[arg(long, conflicts_with_all = ["artist", "title", "format"])]
    pub release_id: Option<u64>,

    /// Artist to search for (default: album artist or composer from the tags)
    #[arg(long)]
    pub artist: Option<String>,

    /// Release title to search for (default: album title from the tags)
    #[arg(long)]
    pub title: Option<String>,

    /// Format filter, e.g. CD or Vinyl
    #[arg(long)]
    pub format: Option<String>,

    /// Where to write the merged release JSON
    #[arg(short, long, default_value = "release.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Release JSON to validate instead of the tags in --dir
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TagArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Release JSON to write instead of re-deriving from the tags
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Write even when existing tag values would be lost
    #[arg(long)]
    pub force: bool,

    /// Keep the release directory name
    #[arg(long)]
    pub no_rename: bool,
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Tracker torrent being replaced
    #[arg(long)]
    pub torrent_id: u64,

    /// What the replacement fixes
    #[arg(long)]
    pub reason: String,

    /// Release JSON to upload instead of the tags in --dir
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}
