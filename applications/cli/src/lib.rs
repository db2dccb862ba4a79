//! Classical Tagger
//!
//! Command-line pipeline that prepares a classical music release for
//! re-upload: `extract` reference metadata, `validate` against the style
//! guide, `tag` files and folders, and `upload` a replacement torrent.
//!
//! This library exposes the commands for testing purposes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::{Context, Outcome};
pub use config::{CommandKind, TaggerConfig};
pub use error::{CliError, Result};

/// Workspace crates raised to `debug` by `--verbose`
const WORKSPACE_CRATES: [&str; 7] = [
    "classical_tagger",
    "classical_client",
    "classical_core",
    "classical_metadata",
    "classical_naming",
    "classical_reconcile",
    "classical_rules",
];

/// Log filter used when `RUST_LOG` is unset
pub fn default_log_filter(verbose: bool) -> String {
    if verbose {
        WORKSPACE_CRATES
            .iter()
            .map(|name| format!("{name}=debug"))
            .collect::<Vec<_>>()
            .join(",")
    } else {
        "classical_tagger=info,classical_client=info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_filter_covers_the_binary_and_client() {
        assert_eq!(
            default_log_filter(false),
            "classical_tagger=info,classical_client=info"
        );
    }

    #[test]
    fn verbose_filter_raises_every_crate() {
        let filter = default_log_filter(true);
        for name in WORKSPACE_CRATES {
            assert!(filter.contains(&format!("{name}=debug")), "{name}");
        }
        assert!(!filter.contains("=info"));
    }
}
