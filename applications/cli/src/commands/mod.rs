//! Pipeline commands
//!
//! Each command loads a release, reconciles it, runs the rule engine and
//! then acts on the result. Reports and JSON go to stdout; logs to stderr.

pub mod extract;
pub mod tag;
pub mod upload;
pub mod validate;

use crate::cli::Command;
use crate::config::TaggerConfig;
use crate::error::CliError;
use anyhow::{Context as _, Result};
use classical_core::Release;
use classical_metadata::{load_release, FlacCodec};
use classical_reconcile::{Mode, Reconciler};
use classical_rules::{Report, RuleEngine};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Collaborators shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config: TaggerConfig,
    pub cancel: CancellationToken,
}

impl Context {
    pub fn new(config: TaggerConfig, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }
}

/// How a command finished when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Error-level issues remain
    Failed,
}

impl Outcome {
    /// Failed iff the report has errors, except in dry-run
    pub fn from_report(report: &Report, dry_run: bool) -> Self {
        if report.has_errors() && !dry_run {
            Outcome::Failed
        } else {
            Outcome::Success
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Run `command` after checking the configuration it needs
pub async fn run(command: &Command, ctx: &Context) -> Result<Outcome> {
    ctx.config.validate(command.kind())?;

    match command {
        Command::Extract(args) => extract::run(ctx, args).await,
        Command::Validate(args) => validate::run(ctx, args).await,
        Command::Tag(args) => tag::run(ctx, args).await,
        Command::Upload(args) => upload::run(ctx, args).await,
    }
}

/// Load the local view of `dir`, from a JSON file when one is given
pub fn load_local(dir: &Path, metadata: Option<&Path>) -> Result<Release> {
    if !dir.is_dir() {
        return Err(CliError::DirectoryNotFound(dir.display().to_string()).into());
    }

    let mut release = match metadata {
        Some(path) => Release::load_json(path)
            .with_context(|| format!("failed to read release metadata {}", path.display()))?,
        None => load_release(dir, &FlacCodec::new())
            .with_context(|| format!("failed to read tags under {}", dir.display()))?,
    };
    release.root_path = dir.display().to_string();

    info!(
        title = %release.title,
        tracks = release.track_count(),
        "Loaded local release"
    );
    Ok(release)
}

/// Resolve roles on a local-only release
///
/// The returned release is the reconciled one when reconciliation succeeded,
/// the input otherwise, so the rules always have something to check.
pub fn reconcile_local(release: Release) -> (Release, Report) {
    let reconciliation = Reconciler::new(Mode::Strict).reconcile(None, Some(&release), None);
    let report = Report::new(reconciliation.issues);
    (reconciliation.release.unwrap_or(release), report)
}

/// [`reconcile_local`] followed by the rule engine
pub fn check_local(release: Release) -> (Release, Report) {
    let (release, mut report) = reconcile_local(release);
    report.extend(
        RuleEngine::standard()
            .validate(&release, None)
            .issues()
            .iter()
            .cloned(),
    );
    debug!(summary = %report.summary(), "Local release checked");
    (release, report)
}

/// Print a report unless it is empty
pub fn print_report(report: &Report) {
    if report.is_clean() {
        println!("No issues found");
    } else {
        println!("{}", report.render());
    }
}
