//! `upload`: replace a tracker torrent with the fixed release

use super::{load_local, print_report, Context, Outcome};
use crate::cli::UploadArgs;
use anyhow::{anyhow, Context as _, Result};
use classical_client::{Cache, TorrentMaker, TrackerApi, TrackerClient, UploadRequest};
use classical_core::{Release, TrackerView};
use classical_reconcile::{Mode, Reconciler};
use classical_rules::{Report, RuleEngine};
use std::path::Path;
use tracing::info;

pub async fn run(ctx: &Context, args: &UploadArgs) -> Result<Outcome> {
    let settings = &ctx.config.tracker;
    let client = TrackerClient::new(&settings.base_url, &settings.api_key)?;
    let maker = TorrentMaker::new(&ctx.config.torrent.mktorrent_path, &settings.announce_url)
        .with_source(settings.source.clone());
    let cache = ctx.config.open_cache();

    upload_with(ctx, args, &client, &maker, &cache).await
}

/// The upload pipeline against any tracker implementation
pub async fn upload_with(
    ctx: &Context,
    args: &UploadArgs,
    tracker: &dyn TrackerApi,
    maker: &TorrentMaker,
    cache: &Cache,
) -> Result<Outcome> {
    let dir = args.common.dir.as_path();
    let dry_run = args.common.dry_run;

    let local = load_local(dir, args.metadata.as_deref())?;
    let existing = tracker
        .torrent(args.torrent_id, &ctx.cancel)
        .await
        .with_context(|| format!("failed to fetch torrent {}", args.torrent_id))?;
    let view = existing.to_tracker_view(&ctx.config.tracker.announce_url);

    let (release, report) = reconcile_for_upload(local, &view, &args.reason);
    print_report(&report);

    let Some(release) = release else {
        return Ok(Outcome::from_report(&report, dry_run));
    };
    if dry_run {
        println!("{}", release.to_json()?);
        return Ok(Outcome::Success);
    }
    if report.has_errors() {
        return Ok(Outcome::Failed);
    }

    let torrent_path = maker
        .create_cached(cache, &torrent_key(&release), dir, &ctx.cancel)
        .await?;
    let torrent = tokio::fs::read(&torrent_path)
        .await
        .with_context(|| format!("failed to read {}", torrent_path.display()))?;
    let torrent_name = file_name(&torrent_path)?;

    let request =
        UploadRequest::from_release(&release, torrent_name, torrent, Some(args.reason.as_str()))?;
    let uploaded = tracker.upload(&request, &ctx.cancel).await?;

    info!(
        torrent_id = uploaded.torrent_id,
        group_id = uploaded.group_id,
        replaces = args.torrent_id,
        "Upload complete"
    );
    println!(
        "Uploaded torrent {} to group {}",
        uploaded.torrent_id, uploaded.group_id
    );
    Ok(Outcome::Success)
}

/// Merge the local release with the tracker view and validate the result
pub fn reconcile_for_upload(
    local: Release,
    view: &TrackerView,
    reason: &str,
) -> (Option<Release>, Report) {
    let reconciliation = Reconciler::new(Mode::Strict)
        .with_trump_reason(reason)
        .reconcile(None, Some(&local), Some(view));

    let mut report = Report::new(reconciliation.issues);
    if let Some(release) = &reconciliation.release {
        report.extend(
            RuleEngine::standard()
                .validate(release, Some(view))
                .issues()
                .iter()
                .cloned(),
        );
    }
    (reconciliation.release, report)
}

/// Cache key of the torrent built for `release`
pub fn torrent_key(release: &Release) -> String {
    release.folder_name().to_string()
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("torrent path has no file name: {}", path.display()))
}
