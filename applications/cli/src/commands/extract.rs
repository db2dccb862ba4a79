//! `extract`: merge Discogs metadata with the local tags

use super::{load_local, print_report, Context, Outcome};
use crate::cli::ExtractArgs;
use crate::error::CliError;
use anyhow::{anyhow, Context as _, Result};
use classical_client::{DiscogsClient, SearchQuery};
use classical_core::{Release, Role, ScrapeView};
use classical_reconcile::{Mode, Reconciler};
use classical_rules::{Report, RuleEngine};
use tracing::{info, warn};

pub async fn run(ctx: &Context, args: &ExtractArgs) -> Result<Outcome> {
    let local = load_local(&args.common.dir, None)?;

    let client = DiscogsClient::new(&ctx.config.discogs.base_url, &ctx.config.discogs.token)?
        .with_cache(ctx.config.open_cache());
    let scrape = fetch_scrape(&client, args, &local, ctx).await?;

    let reconciliation =
        Reconciler::new(Mode::Lenient).reconcile(Some(&scrape), Some(&local), None);
    let mut report = Report::new(reconciliation.issues);
    let Some(release) = reconciliation.release else {
        print_report(&report);
        return Ok(Outcome::Failed);
    };

    report.extend(
        RuleEngine::standard()
            .validate(&release, None)
            .issues()
            .iter()
            .cloned(),
    );
    print_report(&report);

    if args.common.dry_run {
        println!("{}", release.to_json()?);
        return Ok(Outcome::Success);
    }

    release
        .save_json(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "Release metadata written");
    println!("Wrote {}", args.output.display());

    Ok(Outcome::from_report(&report, false))
}

async fn fetch_scrape(
    client: &DiscogsClient,
    args: &ExtractArgs,
    local: &Release,
    ctx: &Context,
) -> Result<ScrapeView> {
    if let Some(id) = args.release_id {
        return Ok(client.scrape(id, &ctx.cancel).await?);
    }

    let query = search_query(args, local)?;
    client
        .find(&query, &ctx.cancel)
        .await?
        .ok_or_else(|| anyhow!("no Discogs release found for {} - {}", query.artist, query.title))
}

/// Search terms from the flags, falling back to the local tags
pub fn search_query(args: &ExtractArgs, local: &Release) -> Result<SearchQuery> {
    let artist = args
        .artist
        .clone()
        .or_else(|| local.album_artist.first().map(|a| a.name.clone()))
        .or_else(|| {
            local
                .tracks()
                .flat_map(|t| t.artists_with_role(Role::Composer))
                .next()
                .map(|a| a.name.clone())
        })
        .filter(|artist| !artist.trim().is_empty());
    let title = args
        .title
        .clone()
        .or_else(|| Some(local.title.clone()))
        .filter(|title| !title.trim().is_empty());

    let (Some(artist), Some(title)) = (artist, title) else {
        return Err(CliError::InvalidArguments(
            "pass --release-id, or --artist and --title when the tags carry neither".into(),
        )
        .into());
    };
    if args.artist.is_none() || args.title.is_none() {
        warn!(%artist, %title, "Search terms taken from the local tags");
    }

    let query = SearchQuery::new(artist, title);
    Ok(match &args.format {
        Some(format) => query.with_format(format.clone()),
        None => query,
    })
}
