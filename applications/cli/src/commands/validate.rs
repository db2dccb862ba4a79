//! `validate`: check a release against the style guide

use super::{check_local, load_local, print_report, Context, Outcome};
use crate::cli::ValidateArgs;
use anyhow::Result;
use tracing::info;

pub async fn run(_ctx: &Context, args: &ValidateArgs) -> Result<Outcome> {
    let local = load_local(&args.common.dir, args.metadata.as_deref())?;
    let (release, report) = check_local(local);

    print_report(&report);
    if args.common.dry_run {
        println!("{}", release.to_json()?);
    }

    info!(summary = %report.summary(), "Validation finished");
    Ok(Outcome::from_report(&report, args.common.dry_run))
}
