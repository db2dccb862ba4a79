//! `tag`: rewrite tags, filenames and the release directory

use super::{load_local, print_report, reconcile_local, Context, Outcome};
use crate::cli::TagArgs;
use anyhow::{Context as _, Result};
use classical_core::Release;
use classical_metadata::{FlacCodec, TagPlan, TagWriter};
use classical_naming::LayoutPlan;
use classical_rules::RuleEngine;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(_ctx: &Context, args: &TagArgs) -> Result<Outcome> {
    let dir = args.common.dir.as_path();
    let dry_run = args.common.dry_run;
    let rename_root = !args.no_rename;

    let local = load_local(dir, args.metadata.as_deref())?;
    let (release, mut report) = reconcile_local(local);

    let layout = LayoutPlan::for_release(&release).context("cannot derive compliant filenames")?;
    let target = target_release(&release, &layout, rename_root);
    report.extend(
        RuleEngine::standard()
            .validate(&target, None)
            .issues()
            .iter()
            .cloned(),
    );
    print_report(&report);

    if report.has_errors() && !dry_run {
        warn!("Release has errors; nothing was written");
        return Ok(Outcome::Failed);
    }

    let writer = TagWriter::new(FlacCodec::new()).with_force(args.force);
    let plans = writer.plan_release(&release)?;
    print_changes(&plans, &layout, rename_root, dir);

    if dry_run {
        println!("{}", target.to_json()?);
        return Ok(Outcome::Success);
    }

    let written = writer
        .apply_all(&plans)
        .context("tags not written; pass --force to overwrite existing values")?;
    layout.execute(dir)?;
    let final_dir = if rename_root {
        layout.rename_root(dir)?
    } else {
        dir.to_path_buf()
    };

    info!(written, directory = %final_dir.display(), "Release tagged");
    println!("Tagged {} file(s); release at {}", written, final_dir.display());
    Ok(Outcome::Success)
}

/// The release as it will look once the layout is applied
pub fn target_release(release: &Release, layout: &LayoutPlan, rename_root: bool) -> Release {
    let mut target = release.clone();
    layout.apply_to_release(&mut target);
    if rename_root {
        let root = Path::new(&release.root_path);
        target.root_path = match root.parent() {
            Some(parent) => parent.join(&layout.directory).display().to_string(),
            None => layout.directory.clone(),
        };
    }
    target
}

fn print_changes(plans: &[TagPlan], layout: &LayoutPlan, rename_root: bool, dir: &Path) {
    for plan in plans.iter().filter(|p| p.has_changes() || p.has_data_loss()) {
        print!("{plan}");
    }
    for rename in layout.changes() {
        println!("rename  {} -> {}", rename.from, rename.to);
    }
    if rename_root {
        let current = dir.file_name().map(|n| n.to_string_lossy().into_owned());
        if current.as_deref() != Some(layout.directory.as_str()) {
            println!(
                "rename  {} -> {}",
                current.unwrap_or_default(),
                layout.directory
            );
        }
    }
}
