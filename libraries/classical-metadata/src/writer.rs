//! Release tag writer

use crate::codec::{FlacCodec, TagCodec};
use crate::error::{MetadataError, Result};
use crate::mapping::desired_block;
use crate::plan::TagPlan;
use classical_core::{Release, Track};
use std::path::Path;
use tracing::{debug, info};

/// Plans and writes the tags of a release's tracks.
///
/// Writing is all-or-nothing with respect to data loss: every plan is checked
/// before the first file is touched.
#[derive(Debug, Clone, Default)]
pub struct TagWriter<C = FlacCodec> {
    codec: C,
    force: bool,
}

impl<C: TagCodec> TagWriter<C> {
    /// Create a writer over `codec`
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            force: false,
        }
    }

    /// Write even when a plan would lose data
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// The underlying codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Plan the tags of one track
    pub fn plan_track(&self, release: &Release, track: &Track) -> Result<TagPlan> {
        let path = Path::new(&release.root_path).join(track.path());
        let current = self.codec.read(&path)?;
        Ok(TagPlan::compute(path, &current, &desired_block(release, track)))
    }

    /// Plan the tags of every track, in file-list order
    pub fn plan_release(&self, release: &Release) -> Result<Vec<TagPlan>> {
        release.validate_structure()?;
        release
            .tracks()
            .map(|track| self.plan_track(release, track))
            .collect()
    }

    /// Check a plan against the data-loss policy
    pub fn check(&self, plan: &TagPlan) -> Result<()> {
        if plan.has_data_loss() && !self.force {
            return Err(MetadataError::WouldLoseData {
                path: plan.path().display().to_string(),
                keys: plan.lossy_keys(),
            });
        }
        Ok(())
    }

    /// Write one plan; returns whether the file was rewritten
    pub fn apply(&self, plan: &TagPlan) -> Result<bool> {
        self.check(plan)?;
        if !plan.has_changes() {
            debug!(path = %plan.path().display(), "Tags already up to date");
            return Ok(false);
        }
        self.codec.write(plan.path(), plan.block())?;
        Ok(true)
    }

    /// Write every plan after checking all of them; returns the number rewritten
    pub fn apply_all(&self, plans: &[TagPlan]) -> Result<usize> {
        for plan in plans {
            self.check(plan)?;
        }

        let mut written = 0;
        for plan in plans {
            if self.apply(plan)? {
                written += 1;
            }
        }
        info!(written, total = plans.len(), "Tags written");
        Ok(written)
    }

    /// Plan and write a whole release
    pub fn write_release(&self, release: &Release) -> Result<usize> {
        let plans = self.plan_release(release)?;
        self.apply_all(&plans)
    }
}
