//! Tracker consistency rule

use crate::rule::{Rule, RuleContext};
use classical_core::{Issue, Scope};

/// trk.artists: every artist the tracker lists is credited locally.
pub struct TrackerArtists;

impl Rule for TrackerArtists {
    fn id(&self) -> &'static str {
        "trk.artists"
    }

    fn description(&self) -> &'static str {
        "Every tracker artist needs a local artist with a compatible role"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let Some(tracker) = ctx.tracker else {
            return Vec::new();
        };

        tracker
            .missing_from(&ctx.release.all_artists())
            .into_iter()
            .map(|(name, role)| {
                Issue::error(
                    Scope::Album,
                    self.id(),
                    format!("tracker artist {name} ({role}) has no compatible local artist"),
                )
            })
            .collect()
    }
}
