//! Rule trait and evaluation context

use classical_core::{Issue, Release, Track, TrackerView};

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Release under validation
    pub release: &'a Release,

    /// Tracker record being replaced, on the upload path
    pub tracker: Option<&'a TrackerView>,
}

impl<'a> RuleContext<'a> {
    /// Context without a tracker view
    pub fn new(release: &'a Release) -> Self {
        Self {
            release,
            tracker: None,
        }
    }

    /// Attach a tracker view
    pub fn with_tracker(mut self, tracker: &'a TrackerView) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Tracks paired with their 1-based ordinal
    pub fn tracks(&self) -> impl Iterator<Item = (u32, &'a Track)> {
        self.release
            .tracks()
            .zip(1u32..)
            .map(|(track, ordinal)| (ordinal, track))
    }

    /// Name of the release folder
    pub fn folder(&self) -> &'a str {
        self.release.folder_name()
    }
}

/// A style-guide rule.
///
/// Rules are pure: the same context always yields the same issues, in the
/// order the rule meets the offending items.
pub trait Rule: Send + Sync {
    /// Rule id, mirroring the style-guide section
    fn id(&self) -> &'static str;

    /// One-line summary
    fn description(&self) -> &'static str;

    /// Evaluate the rule
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue>;
}
