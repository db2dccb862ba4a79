//! Tag plans
//!
//! A [`TagPlan`] compares the comment block currently on a file with the one
//! the tagger wants, classifies every key, and produces the block to write.
//! Keys the tagger does not manage are carried over untouched.

use crate::block::{keys, TagBlock};
use crate::mapping::split_names;
use std::fmt;
use std::path::{Path, PathBuf};

/// Keys holding comma/semicolon separated name lists
const LIST_KEYS: &[&str] = &[
    keys::ARTIST,
    keys::ALBUMARTIST,
    keys::COMPOSER,
    keys::CONDUCTOR,
    keys::ENSEMBLE,
    keys::SOLOIST,
    keys::PERFORMER,
    keys::GUEST,
    keys::ARRANGER,
    keys::PRODUCER,
    keys::REMIXER,
    keys::DJMIXER,
];

/// Keys whose values are freely renumbered
const NUMERIC_KEYS: &[&str] = &[
    keys::TRACKNUMBER,
    keys::DISCNUMBER,
    keys::DATE,
    keys::ORIGINALDATE,
];

/// What writing a plan does to one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldStatus {
    /// Same value before and after
    Unchanged,
    /// Value replaced without losing information
    Updated,
    /// Key was absent
    Added,
    /// Key is not managed and is kept as-is
    Preserved,
    /// Replacing the value would drop information
    WouldLoseData,
}

impl FieldStatus {
    /// Lowercase label used in plan listings
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Unchanged => "unchanged",
            FieldStatus::Updated => "updated",
            FieldStatus::Added => "added",
            FieldStatus::Preserved => "preserved",
            FieldStatus::WouldLoseData => "would-lose-data",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Comment key, uppercase
    pub key: String,
    /// Values currently on the file
    pub old: Vec<String>,
    /// Values after writing
    pub new: Vec<String>,
    /// Classification of the change
    pub status: FieldStatus,
}

/// Planned rewrite of one file's comment block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    path: PathBuf,
    changes: Vec<FieldChange>,
    block: TagBlock,
}

impl TagPlan {
    /// Compare `current` with `desired` for the file at `path`
    pub fn compute(path: impl AsRef<Path>, current: &TagBlock, desired: &TagBlock) -> Self {
        let mut block = current.clone();
        let mut changes = Vec::new();

        for key in desired.keys() {
            let old: Vec<String> = current.get_all(key).into_iter().map(String::from).collect();
            let new: Vec<String> = desired.get_all(key).into_iter().map(String::from).collect();
            let status = classify(key, &old, &new);
            block.set_all(key, new.clone());
            changes.push(FieldChange {
                key: key.to_string(),
                old,
                new,
                status,
            });
        }

        for key in current.keys() {
            if desired.contains(key) {
                continue;
            }
            let values: Vec<String> = current.get_all(key).into_iter().map(String::from).collect();
            changes.push(FieldChange {
                key: key.to_string(),
                old: values.clone(),
                new: values,
                status: FieldStatus::Preserved,
            });
        }

        Self {
            path: path.as_ref().to_path_buf(),
            changes,
            block,
        }
    }

    /// File the plan applies to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-key changes, managed keys first
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Block to write
    pub fn block(&self) -> &TagBlock {
        &self.block
    }

    /// Whether writing would alter the file's tags
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| {
            matches!(
                c.status,
                FieldStatus::Updated | FieldStatus::Added | FieldStatus::WouldLoseData
            )
        })
    }

    /// Whether any key would lose information
    pub fn has_data_loss(&self) -> bool {
        !self.lossy_keys().is_empty()
    }

    /// Keys with status `would-lose-data`
    pub fn lossy_keys(&self) -> Vec<String> {
        self.changes
            .iter()
            .filter(|c| c.status == FieldStatus::WouldLoseData)
            .map(|c| c.key.clone())
            .collect()
    }
}

impl fmt::Display for TagPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        for change in &self.changes {
            match change.status {
                FieldStatus::Unchanged | FieldStatus::Preserved | FieldStatus::Added => writeln!(
                    f,
                    "  {:<16} {:<16} {}",
                    change.key,
                    change.status,
                    change.new.join("; ")
                )?,
                FieldStatus::Updated | FieldStatus::WouldLoseData => writeln!(
                    f,
                    "  {:<16} {:<16} {} -> {}",
                    change.key,
                    change.status,
                    change.old.join("; "),
                    change.new.join("; ")
                )?,
            }
        }
        Ok(())
    }
}

fn classify(key: &str, old: &[String], new: &[String]) -> FieldStatus {
    if old.is_empty() {
        return FieldStatus::Added;
    }
    if old == new {
        return FieldStatus::Unchanged;
    }
    if NUMERIC_KEYS.contains(&key) {
        return FieldStatus::Updated;
    }

    let keeps_data = if LIST_KEYS.contains(&key) {
        is_name_superset(old, new)
    } else {
        let new_text = normalize(&new.join(" "));
        old.iter().all(|value| new_text.contains(&normalize(value)))
    };

    if keeps_data {
        FieldStatus::Updated
    } else {
        FieldStatus::WouldLoseData
    }
}

/// Every old name element appears among the new ones, ignoring case
fn is_name_superset(old: &[String], new: &[String]) -> bool {
    let new_names: Vec<String> = new
        .iter()
        .flat_map(|value| split_names(value))
        .map(|name| name.to_lowercase())
        .collect();
    old.iter()
        .flat_map(|value| split_names(value))
        .all(|name| new_names.contains(&name.to_lowercase()))
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(pairs: &[(&str, &str)]) -> TagBlock {
        pairs.iter().copied().collect()
    }

    fn status(plan: &TagPlan, key: &str) -> FieldStatus {
        plan.changes()
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.status)
            .unwrap()
    }

    #[test]
    fn classifies_every_key() {
        let current = block(&[
            ("TITLE", "Aria"),
            ("TRACKNUMBER", "1/30"),
            ("ARTIST", "Gould"),
            ("ENCODER", "flac 1.4"),
        ]);
        let desired = block(&[
            ("TITLE", "Aria"),
            ("TRACKNUMBER", "1"),
            ("ARTIST", "Glenn Gould, gould"),
            ("ALBUM", "Goldberg Variations"),
        ]);

        let plan = TagPlan::compute("01.flac", &current, &desired);
        assert_eq!(status(&plan, "TITLE"), FieldStatus::Unchanged);
        assert_eq!(status(&plan, "TRACKNUMBER"), FieldStatus::Updated);
        assert_eq!(status(&plan, "ARTIST"), FieldStatus::Updated);
        assert_eq!(status(&plan, "ALBUM"), FieldStatus::Added);
        assert_eq!(status(&plan, "ENCODER"), FieldStatus::Preserved);
        assert!(plan.has_changes());
        assert!(!plan.has_data_loss());
        assert_eq!(plan.block().get("ENCODER"), Some("flac 1.4"));
        assert_eq!(plan.block().get("TRACKNUMBER"), Some("1"));
    }

    #[test]
    fn dropping_an_artist_element_loses_data() {
        let current = block(&[("ARTIST", "Gould; Columbia Symphony Orchestra")]);
        let desired = block(&[("ARTIST", "Glenn Gould")]);

        let plan = TagPlan::compute("01.flac", &current, &desired);
        assert_eq!(status(&plan, "ARTIST"), FieldStatus::WouldLoseData);
        assert_eq!(plan.lossy_keys(), vec!["ARTIST".to_string()]);
    }

    #[test]
    fn text_fields_use_containment() {
        let current = block(&[("TITLE", "Aria"), ("ALBUM", "Goldberg  Variations")]);
        let desired = block(&[
            ("TITLE", "Goldberg Variations, BWV 988: Aria"),
            ("ALBUM", "Bach: Partitas"),
        ]);

        let plan = TagPlan::compute("01.flac", &current, &desired);
        assert_eq!(status(&plan, "TITLE"), FieldStatus::Updated);
        assert_eq!(status(&plan, "ALBUM"), FieldStatus::WouldLoseData);
    }

    #[test]
    fn identical_blocks_have_no_changes() {
        let current = block(&[("TITLE", "Aria"), ("COMMENT", "ripped")]);
        let plan = TagPlan::compute("01.flac", &current, &block(&[("TITLE", "Aria")]));
        assert!(!plan.has_changes());
        assert_eq!(plan.block(), &current);
    }

    #[test]
    fn listing_shows_transitions() {
        let plan = TagPlan::compute(
            "01.flac",
            &block(&[("DATE", "1981-05-02")]),
            &block(&[("DATE", "1982")]),
        );
        let listing = plan.to_string();
        assert!(listing.starts_with("01.flac\n"));
        assert!(listing.contains("DATE"));
        assert!(listing.contains("updated"));
        assert!(listing.contains("1981-05-02 -> 1982"));
    }
}
