//! Key-value comment blocks
//!
//! A `TagBlock` mirrors a Vorbis comment block: uppercase keys, repeatable,
//! kept in file order.

use std::fmt;

/// Well-known keys
pub mod keys {
    /// Track title
    pub const TITLE: &str = "TITLE";
    /// Album title
    pub const ALBUM: &str = "ALBUM";
    /// Track number, optionally `n/total`
    pub const TRACKNUMBER: &str = "TRACKNUMBER";
    /// Disc number, optionally `n/total`
    pub const DISCNUMBER: &str = "DISCNUMBER";
    /// Composer(s)
    pub const COMPOSER: &str = "COMPOSER";
    /// Performing artists
    pub const ARTIST: &str = "ARTIST";
    /// Album-level artists
    pub const ALBUMARTIST: &str = "ALBUMARTIST";
    /// Conductor(s)
    pub const CONDUCTOR: &str = "CONDUCTOR";
    /// Ensemble(s)
    pub const ENSEMBLE: &str = "ENSEMBLE";
    /// Orchestra, read as an ensemble
    pub const ORCHESTRA: &str = "ORCHESTRA";
    /// Soloist(s)
    pub const SOLOIST: &str = "SOLOIST";
    /// Performer(s)
    pub const PERFORMER: &str = "PERFORMER";
    /// Guest performer(s)
    pub const GUEST: &str = "GUEST";
    /// Arranger(s)
    pub const ARRANGER: &str = "ARRANGER";
    /// Producer(s)
    pub const PRODUCER: &str = "PRODUCER";
    /// Remixer(s)
    pub const REMIXER: &str = "REMIXER";
    /// DJ mix compiler(s)
    pub const DJMIXER: &str = "DJMIXER";
    /// Original release year
    pub const ORIGINALDATE: &str = "ORIGINALDATE";
    /// Edition year
    pub const DATE: &str = "DATE";
    /// Record label
    pub const LABEL: &str = "LABEL";
    /// Catalog number
    pub const CATALOGNUMBER: &str = "CATALOGNUMBER";
}

/// Ordered, repeatable key-value pairs with uppercase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBlock {
    entries: Vec<(String, String)>,
}

impl TagBlock {
    /// Empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping existing values of the same key
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.entries.push((key.to_uppercase(), value.into()));
    }

    /// Replace every value of `key` with `value`
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.set_all(key, vec![value.into()]);
    }

    /// Replace every value of `key`, keeping the key's first position
    pub fn set_all(&mut self, key: &str, values: Vec<String>) {
        let key = key.to_uppercase();
        let position = self.entries.iter().position(|(k, _)| *k == key);
        self.entries.retain(|(k, _)| *k != key);

        let insert_at = position.unwrap_or(self.entries.len());
        for (offset, value) in values.into_iter().enumerate() {
            self.entries.insert(insert_at + offset, (key.clone(), value));
        }
    }

    /// Remove every value of `key`, returning them
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        let key = key.to_uppercase();
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|(k, _)| *k == key);
        self.entries = kept;
        removed.into_iter().map(|(_, v)| v).collect()
    }

    /// First value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_uppercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        let key = key.to_uppercase();
        self.entries
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether `key` has any value
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Distinct keys in first-appearance order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in &self.entries {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    /// All pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block has no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagBlock {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut block = TagBlock::new();
        for (key, value) in iter {
            block.push(key.as_ref(), value);
        }
        block
    }
}

impl fmt::Display for TagBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
