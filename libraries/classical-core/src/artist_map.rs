//! Artist deduplication
//!
//! `ArtistMap` maps an artist name to the set of roles it was credited with.
//! Names keep insertion order so flattening is stable for a given sequence of
//! `add` calls.

use crate::role::Role;
use crate::types::Artist;

/// Insertion-ordered mapping from artist name to roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistMap {
    entries: Vec<(String, Vec<Role>)>,
}

impl ArtistMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `role` for `name`. Blank names are ignored.
    pub fn add(&mut self, name: &str, role: Role) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, roles)) => {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
            None => self.entries.push((name.to_string(), vec![role])),
        }
    }

    /// Record an artist value
    pub fn add_artist(&mut self, artist: &Artist) {
        self.add(&artist.name, artist.role);
    }

    /// Add every entry of `other`
    pub fn merge(&mut self, other: &ArtistMap) {
        for (name, roles) in &other.entries {
            for role in roles {
                self.add(name, *role);
            }
        }
    }

    /// Roles recorded for `name`
    pub fn roles(&self, name: &str) -> Option<&[Role]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name.trim())
            .map(|(_, roles)| roles.as_slice())
    }

    /// Whether `name` has been recorded
    pub fn contains(&self, name: &str) -> bool {
        self.roles(name).is_some()
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Drop `Unknown` from every name that also has a known role.
    pub fn remove_unknown_roles(&mut self) {
        for (_, roles) in &mut self.entries {
            if roles.len() > 1 && roles.contains(&Role::Unknown) {
                roles.retain(Role::is_known);
            }
        }
    }

    /// One artist per (name, role), names in insertion order
    pub fn flatten(&self) -> Vec<Artist> {
        self.entries
            .iter()
            .flat_map(|(name, roles)| roles.iter().map(move |role| Artist::new(name, *role)))
            .collect()
    }
}

impl<'a> FromIterator<&'a Artist> for ArtistMap {
    fn from_iter<I: IntoIterator<Item = &'a Artist>>(iter: I) -> Self {
        let mut map = ArtistMap::new();
        for artist in iter {
            map.add_artist(artist);
        }
        map
    }
}
