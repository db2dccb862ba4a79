//! Artist types

use crate::error::{CoreError, Result};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A credited artist: a name paired with a role.
///
/// Equality is exact on both fields, so the same name with two roles is two
/// distinct artists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    /// Display name, trimmed
    pub name: String,

    /// Role on the release (absent in JSON means `Unknown`)
    #[serde(default, skip_serializing_if = "is_unknown")]
    pub role: Role,
}

fn is_unknown(role: &Role) -> bool {
    !role.is_known()
}

impl Artist {
    /// Create an artist, trimming the name
    pub fn new(name: impl AsRef<str>, role: Role) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            role,
        }
    }

    /// Role, or `None` when it is `Unknown`
    pub fn known_role(&self) -> Option<Role> {
        self.role.known()
    }

    /// Whether this artist is credited as composer
    pub fn is_composer(&self) -> bool {
        self.role == Role::Composer
    }

    /// Whether this artist performs on the recording
    pub fn is_performer_like(&self) -> bool {
        self.role.is_performer_like()
    }

    /// Case-insensitive name comparison
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }

    /// Last whitespace-separated word of the name
    pub fn last_name(&self) -> &str {
        last_name(&self.name)
    }

    /// Check the name invariant
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_input("artist name cannot be empty"));
        }
        Ok(())
    }
}

/// Last whitespace-separated word of a name, or the name itself
pub fn last_name(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name() {
        let artist = Artist::new("  Glenn Gould ", Role::Soloist);
        assert_eq!(artist.name, "Glenn Gould");
    }

    #[test]
    fn same_name_different_role_is_distinct() {
        let a = Artist::new("Leonard Bernstein", Role::Conductor);
        let b = Artist::new("Leonard Bernstein", Role::Composer);
        assert_ne!(a, b);
        assert!(a.same_name("leonard bernstein"));
    }

    #[test]
    fn last_name_of_multi_word_names() {
        assert_eq!(
            Artist::new("Johann Sebastian Bach", Role::Composer).last_name(),
            "Bach"
        );
        assert_eq!(Artist::new("Poulenc", Role::Composer).last_name(), "Poulenc");
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(Artist::new("   ", Role::Soloist).validate().is_err());
        assert!(Artist::new("Gould", Role::Soloist).validate().is_ok());
    }

    #[test]
    fn missing_role_deserializes_as_unknown() {
        let artist: Artist = serde_json::from_str(r#"{"name":"Anonymous"}"#).unwrap();
        assert_eq!(artist.role, Role::Unknown);
        assert_eq!(artist.known_role(), None);
        assert_eq!(
            serde_json::to_string(&artist).unwrap(),
            r#"{"name":"Anonymous"}"#
        );
    }
}
