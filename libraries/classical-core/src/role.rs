//! Artist role taxonomy
//!
//! Roles are parsed leniently from source strings (discography credits, tag
//! keys, tracker categories) and fall back to `Role::Unknown` for anything
//! outside the fixed synonym table. `Unknown` and "no role" are the same thing
//! everywhere in the pipeline.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Words that mark an artist name as an ensemble.
const ENSEMBLE_KEYWORDS: &[&str] = &[
    "orchestra",
    "orchestre",
    "orchester",
    "philharmonic",
    "symphony",
    "choir",
    "chorus",
    "kammerchor",
    "ensemble",
    "quartet",
    "trio",
    "quintet",
    "sextet",
    "consort",
    "academy",
    "chamber",
];

/// Role an artist plays on a release or track.
///
/// Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Role information is missing
    #[default]
    Unknown,
    /// Composer of the work
    Composer,
    /// Conductor or chorus master
    Conductor,
    /// Orchestra, choir or chamber group
    Ensemble,
    /// Featured soloist
    Soloist,
    /// Generic performer
    Performer,
    /// Guest performer
    Guest,
    /// DJ or compiler
    Dj,
    /// Producer
    Producer,
    /// Arranger
    Arranger,
    /// Remixer
    Remixer,
}

impl Role {
    /// Every role in display order.
    pub const ALL: [Role; 11] = [
        Role::Unknown,
        Role::Composer,
        Role::Conductor,
        Role::Ensemble,
        Role::Soloist,
        Role::Performer,
        Role::Guest,
        Role::Dj,
        Role::Producer,
        Role::Arranger,
        Role::Remixer,
    ];

    /// Canonical lowercase name, as written to JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unknown => "unknown",
            Role::Composer => "composer",
            Role::Conductor => "conductor",
            Role::Ensemble => "ensemble",
            Role::Soloist => "soloist",
            Role::Performer => "performer",
            Role::Guest => "guest",
            Role::Dj => "dj",
            Role::Producer => "producer",
            Role::Arranger => "arranger",
            Role::Remixer => "remixer",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Unknown => "Unknown",
            Role::Composer => "Composer",
            Role::Conductor => "Conductor",
            Role::Ensemble => "Ensemble",
            Role::Soloist => "Soloist",
            Role::Performer => "Performer",
            Role::Guest => "Guest",
            Role::Dj => "DJ",
            Role::Producer => "Producer",
            Role::Arranger => "Arranger",
            Role::Remixer => "Remixer",
        }
    }

    /// Position of this role in the display order.
    pub fn display_order(&self) -> usize {
        *self as usize
    }

    /// Whether the role performs on the recording.
    pub fn is_performer_like(&self) -> bool {
        matches!(
            self,
            Role::Soloist | Role::Ensemble | Role::Performer | Role::Guest | Role::Conductor
        )
    }

    /// Whether the role carries information (anything but `Unknown`).
    pub fn is_known(&self) -> bool {
        *self != Role::Unknown
    }

    /// `None` for `Unknown`, the role otherwise.
    pub fn known(self) -> Option<Role> {
        self.is_known().then_some(self)
    }

    /// Parse a role string case-insensitively.
    ///
    /// Accepts the canonical name of every role plus a fixed table of
    /// source-specific synonyms. Anything else is `Unknown`.
    pub fn parse(input: &str) -> Role {
        let needle = input.trim().to_lowercase();

        if let Some(role) = Role::ALL.iter().find(|role| role.as_str() == needle) {
            return *role;
        }

        match needle.as_str() {
            "composed by" => Role::Composer,
            "conducted by" | "chorus master" => Role::Conductor,
            "choir" | "chorus" | "orchestra" | "orchestre" | "orchester" => Role::Ensemble,
            "solo" => Role::Soloist,
            "arranged by" => Role::Arranger,
            _ => Role::Unknown,
        }
    }
}

/// Infer a role from an artist name alone.
///
/// Scans the letter-only words of the name for ensemble keywords. A match is
/// `Ensemble`, anything else `Unknown`.
pub fn infer_role(name: &str) -> Role {
    let is_ensemble = name
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .any(|word| ENSEMBLE_KEYWORDS.contains(&word.to_lowercase().as_str()));

    if is_ensemble {
        Role::Ensemble
    } else {
        Role::Unknown
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
