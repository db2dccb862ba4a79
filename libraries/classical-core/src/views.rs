//! Source views consumed by reconciliation
//!
//! A `ScrapeView` is what the discography source says about a release, a
//! `TrackerView` is what the tracker already holds. Both are partial: every
//! field may be missing and roles arrive as free-form strings.

use crate::role::Role;
use crate::types::{Artist, Edition, SiteMetadata};
use serde::{Deserialize, Serialize};

/// An artist credit as the discography source writes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrapedArtist {
    /// Credited name
    pub name: String,

    /// Free-form role string ("Composed By", "Conductor", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ScrapedArtist {
    /// Create a credit
    pub fn new(name: impl Into<String>, role: Option<&str>) -> Self {
        Self {
            name: name.into(),
            role: role.map(str::to_string),
        }
    }

    /// Parsed role, `None` when absent or unrecognised
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().map(Role::parse).and_then(Role::known)
    }
}

/// One tracklist entry, possibly a parent work with sub-tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrapedTrack {
    /// Position string ("7", "2-10", "CD3-2")
    #[serde(default)]
    pub position: String,

    /// Title
    #[serde(default)]
    pub title: String,

    /// Main credits on this entry
    #[serde(default)]
    pub artists: Vec<ScrapedArtist>,

    /// Secondary credits on this entry
    #[serde(default)]
    pub extra_artists: Vec<ScrapedArtist>,

    /// Movements of a parent work
    #[serde(default)]
    pub sub_tracks: Vec<ScrapedTrack>,
}

impl ScrapedTrack {
    /// Create an entry without credits
    pub fn new(position: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder-style credit addition
    pub fn with_artist(mut self, name: &str, role: Option<&str>) -> Self {
        self.artists.push(ScrapedArtist::new(name, role));
        self
    }

    /// Builder-style sub-track addition
    pub fn with_sub_track(mut self, sub: ScrapedTrack) -> Self {
        self.sub_tracks.push(sub);
        self
    }
}

/// A release as the discography source describes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrapeView {
    /// Source identifier
    #[serde(default)]
    pub id: u64,

    /// Album title
    #[serde(default)]
    pub title: String,

    /// Release year
    #[serde(default)]
    pub year: Option<u32>,

    /// First label
    #[serde(default)]
    pub label: Option<String>,

    /// Catalog number on the first label
    #[serde(default)]
    pub catalog_number: Option<String>,

    /// Release-level main credits
    #[serde(default)]
    pub artists: Vec<ScrapedArtist>,

    /// Release-level secondary credits, usually with roles
    #[serde(default)]
    pub extra_artists: Vec<ScrapedArtist>,

    /// Tracklist in source order
    #[serde(default)]
    pub tracklist: Vec<ScrapedTrack>,
}

impl ScrapeView {
    /// Edition built from label, catalog number and year
    pub fn edition(&self) -> Option<Edition> {
        Edition::new(self.label.clone(), self.catalog_number.clone(), self.year)
    }
}

/// An artist as the tracker groups it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerArtist {
    /// Name
    pub name: String,

    /// Tracker category ("artists", "composers", "conductor", "with", ...)
    pub category: String,
}

impl TrackerArtist {
    /// Create an entry
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    /// Domain role for the category
    pub fn role(&self) -> Role {
        tracker_role(&self.category)
    }
}

/// What the tracker already holds for the torrent being replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerView {
    /// Torrent and group descriptors
    pub site_metadata: SiteMetadata,

    /// Group name (album title)
    #[serde(default)]
    pub group_name: String,

    /// Group year
    #[serde(default)]
    pub group_year: Option<u32>,

    /// Categorized artists
    #[serde(default)]
    pub artists: Vec<TrackerArtist>,

    /// Remaster edition of the torrent
    #[serde(default)]
    pub edition: Option<Edition>,
}

impl TrackerView {
    /// Artists mapped to domain roles, in category order
    pub fn flattened_artists(&self) -> Vec<(String, Role)> {
        self.artists
            .iter()
            .map(|artist| (artist.name.trim().to_string(), artist.role()))
            .collect()
    }

    /// Tracker artists with no compatible local counterpart
    ///
    /// Every tracker artist needs a local artist with the same name
    /// (case-insensitive) and a compatible role. Extra local artists are fine.
    pub fn missing_from<'a>(
        &self,
        local: impl IntoIterator<Item = &'a Artist>,
    ) -> Vec<(String, Role)> {
        let local: Vec<&Artist> = local.into_iter().collect();
        self.flattened_artists()
            .into_iter()
            .filter(|(name, role)| {
                !local
                    .iter()
                    .any(|artist| artist.same_name(name) && roles_compatible(*role, artist.role))
            })
            .collect()
    }
}

/// Whether a local role satisfies a tracker role
///
/// Identical roles match; the tracker's generic `Performer` also accepts a
/// local soloist, ensemble, performer or guest.
pub fn roles_compatible(tracker: Role, local: Role) -> bool {
    tracker == local
        || (tracker == Role::Performer
            && matches!(
                local,
                Role::Soloist | Role::Ensemble | Role::Performer | Role::Guest
            ))
}

/// Map a tracker role category to a domain role
pub fn tracker_role(category: &str) -> Role {
    match category.trim().to_lowercase().as_str() {
        "composer" | "composers" => Role::Composer,
        "conductor" | "conductors" => Role::Conductor,
        "artists" | "artist" => Role::Performer,
        "with" | "guest" => Role::Guest,
        "producer" | "producers" => Role::Producer,
        "dj" | "djs" => Role::Dj,
        "remixer" | "remixedby" => Role::Remixer,
        "arranger" | "arrangers" => Role::Arranger,
        _ => Role::Unknown,
    }
}
