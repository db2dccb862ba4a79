//! Discogs discography client
//!
//! Two endpoints are used: database search and release-by-id. Both are
//! rate-limited to 60 requests per minute and cached under the `discogs`
//! namespace when a [`Cache`] is attached.

use crate::cache::{Cache, DISCOGS_NAMESPACE};
use crate::error::Result;
use crate::http::{build_http, normalize_base_url, read_json, send};
use crate::rate_limit::RateLimiter;
use classical_core::{ScrapeView, ScrapedArtist, ScrapedTrack};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Public API root
pub const DISCOGS_API_BASE: &str = "https://api.discogs.com";

/// Requests allowed per minute
const REQUESTS_PER_MINUTE: u32 = 60;

/// Discogs disambiguation suffix, as in `John Smith (3)`
static DISAMBIGUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\(\d+\)$").expect("disambiguation pattern"));

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<DiscogsSearchResult>,
}

/// A single hit of the database search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscogsSearchResult {
    /// Release id
    pub id: u64,
    /// Combined "Artist - Title" string
    #[serde(default)]
    pub title: String,
    /// Release year, as text
    #[serde(default)]
    pub year: Option<String>,
    /// Label names
    #[serde(default)]
    pub label: Vec<String>,
    /// Catalog number
    #[serde(default)]
    pub catno: Option<String>,
    /// Format names
    #[serde(default)]
    pub format: Vec<String>,
}

/// Full release from the releases endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscogsRelease {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// `0` when unknown
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub labels: Vec<DiscogsLabel>,
    #[serde(default)]
    pub artists: Vec<DiscogsArtist>,
    #[serde(default)]
    pub extraartists: Vec<DiscogsArtist>,
    #[serde(default)]
    pub tracklist: Vec<DiscogsTrack>,
}

/// Label credit of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscogsLabel {
    pub name: String,
    #[serde(default)]
    pub catno: Option<String>,
}

/// Artist credit, main or extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscogsArtist {
    pub name: String,
    /// Credit role, e.g. "Conductor" or "Piano [Solo]"
    #[serde(default)]
    pub role: String,
}

/// Tracklist entry; index entries carry sub-tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscogsTrack {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type_")]
    pub kind: String,
    #[serde(default)]
    pub artists: Vec<DiscogsArtist>,
    #[serde(default)]
    pub extraartists: Vec<DiscogsArtist>,
    #[serde(default)]
    pub sub_tracks: Vec<DiscogsTrack>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Artist name without the Discogs disambiguation suffix
pub fn clean_artist_name(name: &str) -> String {
    DISAMBIGUATION.replace(name.trim(), "").into_owned()
}

/// First credit of a role string, without bracketed details
///
/// `"Piano [Solo], Liner Notes"` becomes `"Piano"`.
fn primary_role(role: &str) -> Option<&str> {
    let first = role.split(',').next().unwrap_or_default();
    let first = first.split('[').next().unwrap_or_default().trim();
    (!first.is_empty()).then_some(first)
}

fn scraped_artist(artist: &DiscogsArtist) -> ScrapedArtist {
    ScrapedArtist::new(clean_artist_name(&artist.name), primary_role(&artist.role))
}

fn scraped_track(track: &DiscogsTrack) -> ScrapedTrack {
    ScrapedTrack {
        position: track.position.clone(),
        title: track.title.clone(),
        artists: track.artists.iter().map(scraped_artist).collect(),
        extra_artists: track.extraartists.iter().map(scraped_artist).collect(),
        sub_tracks: track.sub_tracks.iter().map(scraped_track).collect(),
    }
}

impl DiscogsRelease {
    /// Scrape view of this release
    pub fn to_scrape_view(&self) -> ScrapeView {
        let label = self.labels.first();
        ScrapeView {
            id: self.id,
            title: self.title.trim().to_string(),
            year: (self.year > 0).then_some(self.year),
            label: label.map(|l| clean_artist_name(&l.name)),
            catalog_number: label
                .and_then(|l| l.catno.clone())
                .filter(|catno| !catno.trim().eq_ignore_ascii_case("none")),
            artists: self.artists.iter().map(scraped_artist).collect(),
            extra_artists: self.extraartists.iter().map(scraped_artist).collect(),
            tracklist: self
                .tracklist
                .iter()
                .filter(|track| track.kind != "heading")
                .map(scraped_track)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Parameters of a release search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: String,
    pub title: String,
    /// Optional format filter, e.g. "CD"
    pub format: Option<String>,
}

impl SearchQuery {
    /// Search for `title` by `artist`
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            format: None,
        }
    }

    /// Restrict results to a format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    fn cache_key(&self) -> String {
        format!(
            "search|{}|{}|{}",
            self.artist,
            self.title,
            self.format.as_deref().unwrap_or_default()
        )
    }

    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("artist", self.artist.as_str()),
            ("release_title", self.title.as_str()),
            ("type", "release"),
        ];
        if let Some(format) = &self.format {
            params.push(("format", format.as_str()));
        }
        params
    }
}

/// Discogs API client.
///
/// ```ignore
/// let client = DiscogsClient::new(DISCOGS_API_BASE, "token")?.with_cache(cache);
/// let view = client.scrape(249504, &cancel).await?;
/// ```
#[derive(Debug)]
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    token: String,
    limiter: RateLimiter,
    cache: Option<Cache>,
}

impl DiscogsClient {
    /// Create a client authenticating with a personal access token
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            base_url: normalize_base_url(base_url)?,
            token: token.into(),
            limiter: RateLimiter::per_minute(REQUESTS_PER_MINUTE),
            cache: None,
        })
    }

    /// Cache responses in `cache`
    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// API root in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        format!("Discogs token={}", self.token)
    }

    async fn get_cached<T>(
        &self,
        key: &str,
        path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(hit) = self
            .cache
            .as_ref()
            .and_then(|cache| cache.load::<T>(key, DISCOGS_NAMESPACE))
        {
            return Ok(hit);
        }

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "Discogs request");
        let request = self
            .http
            .get(&url)
            .query(params)
            .header("Authorization", self.auth_header());
        let response = send(request, &self.limiter, cancel).await?;
        let value: T = read_json(response, cancel).await?;

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.save(key, &value, DISCOGS_NAMESPACE) {
                warn!(key, error = %err, "Failed to cache Discogs response");
            }
        }
        Ok(value)
    }

    /// Search releases
    pub async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<DiscogsSearchResult>> {
        let response: SearchResponse = self
            .get_cached(&query.cache_key(), "/database/search", &query.params(), cancel)
            .await?;
        debug!(hits = response.results.len(), "Discogs search finished");
        Ok(response.results)
    }

    /// Fetch one release
    pub async fn release(&self, id: u64, cancel: &CancellationToken) -> Result<DiscogsRelease> {
        self.get_cached(&format!("release-{id}"), &format!("/releases/{id}"), &[], cancel)
            .await
    }

    /// Fetch one release as a scrape view
    pub async fn scrape(&self, id: u64, cancel: &CancellationToken) -> Result<ScrapeView> {
        let release = self.release(id, cancel).await?;
        info!(id, title = %release.title, tracks = release.tracklist.len(), "Fetched release");
        Ok(release.to_scrape_view())
    }

    /// Search and scrape the first hit, if any
    pub async fn find(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapeView>> {
        let results = self.search(query, cancel).await?;
        let Some(first) = results.first() else {
            info!(artist = %query.artist, title = %query.title, "No Discogs release found");
            return Ok(None);
        };
        self.scrape(first.id, cancel).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_disambiguation_suffix() {
        assert_eq!(clean_artist_name("John Smith (3)"), "John Smith");
        assert_eq!(clean_artist_name(" Gould "), "Gould");
        assert_eq!(clean_artist_name("Ensemble (1994)"), "Ensemble");
        assert_eq!(clean_artist_name("Trio (Live)"), "Trio (Live)");
    }

    #[test]
    fn primary_role_drops_details() {
        assert_eq!(primary_role("Piano [Solo], Liner Notes"), Some("Piano"));
        assert_eq!(primary_role("Conductor"), Some("Conductor"));
        assert_eq!(primary_role(""), None);
    }

    #[test]
    fn headings_are_dropped_from_the_tracklist() {
        let release = DiscogsRelease {
            id: 1,
            title: "Partitas".into(),
            year: 0,
            tracklist: vec![
                DiscogsTrack {
                    title: "Partita No. 1".into(),
                    kind: "heading".into(),
                    ..DiscogsTrack::default()
                },
                DiscogsTrack {
                    position: "1".into(),
                    title: "Praeludium".into(),
                    kind: "track".into(),
                    ..DiscogsTrack::default()
                },
            ],
            ..DiscogsRelease::default()
        };

        let view = release.to_scrape_view();
        assert_eq!(view.year, None);
        assert_eq!(view.tracklist.len(), 1);
        assert_eq!(view.tracklist[0].title, "Praeludium");
    }

    #[test]
    fn search_params_include_format_filter() {
        let query = SearchQuery::new("Gould", "Goldberg").with_format("CD");
        assert_eq!(
            query.params(),
            vec![
                ("artist", "Gould"),
                ("release_title", "Goldberg"),
                ("type", "release"),
                ("format", "CD"),
            ]
        );
    }
}
