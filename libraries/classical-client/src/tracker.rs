//! Tracker API client
//!
//! Gazelle-style JSON API: `GET /ajax.php?action=torrent&id=…`,
//! `GET /ajax.php?action=torrentgroup&id=…` and a multipart `POST
//! /upload.php`. Every response is an envelope `{status, error?, response}`
//! whose status must be `"success"`.

use crate::error::{ClientError, Result};
use crate::http::{build_http, normalize_base_url, read_json, send};
use crate::rate_limit::RateLimiter;
use crate::upload::UploadRequest;
use async_trait::async_trait;
use classical_core::{Edition, SiteMetadata, TrackerArtist, TrackerView};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Requests allowed per window
const REQUESTS_PER_WINDOW: u32 = 10;

/// Rate-limit window
const WINDOW: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    error: Option<String>,
    response: Option<T>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T> {
        if self.status != "success" {
            return Err(ClientError::Api(
                self.error.unwrap_or_else(|| format!("status {}", self.status)),
            ));
        }
        self.response
            .ok_or_else(|| ClientError::Parse("success envelope without response".into()))
    }
}

/// Named artist entry of `musicInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicInfoArtist {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// Artists of a group, by tracker category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicInfo {
    pub artists: Vec<MusicInfoArtist>,
    pub with: Vec<MusicInfoArtist>,
    pub composers: Vec<MusicInfoArtist>,
    pub conductor: Vec<MusicInfoArtist>,
    pub dj: Vec<MusicInfoArtist>,
    pub remixed_by: Vec<MusicInfoArtist>,
    pub producer: Vec<MusicInfoArtist>,
    pub arranger: Vec<MusicInfoArtist>,
}

impl MusicInfo {
    /// Every artist with its category, main artists first
    pub fn tracker_artists(&self) -> Vec<TrackerArtist> {
        let categories: [(&str, &[MusicInfoArtist]); 8] = [
            ("artists", &self.artists),
            ("with", &self.with),
            ("composers", &self.composers),
            ("conductor", &self.conductor),
            ("dj", &self.dj),
            ("remixedBy", &self.remixed_by),
            ("producer", &self.producer),
            ("arranger", &self.arranger),
        ];
        categories
            .into_iter()
            .flat_map(|(category, artists)| {
                artists
                    .iter()
                    .map(move |artist| TrackerArtist::new(decode_entities(&artist.name), category))
            })
            .collect()
    }
}

/// Torrent group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentGroup {
    pub id: u64,
    pub name: String,
    pub year: u32,
    pub record_label: String,
    pub catalogue_number: String,
    pub release_type: u32,
    pub tags: Vec<String>,
    pub music_info: Option<MusicInfo>,
}

/// One torrent of a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Torrent {
    pub id: u64,
    pub media: String,
    pub format: String,
    pub encoding: String,
    pub remastered: bool,
    pub remaster_year: u32,
    pub remaster_record_label: String,
    pub remaster_catalogue_number: String,
    pub has_log: bool,
    pub log_score: i32,
    pub has_cue: bool,
    pub description: String,
    pub file_path: String,
}

/// Response of `action=torrent`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentResponse {
    pub group: TorrentGroup,
    pub torrent: Torrent,
}

/// Response of `action=torrentgroup`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentGroupResponse {
    pub group: TorrentGroup,
    #[serde(default)]
    pub torrents: Vec<Torrent>,
}

/// Response of a successful upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "torrentid", alias = "torrentId")]
    pub torrent_id: u64,
    #[serde(default, alias = "groupid", alias = "groupId")]
    pub group_id: u64,
}

/// Decode the HTML entities the tracker leaves in text fields
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn non_empty(value: &str) -> Option<String> {
    let value = decode_entities(value.trim());
    (!value.is_empty()).then_some(value)
}

impl TorrentResponse {
    /// Tracker view of this torrent and its group
    pub fn to_tracker_view(&self, announce_url: &str) -> TrackerView {
        let group = &self.group;
        let torrent = &self.torrent;

        let edition = if torrent.remastered {
            Edition::new(
                non_empty(&torrent.remaster_record_label),
                non_empty(&torrent.remaster_catalogue_number),
                Some(torrent.remaster_year),
            )
        } else {
            Edition::new(
                non_empty(&group.record_label),
                non_empty(&group.catalogue_number),
                Some(group.year),
            )
        };

        TrackerView {
            site_metadata: SiteMetadata {
                torrent_id: torrent.id,
                group_id: group.id,
                tags: group.tags.clone(),
                description: decode_entities(&torrent.description),
                media: torrent.media.clone(),
                format: torrent.format.clone(),
                encoding: torrent.encoding.clone(),
                has_log: torrent.has_log,
                has_cue: torrent.has_cue,
                log_score: torrent.log_score,
                release_type: group.release_type,
                announce_url: announce_url.to_string(),
            },
            group_name: decode_entities(&group.name),
            group_year: (group.year > 0).then_some(group.year),
            artists: group
                .music_info
                .as_ref()
                .map(MusicInfo::tracker_artists)
                .unwrap_or_default(),
            edition,
        }
    }
}

/// Operations the upload pipeline needs from the tracker.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// Fetch a torrent and its group
    async fn torrent(&self, id: u64, cancel: &CancellationToken) -> Result<TorrentResponse>;

    /// Fetch a group and all its torrents
    async fn torrent_group(
        &self,
        id: u64,
        cancel: &CancellationToken,
    ) -> Result<TorrentGroupResponse>;

    /// Upload a new torrent
    async fn upload(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<UploadResponse>;
}

/// HTTP implementation of [`TrackerApi`].
#[derive(Debug)]
pub struct TrackerClient {
    http: Client,
    base_url: String,
    api_key: String,
    limiter: RateLimiter,
}

impl TrackerClient {
    /// Create a client authenticating with an API key header
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.into(),
            limiter: RateLimiter::new(REQUESTS_PER_WINDOW, WINDOW),
        })
    }

    /// Tracker root in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ajax<T: DeserializeOwned>(
        &self,
        action: &str,
        id: u64,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = format!("{}/ajax.php", self.base_url);
        debug!(action, id, "Tracker request");
        let request = self
            .http
            .get(&url)
            .query(&[("action", action), ("id", &id.to_string())])
            .header("Authorization", &self.api_key);
        let response = send(request, &self.limiter, cancel).await?;
        read_json::<Envelope<T>>(response, cancel).await?.into_result()
    }
}

#[async_trait]
impl TrackerApi for TrackerClient {
    async fn torrent(&self, id: u64, cancel: &CancellationToken) -> Result<TorrentResponse> {
        let response: TorrentResponse = self.ajax("torrent", id, cancel).await?;
        info!(
            torrent_id = id,
            group = %response.group.name,
            "Fetched tracker torrent"
        );
        Ok(response)
    }

    async fn torrent_group(
        &self,
        id: u64,
        cancel: &CancellationToken,
    ) -> Result<TorrentGroupResponse> {
        self.ajax("torrentgroup", id, cancel).await
    }

    async fn upload(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<UploadResponse> {
        let url = format!("{}/upload.php", self.base_url);
        let form = request.to_form()?;
        debug!(group_id = request.group_id, "Uploading torrent");

        let http_request = self
            .http
            .post(&url)
            .header("Authorization", &self.api_key)
            .multipart(form);
        let response = send(http_request, &self.limiter, cancel).await?;
        let uploaded = read_json::<Envelope<UploadResponse>>(response, cancel)
            .await?
            .into_result()?;

        info!(
            torrent_id = uploaded.torrent_id,
            group_id = uploaded.group_id,
            "Torrent uploaded"
        );
        Ok(uploaded)
    }
}
