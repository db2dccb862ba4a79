//! Upload payload
//!
//! Builds the multipart form of a tracker upload from a reconciled release.
//! Artists travel as parallel `artists[]` / `importance[]` fields.

use crate::error::{ClientError, Result};
use classical_core::{Release, Role};
use reqwest::multipart::{Form, Part};
use tracing::warn;

/// Tracker artist importance codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Importance {
    Main = 1,
    Guest = 2,
    Remixer = 3,
    Composer = 4,
    Conductor = 5,
    Dj = 6,
    Producer = 7,
    Arranger = 8,
}

impl Importance {
    /// Importance for a domain role; `None` for `Unknown`
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Soloist | Role::Ensemble | Role::Performer => Some(Importance::Main),
            Role::Guest => Some(Importance::Guest),
            Role::Remixer => Some(Importance::Remixer),
            Role::Composer => Some(Importance::Composer),
            Role::Conductor => Some(Importance::Conductor),
            Role::Dj => Some(Importance::Dj),
            Role::Producer => Some(Importance::Producer),
            Role::Arranger => Some(Importance::Arranger),
            Role::Unknown => None,
        }
    }

    /// Numeric code sent to the tracker
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Everything the tracker needs for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub group_id: u64,
    pub title: String,
    pub year: Option<u32>,
    pub release_type: u32,
    pub remaster_year: Option<u32>,
    pub remaster_record_label: Option<String>,
    pub remaster_catalogue_number: Option<String>,
    pub media: String,
    pub format: String,
    pub bitrate: String,
    pub tags: Vec<String>,
    pub description: String,
    /// Reason the upload replaces an existing torrent
    pub trumpable: Option<String>,
    pub artists: Vec<(String, Importance)>,
    pub torrent_name: String,
    pub torrent: Vec<u8>,
}

impl UploadRequest {
    /// Build a request from a release carrying site metadata
    pub fn from_release(
        release: &Release,
        torrent_name: impl Into<String>,
        torrent: Vec<u8>,
        trump_reason: Option<&str>,
    ) -> Result<Self> {
        let site = release.site_metadata.as_ref().ok_or_else(|| {
            ClientError::InvalidRequest("release has no tracker metadata".into())
        })?;
        if torrent.is_empty() {
            return Err(ClientError::InvalidRequest("torrent file is empty".into()));
        }

        let mut artists: Vec<(String, Importance)> = Vec::new();
        for artist in release.all_artists() {
            let Some(importance) = Importance::for_role(artist.role) else {
                warn!(artist = %artist.name, "Skipping artist without a role");
                continue;
            };
            let entry = (artist.name.clone(), importance);
            if !artists.contains(&entry) {
                artists.push(entry);
            }
        }
        if artists.is_empty() {
            return Err(ClientError::InvalidRequest("release has no uploadable artists".into()));
        }

        let edition = release.edition.as_ref();
        Ok(Self {
            group_id: site.group_id,
            title: release.title.clone(),
            year: release.original_year,
            release_type: site.release_type,
            remaster_year: edition.and_then(|e| e.year),
            remaster_record_label: edition.and_then(|e| e.label.clone()),
            remaster_catalogue_number: edition.and_then(|e| e.catalog_number.clone()),
            media: site.media.clone(),
            format: site.format.clone(),
            bitrate: site.encoding.clone(),
            tags: site.tags.clone(),
            description: site.description.clone(),
            trumpable: trump_reason
                .map(str::trim)
                .filter(|reason| !reason.is_empty())
                .map(str::to_string),
            artists,
            torrent_name: torrent_name.into(),
            torrent,
        })
    }

    /// Text fields in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("type", "0".to_string()),
            ("groupid", self.group_id.to_string()),
            ("title", self.title.clone()),
        ];
        if let Some(year) = self.year {
            fields.push(("year", year.to_string()));
        }
        fields.push(("releasetype", self.release_type.to_string()));
        if let Some(year) = self.remaster_year {
            fields.push(("remaster_year", year.to_string()));
        }
        if let Some(label) = &self.remaster_record_label {
            fields.push(("remaster_record_label", label.clone()));
        }
        if let Some(catalog) = &self.remaster_catalogue_number {
            fields.push(("remaster_catalogue_number", catalog.clone()));
        }
        fields.push(("media", self.media.clone()));
        fields.push(("format", self.format.clone()));
        fields.push(("bitrate", self.bitrate.clone()));
        fields.push(("tags", self.tags.join(",")));
        fields.push(("release_desc", self.description.clone()));
        if let Some(reason) = &self.trumpable {
            fields.push(("trumpable", reason.clone()));
        }
        for (name, importance) in &self.artists {
            fields.push(("artists[]", name.clone()));
            fields.push(("importance[]", importance.code().to_string()));
        }
        fields
    }

    /// Multipart form with the torrent attached as `file_input`
    pub fn to_form(&self) -> Result<Form> {
        let torrent = Part::bytes(self.torrent.clone())
            .file_name(self.torrent_name.clone())
            .mime_str("application/x-bittorrent")?;

        let form = self
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        Ok(form.part("file_input", torrent))
    }
}
