//! Classical Tagger Core
//!
//! Domain types shared by every stage of the re-upload pipeline.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Release`, `Track`, `File`, `Artist`, `Edition`, `Issue`
//! - **Role Taxonomy**: `Role` with its parser and name-based inference
//! - **Deduplication**: `ArtistMap`, a name to role-set mapping
//! - **Positions**: parsing of discography position strings into disc/track
//! - **Source Views**: the scraped and tracker-side shapes consumed by reconciliation
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use classical_core::{Artist, FileEntry, Release, Role, Track};
//!
//! let mut release = Release::new("Goldberg Variations (1981)", "Goldberg Variations");
//! let mut track = Track::new("01 - Aria.flac", 1, 1, "Aria");
//! track.artists.push(Artist::new("Glenn Gould", Role::Soloist));
//! track.artists.push(Artist::new("Johann Sebastian Bach", Role::Composer));
//! release.files.push(FileEntry::Track(track));
//!
//! assert_eq!(release.derive_album_artists(), vec![Artist::new("Glenn Gould", Role::Soloist)]);
//!
//! let json = release.to_json().unwrap();
//! assert_eq!(Release::from_json(&json).unwrap(), release);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod artist_map;
pub mod error;
pub mod position;
pub mod role;
pub mod types;
pub mod views;

pub use artist_map::ArtistMap;
pub use error::{CoreError, Result};
pub use position::{parse_position, Position};
pub use role::{infer_role, Role};
pub use types::{
    last_name, normalize_path, Artist, Edition, File, FileEntry, Issue, Level, Release, Scope,
    SiteMetadata, Track,
};
pub use views::{
    roles_compatible, tracker_role, ScrapeView, ScrapedArtist, ScrapedTrack, TrackerArtist,
    TrackerView,
};
