//! Classical Tagger Client
//!
//! Remote services used by the tagging pipeline.
//!
//! # Features
//!
//! - **Rate limiting**: leaky bucket anchored to response times
//! - **Cache**: namespaced JSON and torrent blobs with a time-to-live
//! - **Discogs**: release search and release lookup as scrape views
//! - **Tracker**: torrent and group lookup, multipart upload
//! - **Torrents**: `.torrent` creation through `mktorrent`
//!
//! Every suspending operation takes a [`CancellationToken`] and returns
//! [`ClientError::Cancelled`] once it fires.
//!
//! # Example
//!
//! ```ignore
//! use classical_client::{Cache, DiscogsClient, SearchQuery, DISCOGS_API_BASE};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let client = DiscogsClient::new(DISCOGS_API_BASE, token)?
//!     .with_cache(Cache::new(cache_dir, Duration::from_secs(7 * 24 * 3600)));
//!
//! let query = SearchQuery::new("Glenn Gould", "Goldberg Variations");
//! if let Some(view) = client.find(&query, &cancel).await? {
//!     println!("{} ({} tracks)", view.title, view.tracklist.len());
//! }
//! ```

mod cache;
mod discogs;
mod error;
mod http;
mod rate_limit;
mod torrent;
mod tracker;
mod upload;

pub use cache::{sanitize_key, Cache, DISCOGS_NAMESPACE, TORRENT_NAMESPACE};
pub use discogs::{
    clean_artist_name, DiscogsArtist, DiscogsClient, DiscogsLabel, DiscogsRelease,
    DiscogsSearchResult, DiscogsTrack, SearchQuery, DISCOGS_API_BASE,
};
pub use error::{ClientError, RateLimitError, Result};
pub use http::USER_AGENT;
pub use rate_limit::RateLimiter;
pub use torrent::{TorrentMaker, PIECE_LENGTH_EXPONENT};
pub use tracker::{
    decode_entities, MusicInfo, MusicInfoArtist, Torrent, TorrentGroup, TorrentGroupResponse,
    TorrentResponse, TrackerApi, TrackerClient, UploadResponse,
};
pub use upload::{Importance, UploadRequest};

pub use tokio_util::sync::CancellationToken;
