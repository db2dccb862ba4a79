//! Classical Tagger Reconciliation
//!
//! Merges what a discography source, the audio tags and the tracker say about
//! one release into a single [`Release`](classical_core::Release):
//!
//! 1. tracklist hierarchy is flattened, movements inheriting their parent work
//! 2. every credit gets a role from the first source that knows it
//! 3. credits are deduplicated and album artists derived from the tracks
//! 4. unresolved roles fail the merge (or warn, in lenient mode)
//! 5. on the upload path, every tracker artist must have a compatible local one
//!
//! # Example
//!
//! ```rust
//! use classical_core::{ScrapeView, ScrapedTrack};
//! use classical_reconcile::{Mode, Reconciler};
//!
//! let scrape = ScrapeView {
//!     title: "Motets".into(),
//!     tracklist: vec![ScrapedTrack::new("1", "Exultate Deo")
//!         .with_artist("Francis Poulenc", Some("Composed By"))],
//!     ..ScrapeView::default()
//! };
//!
//! let result = Reconciler::new(Mode::Strict).reconcile(Some(&scrape), None, None);
//! assert!(result.release.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod hierarchy;
pub mod reconciler;
pub mod roles;

pub use hierarchy::{flatten_tracklist, FlatTrack};
pub use reconciler::{merged_description, Mode, Reconciler, Reconciliation};
pub use roles::{performance_role, RoleResolver};
