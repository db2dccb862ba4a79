//! The rule catalog

pub mod edition;
pub mod encoding;
pub mod structure;
pub mod tags;
pub mod tracker;
pub mod tracks;

pub use edition::{CatalogNumber, MissingEdition};
pub use encoding::{encoding_problem, AlbumEncoding, TrackEncoding};
pub use structure::{ComposerFolder, FolderTitle, LeadingSpace, Nesting, PathLength};
pub use tags::{EmptyAlbum, RequiredTags};
pub use tracker::TrackerArtists;
pub use tracks::{ComposerInTitle, FilenameFormat, NumberPadding};
