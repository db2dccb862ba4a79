//! Classical Tagger Metadata
//!
//! Audio tag access for release directories.
//!
//! This crate provides:
//! - A Vorbis comment codec for FLAC files, with atomic replacement
//! - Mapping between comment blocks and tracks (roles from COMPOSER,
//!   role keys such as CONDUCTOR or SOLOIST, and ARTIST)
//! - Tag plans that classify every key and refuse to drop information
//! - A directory loader producing the local view of a release
//!
//! # Example
//!
//! ```rust,no_run
//! use classical_metadata::{load_release, FlacCodec, TagWriter};
//! use std::path::Path;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let release = load_release(Path::new("/music/Goldberg Variations"), &FlacCodec::new())?;
//!
//! let writer = TagWriter::new(FlacCodec::new());
//! for plan in writer.plan_release(&release)? {
//!     print!("{plan}");
//! }
//! # Ok(())
//! # }
//! ```

mod block;
mod codec;
mod error;
mod loader;
mod mapping;
mod plan;
mod writer;

pub use block::{keys, TagBlock};
pub use codec::{FlacCodec, TagCodec};
pub use error::{MetadataError, Result};
pub use loader::load_release;
pub use mapping::{
    artists_from_block, desired_block, format_artist, parse_number, parse_year, split_names,
    track_from_block,
};
pub use plan::{FieldChange, FieldStatus, TagPlan};
pub use writer::TagWriter;
