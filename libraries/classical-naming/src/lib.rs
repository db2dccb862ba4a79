//! Classical Tagger Naming
//!
//! Compliant file and directory names for a release:
//!
//! - `NN - Title.ext` track filenames with sanitized titles
//! - a directory name built from title, format, year, composer and
//!   performers within a 180-character budget
//! - a [`LayoutPlan`] that moves tracks into place on disk

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod directory;
pub mod error;
pub mod filename;
pub mod layout;
pub mod sanitize;

pub use directory::{directory_name, MAX_DIRECTORY_CHARS};
pub use error::{NamingError, Result};
pub use filename::{track_filename, track_number};
pub use layout::{LayoutPlan, Rename};
pub use sanitize::{sanitize_component, sanitize_title};
