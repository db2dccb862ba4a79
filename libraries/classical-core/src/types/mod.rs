mod artist;
mod edition;
mod file;
mod issue;
mod release;
mod site_metadata;

pub use artist::{last_name, Artist};
pub use edition::Edition;
pub use file::{normalize_path, File, FileEntry, Track};
pub use issue::{Issue, Level, Scope};
pub use release::Release;
pub use site_metadata::SiteMetadata;
