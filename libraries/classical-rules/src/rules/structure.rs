//! Directory structure rules: folder naming, nesting, path length

use crate::rule::{Rule, RuleContext};
use classical_core::{last_name, Issue, Scope};
use classical_naming::sanitize_component;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest allowed `folder/relative/path`, in characters
pub const MAX_PATH_CHARS: usize = 180;

/// Disc subfolders such as `CD1`, `Disc 2`, `disk03`
static DISC_FOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(cd|disc|disk)\s*\d+").expect("disc folder pattern")
});

/// 2.3.2: the folder name contains the album title.
pub struct FolderTitle;

impl Rule for FolderTitle {
    fn id(&self) -> &'static str {
        "2.3.2"
    }

    fn description(&self) -> &'static str {
        "Folder name must contain the album title"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let title = ctx.release.title.trim();
        if title.is_empty() {
            return Vec::new();
        }

        let folder = ctx.folder().to_lowercase();
        let sanitized = sanitize_component(title).to_lowercase();
        if folder.contains(&title.to_lowercase()) || folder.contains(&sanitized) {
            return Vec::new();
        }

        vec![Issue::warning(
            Scope::Directory,
            self.id(),
            format!("folder {:?} does not contain the album title {title:?}", ctx.folder()),
        )]
    }
}

/// 2.3.3: at most one level of disc subfolders.
pub struct Nesting;

impl Rule for Nesting {
    fn id(&self) -> &'static str {
        "2.3.3"
    }

    fn description(&self) -> &'static str {
        "Files may sit at most one disc folder below the release root"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for entry in &ctx.release.files {
            if entry.file().depth() > 1 {
                issues.push(Issue::error(
                    Scope::Directory,
                    self.id(),
                    format!("{} is nested more than one folder deep", entry.path()),
                ));
            }
        }

        let mut folders: Vec<&str> = Vec::new();
        for (_, track) in ctx.tracks() {
            if let Some(folder) = track.file.directories().first() {
                if !folders.contains(folder) {
                    folders.push(folder);
                }
            }
        }
        if !folders.is_empty() && !folders.iter().any(|f| DISC_FOLDER.is_match(f)) {
            issues.push(Issue::warning(
                Scope::Directory,
                self.id(),
                format!(
                    "subfolders present but none is a disc folder: {}",
                    folders.join(", ")
                ),
            ));
        }

        issues
    }
}

/// 2.3.12: full path length.
pub struct PathLength;

impl Rule for PathLength {
    fn id(&self) -> &'static str {
        "2.3.12"
    }

    fn description(&self) -> &'static str {
        "Folder plus file path must not exceed 180 characters"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let folder = ctx.folder();
        ctx.release
            .files
            .iter()
            .filter_map(|entry| {
                let length = folder.chars().count() + 1 + entry.path().chars().count();
                (length > MAX_PATH_CHARS).then(|| {
                    Issue::error(
                        Scope::Directory,
                        self.id(),
                        format!(
                            "path {folder}/{} is {length} characters (limit {MAX_PATH_CHARS})",
                            entry.path()
                        ),
                    )
                })
            })
            .collect()
    }
}

/// 2.3.20: no path component starts with a space.
pub struct LeadingSpace;

impl Rule for LeadingSpace {
    fn id(&self) -> &'static str {
        "2.3.20"
    }

    fn description(&self) -> &'static str {
        "No folder or file name may begin with a space"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        if ctx.folder().starts_with(' ') {
            issues.push(Issue::error(
                Scope::Directory,
                self.id(),
                format!("folder {:?} begins with a space", ctx.folder()),
            ));
        }

        for entry in &ctx.release.files {
            if entry.path().split('/').any(|part| part.starts_with(' ')) {
                issues.push(Issue::error(
                    Scope::Directory,
                    self.id(),
                    format!("path {:?} has a component beginning with a space", entry.path()),
                ));
            }
        }

        issues
    }
}

/// cls.folder: classical folders name a composer.
pub struct ComposerFolder;

impl Rule for ComposerFolder {
    fn id(&self) -> &'static str {
        "cls.folder"
    }

    fn description(&self) -> &'static str {
        "Classical folder names should mention a composer"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut last_names: Vec<String> = Vec::new();
        for (_, track) in ctx.tracks() {
            for composer in track.composers() {
                let token = last_name(&composer.name).to_lowercase();
                if !last_names.contains(&token) {
                    last_names.push(token);
                }
            }
        }
        if last_names.is_empty() {
            return Vec::new();
        }

        let folder = ctx.folder().to_lowercase();
        if last_names.iter().any(|name| folder.contains(name.as_str())) {
            return Vec::new();
        }

        vec![Issue::warning(
            Scope::Directory,
            self.id(),
            format!("folder {:?} does not mention any composer", ctx.folder()),
        )]
    }
}
