//! Filesystem-safe name components

/// Characters rejected by at least one common filesystem
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows refuses as a file base name
const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Longest title kept in a track filename, in characters
pub const MAX_TITLE_CHARS: usize = 170;

/// Placeholder for titles that sanitize to nothing
pub const UNTITLED: &str = "Untitled";

/// Sanitize a single path component
///
/// Forbidden and control characters are removed, whitespace runs collapse to
/// one space, leading/trailing whitespace and dots are stripped, and reserved
/// device names get a `_` prefix. The result may be empty.
pub fn sanitize_component(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c == '.' || c.is_whitespace());

    if is_reserved(trimmed) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Sanitize a track title for use in a filename
///
/// Caps the result at [`MAX_TITLE_CHARS`] and falls back to [`UNTITLED`].
pub fn sanitize_title(title: &str) -> String {
    let sanitized = sanitize_component(title);
    let capped = truncate_chars(&sanitized, MAX_TITLE_CHARS);
    let capped = capped.trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    if capped.is_empty() {
        UNTITLED.to_string()
    } else {
        capped.to_string()
    }
}

/// First `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Character count
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_reserved(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name).to_uppercase();
    RESERVED.contains(&base.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_forbidden_characters() {
        assert_eq!(sanitize_component("Valid Name"), "Valid Name");
        assert_eq!(sanitize_component("Bach: Partita"), "Bach Partita");
        assert_eq!(sanitize_component("A<B>C"), "ABC");
        assert_eq!(sanitize_component("What?*"), "What");
        assert_eq!(sanitize_component("AC/DC"), "ACDC");
    }

    #[test]
    fn trims_and_collapses() {
        assert_eq!(sanitize_component("  Trimmed  "), "Trimmed");
        assert_eq!(sanitize_component("trailing..."), "trailing");
        assert_eq!(sanitize_component("...leading"), "leading");
        assert_eq!(sanitize_component("a \t  b\n c"), "a b c");
    }

    #[test]
    fn prefixes_reserved_names() {
        assert_eq!(sanitize_component("CON"), "_CON");
        assert_eq!(sanitize_component("lpt1"), "_lpt1");
        assert_eq!(sanitize_component("nul.txt"), "_nul.txt");
        assert_eq!(sanitize_component("Console"), "Console");
    }

    #[test]
    fn titles_fall_back_and_cap() {
        assert_eq!(sanitize_title("???"), UNTITLED);
        assert_eq!(sanitize_title(""), UNTITLED);

        let long = "x".repeat(300);
        assert_eq!(char_len(&sanitize_title(&long)), MAX_TITLE_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("Dvořák", 4), "Dvoř");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
