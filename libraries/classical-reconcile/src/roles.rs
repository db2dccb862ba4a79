//! Role resolution across sources
//!
//! A credit's role comes from the first source that knows it:
//! the credit itself, the scrape view's extra artists, the local view
//! (album level, then tracks), then inference from the name. Secondary
//! credits naming an instrument or voice part fall back to `Performer`.

use classical_core::{infer_role, Release, Role, ScrapeView, ScrapedArtist};

/// Instruments and voice parts, matched as whole lowercase words
const PERFORMANCE_CREDITS: &[&str] = &[
    "piano",
    "fortepiano",
    "harpsichord",
    "organ",
    "celesta",
    "keyboards",
    "violin",
    "viola",
    "cello",
    "violoncello",
    "bass",
    "contrabass",
    "guitar",
    "lute",
    "theorbo",
    "harp",
    "flute",
    "recorder",
    "oboe",
    "clarinet",
    "bassoon",
    "saxophone",
    "horn",
    "trumpet",
    "trombone",
    "tuba",
    "percussion",
    "timpani",
    "drums",
    "vocals",
    "voice",
    "soprano",
    "mezzo",
    "alto",
    "contralto",
    "countertenor",
    "tenor",
    "baritone",
    "leader",
    "concertmaster",
];

/// `Performer` when a credit string names an instrument or voice part
pub fn performance_role(credit: &str) -> Option<Role> {
    credit
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .any(|word| PERFORMANCE_CREDITS.contains(&word.to_lowercase().as_str()))
        .then_some(Role::Performer)
}

/// Looks up roles for artist names across the available views.
#[derive(Debug, Default)]
pub struct RoleResolver<'a> {
    scrape: Option<&'a ScrapeView>,
    local: Option<&'a Release>,
}

impl<'a> RoleResolver<'a> {
    /// Resolver over the given views
    pub fn new(scrape: Option<&'a ScrapeView>, local: Option<&'a Release>) -> Self {
        Self { scrape, local }
    }

    /// Resolve a scraped credit
    pub fn resolve_scraped(&self, credit: &ScrapedArtist) -> Role {
        self.resolve(&credit.name, credit.parsed_role())
    }

    /// Resolve a secondary credit of a track
    ///
    /// Like [`resolve_scraped`](Self::resolve_scraped), with instrument
    /// credits read as `Performer` when nothing else knows the artist.
    pub fn resolve_extra(&self, credit: &ScrapedArtist) -> Role {
        self.resolve_scraped(credit).known().unwrap_or_else(|| {
            credit
                .role
                .as_deref()
                .and_then(performance_role)
                .unwrap_or(Role::Unknown)
        })
    }

    /// Resolve a name with an optional explicit role
    pub fn resolve(&self, name: &str, explicit: Option<Role>) -> Role {
        explicit
            .and_then(Role::known)
            .or_else(|| self.from_extra_artists(name))
            .or_else(|| self.from_local(name))
            .or_else(|| infer_role(name).known())
            .unwrap_or(Role::Unknown)
    }

    fn from_extra_artists(&self, name: &str) -> Option<Role> {
        let needle = normalize(name);
        self.scrape?
            .extra_artists
            .iter()
            .filter(|credit| normalize(&credit.name) == needle)
            .find_map(ScrapedArtist::parsed_role)
    }

    fn from_local(&self, name: &str) -> Option<Role> {
        let local = self.local?;
        local
            .album_artist
            .iter()
            .chain(local.tracks().flat_map(|t| t.artists.iter()))
            .filter(|artist| artist.same_name(name))
            .find_map(|artist| artist.known_role())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classical_core::Track;

    #[test]
    fn explicit_role_wins() {
        let resolver = RoleResolver::default();
        assert_eq!(
            resolver.resolve("Berlin Philharmonic", Some(Role::Performer)),
            Role::Performer
        );
    }

    #[test]
    fn extra_artists_before_local_view() {
        let scrape = ScrapeView {
            extra_artists: vec![ScrapedArtist::new("Herbert von Karajan", Some("Conductor"))],
            ..ScrapeView::default()
        };
        let mut local = Release::new("/x", "x");
        local.files.push(
            Track::new("1.flac", 1, 1, "t")
                .with_artist("herbert von karajan", Role::Soloist)
                .into(),
        );

        let resolver = RoleResolver::new(Some(&scrape), Some(&local));
        assert_eq!(resolver.resolve("HERBERT VON KARAJAN", None), Role::Conductor);

        let resolver = RoleResolver::new(None, Some(&local));
        assert_eq!(resolver.resolve("Herbert von Karajan", None), Role::Soloist);
    }

    #[test]
    fn unknown_extra_roles_fall_through() {
        let scrape = ScrapeView {
            extra_artists: vec![ScrapedArtist::new("Gould", Some("Piano"))],
            ..ScrapeView::default()
        };
        let resolver = RoleResolver::new(Some(&scrape), None);
        assert_eq!(resolver.resolve("Gould", None), Role::Unknown);
        assert_eq!(resolver.resolve("Emerson String Quartet", None), Role::Ensemble);
    }

    #[test]
    fn instrument_credits_perform() {
        assert_eq!(performance_role("Piano"), Some(Role::Performer));
        assert_eq!(performance_role("Soprano Vocals"), Some(Role::Performer));
        assert_eq!(performance_role("Violin, Leader"), Some(Role::Performer));
        assert_eq!(performance_role("Liner Notes"), None);
        assert_eq!(performance_role("Recorded By"), None);
    }

    #[test]
    fn extra_credits_prefer_known_roles() {
        let mut local = Release::new("/x", "x");
        local.files.push(
            Track::new("1.flac", 1, 1, "t")
                .with_artist("Glenn Gould", Role::Soloist)
                .into(),
        );
        let resolver = RoleResolver::new(None, Some(&local));

        let gould = ScrapedArtist::new("Glenn Gould", Some("Piano"));
        assert_eq!(resolver.resolve_extra(&gould), Role::Soloist);
        let violinist = ScrapedArtist::new("Jane Doe", Some("Violin"));
        assert_eq!(resolver.resolve_extra(&violinist), Role::Performer);
        let engineer = ScrapedArtist::new("Bob Smith", Some("Engineer"));
        assert_eq!(resolver.resolve_extra(&engineer), Role::Unknown);
    }
}
