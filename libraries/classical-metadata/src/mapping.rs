//! Mapping between comment blocks and the domain model

use crate::block::{keys, TagBlock};
use classical_core::{infer_role, Artist, ArtistMap, Edition, Release, Role, Track};

/// Keys whose values name artists, with the role they imply
const ROLE_KEYS: &[(&str, Role)] = &[
    (keys::SOLOIST, Role::Soloist),
    (keys::PERFORMER, Role::Performer),
    (keys::GUEST, Role::Guest),
    (keys::ENSEMBLE, Role::Ensemble),
    (keys::ORCHESTRA, Role::Ensemble),
    (keys::CONDUCTOR, Role::Conductor),
    (keys::COMPOSER, Role::Composer),
    (keys::ARRANGER, Role::Arranger),
    (keys::PRODUCER, Role::Producer),
    (keys::REMIXER, Role::Remixer),
    (keys::DJMIXER, Role::Dj),
];

/// Role keys written after ARTIST and ALBUMARTIST
const WRITTEN_ROLE_KEYS: &[(&str, Role)] = &[
    (keys::SOLOIST, Role::Soloist),
    (keys::PERFORMER, Role::Performer),
    (keys::GUEST, Role::Guest),
    (keys::ENSEMBLE, Role::Ensemble),
    (keys::CONDUCTOR, Role::Conductor),
    (keys::ARRANGER, Role::Arranger),
    (keys::PRODUCER, Role::Producer),
    (keys::REMIXER, Role::Remixer),
    (keys::DJMIXER, Role::Dj),
];

/// Split a list-valued field on commas and semicolons
pub fn split_names(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading number of a field such as `3` or `3/12`
pub fn parse_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// First four-digit run of a date field (`1981`, `1981-05-02`)
pub fn parse_year(value: &str) -> Option<u32> {
    let chars: Vec<char> = value.chars().collect();
    chars
        .windows(4)
        .find(|w| w.iter().all(char::is_ascii_digit))
        .and_then(|w| w.iter().collect::<String>().parse().ok())
        .filter(|year| *year > 0)
}

/// Artists credited by a comment block
///
/// Role-specific keys come first; ARTIST elements not credited under one
/// of them get an inferred role.
pub fn artists_from_block(block: &TagBlock) -> Vec<Artist> {
    let mut map = ArtistMap::new();
    for (key, role) in ROLE_KEYS {
        for value in block.get_all(key) {
            for name in split_names(value) {
                map.add(&name, *role);
            }
        }
    }
    for value in block.get_all(keys::ARTIST) {
        for name in split_names(value) {
            if !map.contains(&name) {
                map.add(&name, infer_role(&name));
            }
        }
    }
    map.remove_unknown_roles();
    map.flatten()
}

/// Album-level artists credited by ALBUMARTIST, with roles from `known`
pub fn album_artists_from_block(block: &TagBlock, known: &[Artist]) -> Vec<Artist> {
    let mut map = ArtistMap::new();
    for value in block.get_all(keys::ALBUMARTIST) {
        for name in split_names(value) {
            let role = known
                .iter()
                .find(|artist| artist.same_name(&name) && artist.role.is_known())
                .map_or_else(|| infer_role(&name), |artist| artist.role);
            map.add(&name, role);
        }
    }
    map.remove_unknown_roles();
    map.flatten()
}

/// Track described by a comment block
pub fn track_from_block(path: &str, size: u64, block: &TagBlock) -> Track {
    let mut track = Track::new(
        path,
        block.get(keys::DISCNUMBER).and_then(parse_number).unwrap_or(1),
        block
            .get(keys::TRACKNUMBER)
            .and_then(parse_number)
            .unwrap_or(0),
        block.get(keys::TITLE).unwrap_or_default().trim(),
    );
    track.file.size = size;
    track.artists = artists_from_block(block);
    track
}

/// Album title, original year and edition described by a comment block
pub fn album_from_block(block: &TagBlock) -> (String, Option<u32>, Option<Edition>) {
    let title = block.get(keys::ALBUM).unwrap_or_default().trim().to_string();
    let date = block.get(keys::DATE).and_then(parse_year);
    let original_year = block
        .get(keys::ORIGINALDATE)
        .and_then(parse_year)
        .or(date);
    let edition = Edition::new(
        block.get(keys::LABEL).map(str::to_string),
        block.get(keys::CATALOGNUMBER).map(str::to_string),
        date,
    );
    (title, original_year, edition)
}

/// ARTIST value: soloists, ensembles, conductors, then other performers
///
/// Composers and non-performing roles are left out.
pub fn format_artist(artists: &[Artist]) -> String {
    let groups: [&[Role]; 4] = [
        &[Role::Soloist],
        &[Role::Ensemble],
        &[Role::Conductor],
        &[Role::Performer, Role::Guest, Role::Unknown],
    ];

    let mut names: Vec<&str> = Vec::new();
    for group in groups {
        for artist in artists.iter().filter(|a| group.contains(&a.role)) {
            if !names.contains(&artist.name.as_str()) {
                names.push(&artist.name);
            }
        }
    }
    names.join(", ")
}

fn join_role(artists: &[Artist], role: Role) -> Option<String> {
    let mut names: Vec<&str> = Vec::new();
    for artist in artists.iter().filter(|a| a.role == role) {
        if !names.contains(&artist.name.as_str()) {
            names.push(&artist.name);
        }
    }
    (!names.is_empty()).then(|| names.join(", "))
}

/// Comment block the tagger wants on `track`
pub fn desired_block(release: &Release, track: &Track) -> TagBlock {
    let mut block = TagBlock::new();
    block.push(keys::TITLE, track.title.as_str());
    block.push(keys::ALBUM, release.title.as_str());
    block.push(keys::TRACKNUMBER, track.track.to_string());
    block.push(keys::DISCNUMBER, track.disc.to_string());

    if let Some(composers) = join_role(&track.artists, Role::Composer) {
        block.push(keys::COMPOSER, composers);
    }
    let artist = format_artist(&track.artists);
    if !artist.is_empty() {
        block.push(keys::ARTIST, artist);
    }
    let album_artist = format_artist(&release.album_artist);
    if !album_artist.is_empty() {
        block.push(keys::ALBUMARTIST, album_artist);
    }
    for (key, role) in WRITTEN_ROLE_KEYS {
        if let Some(names) = join_role(&track.artists, *role) {
            block.push(key, names);
        }
    }

    if let Some(year) = release.original_year {
        block.push(keys::ORIGINALDATE, year.to_string());
    }
    if let Some(edition) = &release.edition {
        if let Some(year) = edition.year {
            block.push(keys::DATE, year.to_string());
        }
        if let Some(label) = &edition.label {
            block.push(keys::LABEL, label.as_str());
        }
        if let Some(catalog) = &edition.catalog_number {
            block.push(keys::CATALOGNUMBER, catalog.as_str());
        }
    }
    block
}
