//! Discography position strings
//!
//! Positions like `"7"`, `"2-10"` or `"CD3-2"` become a (disc, track) pair.
//! Anything the parser does not understand, side letters (`"B4"`), dotted
//! sub-positions (`"3.4"`) and free text (`"Video 1"`) included, yields track 0,
//! which callers treat as "not a music track".

use serde::{Deserialize, Serialize};

/// A parsed disc and track number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Disc number, at least 1
    pub disc: u32,
    /// Track number, 0 when unparseable
    pub track: u32,
}

impl Position {
    /// Unparseable position
    pub const UNPARSEABLE: Position = Position { disc: 1, track: 0 };

    /// Create a position
    pub fn new(disc: u32, track: u32) -> Self {
        Self { disc, track }
    }

    /// Whether the position names a real track
    pub fn is_valid(&self) -> bool {
        self.disc >= 1 && self.track >= 1
    }
}

/// Parse a discography position string
pub fn parse_position(input: &str) -> Position {
    let input = input.trim();
    if input.is_empty() {
        return Position::UNPARSEABLE;
    }

    match input.split_once('-') {
        None => {
            if !input.chars().all(|c| c.is_ascii_digit()) {
                return Position::UNPARSEABLE;
            }
            match input.parse::<u32>() {
                Ok(track) => Position::new(1, track),
                Err(_) => Position::UNPARSEABLE,
            }
        }
        Some((left, right)) => match (digits(left), digits(right)) {
            (Some(disc), Some(track)) if disc > 0 && track > 0 => Position::new(disc, track),
            _ => Position::UNPARSEABLE,
        },
    }
}

fn digits(part: &str) -> Option<u32> {
    let digits: String = part.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
