//! # Chord Voicings
//!
//! Finger voicings for fretted instruments and the [`Chordbook`] that maps chord names to them.
//!
//! ## Shorthand
//! - Compact: one character per string, low to high, `x` = muted, digit = fret (`x32010`)
//! - Separated: frets split by spaces or commas, needed for frets ≥ 10 (`x 10 12 12 10 x`)
//!
//! A chordbook is owned by each renderer; render options merge overrides into it
//! (last write wins per chord name).

use crate::error::VerseError;
use std::collections::HashMap;
use std::fmt;

/// One way of fingering a chord: a fret per string, `None` for a muted string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voicing {
    pub frets: Vec<Option<u8>>,
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.frets.iter().all(|fret| fret.map_or(true, |n| n < 10));
        let parts: Vec<String> = self
            .frets
            .iter()
            .map(|fret| fret.map_or_else(|| "x".to_string(), |n| n.to_string()))
            .collect();
        if compact {
            write!(f, "{}", parts.concat())
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Parse a voicing shorthand. `chord` is only used for error messages.
pub fn parse_voicing(chord: &str, shorthand: &str) -> Result<Voicing, VerseError> {
    let invalid = |message: String| VerseError::InvalidVoicing {
        chord: chord.to_string(),
        message,
    };

    let trimmed = shorthand.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty voicing".to_string()));
    }

    let parts: Vec<&str> = if trimmed.contains(|c: char| c == ',' || c.is_whitespace()) {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect()
    } else {
        trimmed
            .char_indices()
            .map(|(i, c)| &trimmed[i..i + c.len_utf8()])
            .collect()
    };

    let frets = parts
        .into_iter()
        .map(|part| match part {
            "x" | "X" => Ok(None),
            n => n
                .parse::<u8>()
                .map(Some)
                .map_err(|_| invalid(format!("`{}` is not a fret number", n))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Voicing { frets })
}

/// Chord name → known voicings
#[derive(Debug, Clone, Default)]
pub struct Chordbook {
    entries: HashMap<String, Vec<Voicing>>,
}

impl Chordbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard-tuning guitar voicings for common open chords
    pub fn guitar() -> Self {
        const OPEN_CHORDS: &[(&str, &str)] = &[
            ("C", "x32010"),
            ("C7", "x32310"),
            ("Cmaj7", "x32000"),
            ("D", "xx0232"),
            ("Dm", "xx0231"),
            ("D7", "xx0212"),
            ("E", "022100"),
            ("Em", "022000"),
            ("E7", "020100"),
            ("F", "133211"),
            ("Fmaj7", "xx3210"),
            ("G", "320003"),
            ("G7", "320001"),
            ("A", "x02220"),
            ("Am", "x02210"),
            ("A7", "x02020"),
            ("Am7", "x02010"),
            ("B7", "x21202"),
            ("Bm", "x24432"),
        ];

        let mut book = Self::new();
        for (name, shorthand) in OPEN_CHORDS {
            if let Ok(voicing) = parse_voicing(name, shorthand) {
                book.set(name, vec![voicing]);
            }
        }
        book
    }

    /// Replace the voicings for `chord`
    pub fn set(&mut self, chord: &str, voicings: Vec<Voicing>) {
        self.entries.insert(chord.to_string(), voicings);
    }

    pub fn get(&self, chord: &str) -> Option<&[Voicing]> {
        self.entries.get(chord).map(Vec::as_slice)
    }

    pub fn has(&self, chord: &str) -> bool {
        self.entries.contains_key(chord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
