//! # Verse Model
//!
//! Types produced by the parser and consumed by the aligner and renderer.
//!
//! ## Type Hierarchy
//! ```text
//! Verse = Vec<Phrase>
//!   └── Phrase (ordered: voice name → Vec<Token>)
//!         └── Token
//!               ├── index: column of the first character (wide characters count twice)
//!               └── content: TokenContent (Chord | Text)
//! ```
//!
//! ## Voice Names
//! A voice line `l2: ...` belongs to instrument `l`; its key in the phrase is `l2`.
//! Without digits the key gets the suffix `1`, so `c:` and `c1:` name the same voice.
//! Instrument `c` is the chord voice: its chord-shaped tokens are parsed into [`Chord`]s.

use crate::chord::Chord;
use std::fmt;

/// Instrument identifier of the chord voice
pub const CHORD_INSTRUMENT: &str = "c";

/// Voice that is rendered whatever the instrument filter says
pub const PRIMARY_CHORD_VOICE: &str = "c1";

/// Bar separator token
pub const BAR: &str = "|";

/// Instrument part of a voice name: `l2` → `l`
pub fn instrument_of(voice: &str) -> &str {
    voice.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// `c` and `c1` both key the primary chord voice `c1`
pub fn is_primary_chord_voice(voice: &str) -> bool {
    voice == PRIMARY_CHORD_VOICE || voice == CHORD_INSTRUMENT
}

/// What a token holds, decided once by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenContent {
    Chord(Chord),
    Text(String),
}

impl TokenContent {
    pub fn is_bar(&self) -> bool {
        matches!(self, TokenContent::Text(text) if text == BAR)
    }

    pub fn as_chord(&self) -> Option<&Chord> {
        match self {
            TokenContent::Chord(chord) => Some(chord),
            TokenContent::Text(_) => None,
        }
    }
}

impl fmt::Display for TokenContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenContent::Chord(chord) => write!(f, "{}", chord),
            TokenContent::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub content: TokenContent,
}

/// All voices of one blank-line-delimited block, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phrase {
    voices: Vec<(String, Vec<Token>)>,
}

impl Phrase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a voice. A repeated name replaces the earlier tokens but keeps its position.
    pub fn insert(&mut self, name: String, tokens: Vec<Token>) {
        match self.voices.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = tokens,
            None => self.voices.push((name, tokens)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Token]> {
        self.voices
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, tokens)| tokens.as_slice())
    }

    /// Voice names in source order
    pub fn voice_order(&self) -> Vec<String> {
        self.voices.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.voices
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

pub type Verse = Vec<Phrase>;

#[cfg(test)]
mod tests {
    use super::*;

    fn text(index: usize, s: &str) -> Token {
        Token {
            index,
            content: TokenContent::Text(s.to_string()),
        }
    }

    #[test]
    fn test_instrument_of() {
        assert_eq!(instrument_of("c1"), "c");
        assert_eq!(instrument_of("lead12"), "lead");
        assert_eq!(instrument_of("l"), "l");
        assert_eq!(instrument_of("c2"), CHORD_INSTRUMENT);
        assert!(is_primary_chord_voice("c1"));
        assert!(is_primary_chord_voice("c"));
        assert!(!is_primary_chord_voice("c2"));
    }

    #[test]
    fn test_phrase_keeps_first_position_on_overwrite() {
        let mut phrase = Phrase::new();
        phrase.insert("c1".to_string(), vec![text(0, "a")]);
        phrase.insert("l1".to_string(), vec![text(0, "b")]);
        phrase.insert("c1".to_string(), vec![text(0, "z")]);

        assert_eq!(phrase.voice_order(), vec!["c1", "l1"]);
        assert_eq!(phrase.get("c1"), Some(&[text(0, "z")][..]));
    }

    #[test]
    fn test_bar_content() {
        assert!(TokenContent::Text("|".to_string()).is_bar());
        assert!(!TokenContent::Text("||".to_string()).is_bar());
    }
}
