//! # Chord Symbols
//!
//! Parses chord symbols (`C`, `Am`, `F#m7b5`, `G/B`, ...) into a structured [`Chord`],
//! transposes them by semitones, compares them and renders them back to text.
//!
//! ## Grammar
//! ```text
//! <root>[#|b]<quality>[/<bass>[#|b]]
//! ```
//! `root` and `bass` are note letters `A`-`G`. The quality is kept verbatim; it is any
//! run of `m min maj M dim aug sus add + - ° ø # b ( ) ,` and digits.
//!
//! ## Spelling
//! Pitch classes map to sharp or flat spellings depending on how the chord was written:
//! a chord written with a flat keeps spelling flats after transposition, everything
//! else spells sharps. Transposing by `+n` and then `-n` therefore gives back the
//! chord as written (modulo enharmonics such as `Cb`/`B`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

static CHORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-G])([#b]?)((?:maj|min|dim|aug|sus|add|m|M|\+|-|°|ø|[0-9]|#|b|\(|\)|,)*)(?:/([A-G])([#b]?))?$",
    )
    .unwrap()
});

/// Note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn from_str(s: &str) -> Self {
        match s {
            "#" => Accidental::Sharp,
            "b" => Accidental::Flat,
            _ => Accidental::Natural,
        }
    }
}

/// A spelled pitch class (letter + accidental, no octave)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Pitch {
    /// Semitone offset from C, in `0..12`
    pub fn semitone(&self) -> u8 {
        let base: i8 = match self.name {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        };
        let acc: i8 = match self.accidental {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        };
        (base + acc).rem_euclid(12) as u8
    }

    /// Spell a semitone offset from C
    pub fn from_semitone(semitone: i32, prefer_flat: bool) -> Self {
        let (name, accidental) = match semitone.rem_euclid(12) {
            0 => (NoteName::C, Accidental::Natural),
            1 => if prefer_flat { (NoteName::D, Accidental::Flat) } else { (NoteName::C, Accidental::Sharp) },
            2 => (NoteName::D, Accidental::Natural),
            3 => if prefer_flat { (NoteName::E, Accidental::Flat) } else { (NoteName::D, Accidental::Sharp) },
            4 => (NoteName::E, Accidental::Natural),
            5 => (NoteName::F, Accidental::Natural),
            6 => if prefer_flat { (NoteName::G, Accidental::Flat) } else { (NoteName::F, Accidental::Sharp) },
            7 => (NoteName::G, Accidental::Natural),
            8 => if prefer_flat { (NoteName::A, Accidental::Flat) } else { (NoteName::G, Accidental::Sharp) },
            9 => (NoteName::A, Accidental::Natural),
            10 => if prefer_flat { (NoteName::B, Accidental::Flat) } else { (NoteName::A, Accidental::Sharp) },
            11 => (NoteName::B, Accidental::Natural),
            _ => unreachable!(),
        };
        Pitch { name, accidental }
    }

    fn transpose(&self, semitones: i32, prefer_flat: bool) -> Self {
        Pitch::from_semitone(self.semitone() as i32 + semitones.rem_euclid(12), prefer_flat)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_char())?;
        match self.accidental {
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
            Accidental::Natural => Ok(()),
        }
    }
}

/// A parsed chord symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub root: Pitch,
    /// Everything between the root and the slash bass, verbatim (`m7b5`, `sus4`, ...)
    pub quality: String,
    pub bass: Option<Pitch>,
    prefer_flat: bool,
}

impl Chord {
    /// Parse a chord symbol. Returns `None` when `symbol` is not chord-shaped.
    ///
    /// # Examples
    /// ```
    /// use versechart::Chord;
    ///
    /// let chord = Chord::parse("Bbmaj7/D").unwrap();
    /// assert_eq!(chord.quality, "maj7");
    /// assert_eq!(chord.to_string(), "Bbmaj7/D");
    ///
    /// assert!(Chord::parse("hello").is_none());
    /// ```
    pub fn parse(symbol: &str) -> Option<Self> {
        let caps = CHORD_REGEX.captures(symbol)?;

        let root = Pitch {
            name: NoteName::from_char(caps.get(1)?.as_str().chars().next()?)?,
            accidental: Accidental::from_str(caps.get(2).map_or("", |m| m.as_str())),
        };
        let quality = caps.get(3).map_or("", |m| m.as_str()).to_string();
        let bass = match caps.get(4) {
            Some(letter) => Some(Pitch {
                name: NoteName::from_char(letter.as_str().chars().next()?)?,
                accidental: Accidental::from_str(caps.get(5).map_or("", |m| m.as_str())),
            }),
            None => None,
        };

        let prefer_flat = root.accidental == Accidental::Flat
            || bass.map_or(false, |b| b.accidental == Accidental::Flat);

        Some(Chord {
            root,
            quality,
            bass,
            prefer_flat,
        })
    }

    /// Shift root and bass by `semitones` (negative goes down), keeping the quality.
    ///
    /// # Examples
    /// ```
    /// use versechart::Chord;
    ///
    /// let g = Chord::parse("G7").unwrap();
    /// assert_eq!(g.transpose(2).to_string(), "A7");
    ///
    /// let eb = Chord::parse("Ebm").unwrap();
    /// assert_eq!(eb.transpose(1).to_string(), "Em");
    /// assert_eq!(eb.transpose(-1).to_string(), "Dm");
    /// ```
    pub fn transpose(&self, semitones: i32) -> Chord {
        if semitones == 0 {
            return self.clone();
        }
        Chord {
            root: self.root.transpose(semitones, self.prefer_flat),
            quality: self.quality.clone(),
            bass: self.bass.map(|b| b.transpose(semitones, self.prefer_flat)),
            prefer_flat: self.prefer_flat,
        }
    }

    /// Identifier-safe form of the chord, for element ids and data attributes
    pub fn to_attribute_value(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| match c {
                '#' => 's',
                '/' => '_',
                c if c.is_ascii_alphanumeric() => c,
                _ => '-',
            })
            .collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Whether `token` is a chord symbol
pub fn is_chord(token: &str) -> bool {
    CHORD_REGEX.is_match(token)
}

/// Order chords by root pitch class, then quality, then bass pitch class.
///
/// Enharmonic spellings compare equal: `C#m` and `Dbm` are the same chord.
pub fn compare_chords(a: &Chord, b: &Chord) -> Ordering {
    a.root
        .semitone()
        .cmp(&b.root.semitone())
        .then_with(|| a.quality.cmp(&b.quality))
        .then_with(|| {
            a.bass
                .map(|p| p.semitone())
                .cmp(&b.bass.map(|p| p.semitone()))
        })
}
