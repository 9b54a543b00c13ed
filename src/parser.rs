//! # Verse Parser
//!
//! Turns verse notation into a [`Verse`].
//!
//! ## Format
//! ```text
//! c: Am        | G
//! l: Hello dar-kness
//!
//! c: F     C
//! l2: my old friend
//! ```
//! - A **voice line** is `<name><digits>: <content>`; `name` is letters, `_` and `-`
//! - Consecutive voice lines form a **phrase**
//! - Phrases are separated by one or more blank lines
//!
//! Voice keys are `<name><digits>`, with `1` when no digits are given. Within a
//! phrase a repeated key replaces the earlier voice.
//!
//! ## Errors
//! A non-empty line that is not a voice line fails the whole parse with
//! [`VerseError::MalformedVoiceLine`], reporting its 1-based line in the input.

use crate::ast::{Phrase, Token, Verse};
use crate::error::VerseError;
use crate::lexer::tokenize;
use once_cell::sync::Lazy;
use regex::Regex;

static VOICE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z_-]+)([0-9]*):\s(.*)$").unwrap());

static PHRASE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Whether `line` starts with a voice header
pub fn is_voice_line(line: &str) -> bool {
    VOICE_REGEX.is_match(line)
}

/// Parse one voice line into its key and tokens. An empty line yields `None`.
///
/// # Examples
/// ```
/// use versechart::parser::parse_voice;
///
/// let (name, tokens) = parse_voice("c: Am G").unwrap().unwrap();
/// assert_eq!(name, "c1");
/// assert_eq!(tokens.len(), 2);
///
/// assert!(parse_voice("").unwrap().is_none());
/// assert!(parse_voice("Am G").is_err());
/// ```
pub fn parse_voice(line: &str) -> Result<Option<(String, Vec<Token>)>, VerseError> {
    parse_voice_at(line, 1)
}

fn parse_voice_at(line: &str, line_number: usize) -> Result<Option<(String, Vec<Token>)>, VerseError> {
    if line.is_empty() {
        return Ok(None);
    }

    let caps = VOICE_REGEX
        .captures(line)
        .ok_or_else(|| VerseError::MalformedVoiceLine {
            line: line_number,
            message: format!("expected `<name><digits>: <content>`, found `{}`", line),
        })?;

    let instrument = &caps[1];
    let number = match &caps[2] {
        "" => "1",
        digits => digits,
    };
    let tokens = tokenize(instrument, &caps[3]);

    Ok(Some((format!("{}{}", instrument, number), tokens)))
}

/// Parse a block of voice lines (no blank lines) into a [`Phrase`]
pub fn parse_phrase(block: &str) -> Result<Phrase, VerseError> {
    parse_phrase_at(block, 1)
}

fn parse_phrase_at(block: &str, first_line: usize) -> Result<Phrase, VerseError> {
    let mut phrase = Phrase::new();

    for (offset, line) in block.split('\n').enumerate() {
        if let Some((name, tokens)) = parse_voice_at(line, first_line + offset)? {
            phrase.insert(name, tokens);
        }
    }

    log::debug!(
        "parsed phrase at line {} with voices {:?}",
        first_line,
        phrase.voice_order()
    );
    Ok(phrase)
}

/// Parse verse notation into phrases.
///
/// Leading and trailing blank blocks are kept as empty phrases.
///
/// # Examples
/// ```
/// use versechart::parse_verse;
///
/// let verse = parse_verse("c: Am\n\nc: G").unwrap();
/// assert_eq!(verse.len(), 2);
///
/// let verse = parse_verse("c: Am\nl: hi").unwrap();
/// assert_eq!(verse.len(), 1);
/// assert_eq!(verse[0].voice_order(), vec!["c1", "l1"]);
/// ```
pub fn parse_verse(source: &str) -> Result<Verse, VerseError> {
    let source = source.replace("\r\n", "\n");

    let mut blocks = Vec::new();
    let mut start = 0;
    for separator in PHRASE_SEPARATOR.find_iter(&source) {
        blocks.push((start, &source[start..separator.start()]));
        start = separator.end();
    }
    blocks.push((start, &source[start..]));

    blocks
        .into_iter()
        .map(|(offset, block)| {
            let first_line = source[..offset].matches('\n').count() + 1;
            parse_phrase_at(block, first_line)
        })
        .collect()
}
