//! # Voice Tokenizer
//!
//! Splits the content of one voice line into [`Token`]s.
//!
//! A token is a maximal run of characters that are neither whitespace nor `|`, or a
//! single `|`. Each token records the column of its first character. Columns count
//! characters, except that wide CJK characters occupy two columns; the tokenizer adds
//! the number of wide characters seen in earlier tokens to every index so that voices
//! mixing scripts still line up in fixed-width rendering.

use crate::ast::{Token, TokenContent, BAR, CHORD_INSTRUMENT};
use crate::chord::Chord;

/// Whether `c` renders two columns wide next to chord/lyric text
pub fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{3002}' | '\u{3006}' | '\u{3007}'
        | '\u{FF01}'..='\u{FF09}' | '\u{FF0C}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{FA0E}' | '\u{FA0F}' | '\u{FA11}' | '\u{FA13}' | '\u{FA14}' | '\u{FA1F}'
        | '\u{FA21}' | '\u{FA23}' | '\u{FA24}' | '\u{FA27}' | '\u{FA28}' | '\u{FA29}'
        | '\u{20000}'..='\u{2EBEF}'
        | '\u{30000}'..='\u{323AF}'
    )
}

/// Number of wide characters in `s`
pub fn wide_count(s: &str) -> usize {
    s.chars().filter(|&c| is_wide(c)).count()
}

/// Columns taken by `s` in fixed-width rendering
pub fn display_width(s: &str) -> usize {
    s.chars().count() + wide_count(s)
}

/// Chord-shaped tokens of the chord voice become chords, everything else stays text
fn normalize_token(instrument: &str, raw: String) -> TokenContent {
    if instrument == CHORD_INSTRUMENT {
        if let Some(chord) = Chord::parse(&raw) {
            return TokenContent::Chord(chord);
        }
    }
    TokenContent::Text(raw)
}

struct Tokenizer<'a> {
    instrument: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    column: usize,
    wide_offset: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(instrument: &'a str, input: &'a str) -> Self {
        Self {
            instrument,
            chars: input.chars().peekable(),
            column: 0,
            wide_offset: 0,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.column += 1;
        Some(c)
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if c.is_whitespace() || c == '|' {
                break;
            }
            word.push(c);
            self.advance();
        }
        word
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            let start = self.column;
            let raw = if c == '|' {
                self.advance();
                BAR.to_string()
            } else {
                self.read_word()
            };

            let wide = wide_count(&raw);
            tokens.push(Token {
                index: start + self.wide_offset,
                content: normalize_token(self.instrument, raw),
            });
            self.wide_offset += wide;
        }

        tokens
    }
}

/// Tokenize the content of a voice line for `instrument` (voice name without digits)
///
/// # Examples
/// ```
/// use versechart::lexer::tokenize;
/// use versechart::TokenContent;
///
/// let tokens = tokenize("c", "Am  | G7");
/// assert_eq!(tokens.iter().map(|t| t.index).collect::<Vec<_>>(), vec![0, 4, 6]);
/// assert!(matches!(tokens[0].content, TokenContent::Chord(_)));
/// assert!(tokens[1].content.is_bar());
/// ```
pub fn tokenize(instrument: &str, data: &str) -> Vec<Token> {
    Tokenizer::new(instrument, data).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.content.to_string()).collect()
    }

    fn indices(tokens: &[Token]) -> Vec<usize> {
        tokens.iter().map(|t| t.index).collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("l", "").is_empty());
        assert!(tokenize("l", "   \t ").is_empty());
    }

    #[test]
    fn test_single_bar() {
        let tokens = tokenize("c", "|");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].index, 0);
        assert!(tokens[0].content.is_bar());
    }

    #[test]
    fn test_bar_splits_words() {
        let tokens = tokenize("l", "Hel|lo  there");
        assert_eq!(contents(&tokens), vec!["Hel", "|", "lo", "there"]);
        assert_eq!(indices(&tokens), vec![0, 3, 4, 8]);
    }

    #[test]
    fn test_chords_only_in_chord_voice() {
        let chords = tokenize("c", "Am N.C. G");
        assert!(matches!(chords[0].content, TokenContent::Chord(_)));
        assert_eq!(chords[1].content, TokenContent::Text("N.C.".to_string()));
        assert!(matches!(chords[2].content, TokenContent::Chord(_)));

        let lyrics = tokenize("l", "Am G");
        assert!(lyrics.iter().all(|t| matches!(t.content, TokenContent::Text(_))));
    }

    #[test]
    fn test_wide_characters_shift_later_tokens() {
        let tokens = tokenize("l", "你好 world 再见 !");
        assert_eq!(contents(&tokens), vec!["你好", "world", "再见", "!"]);
        // raw offsets 0, 3, 9, 12; +2 after 你好, +4 after 再见
        assert_eq!(indices(&tokens), vec![0, 5, 11, 16]);
    }

    #[test]
    fn test_wide_punctuation_and_extension_b() {
        assert!(is_wide('，'));
        assert!(is_wide('。'));
        assert!(is_wide('\u{20BB7}'));
        assert!(!is_wide('a'));
        assert!(!is_wide('é'));
        assert_eq!(display_width("𠮷a"), 3);
    }

    #[test]
    fn test_emoji_and_symbols_are_narrow() {
        assert!(!is_wide('𝄞'));
        assert!(!is_wide('😀'));
        assert_eq!(display_width("𝄞"), 1);
        assert_eq!(display_width("😀"), 1);

        let tokens = tokenize("l", "𝄞 la");
        assert_eq!(indices(&tokens), vec![0, 2]);
    }

    #[test]
    fn test_indices_strictly_increase() {
        let tokens = tokenize("l", "a  bb|c ||  d");
        let idx = indices(&tokens);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(contents(&tokens), vec!["a", "bb", "|", "c", "|", "|", "d"]);
    }
}
