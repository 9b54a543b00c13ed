//! Property-based tests for the tokenizer, parser and chord transposition

use proptest::prelude::*;
use std::cmp::Ordering;
use versechart::lexer::{tokenize, wide_count};
use versechart::{compare_chords, parse_verse, Chord, ChordsRenderer, RenderOptions};

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z'.,-]{1,6}",
        "[A-G][#b]?(m|7|maj7|sus4)?",
        "[你好月亮]{1,3}",
        Just("|".to_string()),
        "_{1,4}",
    ]
}

fn separator() -> impl Strategy<Value = String> {
    "[ \t]{1,3}"
}

fn voice_content() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((word(), separator()), 0..12)
}

proptest! {
    #[test]
    fn indices_strictly_increase(parts in voice_content()) {
        let line: String = parts.iter().map(|(w, s)| format!("{}{}", w, s)).collect();
        let tokens = tokenize("l", &line);
        prop_assert!(tokens.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn tokens_reconstruct_words(parts in voice_content()) {
        let line: String = parts.iter().map(|(w, s)| format!("{}{}", w, s)).collect();
        let words: Vec<String> = parts.iter().map(|(w, _)| w.clone()).collect();

        let source = format!("c: {}\nl: {}", line, line);
        let verse = parse_verse(&source).unwrap();
        prop_assert_eq!(verse.len(), 1);
        for voice in ["c1", "l1"] {
            let tokens: Vec<String> = verse[0]
                .get(voice)
                .unwrap()
                .iter()
                .map(|t| t.content.to_string())
                .collect();
            prop_assert_eq!(&tokens, &words);
        }
    }

    #[test]
    fn wide_run_shifts_later_tokens(k in 1usize..6, tail in prop::collection::vec("[a-z]{1,4}", 1..5)) {
        let run = "好".repeat(k);
        let line = format!("{} {}", run, tail.join(" "));
        let tokens = tokenize("l", &line);

        let mut raw = k + 1;
        for (token, word) in tokens.iter().skip(1).zip(&tail) {
            prop_assert_eq!(token.index, raw + k);
            raw += word.chars().count() + 1;
        }
        prop_assert_eq!(wide_count(&run), k);
    }

    #[test]
    fn transpose_round_trip(symbol in "[A-G][#b]?(m|7|m7|maj7|dim|sus2)?(/[A-G][#b]?)?", n in -24i32..24) {
        let chord = Chord::parse(&symbol).unwrap();
        let back = chord.transpose(n).transpose(-n);
        prop_assert_eq!(compare_chords(&chord, &back), Ordering::Equal);
    }

    #[test]
    fn render_is_idempotent(parts in voice_content(), transpose in -11i32..12) {
        let line: String = parts.iter().map(|(w, s)| format!("{}{}", w, s)).collect();
        let source = format!("c: {}\nl: {}\n\nc: {}", line, line, line);
        let verse = parse_verse(&source).unwrap();

        let mut options = RenderOptions::with_instruments(["l"]);
        options.transpose = transpose;
        let mut renderer = ChordsRenderer::new();
        let first = renderer.render_verse(&verse, &options).unwrap();
        let second = renderer.render_verse(&verse, &options).unwrap();
        prop_assert_eq!(first.html, second.html);
        prop_assert!(first.warnings.is_empty());
    }
}
