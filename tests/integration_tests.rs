//! Integration tests for versechart
//!
//! Tests the full pipeline from verse notation to chord-chart markup.

use versechart::{parse_verse, render, render_chart, RenderOptions, TokenContent, VerseError};

const SONG: &str = "c: Am        | G
l: Hel-lo da-rkness

c: F      C
l: my old friend
";

#[test]
fn test_render_song() {
    let options = RenderOptions::with_instruments(["l"]);
    let html = render(SONG, &options).expect("song should render");

    assert_eq!(html.matches(r#"<div class="line" style="width: 800px">"#).count(), 2);
    assert!(html.contains(r#"<span class="chord">Am</span>"#));
    assert!(html.contains(r#"<div class="c1 bar">"#));
    assert!(html.contains("Hel-lo"));
    assert!(html.contains("friend"));
}

#[test]
fn test_render_with_yaml_options() {
    let options = RenderOptions::from_yaml(
        r#"
transpose: 2
maxWidth: 600
chords:
  Bm: "x24432"
instrumentsConfig:
  instrumentsToRender: [l]
"#,
    )
    .unwrap();

    let chart = render_chart(SONG, &options).unwrap();
    assert!(chart.html.contains(r#"style="width: 600px""#));
    assert!(chart.html.contains(r#"<span class="chord">Bm</span>"#));
    assert!(chart.html.contains(r#"<span class="chord">A</span>"#));

    let used: Vec<String> = chart.chords_used.iter().map(|c| c.to_string()).collect();
    assert_eq!(used, vec!["Bm", "A", "G", "D"]);
    assert!(chart.warnings.is_empty());
}

#[test]
fn test_lyrics_hidden_unless_requested() {
    let html = render(SONG, &RenderOptions::default()).unwrap();
    assert!(!html.contains("friend"));
    assert!(html.contains(r#"<span class="chord">F</span>"#));
}

#[test]
fn test_tokens_reconstruct_source_words() {
    let verse = parse_verse(SONG).unwrap();
    let lyrics: Vec<String> = verse[1]
        .get("l1")
        .unwrap()
        .iter()
        .map(|t| t.content.to_string())
        .collect();
    assert_eq!(lyrics, vec!["my", "old", "friend"]);
}

#[test]
fn test_trailing_newline_keeps_empty_phrase() {
    let verse = parse_verse("c: A\n\n").unwrap();
    assert_eq!(verse.len(), 2);

    let html = render("c: A\n\n", &RenderOptions::default()).unwrap();
    assert!(html.ends_with(r#"<div class="line" style="width: 800px"></div>"#));
}

#[test]
fn test_malformed_voice_line_fails() {
    let result = render("c: A\nthis is not a voice", &RenderOptions::default());
    assert!(matches!(result, Err(VerseError::MalformedVoiceLine { line: 2, .. })));
}

#[test]
fn test_invalid_voicing_fails() {
    let options = RenderOptions::from_yaml("chords:\n  G: \"3-0003\"\n").unwrap();
    let result = render("c: G", &options);
    assert!(matches!(result, Err(VerseError::InvalidVoicing { .. })));
}

#[test]
fn test_chinese_lyrics_align_under_chords() {
    let verse = parse_verse("c: C      G\nl: 月亮 代表 我的心").unwrap();
    let lyrics = verse[0].get("l1").unwrap();
    assert_eq!(lyrics.iter().map(|t| t.index).collect::<Vec<_>>(), vec![0, 5, 10]);

    let chords = verse[0].get("c1").unwrap();
    assert!(matches!(chords[1].content, TokenContent::Chord(_)));
    assert_eq!(chords[1].index, 7);
}

#[test]
fn test_second_chord_voice_follows_instrument_filter() {
    let source = "c: A\nc2: D\nl: la";

    let html = render(source, &RenderOptions::with_instruments(["l"])).unwrap();
    assert!(html.contains(r#"<div class="c1"><span class="chord">A</span></div>"#));
    assert!(!html.contains(r#"class="c2""#));

    let html = render(source, &RenderOptions::with_instruments(["l", "c2"])).unwrap();
    assert!(html.contains(r#"<div class="c2"><span class="chord">D</span></div>"#));
}

#[test]
fn test_extreme_transpose_from_yaml() {
    let options = RenderOptions::from_yaml("transpose: 2147483647").unwrap();
    let chart = render_chart("c: B", &options).unwrap();
    assert!(chart.html.contains(r#"<span class="chord">F#</span>"#));

    let options = RenderOptions::from_yaml("transpose: -2147483648").unwrap();
    let chart = render_chart("c: B", &options).unwrap();
    assert!(chart.html.contains(r#"<span class="chord">D#</span>"#));
}
