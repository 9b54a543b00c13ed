//! # Chord Chart Renderer
//!
//! Renders aligned lines as nested `div` markup:
//!
//! ```text
//! <div class="line" style="width: 800px">
//!   <div class="event">
//!     <div class="c1"><span class="chord">Am</span></div>
//!     <div class="l1">Hello</div>
//!   </div>
//!   ...
//! </div>
//! ```
//!
//! ## Cells
//! Within an event the renderer walks the phrase's voice order (only voices that are
//! rendered) and emits one cell per voice: the event's next item when it belongs to that
//! voice, otherwise a blank `<div> </div>`. Every item is preceded by `offset` spaces.
//! - Chords are transposed and wrapped in `<span class="chord">`
//! - Text made only of underscores renders as the same number of spaces
//! - A bar `|` gets the extra class `bar`
//!
//! ## Diagnostics
//! Items left over after the voice order is exhausted are dropped. Each affected event
//! produces one [`RenderWarning`] on the result and one `log::warn!`; rendering goes on.

use crate::ast::{Phrase, TokenContent, Verse};
use crate::chord::{compare_chords, Chord};
use crate::error::VerseError;
use crate::events::{align_verse, Event, EventItem, Line};
use crate::options::RenderOptions;
use crate::voicing::{parse_voicing, Chordbook, Voicing};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

static INVISIBLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_+$").unwrap());

const EMPTY_CELL: &str = "<div> </div>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The event holds more items than the phrase has rendered voices
    VoiceOrderOverflow,
    /// Items are not in voice order, so some could not be placed
    VoiceOrderMismatch,
}

/// A rendering inconsistency that made the chart lose content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    pub phrase_index: usize,
    pub line: usize,
    pub event: usize,
    pub kind: WarningKind,
    pub dropped: usize,
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            WarningKind::VoiceOrderOverflow => "there are more voices than the voice order displays",
            WarningKind::VoiceOrderMismatch => "voices are out of voice order",
        };
        write!(
            f,
            "line {}, event {} (phrase {}): {}; {} item(s) dropped",
            self.line + 1,
            self.event + 1,
            self.phrase_index + 1,
            reason,
            self.dropped
        )
    }
}

/// Output of a render pass
#[derive(Debug, Clone, Default)]
pub struct RenderedChart {
    pub html: String,
    /// Chords shown in the chart after transposition, without duplicates, in order of first use
    pub chords_used: Vec<Chord>,
    pub warnings: Vec<RenderWarning>,
}

#[derive(Default)]
struct RenderState {
    chords_used: Vec<Chord>,
    warnings: Vec<RenderWarning>,
}

impl RenderState {
    fn use_chord(&mut self, chord: &Chord) {
        let known = self
            .chords_used
            .iter()
            .any(|used| compare_chords(used, chord) == Ordering::Equal);
        if !known {
            self.chords_used.push(chord.clone());
        }
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn is_invisible(text: &str) -> bool {
    INVISIBLE_REGEX.is_match(text)
}

/// Renders verses as chord-chart markup.
///
/// The renderer owns its transposition amount and [`Chordbook`]; [`set_options`](Self::set_options)
/// updates both. Rendering never mutates the verse or the aligned lines, so the same
/// input renders identically every time.
#[derive(Debug, Clone)]
pub struct ChordsRenderer {
    options: RenderOptions,
    chordbook: Chordbook,
}

impl Default for ChordsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordsRenderer {
    /// Renderer with default options and the guitar chordbook
    pub fn new() -> Self {
        Self::with_chordbook(Chordbook::guitar())
    }

    pub fn with_chordbook(chordbook: Chordbook) -> Self {
        Self {
            options: RenderOptions::default(),
            chordbook,
        }
    }

    /// Apply render options: transposition, voices, width, and chord voicing overrides.
    ///
    /// Voicing overrides replace the chordbook entry of each listed chord. When any
    /// override fails to parse, nothing is applied.
    pub fn set_options(&mut self, options: &RenderOptions) -> Result<(), VerseError> {
        let overrides = options
            .chords
            .iter()
            .map(|(chord, shorthands)| {
                shorthands
                    .to_vec()
                    .into_iter()
                    .map(|shorthand| parse_voicing(chord, shorthand))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|voicings| (chord.as_str(), voicings))
            })
            .collect::<Result<Vec<(&str, Vec<Voicing>)>, VerseError>>()?;

        for (chord, voicings) in overrides {
            self.chordbook.set(chord, voicings);
        }
        self.options = options.clone();
        Ok(())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn chordbook(&self) -> &Chordbook {
        &self.chordbook
    }

    pub fn transpose_amount(&self) -> i32 {
        self.options.transpose
    }

    /// Apply `options` and render `verse`
    pub fn render_verse(&mut self, verse: &Verse, options: &RenderOptions) -> Result<RenderedChart, VerseError> {
        self.set_options(options)?;
        Ok(self.render(verse))
    }

    /// Align and render `verse` with the current options
    pub fn render(&self, verse: &Verse) -> RenderedChart {
        let lines = align_verse(verse, &self.options);
        self.render_lines(verse, &lines)
    }

    /// Render lines that were already aligned for `verse`
    pub fn render_lines(&self, verse: &Verse, lines: &[Line]) -> RenderedChart {
        let voice_order: Vec<Vec<String>> = verse
            .iter()
            .map(|phrase| self.rendered_voices(phrase))
            .collect();

        let mut state = RenderState::default();
        let mut html = String::new();

        for (line_no, line) in lines.iter().enumerate() {
            let order = voice_order
                .get(line.phrase_index)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            html.push_str(&self.line_div(line_no, line, order, &mut state));
        }

        RenderedChart {
            html,
            chords_used: state.chords_used,
            warnings: state.warnings,
        }
    }

    /// Markup listing the voicings of `chords`
    pub fn render_legend(&self, chords: &[Chord]) -> String {
        render_chord_legend(chords, &self.chordbook)
    }

    fn rendered_voices(&self, phrase: &Phrase) -> Vec<String> {
        phrase
            .voice_order()
            .into_iter()
            .filter(|voice| self.options.includes_voice(voice))
            .collect()
    }

    fn line_div(&self, line_no: usize, line: &Line, order: &[String], state: &mut RenderState) -> String {
        let mut div = format!(r#"<div class="line" style="width: {}px">"#, self.options.max_width);
        for (event_no, event) in line.events.iter().enumerate() {
            div.push_str(&self.event_div(line.phrase_index, line_no, event_no, event, order, state));
        }
        div.push_str("</div>");
        div
    }

    fn event_div(
        &self,
        phrase_index: usize,
        line_no: usize,
        event_no: usize,
        event: &Event,
        order: &[String],
        state: &mut RenderState,
    ) -> String {
        let mut div = String::from(r#"<div class="event">"#);
        let mut cursor = 0;

        for voice in order {
            match event.items.get(cursor) {
                Some(item) if item.voice == *voice => {
                    div.push_str(&self.voice_div(item, state));
                    cursor += 1;
                }
                _ => div.push_str(EMPTY_CELL),
            }
        }

        if cursor < event.items.len() {
            let kind = if event.items.len() > order.len() {
                WarningKind::VoiceOrderOverflow
            } else {
                WarningKind::VoiceOrderMismatch
            };
            let warning = RenderWarning {
                phrase_index,
                line: line_no,
                event: event_no,
                kind,
                dropped: event.items.len() - cursor,
            };
            log::warn!("{}. Some data may be lost.", warning);
            state.warnings.push(warning);
        }

        div.push_str("</div>");
        div
    }

    fn voice_div(&self, item: &EventItem, state: &mut RenderState) -> String {
        let class = if item.content.is_bar() {
            format!("{} bar", item.voice)
        } else {
            item.voice.clone()
        };

        let content = match &item.content {
            TokenContent::Chord(chord) => {
                let chord = chord.transpose(self.options.transpose);
                state.use_chord(&chord);
                format!(r#"<span class="chord">{}</span>"#, escape_html(&chord.to_string()))
            }
            TokenContent::Text(text) if is_invisible(text) => " ".repeat(text.chars().count()),
            TokenContent::Text(text) => escape_html(text),
        };

        format!(r#"<div class="{}">{}{}</div>"#, class, " ".repeat(item.offset), content)
    }
}

/// Markup with one diagram entry per chord. Chords missing from the chordbook get the
/// class `highlight`.
pub fn render_chord_legend(chords: &[Chord], chordbook: &Chordbook) -> String {
    let mut div = String::from(r#"<div class="chord-legend">"#);

    for chord in chords {
        let name = chord.to_string();
        let label = format!(r#"<span class="chord">{}</span>"#, escape_html(&name));
        match chordbook.get(&name) {
            Some(voicings) => {
                div.push_str(&format!(
                    r#"<div class="chord-diagram" data-chord="{}">{}"#,
                    chord.to_attribute_value(),
                    label
                ));
                for voicing in voicings {
                    div.push_str(&format!(r#"<span class="voicing">{}</span>"#, voicing));
                }
                div.push_str("</div>");
            }
            None => div.push_str(&format!(
                r#"<div class="chord-diagram highlight" data-chord="{}">{}</div>"#,
                chord.to_attribute_value(),
                label
            )),
        }
    }

    div.push_str("</div>");
    div
}
