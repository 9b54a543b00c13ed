//! # Event Alignment
//!
//! Merges the voices of each phrase into columns ("events") that the renderer lays
//! out left to right.
//!
//! ## Algorithm
//! 1. Collect the tokens of every rendered voice, sorted by column and then by voice order
//! 2. Sweep left to right. A token joins the current event while it starts before the
//!    event's furthest extent and its voice has no item in the event yet; otherwise it
//!    opens a new event at its own column
//! 3. Each item's `offset` is the blank columns between the end of the previous event
//!    and this event's start, plus the item's distance from the event start
//! 4. Events that would overflow `maxWidth` move to a new [`Line`] of the same phrase;
//!    the first event on a wrapped line gets no leading gap
//!
//! When a token is wider than the gap before the next event, later events shift right
//! in every voice at once, so the voices stay aligned.
//!
//! Chords are measured as they will be rendered, i.e. after transposition.

use crate::ast::{Phrase, Token, TokenContent, Verse};
use crate::lexer::display_width;
use crate::options::RenderOptions;

/// One voice's content inside an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub voice: String,
    /// Spaces to render before the content
    pub offset: usize,
    pub content: TokenContent,
}

/// One column across the voices of a line, items in voice order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub items: Vec<EventItem>,
}

/// One rendered row of a phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub phrase_index: usize,
    pub events: Vec<Event>,
}

impl Line {
    fn new(phrase_index: usize) -> Self {
        Self {
            phrase_index,
            events: Vec::new(),
        }
    }
}

/// A token waiting to be placed in an event
struct Placed<'a> {
    voice_pos: usize,
    voice: &'a str,
    token: &'a Token,
    width: usize,
}

fn rendered_width(content: &TokenContent, transpose: i32) -> usize {
    match content {
        TokenContent::Chord(chord) => display_width(&chord.transpose(transpose).to_string()),
        TokenContent::Text(text) => display_width(text),
    }
}

/// Tokens of one phrase grouped into events, then packed into lines
struct PhraseAligner {
    max_columns: usize,
    lines: Vec<Line>,
    line: Line,
    line_width: usize,
    prev_extent: Option<usize>,
}

impl PhraseAligner {
    fn new(phrase_index: usize, max_columns: usize) -> Self {
        Self {
            max_columns,
            lines: Vec::new(),
            line: Line::new(phrase_index),
            line_width: 0,
            prev_extent: None,
        }
    }

    fn flush(&mut self, mut group: Vec<Placed>, start: usize, extent: usize) {
        if group.is_empty() {
            return;
        }

        let span = extent - start;
        let mut gap = start.saturating_sub(self.prev_extent.unwrap_or(0));

        if !self.line.events.is_empty() && self.line_width + gap + span > self.max_columns {
            let phrase_index = self.line.phrase_index;
            let full = std::mem::replace(&mut self.line, Line::new(phrase_index));
            self.lines.push(full);
            self.line_width = 0;
            gap = 0;
        }

        group.sort_by_key(|p| p.voice_pos);
        let items = group
            .into_iter()
            .map(|p| EventItem {
                voice: p.voice.to_string(),
                offset: gap + (p.token.index - start),
                content: p.token.content.clone(),
            })
            .collect();

        self.line.events.push(Event { items });
        self.line_width += gap + span;
        self.prev_extent = Some(extent);
    }

    fn finish(mut self) -> Vec<Line> {
        if !self.line.events.is_empty() || self.lines.is_empty() {
            self.lines.push(self.line);
        }
        self.lines
    }
}

/// Align one phrase into one or more lines
pub fn align_phrase(phrase_index: usize, phrase: &Phrase, options: &RenderOptions) -> Vec<Line> {
    let mut placed: Vec<Placed> = phrase
        .iter()
        .filter(|(name, _)| options.includes_voice(name))
        .enumerate()
        .flat_map(|(voice_pos, (voice, tokens))| {
            tokens.iter().map(move |token| Placed {
                voice_pos,
                voice,
                token,
                width: rendered_width(&token.content, options.transpose),
            })
        })
        .collect();
    placed.sort_by_key(|p| (p.token.index, p.voice_pos));

    let mut aligner = PhraseAligner::new(phrase_index, options.max_columns());
    let mut group: Vec<Placed> = Vec::new();
    let mut start = 0;
    let mut extent = 0;

    for p in placed {
        let joins = !group.is_empty()
            && p.token.index < extent
            && !group.iter().any(|g| g.voice_pos == p.voice_pos);

        if joins {
            extent = extent.max(p.token.index + p.width);
            group.push(p);
            continue;
        }

        aligner.flush(std::mem::take(&mut group), start, extent);
        start = p.token.index;
        extent = p.token.index + p.width;
        group.push(p);
    }
    aligner.flush(group, start, extent);

    let lines = aligner.finish();
    log::debug!("phrase {} aligned into {} line(s)", phrase_index, lines.len());
    lines
}

/// Align every phrase of a verse. Lines come out in phrase order.
pub fn align_verse(verse: &Verse, options: &RenderOptions) -> Vec<Line> {
    verse
        .iter()
        .enumerate()
        .flat_map(|(i, phrase)| align_phrase(i, phrase, options))
        .collect()
}
