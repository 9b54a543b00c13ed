pub mod ast;
pub mod chord;
pub mod error;
pub mod events;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod renderer;
pub mod voicing;

pub use ast::*;
pub use chord::{compare_chords, is_chord, Chord};
pub use error::*;
pub use events::{align_verse, Event, EventItem, Line};
pub use options::RenderOptions;
pub use parser::{is_voice_line, parse_verse};
pub use renderer::{render_chord_legend, ChordsRenderer, RenderWarning, RenderedChart, WarningKind};
pub use voicing::{parse_voicing, Chordbook, Voicing};

/// Parse verse notation and render it as a chord chart.
/// This is the main entry point for the library.
pub fn render(source: &str, options: &RenderOptions) -> Result<String, VerseError> {
    Ok(render_chart(source, options)?.html)
}

/// Like [`render`], but also returns the chords used and any rendering warnings
pub fn render_chart(source: &str, options: &RenderOptions) -> Result<RenderedChart, VerseError> {
    let verse = parse_verse(source)?;
    ChordsRenderer::new().render_verse(&verse, options)
}
