//! # Render Options
//!
//! Configuration for aligning and rendering a verse, read from YAML:
//!
//! ```yaml
//! transpose: -2
//! maxWidth: 640
//! chords:
//!   G: "320033"
//!   Bm: [x24432, "7 9 9 7 7 7"]
//! instrumentsConfig:
//!   instrumentsToRender: [l, a2]
//! ```
//!
//! Every key is optional. The primary chord voice `c1` is always rendered; other voices,
//! further chord voices such as `c2` included, only when their full name (`a2`) or
//! instrument (`l`) is listed.

use crate::ast::{instrument_of, is_primary_chord_voice};
use crate::error::VerseError;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_MAX_WIDTH: u32 = 800;
pub const DEFAULT_COLUMN_WIDTH: u32 = 10;

/// One voicing or a list of them
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Shorthands {
    One(String),
    Many(Vec<String>),
}

impl Shorthands {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Shorthands::One(s) => vec![s.as_str()],
            Shorthands::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsConfig {
    #[serde(default)]
    pub instruments_to_render: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Semitones to shift every chord by
    pub transpose: i32,
    /// Chord name → voicing overrides
    pub chords: BTreeMap<String, Shorthands>,
    pub instruments_config: InstrumentsConfig,
    /// Line width in pixels
    pub max_width: u32,
    /// Pixels per character column
    pub column_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            transpose: 0,
            chords: BTreeMap::new(),
            instruments_config: InstrumentsConfig::default(),
            max_width: DEFAULT_MAX_WIDTH,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Read options from a YAML document. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, VerseError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| VerseError::ConfigError(e.to_string()))
    }

    /// Render options showing the given voices besides the chords
    pub fn with_instruments<I, S>(instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instruments_config: InstrumentsConfig {
                instruments_to_render: instruments.into_iter().map(Into::into).collect(),
            },
            ..Self::default()
        }
    }

    /// Whether the voice named `voice` is rendered
    pub fn includes_voice(&self, voice: &str) -> bool {
        if is_primary_chord_voice(voice) {
            return true;
        }
        let instrument = instrument_of(voice);
        self.instruments_config
            .instruments_to_render
            .iter()
            .any(|wanted| wanted == voice || wanted == instrument)
    }

    /// Columns that fit on one rendered line
    pub fn max_columns(&self) -> usize {
        (self.max_width / self.column_width.max(1)) as usize
    }
}
