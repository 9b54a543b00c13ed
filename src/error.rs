//! # Error Types
//!
//! This module defines all error types for the verse parser and chord-chart renderer.
//!
//! Structural problems in the verse text are fatal and carry the 1-based line
//! number of the offending input line. Rendering inconsistencies are never
//! errors; see [`crate::renderer::RenderWarning`].
//!
//! ## Error Types
//! - `MalformedVoiceLine` - A non-empty line without a `<name><digits>: ` header
//! - `InvalidVoicing` - A chord voicing override that cannot be parsed
//! - `ConfigError` - Render options that are not valid YAML for [`crate::RenderOptions`]
//! - `Io` - File access from the command-line tool
//!
//! ## Usage
//! ```rust
//! use versechart::{parse_verse, VerseError};
//!
//! match parse_verse("c: Am G\nnot a voice") {
//!     Ok(verse) => println!("{} phrases", verse.len()),
//!     Err(VerseError::MalformedVoiceLine { line, message }) => {
//!         eprintln!("Line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerseError {
    /// A non-empty line inside a phrase that does not start with a voice header.
    ///
    /// # Example
    /// ```
    /// # use versechart::VerseError;
    /// let err = VerseError::MalformedVoiceLine {
    ///     line: 3,
    ///     message: "expected `<name><digits>: <content>`, found `hello`".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Malformed voice line at line 3: expected `<name><digits>: <content>`, found `hello`"
    /// );
    /// ```
    #[error("Malformed voice line at line {line}: {message}")]
    MalformedVoiceLine { line: usize, message: String },

    /// A chord voicing shorthand that cannot be parsed.
    #[error("Invalid voicing for chord {chord}: {message}")]
    InvalidVoicing { chord: String, message: String },

    /// Render options could not be read.
    #[error("Invalid render options: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
