//! # Error Types
//!
//! This module defines the error type for loading songs.
//!
//! The ChordPro engine itself (rendering, transposition, inline segments) never
//! fails: malformed chords and unclosed brackets degrade to plain text. Errors
//! only come from reading song source files and validating their metadata.
//!
//! ## Error Types
//! - `ParseError` - Bad section header in a song body, with line and column
//! - `MetadataError` - Invalid YAML front matter or a missing title
//! - `Io` - A song file could not be read
//!
//! ## Usage
//! ```rust
//! use spiewnik::{parse_song, SongbookError};
//!
//! match parse_song("---\ntitle: Abba Ojcze\n---\n@chorus: Refren\nAbba Ojcze") {
//!     Ok(song) => println!("{} sections", song.sections.len()),
//!     Err(SongbookError::ParseError { line, column, message }) => {
//!         eprintln!("Parse error at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongbookError {
    /// Parse error with location information.
    ///
    /// Occurs when a song body contains a section header with an unknown kind.
    ///
    /// # Example
    /// ```
    /// # use spiewnik::SongbookError;
    /// let err = SongbookError::ParseError {
    ///     line: 4,
    ///     column: 2,
    ///     message: "Unknown section kind 'refren'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 4, column 2: Unknown section kind 'refren'");
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid metadata error.
    ///
    /// # Example
    /// ```
    /// # use spiewnik::SongbookError;
    /// let err = SongbookError::MetadataError("title is required".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: title is required");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
