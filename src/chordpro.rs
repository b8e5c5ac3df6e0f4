//! # ChordPro Line Renderer
//!
//! Turns ChordPro text into "chords above lyrics" rows: every source line
//! becomes a lyrics track plus a chord track whose chord glyphs start at the
//! column of the lyric they were written in front of.
//!
//! ```text
//! [D]Duchu [G]Święty   ->   chords: "D     G     "
//!                           lyrics: "Duchu Święty"
//! ```
//!
//! Columns and lengths are counted in `char`s. For non-directive rows the
//! chord track is always padded to at least the length of the lyrics track, so
//! both strings can be sliced with the same column offsets.
//!
//! Directive lines (`{title: ...}`, `{soc}`, ...) are passed through raw and
//! carry no lyrics or chords.

use crate::lexer::{tokenize, Token};
use serde::Serialize;

/// One rendered row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordProLine {
    pub lyrics: String,
    pub chords: String,
    pub is_directive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive_raw: Option<String>,
}

impl ChordProLine {
    fn blank() -> Self {
        Self::default()
    }

    fn directive(raw: &str) -> Self {
        Self {
            is_directive: true,
            directive_raw: Some(raw.to_string()),
            ..Self::default()
        }
    }

    /// True for rows with nothing to print (blank source lines and directives).
    pub fn is_empty(&self) -> bool {
        self.lyrics.is_empty() && self.chords.is_empty()
    }
}

pub(crate) fn is_directive(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('{') && trimmed.ends_with('}')
}

/// Append spaces until `s` is `len` chars long.
fn pad_to(s: &mut String, current: &mut usize, len: usize) {
    while *current < len {
        s.push(' ');
        *current += 1;
    }
}

/// Render one line of ChordPro source (no embedded newline).
///
/// # Example
/// ```
/// use spiewnik::render_line;
///
/// let line = render_line("[D]Duchu [G]Święty");
/// assert_eq!(line.lyrics, "Duchu Święty");
/// assert_eq!(line.chords, "D     G     ");
/// ```
pub fn render_line(line: &str) -> ChordProLine {
    let trimmed = line.trim();
    if is_directive(trimmed) {
        return ChordProLine::directive(trimmed);
    }

    let mut lyrics = String::with_capacity(line.len());
    let mut chords = String::new();
    let mut lyrics_len = 0;
    let mut chords_len = 0;

    for token in tokenize(line) {
        match token {
            Token::Text(text) => {
                lyrics.push_str(text);
                lyrics_len += text.chars().count();
            }
            Token::Chord(inner) => {
                pad_to(&mut chords, &mut chords_len, lyrics_len);
                let chord = inner.trim();
                chords.push_str(chord);
                chords_len += chord.chars().count();
            }
        }
    }
    pad_to(&mut chords, &mut chords_len, lyrics_len);

    ChordProLine {
        lyrics,
        chords,
        is_directive: false,
        directive_raw: None,
    }
}

/// Render a multi-line body. Produces exactly one row per source line;
/// blank lines become empty rows.
pub fn render_body(body: &str) -> Vec<ChordProLine> {
    body.replace("\r\n", "\n")
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ChordProLine::blank()
            } else {
                render_line(line)
            }
        })
        .collect()
}

/// Whether the body contains at least one non-blank `[chord]`.
pub fn has_chords(body: &str) -> bool {
    tokenize(body)
        .iter()
        .any(|token| matches!(token, Token::Chord(inner) if !inner.trim().is_empty()))
}

/// Remove every `[chord]` token, keeping the lyrics.
pub fn strip_chords(body: &str) -> String {
    tokenize(body)
        .into_iter()
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            Token::Chord(_) => None,
        })
        .collect()
}
