//! Inline chord segments.
//!
//! For the inline layout a chord is typeset right before the word it
//! decorates, so each chord travels together with the text that follows it:
//!
//! ```text
//! "Pan [D]Duchu [G]Święty" -> {text: "Pan "}, {D, "Duchu "}, {G, "Święty"}
//! ```
//!
//! Concatenating the `text` of every segment gives the line with its chord
//! tokens removed.

use crate::lexer::{tokenize, Token};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
    pub text: String,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            chord: None,
            text: text.into(),
        }
    }

    pub fn chord(chord: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chord: Some(chord.into()),
            text: text.into(),
        }
    }
}

/// Split one ChordPro line into `{chord?, text}` runs.
///
/// # Example
/// ```
/// use spiewnik::{parse_inline, Segment};
///
/// assert_eq!(
///     parse_inline("[D]Duchu [G]Święty"),
///     vec![Segment::chord("D", "Duchu "), Segment::chord("G", "Święty")]
/// );
/// ```
pub fn parse_inline(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<Segment> = None;

    for token in tokenize(line) {
        match token {
            Token::Text(text) => match current.as_mut() {
                Some(segment) => segment.text.push_str(text),
                None => current = Some(Segment::text(text)),
            },
            Token::Chord(inner) => {
                segments.extend(current.take());
                current = Some(Segment::chord(inner.trim(), ""));
            }
        }
    }
    segments.extend(current);

    if segments.is_empty() {
        segments.push(Segment::text(line));
    }
    segments
}

/// Inline segments for every line of a body (CRLF tolerated).
pub fn parse_inline_body(body: &str) -> Vec<Vec<Segment>> {
    body.replace("\r\n", "\n").split('\n').map(parse_inline).collect()
}
