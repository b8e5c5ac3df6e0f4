//! # Chord Transposition
//!
//! Shifts chord roots by a signed number of semitones, leaving every other
//! character of a ChordPro body untouched.
//!
//! ## Note Spelling
//! Two naming conventions are recognised per chord, from the chord's own root:
//! - **English**: `C D E F G A B` with `#`/`b` accidentals
//! - **Polish/German**: `H` is B natural and a bare `B` is B-flat
//!
//! A root written as `H`, `B` or `Bb` is treated as Polish and respelled from
//! the Polish tables (so its natural B stays `H`). Everything else is English.
//!
//! ## Respelling
//! The new root keeps the accidental style of the old one: a flat root is
//! respelled with flats, a sharp root with sharps. Natural roots default to
//! flats in the Polish convention and to sharps in the English one.
//!
//! ## Example
//! ```rust
//! use spiewnik::{transpose_body, transpose_chord};
//!
//! assert_eq!(transpose_chord("Am7", 3), "Cm7");
//! assert_eq!(transpose_chord("H", 1), "C");
//! assert_eq!(transpose_chord("D/F#", -2), "C/E");
//! assert_eq!(transpose_body("[C]Hello [G]world", 2), "[D]Hello [A]world");
//! ```

use crate::lexer::{tokenize, Token};

const NOTES_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const NOTES_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

// H = B natural, B = B-flat
const NOTES_PL_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "H"];
const NOTES_PL_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "B", "H"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Convention {
    English,
    Polish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accidental {
    Natural,
    Sharp,
    Flat,
}

/// A root note split from its quality suffix, e.g. `F#` + `m7`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NoteToken<'a> {
    root: char,
    accidental: Accidental,
    suffix: &'a str,
}

impl<'a> NoteToken<'a> {
    fn split(token: &'a str) -> Option<Self> {
        let mut chars = token.chars();
        let root = chars.next().filter(|c| ('A'..='H').contains(c))?;
        let rest = chars.as_str();
        let (accidental, suffix) = match rest.as_bytes().first() {
            Some(b'#') => (Accidental::Sharp, &rest[1..]),
            Some(b'b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };
        Some(Self {
            root,
            accidental,
            suffix,
        })
    }

    fn convention(&self) -> Convention {
        match self.root {
            'H' | 'B' => Convention::Polish,
            _ => Convention::English,
        }
    }

    /// Pitch class 0-11 (C = 0), or None for spellings outside both tables
    fn pitch_class(&self) -> Option<u8> {
        match (self.root, self.accidental) {
            ('H', Accidental::Natural) => Some(11),
            ('B', Accidental::Natural) => Some(10),
            (root, accidental) => english_pitch_class(root, accidental),
        }
    }
}

/// Note name to semitone offset from C, for names present in the
/// English sharp or flat table
fn english_pitch_class(root: char, accidental: Accidental) -> Option<u8> {
    let natural = match root {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    match accidental {
        Accidental::Natural => Some(natural),
        Accidental::Sharp if !matches!(root, 'E' | 'B') => Some(natural + 1),
        Accidental::Flat if !matches!(root, 'C' | 'F') => Some(natural - 1),
        _ => None,
    }
}

/// Spelling table for the transposed root
fn spelling_table(convention: Convention, accidental: Accidental) -> &'static [&'static str; 12] {
    match (convention, accidental) {
        (Convention::Polish, Accidental::Sharp) => &NOTES_PL_SHARP,
        (Convention::Polish, _) => &NOTES_PL_FLAT,
        (Convention::English, Accidental::Flat) => &NOTES_FLAT,
        (Convention::English, _) => &NOTES_SHARP,
    }
}

fn normalize_accidentals(s: &str) -> String {
    s.replace('♯', "#").replace('♭', "b")
}

/// Transpose one note token (a chord, or the bass side of a slash chord).
/// Tokens that do not start with a recognised note come back unchanged.
fn transpose_note_token(token: &str, steps: i32) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return token.to_string();
    }

    let Some(note) = NoteToken::split(trimmed) else {
        tracing::trace!(token, "not a note, left as is");
        return token.to_string();
    };
    let Some(pitch_class) = note.pitch_class() else {
        tracing::trace!(token, "unknown spelling, left as is");
        return token.to_string();
    };

    let next = (i32::from(pitch_class) + steps.rem_euclid(12)) % 12;
    let table = spelling_table(note.convention(), note.accidental);

    format!("{}{}", table[next as usize], note.suffix)
}

/// Transpose a chord symbol by `steps` semitones.
///
/// The main chord and the bass note of a slash chord (split at the first `/`)
/// are transposed independently. Quality suffixes (`m7`, `sus4`, ...) are
/// carried through verbatim. `♯`/`♭` are normalised to `#`/`b`.
///
/// # Examples
/// ```
/// use spiewnik::transpose_chord;
///
/// assert_eq!(transpose_chord("C", 2), "D");
/// assert_eq!(transpose_chord("Bb", 1), "H");
/// assert_eq!(transpose_chord("N.C.", 5), "N.C.");
/// assert_eq!(transpose_chord("Am7", 0), "Am7");
/// ```
pub fn transpose_chord(chord: &str, steps: i32) -> String {
    if steps == 0 {
        return chord.to_string();
    }

    let normalized = normalize_accidentals(chord);
    match normalized.split_once('/') {
        Some((main, bass)) if bass.trim().is_empty() => transpose_note_token(main, steps),
        Some((main, bass)) => format!(
            "{}/{}",
            transpose_note_token(main, steps),
            transpose_note_token(bass, steps)
        ),
        None => transpose_note_token(&normalized, steps),
    }
}

/// Transpose every `[chord]` in a ChordPro body.
///
/// Text outside brackets passes through unchanged; blank chords are
/// written back as `[]`.
pub fn transpose_body(body: &str, steps: i32) -> String {
    if steps == 0 {
        return body.to_string();
    }

    let mut out = String::with_capacity(body.len());
    for token in tokenize(body) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Chord(inner) => {
                let chord = inner.trim();
                out.push('[');
                if !chord.is_empty() {
                    out.push_str(&transpose_chord(chord, steps));
                }
                out.push(']');
            }
        }
    }
    out
}
