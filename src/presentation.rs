//! # Presentation
//!
//! View state for showing one section of a song at a time: which tracks to
//! show, the rows to project, navigation between sections and the
//! transposition control.
//!
//! ## View Modes
//! - `Lyrics` - lyrics only (always used for plain songs and songs without chords)
//! - `Both` - chord row above each lyrics row
//! - `Chords` - chord rows only
//!
//! Projection always uses the "chords above lyrics" layout; the inline layout
//! is only used by the printable sheet (see `render`).

use crate::chordpro::render_body;
use crate::song::{Song, SongFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transposition range offered to the user, in semitones either way
pub const MAX_TRANSPOSE: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Lyrics,
    Both,
    Chords,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lyrics" => Ok(Self::Lyrics),
            "both" => Ok(Self::Both),
            "chords" => Ok(Self::Chords),
            other => Err(format!("unknown view mode '{}' (lyrics, both, chords)", other)),
        }
    }
}

/// Where chords go relative to the lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordLayout {
    #[default]
    Above,
    Inline,
}

impl FromStr for ChordLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "inline" => Ok(Self::Inline),
            other => Err(format!("unknown chord layout '{}' (above, inline)", other)),
        }
    }
}

/// The mode actually shown: chord modes need a ChordPro song with chords.
pub fn effective_mode(song: &Song, requested: ViewMode) -> ViewMode {
    if song.detects_chords() {
        requested
    } else {
        ViewMode::Lyrics
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresLineKind {
    Lyrics,
    Chords,
    Gap,
}

/// One projected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresLine {
    pub kind: PresLineKind,
    pub text: String,
}

impl PresLine {
    fn lyrics_or_gap(text: &str) -> Self {
        if text.is_empty() {
            Self::gap()
        } else {
            Self {
                kind: PresLineKind::Lyrics,
                text: text.to_string(),
            }
        }
    }

    fn chords_or_gap(text: &str) -> Self {
        if text.is_empty() {
            Self::gap()
        } else {
            Self {
                kind: PresLineKind::Chords,
                text: text.to_string(),
            }
        }
    }

    fn gap() -> Self {
        Self {
            kind: PresLineKind::Gap,
            text: String::new(),
        }
    }
}

/// Rows to project for one section. Directives are not shown.
pub fn presentation_lines(song: &Song, section: usize, steps: i32, mode: ViewMode) -> Vec<PresLine> {
    let Some(body) = song.section_body(section, steps) else {
        return Vec::new();
    };

    if song.format != SongFormat::ChordPro {
        return body
            .replace("\r\n", "\n")
            .split('\n')
            .map(PresLine::lyrics_or_gap)
            .collect();
    }

    let mode = effective_mode(song, mode);
    let mut out = Vec::new();
    for line in render_body(&body).iter().filter(|l| !l.is_directive) {
        let chords = line.chords.trim_end();
        let lyrics = line.lyrics.trim_end();

        match mode {
            ViewMode::Lyrics => out.push(PresLine::lyrics_or_gap(lyrics)),
            ViewMode::Chords => out.push(PresLine::chords_or_gap(chords)),
            ViewMode::Both => {
                if !chords.is_empty() {
                    out.push(PresLine::chords_or_gap(chords));
                }
                out.push(PresLine::lyrics_or_gap(lyrics));
            }
        }
    }
    out
}

/// Split a long lyrics line in two at the word boundary closest to its
/// middle, so narrow screens can use a larger font.
///
/// Lines shorter than 22 chars or with fewer than 4 words are kept, as are
/// splits that would leave a half shorter than 6 chars.
pub fn split_line_near_middle(line: &str) -> Vec<String> {
    let trimmed = line.trim_end();
    if trimmed.chars().count() < 22 {
        return vec![trimmed.to_string()];
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() < 4 {
        return vec![trimmed.to_string()];
    }

    let total = words.iter().map(|w| w.chars().count()).sum::<usize>() + words.len() - 1;

    let mut best = 0;
    let mut best_diff = usize::MAX;
    let mut acc = 0;
    for (i, word) in words[..words.len() - 1].iter().enumerate() {
        acc += word.chars().count() + usize::from(i > 0);
        let diff = (2 * acc).abs_diff(total);
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }

    let left = words[..=best].join(" ");
    let right = words[best + 1..].join(" ");
    if left.chars().count() < 6 || right.chars().count() < 6 {
        return vec![trimmed.to_string()];
    }
    vec![left, right]
}

/// Apply [`split_line_near_middle`] to every lyrics row.
pub fn split_for_narrow(lines: Vec<PresLine>) -> Vec<PresLine> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if line.kind != PresLineKind::Lyrics {
            out.push(line);
            continue;
        }
        out.extend(
            split_line_near_middle(&line.text)
                .into_iter()
                .map(|text| PresLine {
                    kind: PresLineKind::Lyrics,
                    text,
                }),
        );
    }
    out
}

/// Position within a song's sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCursor {
    index: usize,
    len: usize,
}

impl SectionCursor {
    pub fn new(song: &Song) -> Self {
        Self {
            index: 0,
            len: song.sections.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Jump to a section, clamped to the last one.
    pub fn go_to(&mut self, index: usize) {
        self.index = index.min(self.len.saturating_sub(1));
    }

    /// Move forward; false when already at the last section.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back; false when already at the first section.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn current_label<'a>(&self, song: &'a Song) -> Option<&'a str> {
        song.sections.get(self.index).map(|s| s.display_label())
    }

    pub fn next_label<'a>(&self, song: &'a Song) -> Option<&'a str> {
        song.sections.get(self.index + 1).map(|s| s.display_label())
    }

    /// "2/5"
    pub fn position(&self) -> String {
        format!("{}/{}", self.index + 1, self.len)
    }
}

/// Transposition chosen by the viewer, kept within ±[`MAX_TRANSPOSE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transposition {
    steps: i32,
}

impl Transposition {
    pub fn new(steps: i32) -> Self {
        Self {
            steps: steps.clamp(-MAX_TRANSPOSE, MAX_TRANSPOSE),
        }
    }

    pub fn steps(self) -> i32 {
        self.steps
    }

    pub fn up(&mut self) {
        *self = Self::new(self.steps + 1);
    }

    pub fn down(&mut self) {
        *self = Self::new(self.steps - 1);
    }

    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps > 0 {
            write!(f, "Transpozycja: +{}", self.steps)
        } else {
            write!(f, "Transpozycja: {}", self.steps)
        }
    }
}
