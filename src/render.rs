//! # Song Output
//!
//! Renders a whole song (or one section) for printing or for other programs:
//!
//! 1. Each section body is transposed (ChordPro songs only)
//! 2. The body is laid out for the effective view mode:
//!    - plain songs and lyrics-only views become text lines
//!    - `above` layout becomes [`ChordProLine`] rows
//!    - `inline` layout becomes rows of [`Segment`]s
//! 3. The result is written as a text sheet ([`to_text`]) or JSON ([`to_json`])
//!
//! [`to_song_source`] writes a song back out as a song file, optionally
//! transposed.
//!
//! Directive lines are dropped from every layout.
//!
//! ## Example
//! ```rust
//! use spiewnik::{parse_song, render_song, to_text, RenderOptions, ViewMode};
//!
//! let song = parse_song("---\ntitle: Abba Ojcze\nformat: chordpro\n---\n@chorus:\n[F]Abba [G]Ojcze").unwrap();
//! let options = RenderOptions { steps: 2, mode: ViewMode::Both, ..RenderOptions::default() };
//! let text = to_text(&render_song(&song, &options), false);
//! assert!(text.contains("G    A"));
//! assert!(text.contains("Abba Ojcze"));
//! ```

use crate::chordpro::{is_directive, render_body, ChordProLine};
use crate::error::SongbookError;
use crate::inline::{parse_inline, Segment};
use crate::presentation::{effective_mode, ChordLayout, ViewMode};
use crate::song::{SectionKind, Song, SongFormat};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Semitones to transpose ChordPro songs by
    pub steps: i32,
    pub mode: ViewMode,
    pub layout: ChordLayout,
    /// Render only this section (0-based)
    pub section: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum SectionContent {
    Text { lines: Vec<String> },
    Above { lines: Vec<ChordProLine> },
    Inline { lines: Vec<Vec<Segment>> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub label: String,
    pub kind: SectionKind,
    #[serde(flatten)]
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSong {
    pub id: String,
    pub title: String,
    pub categories: Vec<String>,
    pub steps: i32,
    pub mode: ViewMode,
    pub sections: Vec<RenderedSection>,
}

fn body_lines(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !is_directive(line.trim()))
}

fn section_content(song: &Song, body: &str, mode: ViewMode, layout: ChordLayout) -> SectionContent {
    if song.format == SongFormat::Plain {
        return SectionContent::Text {
            lines: body_lines(body).map(str::to_string).collect(),
        };
    }

    match (mode, layout) {
        (ViewMode::Lyrics, _) => SectionContent::Text {
            lines: render_body(body)
                .into_iter()
                .filter(|line| !line.is_directive)
                .map(|line| line.lyrics.trim_end().to_string())
                .collect(),
        },
        (ViewMode::Both, ChordLayout::Inline) => SectionContent::Inline {
            lines: body_lines(body).map(parse_inline).collect(),
        },
        _ => SectionContent::Above {
            lines: render_body(body)
                .into_iter()
                .filter(|line| !line.is_directive)
                .collect(),
        },
    }
}

/// Lay out a song for output. Chord-only views always use the `above` layout.
pub fn render_song(song: &Song, options: &RenderOptions) -> RenderedSong {
    let mode = effective_mode(song, options.mode);

    let sections = song
        .sections
        .iter()
        .enumerate()
        .filter(|(i, _)| options.section.map_or(true, |wanted| wanted == *i))
        .filter_map(|(i, section)| {
            let body = song.section_body(i, options.steps)?;
            Some(RenderedSection {
                label: section.display_label().to_string(),
                kind: section.kind,
                content: section_content(song, &body, mode, options.layout),
            })
        })
        .collect();

    RenderedSong {
        id: song.id.clone(),
        title: song.title.clone(),
        categories: song.categories.clone(),
        steps: options.steps,
        mode,
        sections,
    }
}

fn paint_chord(chord: &str, color: bool) -> String {
    if color {
        chord.blue().bold().to_string()
    } else {
        chord.to_string()
    }
}

/// Printable sheet. With `color`, chords are highlighted for a terminal.
pub fn to_text(song: &RenderedSong, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&song.title);
    out.push('\n');
    if song.steps != 0 {
        out.push_str(&format!("Transpozycja: {:+}\n", song.steps));
    }

    for section in &song.sections {
        out.push_str(&format!("\n== {} ==\n", section.label));

        match &section.content {
            SectionContent::Text { lines } => {
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            SectionContent::Above { lines } => {
                for line in lines {
                    let chords = line.chords.trim_end();
                    let lyrics = line.lyrics.trim_end();
                    if song.mode == ViewMode::Chords {
                        out.push_str(&paint_chord(chords, color));
                        out.push('\n');
                        continue;
                    }
                    if !chords.is_empty() {
                        out.push_str(&paint_chord(chords, color));
                        out.push('\n');
                    }
                    out.push_str(lyrics);
                    out.push('\n');
                }
            }
            SectionContent::Inline { lines } => {
                for segments in lines {
                    for segment in segments {
                        if let Some(chord) = &segment.chord {
                            out.push_str(&paint_chord(&format!("[{}]", chord), color));
                        }
                        out.push_str(&segment.text);
                    }
                    out.push('\n');
                }
            }
        }
    }
    out
}

pub fn to_json(song: &RenderedSong) -> serde_json::Result<String> {
    serde_json::to_string_pretty(song)
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct FrontMatter<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    categories: &'a [String],
    format: SongFormat,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    has_chords: bool,
}

/// Write a song back in song-file form with its chords moved by `steps`.
pub fn to_song_source(song: &Song, steps: i32) -> Result<String, SongbookError> {
    let front_matter = FrontMatter {
        id: &song.id,
        title: &song.title,
        categories: &song.categories,
        format: song.format,
        has_chords: song.has_chords,
    };
    let yaml = serde_yaml::to_string(&front_matter)
        .map_err(|e| SongbookError::MetadataError(e.to_string()))?;

    let mut out = format!("---\n{}---\n", yaml);
    for (i, section) in song.sections.iter().enumerate() {
        let Some(body) = song.section_body(i, steps) else {
            continue;
        };
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("@{}: {}\n", section.kind.as_str(), section.label));
        out.push_str(&body);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_song;

    const SOURCE: &str = r#"---
title: Duchu Święty
categories: [uwielbienie]
format: chordpro
---
@verse: Zwrotka 1
{comment: spokojnie}
[D]Duchu [G]Święty

przyjdź
@chorus:
[A]Amen
"#;

    fn options(mode: ViewMode, layout: ChordLayout) -> RenderOptions {
        RenderOptions {
            mode,
            layout,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_above_layout_text() {
        let song = parse_song(SOURCE).unwrap();
        let text = to_text(&render_song(&song, &options(ViewMode::Both, ChordLayout::Above)), false);
        assert_eq!(
            text,
            "Duchu Święty\n\n== Zwrotka 1 ==\nD     G\nDuchu Święty\n\nprzyjdź\n\n== Refren ==\nA\nAmen\n"
        );
    }

    #[test]
    fn test_inline_layout_text() {
        let song = parse_song(SOURCE).unwrap();
        let rendered = render_song(&song, &options(ViewMode::Both, ChordLayout::Inline));
        let text = to_text(&rendered, false);
        assert_eq!(
            text,
            "Duchu Święty\n\n== Zwrotka 1 ==\n[D]Duchu [G]Święty\n\nprzyjdź\n\n== Refren ==\n[A]Amen\n"
        );
    }

    #[test]
    fn test_lyrics_mode_drops_chords_and_directives() {
        let song = parse_song(SOURCE).unwrap();
        let rendered = render_song(&song, &options(ViewMode::Lyrics, ChordLayout::Inline));
        assert_eq!(
            rendered.sections[0].content,
            SectionContent::Text {
                lines: vec!["Duchu Święty".to_string(), String::new(), "przyjdź".to_string()]
            }
        );
    }

    #[test]
    fn test_chords_mode_transposed_single_section() {
        let song = parse_song(SOURCE).unwrap();
        let opts = RenderOptions {
            steps: -2,
            mode: ViewMode::Chords,
            layout: ChordLayout::Inline,
            section: Some(1),
        };
        let text = to_text(&render_song(&song, &opts), false);
        assert_eq!(text, "Duchu Święty\nTranspozycja: -2\n\n== Refren ==\nG\n");
    }

    #[test]
    fn test_plain_song_is_text() {
        let song = parse_song("---\ntitle: T\n---\n{title: T}\n[C]la\r\nli").unwrap();
        let rendered = render_song(&song, &options(ViewMode::Both, ChordLayout::Above));
        assert_eq!(rendered.mode, ViewMode::Lyrics);
        assert_eq!(
            rendered.sections[0].content,
            SectionContent::Text {
                lines: vec!["[C]la".to_string(), "li".to_string()]
            }
        );
    }

    #[test]
    fn test_song_source_reparses_transposed() {
        let song = parse_song(SOURCE).unwrap();
        let source = to_song_source(&song, 2).unwrap();
        assert!(source.starts_with("---\nid: duchu-swiety\n"));
        assert!(source.contains("@verse: Zwrotka 1\n{comment: spokojnie}\n[E]Duchu [A]Święty\n"));

        let reparsed = parse_song(&source).unwrap();
        assert_eq!(reparsed.id, song.id);
        assert_eq!(reparsed.title, song.title);
        assert_eq!(reparsed.categories, song.categories);
        assert_eq!(reparsed.format, SongFormat::ChordPro);
        assert_eq!(reparsed.sections.len(), 2);
        assert_eq!(reparsed.sections[1].label, "Refren");
        assert_eq!(reparsed.sections[1].body, "[B]Amen");
    }

    #[test]
    fn test_song_source_round_trip_is_exact() {
        let sources = [
            SOURCE,
            "---\ntitle: T\nformat: chordpro\n---\n[C]intro line\n@chorus:\n[G]x",
            "---\ntitle: \"Psalm 23: Pan\"\nhas-chords: true\n---\n\nla la\n\nli",
            "---\ntitle: Pusta\n---\n@bridge:\n\n@outro: Koniec\nx",
        ];
        for source in sources {
            let song = parse_song(source).unwrap();
            let reparsed = parse_song(&to_song_source(&song, 0).unwrap()).unwrap();
            assert_eq!(reparsed, song, "{}", source);
        }
    }

    #[test]
    fn test_json_shape() {
        let song = parse_song(SOURCE).unwrap();
        let opts = RenderOptions {
            section: Some(1),
            ..options(ViewMode::Both, ChordLayout::Inline)
        };
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&render_song(&song, &opts)).unwrap()).unwrap();
        assert_eq!(json["id"], "duchu-swiety");
        assert_eq!(json["mode"], "both");
        assert_eq!(json["sections"][0]["kind"], "chorus");
        assert_eq!(json["sections"][0]["layout"], "inline");
        assert_eq!(json["sections"][0]["lines"][0][0]["chord"], "A");
        assert_eq!(json["sections"][0]["lines"][0][0]["text"], "Amen");
    }
}
