//! # Song Source Parser
//!
//! Reads a song from its text source: YAML metadata between `---` markers,
//! followed by the body split into sections by `@kind: Label` header lines.
//!
//! ## Format
//! ```text
//! ---
//! title: Abba Ojcze
//! categories: [uwielbienie, dzieci]
//! format: chordpro
//! ---
//! @verse: Zwrotka 1
//! [C]Ty wyzwoliłeś nas [G]Panie
//!
//! @chorus:
//! [F]Abba [G]Ojcze
//! ```
//!
//! ## Metadata Keys
//! - `title` (required)
//! - `id` (defaults to the slug of the title)
//! - `categories` (list of category slugs)
//! - `format` - `plain` (default) or `chordpro`
//! - `has-chords` - author's flag, `false` by default
//!
//! ## Sections
//! - A line whose trimmed text is `@<kind>:` or `@<kind>: <label>` starts a
//!   section. Kinds: verse, chorus, bridge, intro, outro, other (Polish names
//!   zwrotka, refren, inne are accepted too). The label defaults to the kind's.
//! - Text before the first header becomes an `other` section labelled "Inne"
//!   when not blank.
//! - A body without headers is one section labelled "Tekst".
//! - Leading and trailing blank lines of a section are dropped; everything
//!   else is kept verbatim.
//!
//! ## Example
//! ```rust
//! use spiewnik::{parse_song, SongFormat};
//!
//! let source = "---\ntitle: Abba Ojcze\nformat: chordpro\n---\n@chorus:\n[F]Abba [G]Ojcze\n";
//! let song = parse_song(source).unwrap();
//! assert_eq!(song.id, "abba-ojcze");
//! assert_eq!(song.format, SongFormat::ChordPro);
//! assert_eq!(song.sections[0].label, "Refren");
//! assert_eq!(song.sections[0].body, "[F]Abba [G]Ojcze");
//! ```

use crate::error::SongbookError;
use crate::search::slugify_title;
use crate::song::{Section, SectionKind, Song, SongFormat};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    format: Option<String>,
    has_chords: Option<bool>,
}

/// A section header line
struct Header {
    kind: SectionKind,
    label: String,
}

/// Section being collected
struct PendingSection<'a> {
    kind: SectionKind,
    label: String,
    lines: Vec<&'a str>,
}

impl PendingSection<'_> {
    fn body(&self) -> String {
        let start = self.lines.iter().position(|l| !l.trim().is_empty());
        let end = self.lines.iter().rposition(|l| !l.trim().is_empty());
        match (start, end) {
            (Some(start), Some(end)) => self.lines[start..=end].join("\n"),
            _ => String::new(),
        }
    }
}

/// Split the source into the metadata block (between the first two `---`
/// lines) and the remaining numbered body lines.
fn extract_metadata<'a>(lines: &[&'a str]) -> (Option<String>, Vec<(usize, &'a str)>) {
    let mut markers = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i);

    match (markers.next(), markers.next()) {
        (Some(start), Some(end)) => {
            let metadata = lines[start + 1..end].join("\n");
            let body = lines
                .iter()
                .enumerate()
                .filter(|(i, _)| *i < start || *i > end)
                .map(|(i, line)| (i + 1, *line))
                .collect();
            (Some(metadata), body)
        }
        _ => (
            None,
            lines.iter().enumerate().map(|(i, line)| (i + 1, *line)).collect(),
        ),
    }
}

fn parse_metadata(content: Option<&str>) -> Result<RawMetadata, SongbookError> {
    match content {
        Some(content) if !content.trim().is_empty() => {
            serde_yaml::from_str(content).map_err(|e| SongbookError::MetadataError(e.to_string()))
        }
        _ => Ok(RawMetadata::default()),
    }
}

fn parse_format(s: &str) -> Result<SongFormat, SongbookError> {
    match s.trim().to_lowercase().as_str() {
        "plain" => Ok(SongFormat::Plain),
        "chordpro" => Ok(SongFormat::ChordPro),
        _ => Err(SongbookError::MetadataError(format!(
            "Invalid format: {} (expected plain or chordpro)",
            s
        ))),
    }
}

/// Recognise `@kind: label`. Lines starting with `@` but without a colon are
/// ordinary lyrics.
fn parse_header(line: &str, line_number: usize) -> Result<Option<Header>, SongbookError> {
    let trimmed = line.trim();
    let Some(annotation) = trimmed.strip_prefix('@') else {
        return Ok(None);
    };
    let Some((kind, label)) = annotation.split_once(':') else {
        return Ok(None);
    };

    let kind = SectionKind::from_str(kind).ok_or_else(|| SongbookError::ParseError {
        line: line_number,
        column: line.chars().take_while(|c| c.is_whitespace()).count() + 1,
        message: format!(
            "Unknown section kind '{}'. Expected: verse, chorus, bridge, intro, outro or other",
            kind.trim()
        ),
    })?;

    let label = match label.trim() {
        "" => kind.default_label().to_string(),
        label => label.to_string(),
    };
    Ok(Some(Header { kind, label }))
}

fn parse_sections(lines: &[(usize, &str)]) -> Result<Vec<Section>, SongbookError> {
    let mut preamble = PendingSection {
        kind: SectionKind::Other,
        label: SectionKind::Other.default_label().to_string(),
        lines: Vec::new(),
    };
    let mut pending: Vec<PendingSection<'_>> = Vec::new();

    for &(line_number, line) in lines {
        match parse_header(line, line_number)? {
            Some(header) => pending.push(PendingSection {
                kind: header.kind,
                label: header.label,
                lines: Vec::new(),
            }),
            None => match pending.last_mut() {
                Some(section) => section.lines.push(line),
                None => preamble.lines.push(line),
            },
        }
    }

    if pending.is_empty() {
        return Ok(vec![Section::fallback(preamble.body())]);
    }

    let preamble = Some(preamble).filter(|p| !p.body().is_empty());
    let sections = preamble
        .into_iter()
        .chain(pending)
        .enumerate()
        .map(|(i, section)| Section {
            id: format!("section-{}", i + 1),
            body: section.body(),
            label: section.label,
            kind: section.kind,
        })
        .collect();

    Ok(sections)
}

/// Parse a song source string.
pub fn parse_song(source: &str) -> Result<Song, SongbookError> {
    let source = source.replace("\r\n", "\n");
    let lines: Vec<&str> = source.split('\n').collect();

    let (metadata, body) = extract_metadata(&lines);
    let raw = parse_metadata(metadata.as_deref())?;

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SongbookError::MetadataError("title is required".to_string()))?;

    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => slugify_title(&title),
    };
    if id.is_empty() {
        return Err(SongbookError::MetadataError(format!(
            "Cannot derive an id from title '{}'; set `id`",
            title
        )));
    }

    let format = match raw.format.as_deref() {
        Some(format) => parse_format(format)?,
        None => SongFormat::default(),
    };

    let sections = parse_sections(&body)?;
    tracing::debug!(id = %id, sections = sections.len(), "parsed song");

    Ok(Song {
        id,
        title,
        categories: raw.categories,
        format,
        has_chords: raw.has_chords.unwrap_or(false),
        sections,
    })
}

/// Read and parse a song file.
pub fn load_song(path: impl AsRef<Path>) -> Result<Song, SongbookError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SongbookError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_song(&source)
}

/// Load every `*.song` file in a directory, ordered by file name.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_library(dir: impl AsRef<Path>) -> Result<Vec<Song>, SongbookError> {
    let dir = dir.as_ref();
    let io_error = |source: std::io::Error| SongbookError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "song") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut songs = Vec::with_capacity(paths.len());
    for path in paths {
        match load_song(&path) {
            Ok(song) => songs.push(song),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping song"),
        }
    }
    Ok(songs)
}
