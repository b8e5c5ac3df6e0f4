//! # Song Model
//!
//! The song record consumed by rendering and presentation:
//!
//! ```text
//! Song
//!   ├── id, title, categories
//!   ├── format: SongFormat (plain | chordpro)
//!   ├── has_chords: bool (author's flag, may be stale)
//!   └── Vec<Section>
//!         ├── id, label
//!         ├── kind: SectionKind (verse, chorus, bridge, intro, outro, other)
//!         └── body: raw text (ChordPro when format is chordpro)
//! ```
//!
//! Section order is presentation order.

use crate::chordpro::has_chords;
use crate::transpose::transpose_body;
use serde::Serialize;

/// How section bodies are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SongFormat {
    #[default]
    Plain,
    ChordPro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Verse,
    Chorus,
    Bridge,
    Intro,
    Outro,
    Other,
}

impl SectionKind {
    /// Parse a section kind, in English or Polish ("verse", "zwrotka", "refren", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "verse" | "zwrotka" => Some(Self::Verse),
            "chorus" | "refren" => Some(Self::Chorus),
            "bridge" => Some(Self::Bridge),
            "intro" => Some(Self::Intro),
            "outro" => Some(Self::Outro),
            "other" | "inne" => Some(Self::Other),
            _ => None,
        }
    }

    /// Name used in `@kind:` headers
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verse => "verse",
            Self::Chorus => "chorus",
            Self::Bridge => "bridge",
            Self::Intro => "intro",
            Self::Outro => "outro",
            Self::Other => "other",
        }
    }

    /// Label shown when a section has none of its own
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Verse => "Zwrotka",
            Self::Chorus => "Refren",
            Self::Bridge => "Bridge",
            Self::Intro => "Intro",
            Self::Outro => "Outro",
            Self::Other => "Inne",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    pub kind: SectionKind,
    pub body: String,
}

impl Section {
    /// The single section of a song written without section headers
    pub fn fallback(body: impl Into<String>) -> Self {
        Self {
            id: "section-1".to_string(),
            label: "Tekst".to_string(),
            kind: SectionKind::Other,
            body: body.into(),
        }
    }

    pub fn display_label(&self) -> &str {
        match self.label.trim() {
            "" => self.kind.default_label(),
            label => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub categories: Vec<String>,
    pub format: SongFormat,
    pub has_chords: bool,
    pub sections: Vec<Section>,
}

impl Song {
    /// All section bodies separated by a blank line
    pub fn aggregate_body(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }

    /// Whether chord views apply: a ChordPro song that is flagged as having
    /// chords or actually contains one.
    pub fn detects_chords(&self) -> bool {
        self.format == SongFormat::ChordPro
            && (self.has_chords || self.sections.iter().any(|s| has_chords(&s.body)))
    }

    /// Body of a section, transposed for ChordPro songs.
    pub fn section_body(&self, index: usize, steps: i32) -> Option<String> {
        let section = self.sections.get(index)?;
        Some(match self.format {
            SongFormat::ChordPro => transpose_body(&section.body, steps),
            SongFormat::Plain => section.body.clone(),
        })
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: SectionKind, label: &str, body: &str) -> Section {
        Section {
            id: format!("{:?}", kind),
            label: label.to_string(),
            kind,
            body: body.to_string(),
        }
    }

    fn song(format: SongFormat, bodies: &[&str]) -> Song {
        Song {
            id: "abba-ojcze".to_string(),
            title: "Abba Ojcze".to_string(),
            categories: vec!["uwielbienie".to_string()],
            format,
            has_chords: false,
            sections: bodies
                .iter()
                .map(|b| section(SectionKind::Verse, "", b))
                .collect(),
        }
    }

    #[test]
    fn test_section_kind_from_str() {
        assert_eq!(SectionKind::from_str("chorus"), Some(SectionKind::Chorus));
        assert_eq!(SectionKind::from_str(" Refren "), Some(SectionKind::Chorus));
        assert_eq!(SectionKind::from_str("ZWROTKA"), Some(SectionKind::Verse));
        assert_eq!(SectionKind::from_str("coda"), None);

        for kind in [SectionKind::Verse, SectionKind::Bridge, SectionKind::Other] {
            assert_eq!(SectionKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_display_label() {
        assert_eq!(section(SectionKind::Chorus, "  ", "").display_label(), "Refren");
        assert_eq!(section(SectionKind::Other, "", "").display_label(), "Inne");
        assert_eq!(section(SectionKind::Verse, " Zwrotka 2 ", "").display_label(), "Zwrotka 2");
    }

    #[test]
    fn test_aggregate_body() {
        let s = song(SongFormat::Plain, &["\nA\nB", "C\n"]);
        assert_eq!(s.aggregate_body(), "A\nB\n\nC");
    }

    #[test]
    fn test_detects_chords() {
        assert!(song(SongFormat::ChordPro, &["x", "[C]y"]).detects_chords());
        assert!(!song(SongFormat::ChordPro, &["x", "y []"]).detects_chords());
        assert!(!song(SongFormat::Plain, &["[C]y"]).detects_chords());

        let mut flagged = song(SongFormat::ChordPro, &["x"]);
        flagged.has_chords = true;
        assert!(flagged.detects_chords());
    }

    #[test]
    fn test_section_body_transposes_only_chordpro() {
        let chordpro = song(SongFormat::ChordPro, &["[C]a"]);
        assert_eq!(chordpro.section_body(0, 2).as_deref(), Some("[D]a"));
        assert_eq!(chordpro.section_body(1, 2), None);

        let plain = song(SongFormat::Plain, &["[C]a"]);
        assert_eq!(plain.section_body(0, 2).as_deref(), Some("[C]a"));
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(serde_json::to_string(&SongFormat::ChordPro).unwrap(), "\"chordpro\"");
        assert_eq!(serde_yaml::to_string(&SongFormat::Plain).unwrap(), "plain\n");
        assert_eq!(serde_json::to_string(&SectionKind::Outro).unwrap(), "\"outro\"");
    }
}
