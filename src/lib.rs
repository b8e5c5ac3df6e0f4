pub mod chordpro;
pub mod config;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod presentation;
pub mod render;
pub mod search;
pub mod song;
pub mod transpose;

pub use chordpro::{has_chords, render_body, render_line, strip_chords, ChordProLine};
pub use config::Config;
pub use error::*;
pub use inline::{parse_inline, parse_inline_body, Segment};
pub use parser::{load_library, load_song, parse_song};
pub use presentation::{
    effective_mode, presentation_lines, split_for_narrow, split_line_near_middle, ChordLayout,
    PresLine, PresLineKind, SectionCursor, Transposition, ViewMode, MAX_TRANSPOSE,
};
pub use render::{
    render_song, to_json, to_song_source, to_text, RenderOptions, RenderedSection, RenderedSong,
    SectionContent,
};
pub use search::{filter_songs, normalize_text, slugify_title, SongQuery};
pub use song::{Section, SectionKind, Song, SongFormat};
pub use transpose::{transpose_body, transpose_chord};

/// Parse a song file's source and render it as a printable sheet.
/// This is the main entry point for the library.
pub fn render_source(source: &str, options: &RenderOptions) -> Result<String, SongbookError> {
    let song = parse_song(source)?;
    Ok(to_text(&render_song(&song, options), false))
}
