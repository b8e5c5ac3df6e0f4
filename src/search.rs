//! Title search and slugs.
//!
//! Titles are compared in a normalised form: lowercase, diacritics folded to
//! ASCII (`Krzyżu` -> `krzyzu`), whitespace collapsed. A query matches songs
//! whose normalised title starts with the normalised query text.

use crate::song::Song;

const MAX_SLUG_LEN: usize = 80;
const DEFAULT_TAKE: usize = 200;

fn fold_diacritic(c: char) -> char {
    match c {
        'ą' | 'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'ć' | 'ç' | 'č' => 'c',
        'ď' => 'd',
        'ę' | 'è' | 'é' | 'ê' | 'ë' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ł' => 'l',
        'ń' | 'ñ' | 'ň' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ř' => 'r',
        'ś' | 'š' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ů' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

/// Normalised form of a title or query.
///
/// ```
/// use spiewnik::normalize_text;
///
/// assert_eq!(normalize_text("  Zaufałem   PANU "), "zaufalem panu");
/// ```
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(fold_diacritic(c));
    }
    out
}

/// Document id derived from a title: `Krzyżu Chrystusa!` -> `krzyzu-chrystusa`.
pub fn slugify_title(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in normalize_text(title).chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Filter for a song list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub text: String,
    /// Category slug; `None` or `"all"` matches every category
    pub category: Option<String>,
    pub take: usize,
}

impl Default for SongQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: None,
            take: DEFAULT_TAKE,
        }
    }
}

impl SongQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn take(mut self, take: usize) -> Self {
        self.take = take;
        self
    }
}

/// Songs matching the query, ordered by normalised title.
pub fn filter_songs<'a>(songs: &'a [Song], query: &SongQuery) -> Vec<&'a Song> {
    let needle = normalize_text(&query.text);
    let category = query.category.as_deref().filter(|c| *c != "all");

    let mut found: Vec<(String, &Song)> = songs
        .iter()
        .filter(|song| category.map_or(true, |c| song.in_category(c)))
        .filter_map(|song| {
            let key = normalize_text(&song.title);
            key.starts_with(&needle).then_some((key, song))
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));

    tracing::debug!(query = %needle, matches = found.len(), "filtered songs");

    found
        .into_iter()
        .take(query.take)
        .map(|(_, song)| song)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, categories: &[&str]) -> Song {
        Song {
            id: slugify_title(title),
            title: title.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            ..Song::default()
        }
    }

    fn library() -> Vec<Song> {
        vec![
            song("Zawitaj Królu", &["adwentowe"]),
            song("Pan jest mocą swojego ludu", &["uwielbienie"]),
            song("Abba Ojcze", &["uwielbienie", "dzieci"]),
            song("Krzyżu Chrystusa", &["wielkopostne"]),
            song("Zaufałem Panu", &["dziekczynienie"]),
        ]
    }

    fn titles(songs: &[&Song]) -> Vec<String> {
        songs.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Krzyżu Chrystusa"), "krzyzu chrystusa");
        assert_eq!(normalize_text("ŁĄKA\tŚWIĘTA\n"), "laka swieta");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Pan jest mocą swojego ludu"), "pan-jest-moca-swojego-ludu");
        assert_eq!(slugify_title("  Krzyżu, Chrystusa! "), "krzyzu-chrystusa");
        assert_eq!(slugify_title("Psalm 23 (Pan mym pasterzem)"), "psalm-23-pan-mym-pasterzem");
        assert_eq!(slugify_title("!!!"), "");
    }

    #[test]
    fn test_slug_length_is_capped() {
        let slug = slugify_title(&"ab ".repeat(60));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_empty_query_lists_all_sorted() {
        let songs = library();
        let found = filter_songs(&songs, &SongQuery::default());
        assert_eq!(
            titles(&found),
            vec![
                "Abba Ojcze",
                "Krzyżu Chrystusa",
                "Pan jest mocą swojego ludu",
                "Zaufałem Panu",
                "Zawitaj Królu",
            ]
        );
    }

    #[test]
    fn test_prefix_query_ignores_case_and_diacritics() {
        let songs = library();
        let found = filter_songs(&songs, &SongQuery::default().text("ZA"));
        assert_eq!(titles(&found), vec!["Zaufałem Panu", "Zawitaj Królu"]);

        let found = filter_songs(&songs, &SongQuery::default().text("krzyz"));
        assert_eq!(titles(&found), vec!["Krzyżu Chrystusa"]);

        let found = filter_songs(&songs, &SongQuery::default().text("ojcze"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let songs = library();
        let found = filter_songs(&songs, &SongQuery::default().category("uwielbienie"));
        assert_eq!(titles(&found), vec!["Abba Ojcze", "Pan jest mocą swojego ludu"]);

        let found = filter_songs(&songs, &SongQuery::default().category("all"));
        assert_eq!(found.len(), 5);

        let found = filter_songs(&songs, &SongQuery::default().text("p").category("dzieci"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_take_limits_results() {
        let songs = library();
        let found = filter_songs(&songs, &SongQuery::default().take(2));
        assert_eq!(titles(&found), vec!["Abba Ojcze", "Krzyżu Chrystusa"]);
    }
}
