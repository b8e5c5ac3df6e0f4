//! Chord token scanner for ChordPro text.
//!
//! Splits text into alternating lyric runs and `[chord]` tokens. Every ChordPro
//! consumer in the crate (line renderer, inline segments, transposer, chord
//! detection) walks the same token stream, so they agree on what a chord is:
//!
//! - `[` followed by the next `]` on the same line is a chord token; the inner
//!   text is kept raw (untrimmed), and `[]` is a legal empty token
//! - an `[` with no `]` before the end of the line is literal text
//!
//! Joining `Text` tokens with `[` + inner + `]` for each `Chord` token rebuilds
//! the input exactly.

/// Token types for ChordPro text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Lyrics, whitespace, line breaks and unmatched brackets
    Text(&'a str),
    /// Inner text of a `[...]` token, without the brackets
    Chord(&'a str),
}

/// A token with its position in the source (1-based, columns counted in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedToken<'a> {
    pub token: Token<'a>,
    pub line: usize,
    pub column: usize,
}

/// Lexer for tokenizing ChordPro text
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance_over(&mut self, consumed: &str) {
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += consumed.len();
    }

    fn push(&mut self, tokens: &mut Vec<LocatedToken<'a>>, token: Token<'a>, consumed: &'a str) {
        tokens.push(LocatedToken {
            token,
            line: self.line,
            column: self.column,
        });
        self.advance_over(consumed);
    }

    pub fn tokenize(&mut self) -> Vec<LocatedToken<'a>> {
        let mut tokens = Vec::new();

        while self.position < self.input.len() {
            let input = self.input;
            let rest = &input[self.position..];

            match find_chord(rest) {
                Some((open, close)) => {
                    if open > 0 {
                        self.push(&mut tokens, Token::Text(&rest[..open]), &rest[..open]);
                    }
                    self.push(
                        &mut tokens,
                        Token::Chord(&rest[open + 1..close]),
                        &rest[open..=close],
                    );
                }
                None => {
                    self.push(&mut tokens, Token::Text(rest), rest);
                }
            }
        }

        tokens
    }
}

/// Tokenize without position information.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input)
        .tokenize()
        .into_iter()
        .map(|located| located.token)
        .collect()
}

/// Byte offsets of the next `[` and its closing `]`, skipping brackets that
/// are not closed on their own line.
fn find_chord(s: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(offset) = s[from..].find('[') {
        let open = from + offset;
        let after = &s[open + 1..];
        match after.find([']', '\n']) {
            Some(i) if after.as_bytes()[i] == b']' => return Some((open, open + 1 + i)),
            _ => from = open + 1,
        }
    }
    None
}
