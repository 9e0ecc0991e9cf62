//! Module `lexer` turns source text into a lazy stream of [`Token`]s.
//!
//! # Public API
//!
//! - `Lexer::new(src: &'a str) -> Lexer<'a>`
//!   Create a lexer over the whole input buffer.
//!
//! - `impl Iterator for Lexer<'a>`
//!   Yields `Result<Token<'a>, FrontendError>` on each `.next()`. The first
//!   `Err` is also the last item: the lexer fuses after it.
//!
//! - `tokenize(src) -> Result<Vec<Token>>`
//!   Drain a lexer into a vector, stopping at the first error.
//!
//! # Rule table
//!
//! Tokens are recognised by the ordered table [`RULES`]. At every position the
//! **first** rule whose pattern matches there wins, even when a later rule
//! would match more text. Several entries only work because of their place in
//! the table:
//!
//! - `FLOAT` before `INTEGER`, otherwise `1.5` splits around the dot;
//! - `ASSIGN` before `ARITHMETIC`, otherwise `->` becomes `-` and `>`;
//! - two-character relational forms before their one-character prefixes;
//! - `KEYWORD` before `IDENTIFIER`, otherwise no keyword is ever produced.
//!
//! The table is compiled once into a single alternation with one named group
//! per rule; the regex engine's leftmost-first semantics give exactly the
//! "first rule wins" behaviour. The fallback `MISMATCH` rule accepts any
//! character, so matches tile the input without gaps.
//!
//! # Positions
//!
//! `line` starts at 1 and grows on every newline; `column` starts at 1, grows
//! by the character count of every match (skipped whitespace and comments
//! included) and resets to 1 after a newline.

use crate::error::{FrontendError, Result};
use crate::token::{Token, TokenKind, KEYWORDS};
use lazy_static::lazy_static;
use log::{debug, info};
use regex::{CaptureMatches, Regex};
use std::iter::FusedIterator;

/// One entry of the token table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: TokenKind,
    pub pattern: &'static str,
}

/// Token rules in priority order. Reordering changes what the lexer accepts.
pub static RULES: [Rule; 19] = [
    Rule { kind: TokenKind::Comment, pattern: r"//[^\n]*" },
    Rule { kind: TokenKind::String, pattern: r#""[^"\n]*""# },
    Rule { kind: TokenKind::Float, pattern: r"[0-9]+\.[0-9]+" },
    Rule { kind: TokenKind::Integer, pattern: r"[0-9]+" },
    Rule { kind: TokenKind::Assign, pattern: r"->" },
    Rule { kind: TokenKind::Relational, pattern: r"==|!=|<=|>=|<|>" },
    Rule { kind: TokenKind::Arithmetic, pattern: r"\+|-|\*|/" },
    Rule { kind: TokenKind::Semicolon, pattern: r";" },
    Rule { kind: TokenKind::Colon, pattern: r":" },
    Rule { kind: TokenKind::Comma, pattern: r"," },
    Rule { kind: TokenKind::LeftParen, pattern: r"\(" },
    Rule { kind: TokenKind::RightParen, pattern: r"\)" },
    Rule { kind: TokenKind::LeftBrace, pattern: r"\{" },
    Rule { kind: TokenKind::RightBrace, pattern: r"\}" },
    // `{keywords}` is filled in from the keys of `token::KEYWORDS`
    Rule { kind: TokenKind::Keyword, pattern: r"\b(?:{keywords})\b" },
    Rule { kind: TokenKind::Identifier, pattern: r"[a-zA-Z_][a-zA-Z0-9_]*" },
    Rule { kind: TokenKind::Newline, pattern: r"\n" },
    Rule { kind: TokenKind::Whitespace, pattern: r"[ \t]+" },
    Rule { kind: TokenKind::Mismatch, pattern: r"." },
];

lazy_static! {
    static ref TOKEN_REGEX: Regex = {
        let mut spellings: Vec<&str> = KEYWORDS.keys().copied().collect();
        spellings.sort_unstable();

        let keywords: String = spellings.join("|");

        let alternation: Vec<String> = RULES
            .iter()
            .map(|rule| {
                let pattern: String = rule.pattern.replace("{keywords}", &keywords);

                format!("(?P<{}>{})", rule.kind.name(), pattern)
            })
            .collect();

        Regex::new(&alternation.join("|")).expect("token rule table is a valid regex")
    };
}

/// A single-pass, non-restartable lexer over one source buffer. The lifetime
/// `'a` ties every emitted token's `text` back to that buffer.
pub struct Lexer<'a> {
    matches: CaptureMatches<'static, 'a>,
    line: usize,
    column: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over `src`.
    pub fn new(src: &'a str) -> Self {
        info!("Lexer created over {} bytes", src.len());

        let regex: &'static Regex = &TOKEN_REGEX;

        Self {
            matches: regex.captures_iter(src),
            line: 1,
            column: 1,
            done: false,
        }
    }

    /// Current 1-based line of the scan position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current 1-based column of the scan position.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Loop until we either emit a token, run out of input, or fail.
        for caps in self.matches.by_ref() {
            let Some((kind, text)) = RULES.iter().find_map(|rule| {
                caps.name(rule.kind.name())
                    .map(|m| (rule.kind, m.as_str()))
            }) else {
                continue;
            };

            let width: usize = text.chars().count();

            match kind {
                TokenKind::Newline => {
                    self.line += 1;
                    self.column = 1;
                }

                TokenKind::Whitespace | TokenKind::Comment => {
                    self.column += width;
                }

                TokenKind::Mismatch => {
                    self.done = true;

                    let character: char = text.chars().next().unwrap_or_default();

                    return Some(Err(FrontendError::lex(character, self.line, self.column)));
                }

                _ => {
                    let token = Token::new(kind, text, self.line, self.column);
                    self.column += width;

                    debug!("Scanned token ({:?}) at {}:{}", kind, token.line, token.column);

                    return Some(Ok(token));
                }
            }
        }

        self.done = true;

        None
    }
}

impl<'a> FusedIterator for Lexer<'a> {}

/// Scan all of `src`, failing on the first invalid character.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    let tokens: Vec<Token<'_>> = Lexer::new(src).collect::<Result<_>>()?;

    info!("Tokenized {} tokens", tokens.len());

    Ok(tokens)
}
