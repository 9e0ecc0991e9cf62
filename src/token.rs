use log::debug;
use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// The classification of a lexical unit.
///
/// `Comment`, `Newline` and `Whitespace` have rules in the lexer's table but
/// never reach a caller as tokens. `Mismatch` is the fallback rule and always
/// turns into a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `// ...` up to (not including) the end of the line
    Comment,

    /// `"..."`, text keeps both quotes
    String,

    /// `12.5`
    Float,

    /// `42`
    Integer,

    /// `->`
    Assign,

    /// `==`, `!=`, `<=`, `>=`, `<`, `>`
    Relational,

    /// `+`, `-`, `*`, `/`
    Arithmetic,

    /// ';'
    Semicolon,

    /// ':'
    Colon,

    /// ','
    Comma,

    /// '('
    LeftParen,

    /// ')'
    RightParen,

    /// '{'
    LeftBrace,

    /// '}'
    RightBrace,

    /// One of the reserved words in [`KEYWORDS`]
    Keyword,

    /// A user-defined name
    Identifier,

    /// '\n'
    Newline,

    /// Run of spaces and tabs
    Whitespace,

    /// Any character no other rule accepts
    Mismatch,
}

impl TokenKind {
    /// Upper-case name, also used as the capture-group name in the lexer's
    /// combined pattern.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::String => "STRING",
            TokenKind::Float => "FLOAT",
            TokenKind::Integer => "INTEGER",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Relational => "RELATIONAL",
            TokenKind::Arithmetic => "ARITHMETIC",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Mismatch => "MISMATCH",
        }
    }
}

/// Human-facing description used in diagnostics: punctuation is quoted
/// (`')'`), everything else is spelled out (`identifier`).
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &str = match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string literal",
            TokenKind::Float => "float literal",
            TokenKind::Integer => "integer literal",
            TokenKind::Assign => "'->'",
            TokenKind::Relational => "relational operator",
            TokenKind::Arithmetic => "arithmetic operator",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Newline => "newline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Mismatch => "invalid character",
        };

        f.write_str(s)
    }
}

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    /// `fnc`: function declaration
    Fnc,

    /// `var`: variable declaration
    Var,

    /// `back`: return
    Back,

    /// `si`: if
    Si,

    /// `velsi`: else-if
    Velsi,

    /// `nisi`: else
    Nisi,

    /// `dum`: while
    Dum,

    /// `per`: reserved, no grammar yet
    Per,

    /// `Imp`: print
    Imp,

    /// `fin`: reserved, no grammar yet
    Fin,
}

/// Static keyword map (compile-time perfect hash).
pub static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "fnc"   => Keyword::Fnc,
    "var"   => Keyword::Var,
    "back"  => Keyword::Back,
    "si"    => Keyword::Si,
    "velsi" => Keyword::Velsi,
    "nisi"  => Keyword::Nisi,
    "dum"   => Keyword::Dum,
    "per"   => Keyword::Per,
    "Imp"   => Keyword::Imp,
    "fin"   => Keyword::Fin,
};

/// A scanned token: its kind, the exact source text, and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The category of this token.
    pub kind: TokenKind,

    /// The exact substring from the source that produced this token.
    pub text: &'a str,

    /// 1-based line number in the source.
    pub line: usize,

    /// 1-based column, counted in characters from the start of the line.
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, line: usize, column: usize) -> Self {
        debug!(
            "Creating new token: kind={:?}, text={}, line={}, column={}",
            kind, text, line, column
        );

        Self {
            kind,
            text,
            line,
            column,
        }
    }

    /// The reserved word this token spells, if it is a keyword token.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Keyword {
            return None;
        }

        KEYWORDS.get(self.text).copied()
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}:{}",
            self.kind.name(),
            self.text,
            self.line,
            self.column
        )
    }
}
