use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Function);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };
}

/// Maps a word to its keyword kind, or to `Identifier` when it is not reserved.
pub fn lookup_identifier(word: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(word)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,

    Identifier,
    Int,

    Assign,      // =
    Plus,        // +
    Minus,       // -
    Bang,        // !
    Asterisk,    // *
    Slash,       // /
    LessThan,    // <
    GreaterThan, // >
    Equals,      // ==
    NotEquals,   // !=

    Comma,
    Semicolon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    // Reserved
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.literal)
    }
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
