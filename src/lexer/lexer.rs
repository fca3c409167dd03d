use lazy_static::lazy_static;
use regex::Regex;

use crate::{MK_SYMBOL, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

lazy_static! {
    static ref WORD: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref INTEGER: Regex = Regex::new("^[0-9]+").unwrap();
}

/// On-demand tokenizer over a complete source text.
///
/// Each call to [`Lexer::next_token`] produces exactly one token. Once the
/// input is exhausted every further call returns an `EOF` token.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().nth(1)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.at() {
            self.advance_n(1);
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.at() else {
            return MK_TOKEN!(TokenKind::EOF, String::new());
        };

        if let Some(word) = WORD.find(self.remainder()) {
            let word = word.as_str().to_string();
            self.advance_n(word.len());
            return MK_TOKEN!(lookup_identifier(&word), word);
        }

        if let Some(number) = INTEGER.find(self.remainder()) {
            let number = number.as_str().to_string();
            self.advance_n(number.len());
            return MK_TOKEN!(TokenKind::Int, number);
        }

        match ch {
            '=' if self.peek() == Some('=') => MK_SYMBOL!(self, TokenKind::Equals, "=="),
            '=' => MK_SYMBOL!(self, TokenKind::Assign, "="),
            '!' if self.peek() == Some('=') => MK_SYMBOL!(self, TokenKind::NotEquals, "!="),
            '!' => MK_SYMBOL!(self, TokenKind::Bang, "!"),
            '+' => MK_SYMBOL!(self, TokenKind::Plus, "+"),
            '-' => MK_SYMBOL!(self, TokenKind::Minus, "-"),
            '*' => MK_SYMBOL!(self, TokenKind::Asterisk, "*"),
            '/' => MK_SYMBOL!(self, TokenKind::Slash, "/"),
            '<' => MK_SYMBOL!(self, TokenKind::LessThan, "<"),
            '>' => MK_SYMBOL!(self, TokenKind::GreaterThan, ">"),
            ',' => MK_SYMBOL!(self, TokenKind::Comma, ","),
            ';' => MK_SYMBOL!(self, TokenKind::Semicolon, ";"),
            '(' => MK_SYMBOL!(self, TokenKind::OpenParen, "("),
            ')' => MK_SYMBOL!(self, TokenKind::CloseParen, ")"),
            '{' => MK_SYMBOL!(self, TokenKind::OpenCurly, "{"),
            '}' => MK_SYMBOL!(self, TokenKind::CloseCurly, "}"),
            _ => {
                // Multi-byte characters still advance by their full width.
                self.advance_n(ch.len_utf8());
                MK_TOKEN!(TokenKind::Illegal, ch.to_string())
            }
        }
    }
}

/// Runs a lexer to completion. The result always ends with exactly one `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
