use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};

/// A recorded parse diagnostic together with the token it was raised at.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    token: Token,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, token: Token) -> Self {
        Error {
            internal_error: error_impl,
            token,
        }
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParser { .. } => "NoPrefixParser",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
            ErrorImpl::UnterminatedReturn => "UnterminatedReturn",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "expected `{}` here, found `{}`",
                expected, found
            )),
            ErrorImpl::NoPrefixParser { kind: TokenKind::Illegal } => ErrorTip::Suggestion(format!(
                "`{}` is not a valid character",
                self.token.literal
            )),
            ErrorImpl::NoPrefixParser { kind } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                kind
            )),
            ErrorImpl::IntegerParseError { literal } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::UnterminatedReturn => ErrorTip::None,
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression with `let` bindings",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected token {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("no prefix parser for {kind}")]
    NoPrefixParser { kind: TokenKind },
    #[error("could not parse {literal:?} as integer")]
    IntegerParseError { literal: String },
    #[error("expected token Semicolon, found EOF while scanning return statement")]
    UnterminatedReturn,
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
