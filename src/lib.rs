#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Prints every diagnostic in order.
pub fn display_errors(errors: &[Error]) {
    for error in errors {
        println!("{}", format_error(error));
    }
}

/// Tab-indented diagnostic, followed by the token it points at and a tip
/// when the error has one.
///
/// ```text
///     expected token CloseParen, found EOF
///      -> at `EOF` (expected `CloseParen` here, found `EOF`)
/// ```
pub fn format_error(error: &Error) -> String {
    let token = error.get_token();
    let at = if token.literal.is_empty() {
        token.kind.to_string()
    } else {
        token.literal.clone()
    };

    if let ErrorTip::None = error.get_tip() {
        format!("\t{}\n\t -> at `{}`", error, at)
    } else {
        format!("\t{}\n\t -> at `{}` ({})", error, at, error.get_tip())
    }
}
