//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SYMBOL!` - Consumes a fixed symbol in the lexer and creates its token
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's literal text
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            literal: $literal,
        }
    };
}

/// Advances the lexer past a fixed symbol and creates its token.
///
/// The symbol's byte length is used to move the cursor, so multi-character
/// operators such as `==` are consumed in one step.
///
/// # Example
///
/// ```ignore
/// '+' => MK_SYMBOL!(self, TokenKind::Plus, "+"),
/// ```
#[macro_export]
macro_rules! MK_SYMBOL {
    ($lexer:expr, $kind:expr, $value:literal) => {{
        $lexer.advance_n($value.len());
        $crate::MK_TOKEN!($kind, String::from($value))
    }};
}
