//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser pulls tokens from a [`Lexer`] on demand and keeps a window of
//! two tokens: the current one and the one after it (the peek token).
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Problems never abort the parse. They are collected as diagnostics and the
//! offending statement is dropped.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression nesting accepted before the parser gives up on a statement.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, advanced one token at a time
    lexer: Lexer,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// Number of `parse_expr` calls currently on the stack
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `lexer`, fills the lookahead window and
    /// registers every handler.
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            current: MK_TOKEN!(TokenKind::EOF, String::new()),
            peek: MK_TOKEN!(TokenKind::EOF, String::new()),
            errors: vec![],
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        parser.next_token();
        parser.next_token();
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until the current token is EOF.
    ///
    /// Statements that fail to parse are left out; check [`Parser::errors`]
    /// to know whether the returned program is complete.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.next_token();
        }

        program
    }

    /// Diagnostic messages, in order. Empty means the parse was clean.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// The recorded diagnostics with their originating tokens.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    /// Shifts the lookahead window by one token.
    pub fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advances onto the peek token if it has the expected kind.
    ///
    /// Otherwise records an `UnexpectedToken` diagnostic and returns `None`,
    /// so callers can bail out with `?`.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Option<()> {
        if self.peek_token_is(expected_kind) {
            self.next_token();
            Some(())
        } else {
            let found = self.peek.kind;
            let token = self.peek.clone();
            self.error(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found,
                },
                token,
            );
            None
        }
    }

    /// Consumes a `;` directly after the current token, if there is one.
    pub fn skip_optional_semicolon(&mut self) {
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    /// Records a diagnostic raised at `token`.
    pub fn error(&mut self, error_impl: ErrorImpl, token: Token) {
        let error = Error::new(error_impl, token);
        log::debug!("parse error: {} (at {})", error, error.get_token());
        self.errors.push(error);
    }

    /// Enters one more level of expression nesting.
    ///
    /// Past [`MAX_NESTING_DEPTH`] this records `NestingTooDeep`, skips the
    /// rest of the statement and returns `false`.
    pub fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.current.clone();
            self.error(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                token,
            );
            self.skip_to_statement_end();
            return false;
        }

        self.depth += 1;
        true
    }

    pub fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Advances until the peek token is `;` or EOF.
    fn skip_to_statement_end(&mut self) {
        while !self.peek_token_is(TokenKind::Semicolon) && !self.peek_token_is(TokenKind::EOF) {
            self.next_token();
        }
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.current.kind)
    }

    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.peek.kind)
    }

    fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a complete source text.
///
/// This is the main entry point for parsing. It lexes and parses all of
/// `source` and hands back the parser alongside the tree so the caller can
/// inspect its diagnostics.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - The parsed Program, possibly missing statements that failed
pub fn parse(source: &str) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (parser, program)
}
