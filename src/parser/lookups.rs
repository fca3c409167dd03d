use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest to highest. Token kinds without an infix
/// handler bind at `Lowest`.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Equals,
    Comparison,
    Sum,
    Product,
    Prefix,
    Call,
}

impl BindingPower {
    /// The next weaker binding power. `Lowest` stays `Lowest`.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Lowest | BindingPower::Equals => BindingPower::Lowest,
            BindingPower::Comparison => BindingPower::Equals,
            BindingPower::Sum => BindingPower::Comparison,
            BindingPower::Product => BindingPower::Sum,
            BindingPower::Prefix => BindingPower::Product,
            BindingPower::Call => BindingPower::Prefix,
        }
    }
}

// Handlers return `None` once they have recorded why they gave up.
pub type StmtHandler = fn(&mut Parser) -> Option<Stmt>;
pub type NUDHandler = fn(&mut Parser) -> Option<Expr>;
pub type LEDHandler = fn(&mut Parser, Expr) -> Option<Expr>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and comparison
    parser.led(TokenKind::Equals, BindingPower::Equals, parse_infix_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equals, parse_infix_expr);
    parser.led(TokenKind::LessThan, BindingPower::Comparison, parse_infix_expr);
    parser.led(TokenKind::GreaterThan, BindingPower::Comparison, parse_infix_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Sum, parse_infix_expr);
    parser.led(TokenKind::Minus, BindingPower::Sum, parse_infix_expr);
    parser.led(TokenKind::Asterisk, BindingPower::Product, parse_infix_expr);
    parser.led(TokenKind::Slash, BindingPower::Product, parse_infix_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Int, parse_integer_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Function, parse_function_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
