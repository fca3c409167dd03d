use crate::{
    ast::{
        ast::Stmt,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let kind = parser.current_token_kind();
    log::trace!("statement at {}", parser.current_token());

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    let expression = parse_expr(parser, BindingPower::Lowest);
    parser.skip_optional_semicolon();

    Some(Stmt::Expression(ExpressionStmt {
        token,
        expression: expression?,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    // let <identifier> = <expression>;
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr::from_token(parser.current_token().clone());

    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();

    let value = parse_expr(parser, BindingPower::Lowest);
    parser.skip_optional_semicolon();

    Some(Stmt::Let(LetStmt {
        token,
        name,
        value: value?,
    }))
}

/// `return <expression>` followed by anything up to the next `;`.
///
/// Reaching EOF before the `;` records `UnterminatedReturn` and drops the
/// statement.
pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    parser.next_token();

    let value = parse_expr(parser, BindingPower::Lowest);

    while !parser.current_token_is(TokenKind::Semicolon) {
        if parser.current_token_is(TokenKind::EOF) {
            let eof = parser.current_token().clone();
            parser.error(ErrorImpl::UnterminatedReturn, eof);
            return None;
        }
        parser.next_token();
    }

    Some(Stmt::Return(ReturnStmt {
        token,
        value: value?,
    }))
}

/// Parses statements from the `{` under the cursor up to the matching `}`.
///
/// An unterminated block ends quietly at EOF.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.current_token().clone();
    parser.next_token();

    let mut body = Vec::new();
    while !parser.current_token_is(TokenKind::CloseCurly)
        && !parser.current_token_is(TokenKind::EOF)
    {
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.next_token();
    }

    BlockStmt { token, body }
}
