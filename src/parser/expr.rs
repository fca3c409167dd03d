use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
            PrefixExpr,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    if !parser.enter_nesting() {
        return None;
    }

    let expr = parse_expr_at_depth(parser, bp);
    parser.leave_nesting();

    expr
}

fn parse_expr_at_depth(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let token = parser.current_token().clone();
        parser.error(ErrorImpl::NoPrefixParser { kind: token_kind }, token);
        return None;
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && parser.peek_binding_power() > bp {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };

        parser.next_token();
        left = led(parser, left)?;
    }

    Some(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(IdentifierExpr::from_token(
        parser.current_token().clone(),
    )))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.literal.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => {
            let literal = token.literal.clone();
            parser.error(ErrorImpl::IntegerParseError { literal }, token);
            None
        }
    }
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    Some(Expr::Boolean(BooleanExpr {
        value: token.is(TokenKind::True),
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.next_token();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Binary operators. The right operand is parsed at the operator's own
/// binding power, so chains associate to the left. `+` is the exception: its
/// right operand is parsed one level weaker, so `a + b + c` is `a + (b + c)`.
pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    let bp = parser.current_binding_power();
    parser.next_token();

    let right_bp = if operator_token.is(TokenKind::Plus) {
        bp.lower()
    } else {
        bp
    };
    let right = parse_expr(parser, right_bp)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.next_token();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Some(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    // if (<condition>) { ... } else { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.next_token();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Option<Expr> {
    // fn(<params>) { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_params(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser);

    Some(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

fn parse_function_params(parser: &mut Parser) -> Option<Vec<IdentifierExpr>> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
        return Some(parameters);
    }

    parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(IdentifierExpr::from_token(parser.current_token().clone()));

    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(IdentifierExpr::from_token(parser.current_token().clone()));
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Some(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let token = parser.current_token().clone();
    let arguments = parse_call_args(parser)?;

    Some(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

fn parse_call_args(parser: &mut Parser) -> Option<Vec<Expr>> {
    let mut args = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
        return Some(args);
    }

    parser.next_token();
    args.push(parse_expr(parser, BindingPower::Lowest)?);

    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        parser.next_token();
        args.push(parse_expr(parser, BindingPower::Lowest)?);
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Some(args)
}
