//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - `let` and `return` statements
//! - Literals, prefix and binary expressions, operator precedence
//! - `if` expressions, function literals and calls
//! - Diagnostics and recovery on malformed input

use super::{
    lookups::BindingPower,
    parser::{parse, Parser, MAX_NESTING_DEPTH},
};
use crate::{
    ast::{
        ast::{Expr, Node, Program, Stmt},
        statements::BlockStmt,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

fn parse_clean(source: &str) -> Program {
    let (parser, program) = parse(source);
    assert!(
        parser.errors().is_empty(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.errors()
    );
    program
}

fn single_expr(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

/// Fully parenthesised view of an expression, to assert tree shape.
fn sexpr(expr: &Expr) -> String {
    match expr {
        Expr::Prefix(prefix) => format!("({}{})", prefix.operator, sexpr(&prefix.right)),
        Expr::Infix(infix) => format!(
            "({} {} {})",
            sexpr(&infix.left),
            infix.operator,
            sexpr(&infix.right)
        ),
        Expr::Call(call) => format!(
            "{}({})",
            sexpr(&call.callee),
            call.arguments
                .iter()
                .map(sexpr)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        other => other.to_string(),
    }
}

fn block_exprs(block: &BlockStmt) -> Vec<String> {
    block
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(stmt) => sexpr(&stmt.expression),
            other => other.to_string(),
        })
        .collect()
}

#[test]
fn test_parser_primes_two_tokens() {
    let parser = Parser::new(Lexer::new("let x"));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);
}

#[test]
fn test_binding_power_order() {
    assert!(BindingPower::Lowest < BindingPower::Equals);
    assert!(BindingPower::Equals < BindingPower::Comparison);
    assert!(BindingPower::Comparison < BindingPower::Sum);
    assert!(BindingPower::Sum < BindingPower::Product);
    assert!(BindingPower::Product < BindingPower::Prefix);
    assert!(BindingPower::Prefix < BindingPower::Call);

    assert_eq!(BindingPower::Sum.lower(), BindingPower::Comparison);
    assert_eq!(BindingPower::Lowest.lower(), BindingPower::Lowest);
}

#[test]
fn test_parse_let_statements() {
    let program = parse_clean("let x = 5; let y = true; let foobar = y;");

    let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];
    assert_eq!(program.len(), expected.len());

    for (stmt, (name, value)) in program.iter().zip(expected) {
        let Stmt::Let(stmt) = stmt else {
            panic!("expected let statement, got {:?}", stmt);
        };
        assert_eq!(stmt.token_literal(), "let");
        assert_eq!(stmt.name.value, name);
        assert_eq!(stmt.name.token_literal(), name);
        assert_eq!(stmt.value.to_string(), value);
    }
}

#[test]
fn test_parse_let_without_semicolon() {
    let program = parse_clean("let x = 1 let y = 2");

    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "let x = 1; let y = 2;");
}

#[test]
fn test_parse_let_errors() {
    let (parser, _) = parse("let = 5; let x 5; let 838383;");

    assert_eq!(
        parser.errors(),
        vec![
            "expected token Identifier, found Assign",
            "no prefix parser for Assign",
            "expected token Assign, found Int",
            "expected token Identifier, found Int",
        ]
    );
}

#[test]
fn test_parse_return_statements() {
    let program = parse_clean("return 5; return 10; return add(15);");

    assert_eq!(program.len(), 3);
    for stmt in program.iter() {
        assert!(matches!(stmt, Stmt::Return(_)));
        assert_eq!(stmt.token_literal(), "return");
    }
    assert_eq!(program.statements[2].to_string(), "return add(15);");
}

#[test]
fn test_return_skips_to_semicolon() {
    let program = parse_clean("return 5 6 7; x");

    assert_eq!(program.len(), 2);
    let Stmt::Return(stmt) = &program.statements[0] else {
        panic!("expected return statement");
    };
    assert_eq!(stmt.value.to_string(), "5");
    assert_eq!(program.statements[1].to_string(), "x");
}

#[test]
fn test_unterminated_return_stops_at_eof() {
    let (parser, program) = parse("return 5");

    assert!(program.is_empty());
    assert_eq!(parser.diagnostics().len(), 1);
    assert_eq!(
        parser.diagnostics()[0].get_kind(),
        &ErrorImpl::UnterminatedReturn
    );
    assert_eq!(parser.diagnostics()[0].get_token().kind, TokenKind::EOF);
}

#[test]
fn test_parse_identifier_expression() {
    let expr = single_expr("foobar;");

    let Expr::Identifier(ident) = expr else {
        panic!("expected identifier");
    };
    assert_eq!(ident.value, "foobar");
    assert_eq!(ident.token_literal(), "foobar");
}

#[test]
fn test_parse_integer_expression() {
    let Expr::Integer(int) = single_expr("5;") else {
        panic!("expected integer");
    };
    assert_eq!(int.value, 5);
    assert_eq!(int.token_literal(), "5");

    let Expr::Integer(int) = single_expr("9223372036854775807") else {
        panic!("expected integer");
    };
    assert_eq!(int.value, i64::MAX);
}

#[test]
fn test_integer_literals_are_decimal() {
    let Expr::Integer(int) = single_expr("010") else {
        panic!("expected integer");
    };
    assert_eq!(int.value, 10);

    let Expr::Integer(int) = single_expr("08") else {
        panic!("expected integer");
    };
    assert_eq!(int.value, 8);
}

#[test]
fn test_integer_overflow_is_diagnosed() {
    let (parser, program) = parse("9223372036854775808;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["could not parse \"9223372036854775808\" as integer"]
    );
}

#[test]
fn test_parse_boolean_expression() {
    let Expr::Boolean(boolean) = single_expr("true;") else {
        panic!("expected boolean");
    };
    assert!(boolean.value);

    let Expr::Boolean(boolean) = single_expr("false") else {
        panic!("expected boolean");
    };
    assert!(!boolean.value);
}

#[test]
fn test_parse_prefix_expressions() {
    let cases = [
        ("!5;", "!", "5"),
        ("-15;", "-", "15"),
        ("!true;", "!", "true"),
        ("!false;", "!", "false"),
        ("-x", "-", "x"),
    ];

    for (source, operator, operand) in cases {
        let Expr::Prefix(prefix) = single_expr(source) else {
            panic!("expected prefix expression for {:?}", source);
        };
        assert_eq!(prefix.operator, operator);
        assert_eq!(prefix.right.to_string(), operand);
    }
}

#[test]
fn test_parse_infix_expressions() {
    let operators = ["+", "-", "*", "/", ">", "<", "==", "!="];

    for operator in operators {
        let source = format!("5 {} 6;", operator);
        let Expr::Infix(infix) = single_expr(&source) else {
            panic!("expected infix expression for {:?}", source);
        };
        assert_eq!(infix.operator, operator);
        assert_eq!(infix.token_literal(), operator);
        assert_eq!(infix.left.to_string(), "5");
        assert_eq!(infix.right.to_string(), "6");
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("-a + b", "((-a) + b)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a - b - c", "((a - b) - c)"),
        ("a - b + c", "((a - b) + c)"),
        ("a + b / c", "(a + (b / c))"),
        ("1 * 2 + 3", "((1 * 2) + 3)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("true == false", "(true == false)"),
        ("1 + 2 == 3", "((1 + 2) == 3)"),
        ("1 + 2 < 3", "((1 + 2) < 3)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a * add(b, c)", "(a * add(b, c))"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(sexpr(&single_expr(source)), expected, "source: {:?}", source);
    }
}

#[test]
fn test_plus_chains_associate_right() {
    let cases = [
        ("1 + 2 + 3", "(1 + (2 + 3))"),
        ("a + b - c", "(a + (b - c))"),
        ("1 + (2 + 3) + 4", "(1 + ((2 + 3) + 4))"),
        ("a + add(b * c) + d", "(a + (add((b * c)) + d))"),
        (
            "a + b * c + d / e - f",
            "(a + ((b * c) + ((d / e) - f)))",
        ),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(sexpr(&single_expr(source)), expected, "source: {:?}", source);
    }

    let Expr::Infix(top) = single_expr("1 + 2 + 3") else {
        panic!("expected infix expression");
    };
    assert!(matches!(*top.left, Expr::Integer(ref int) if int.value == 1));
    assert!(matches!(*top.right, Expr::Infix(ref inner) if inner.operator == "+"));
}

#[test]
fn test_parse_if_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x }") else {
        panic!("expected if expression");
    };

    assert_eq!(expr.token_literal(), "if");
    assert_eq!(sexpr(&expr.condition), "(x < y)");
    assert_eq!(block_exprs(&expr.consequence), vec!["x"]);
    assert!(expr.alternative.is_none());
}

#[test]
fn test_parse_if_else_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x } else { y }") else {
        panic!("expected if expression");
    };

    assert_eq!(block_exprs(&expr.consequence), vec!["x"]);
    let alternative = expr.alternative.expect("alternative block");
    assert_eq!(block_exprs(&alternative), vec!["y"]);
}

#[test]
fn test_parse_nested_if() {
    let expr = single_expr("if (a) { if (b) { c } else { d }; e }");

    assert_eq!(expr.to_string(), "if (a) { if (b) { c } else { d } e }");
}

#[test]
fn test_if_requires_parenthesised_condition() {
    let (parser, _) = parse("if x { y }");

    assert_eq!(parser.errors()[0], "expected token OpenParen, found Identifier");
}

#[test]
fn test_else_requires_block() {
    let (parser, _) = parse("if (x) { y } else z");

    assert_eq!(parser.errors()[0], "expected token OpenCurly, found Identifier");
}

#[test]
fn test_unterminated_block_is_lenient() {
    let program = parse_clean("if (x) { y");

    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "if (x) { y }");
}

#[test]
fn test_parse_function_literal() {
    let Expr::Function(function) = single_expr("fn(x, y) { x + y; }") else {
        panic!("expected function literal");
    };

    assert_eq!(function.token_literal(), "fn");
    let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(block_exprs(&function.body), vec!["(x + y)"]);
}

#[test]
fn test_parse_function_parameters() {
    let cases: [(&str, Vec<&str>); 3] = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        let Expr::Function(function) = single_expr(source) else {
            panic!("expected function literal for {:?}", source);
        };
        let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(names, expected);
        assert!(function.body.body.is_empty());
    }
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let (parser, _) = parse("fn(1) {}");

    assert_eq!(parser.errors()[0], "expected token Identifier, found Int");
}

#[test]
fn test_parse_function_with_return() {
    let Expr::Function(function) = single_expr("fn(x) { return x; }") else {
        panic!("expected function literal");
    };

    assert!(matches!(function.body.body[0], Stmt::Return(_)));
    assert_eq!(function.to_string(), "fn(x) { return x; }");
}

#[test]
fn test_parse_call_expression() {
    let Expr::Call(call) = single_expr("add(1, 2 * 3, 4 + 5);") else {
        panic!("expected call expression");
    };

    assert_eq!(call.token_literal(), "(");
    assert_eq!(call.callee.to_string(), "add");
    let args: Vec<String> = call.arguments.iter().map(sexpr).collect();
    assert_eq!(args, vec!["1", "(2 * 3)", "(4 + 5)"]);
}

#[test]
fn test_parse_call_without_arguments() {
    let Expr::Call(call) = single_expr("f()") else {
        panic!("expected call expression");
    };

    assert!(call.arguments.is_empty());
    assert_eq!(call.to_string(), "f()");
}

#[test]
fn test_immediately_invoked_function() {
    let Expr::Call(call) = single_expr("fn(x, y) { x + y; }(1, 2)") else {
        panic!("expected call expression");
    };

    let Expr::Function(function) = call.callee.as_ref() else {
        panic!("expected function literal callee");
    };
    assert_eq!(function.parameters.len(), 2);
    let args: Vec<String> = call.arguments.iter().map(sexpr).collect();
    assert_eq!(args, vec!["1", "2"]);
}

#[test]
fn test_call_missing_close_paren() {
    let (parser, program) = parse("add(1, 2");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["expected token CloseParen, found EOF"]);
}

#[test]
fn test_grouping_missing_close_paren() {
    let (parser, program) = parse("(1 + 2");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["expected token CloseParen, found EOF"]);
}

#[test]
fn test_assignment_without_let() {
    let (parser, program) = parse("foo = 1");

    assert_eq!(parser.errors(), vec!["no prefix parser for Assign"]);
    let Stmt::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    assert!(matches!(&stmt.expression, Expr::Identifier(ident) if ident.value == "foo"));
}

#[test]
fn test_illegal_character_reports_once() {
    let (parser, program) = parse("let x = @;");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["no prefix parser for Illegal"]);
    assert_eq!(parser.diagnostics()[0].get_token().literal, "@");
}

#[test]
fn test_parser_recovers_at_next_statement() {
    let (parser, program) = parse("let = 1; let y = 2;");

    assert!(!parser.errors().is_empty());
    assert_eq!(program.statements.last().map(|s| s.to_string()), Some("let y = 2;".to_string()));
}

#[test]
fn test_malformed_inputs_terminate() {
    let sources = [
        ")))", "let", "return", "return;", "fn(", "fn(x,", "if (", "(((", "{", "}", "else",
        ",,,", "a(b,", "-", "!", "let x =", "if (x) { y } else", "fn(x) { return x }",
    ];

    for source in sources {
        let (parser, _) = parse(source);
        assert!(!parser.errors().is_empty(), "expected errors for {:?}", source);
    }
}

#[test]
fn test_empty_program() {
    let program = parse_clean("");

    assert!(program.is_empty());
    assert_eq!(program.token_literal(), "");
    assert_eq!(program.to_string(), "");
}

#[test]
fn test_deep_prefix_nesting_is_diagnosed() {
    let source = format!("{}1", "-".repeat(50_000));
    let (parser, program) = parse(&source);

    assert!(program.is_empty());
    assert_eq!(parser.diagnostics().len(), 1);
    assert_eq!(
        parser.diagnostics()[0].get_kind(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
}

#[test]
fn test_deep_grouping_is_diagnosed() {
    let source = format!("{}1{}; x", "(".repeat(50_000), ")".repeat(50_000));
    let (parser, program) = parse(&source);

    assert_eq!(parser.errors(), vec!["expression nested deeper than 256 levels"]);
    assert_eq!(program.to_string(), "x");
}

#[test]
fn test_nesting_below_limit_parses() {
    let source = format!("{}1", "-".repeat(MAX_NESTING_DEPTH - 1));
    let program = parse_clean(&source);

    assert_eq!(program.to_string(), source);
}
