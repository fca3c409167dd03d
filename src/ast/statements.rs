use std::{fmt::Display, slice::Iter};

use crate::lexer::tokens::Token;

use super::{
    ast::{write_joined, Expr, Node, Stmt},
    expressions::IdentifierExpr,
};

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub value: Expr,
}

impl Node for LetStmt {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {};", self.token_literal(), self.name, self.value)
    }
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Expr,
}

impl Node for ReturnStmt {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {};", self.token_literal(), self.value)
    }
}

/// A bare expression used as a statement. `token` is the expression's first token.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expr,
}

impl Node for ExpressionStmt {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

impl Node for BlockStmt {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_joined(f, &self.body, " ")?;
        write!(f, " }}")
    }
}
