use std::fmt::{Debug, Display};

use super::{
    expressions::{
        BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Shared by every tree node. `Display` produces the canonical rendering.
pub trait Node: Debug + Display {
    /// Literal text of the token that introduced this node.
    fn token_literal(&self) -> &str;
}

/// Statement
///
/// The closed set of statement kinds. Each variant owns its node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
            Stmt::Block(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
            Stmt::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
///
/// The closed set of expression kinds. Composite variants box their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionExpr),
    Call(CallExpr),
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => expr.token_literal(),
            Expr::Integer(expr) => expr.token_literal(),
            Expr::Boolean(expr) => expr.token_literal(),
            Expr::Prefix(expr) => expr.token_literal(),
            Expr::Infix(expr) => expr.token_literal(),
            Expr::If(expr) => expr.token_literal(),
            Expr::Function(expr) => expr.token_literal(),
            Expr::Call(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Boolean(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
            Expr::If(expr) => write!(f, "{}", expr),
            Expr::Function(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}", expr),
        }
    }
}

/// Program
///
/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_joined(f, &self.statements, " ")
    }
}

/// Writes each item's rendering, separated by `separator`.
pub(crate) fn write_joined<T: Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }

    Ok(())
}
