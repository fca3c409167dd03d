use std::fmt::Display;

use crate::lexer::tokens::Token;

use super::{
    ast::{write_joined, Expr, Node},
    statements::BlockStmt,
};

// LITERALS

/// Identifier Expression
/// A name, either referenced in an expression or bound by `let` / a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
}

impl IdentifierExpr {
    pub fn from_token(token: Token) -> Self {
        IdentifierExpr {
            value: token.literal.clone(),
            token,
        }
    }
}

impl Node for IdentifierExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Expression
/// A decimal literal that fits in an `i64`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

/// Boolean Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
}

impl Node for BooleanExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

// OPERATORS

/// Prefix Expression
/// `!<operand>` or `-<operand>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Node for PrefixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.right)
    }
}

/// Infix Expression
/// A binary operator applied to two operands. `token` is the operator token.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl Node for InfixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

// CONTROL FLOW AND FUNCTIONS

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl Node for IfExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }

        Ok(())
    }
}

/// Function Expression
/// An anonymous `fn(<params>) { <body> }` literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub token: Token,
    pub parameters: Vec<IdentifierExpr>,
    pub body: BlockStmt,
}

impl Node for FunctionExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FunctionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.token_literal())?;
        write_joined(f, &self.parameters, ", ")?;
        write!(f, ") {}", self.body)
    }
}

/// Call Expression
/// `token` is the `(` that opened the argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Node for CallExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.callee)?;
        write_joined(f, &self.arguments, ", ")?;
        write!(f, ")")
    }
}
