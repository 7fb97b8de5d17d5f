use std::{fmt::Display, mem};

use crate::{lexer::tokens::TokenKind, Span};

use super::ast::Expr;

// LITERALS

/// Number Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: i64,
    pub span: Span,
}

/// String Expression
/// Represents a string literal in the AST. Only `print` arguments may use it.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// Symbol Expression
/// Represents a variable reference in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// OPERATIONS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary Expression
/// `left operator right`, both operands owned by this node.
///
/// Operators are left-associative, so a chain like `1 + 2 + ... + n` is a
/// tree as deep as it is long. Everything that walks such a chain goes
/// through [`BinaryExpr::left_spine`] in a loop instead of recursing on
/// `left`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

impl BinaryExpr {
    /// The chain of binary nodes down the left side, outermost first, and the
    /// first operand that is not itself a binary expression.
    pub fn left_spine(&self) -> (Vec<&BinaryExpr>, &Expr) {
        let mut spine = vec![self];
        let mut leftmost = self.left.as_ref();

        while let Expr::Binary(inner) = leftmost {
            spine.push(inner);
            leftmost = inner.left.as_ref();
        }

        (spine, leftmost)
    }

    fn take_left(&mut self) -> Expr {
        let placeholder = Expr::Number(NumberExpr {
            value: 0,
            span: self.span.clone(),
        });
        mem::replace(self.left.as_mut(), placeholder)
    }
}

// Unlink the left spine one node at a time so dropping a long chain does not
// recurse once per operand.
impl Drop for BinaryExpr {
    fn drop(&mut self) {
        let mut next = self.take_left();
        while let Expr::Binary(mut binary) = next {
            next = binary.take_left();
        }
    }
}

/// Call Expression
/// Calls are by name only; there are no first-class functions.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
