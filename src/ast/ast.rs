use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{BinaryExpr, CallExpr, NumberExpr, StringExpr, SymbolExpr},
    statements::{
        AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, WhileStmt,
    },
};

/// Statement Types
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum StmtType {
    ExpressionStmt,
    AssignmentStmt,
    BlockStmt,
    IfStmt,
    WhileStmt,
    ReturnStmt,
    FnDeclStmt,
}

/// Statement
///
/// The closed set of statement nodes. Every child node is owned by exactly
/// one parent, so the tree is dropped with its root.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Assignment(AssignmentStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    FnDecl(FnDeclStmt),
}

impl Stmt {
    /// Returns the type of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::Assignment(_) => StmtType::AssignmentStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::While(_) => StmtType::WhileStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::FnDecl(_) => StmtType::FnDeclStmt,
        }
    }

    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
        }
    }
}

/// Expression
///
/// The closed set of expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    String(StringExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}

// Fully parenthesised, so precedence is visible when printed.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(expr) => write!(f, "{}", expr.value),
            Expr::String(expr) => write!(f, "{:?}", expr.value),
            Expr::Symbol(expr) => write!(f, "{}", expr.value),
            Expr::Binary(expr) => {
                let (spine, leftmost) = expr.left_spine();

                write!(f, "{}{}", "(".repeat(spine.len()), leftmost)?;
                for node in spine.iter().rev() {
                    write!(f, " {} {})", node.operator, node.right)?;
                }
                Ok(())
            }
            Expr::Call(expr) => {
                write!(f, "{}(", expr.callee)?;
                for (index, argument) in expr.arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}
