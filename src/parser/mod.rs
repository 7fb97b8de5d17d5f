//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It pulls tokens lazily from the lexer,
//! holding exactly one token of lookahead, and handles:
//!
//! - Statement parsing (assignments, functions, control flow, blocks)
//! - Expression parsing (binary ops, function calls, literals, grouping)
//! - Error reporting with the offending token's source offset
//!
//! Expressions are parsed with NUD (null denotation) and LED (left
//! denotation) handlers, using binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
