//! Stack code generation.
//!
//! Lowers expressions into a post-order instruction listing for a simple
//! stack machine: operands are pushed first, then the operator or call that
//! consumes them.

pub mod compiler;

#[cfg(test)]
mod tests;
