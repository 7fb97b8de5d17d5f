//! Tree-walking evaluation of parsed programs.
//!
//! The [`interpreter::Interpreter`] owns the function registry, the global
//! environment and the collected `print` output. Statements are executed in
//! `stmt`, expressions evaluated in `expr`, and built-in functions live in
//! `stdlib`.

pub mod environment;
pub mod expr;
pub mod interpreter;
pub mod registry;
pub mod stdlib;
pub mod stmt;
