//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout lexing, parsing
//! and evaluation. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each failure, grouped by stage
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
