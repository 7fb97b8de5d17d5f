//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser keeps a single token of lookahead in `current_token` and pulls
//! the next one from the lexer only when the current one is consumed.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem, sync::Arc};

use crate::{
    ast::{ast::Expr, statements::BlockStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How deeply statements and expressions may nest inside one another.
///
/// Chains of binary operators are folded in a loop and do not count, only
/// grouping, call arguments and nested statements do.
pub const MAX_PARSE_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer and the one token of lookahead, and holds the
/// lookup tables used to dispatch statements and expressions.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// The next unconsumed token
    current_token: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Number of statements and expressions currently being parsed
    depth: usize,
}

impl Parser {
    /// Creates a new Parser and reads the first token.
    ///
    /// # Arguments
    ///
    /// * `lexer` - The lexer to pull tokens from
    ///
    /// # Returns
    ///
    /// A Parser with its lookup tables registered, or the lexer's error if the
    /// very first token is malformed.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let current_token = lexer.next_token()?;

        let mut parser = Parser {
            lexer,
            current_token,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            depth: 0,
        };
        create_token_lookups(&mut parser);

        Ok(parser)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    /// Returns the binding power of the current token.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token.kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    /// Builds the error for a current token that fits no production.
    ///
    /// Running out of input is reported as such rather than as an unexpected
    /// EOF token.
    pub fn unexpected_token_error(&self) -> Error {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            Error::new(ErrorImpl::UnexpectedEndOfInput, token.span.start.clone())
        } else {
            Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) if self.current_token_kind() != TokenKind::EOF => Err(error),
                _ => Err(self.unexpected_token_error()),
            }
        } else {
            self.advance()
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Enters one level of nesting, failing at the current token once
    /// [`MAX_PARSE_DEPTH`] levels are open.
    ///
    /// Every successful call must be paired with [`Parser::ascend`].
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_PARSE_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Returns true while the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup
            .insert(kind, BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.binding_power_lookup
            .insert(kind, BindingPower::Default);
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token.span.start.clone()
    }

    pub fn get_file(&self) -> Arc<String> {
        self.lexer.get_file()
    }
}

/// Parses a whole program into its root block.
///
/// This is the main entry point for parsing. It creates a parser over a
/// fresh lexer and parses statements until EOF. Parsing stops at the first
/// error; there is no recovery.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Optional name of the source, used in positions
pub fn parse(source: String, file: Option<String>) -> Result<BlockStmt, Error> {
    let mut parser = Parser::new(Lexer::new(source, file))?;
    let start = Position(0, parser.get_file());

    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    Ok(BlockStmt {
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// Parses a single expression that must span the whole input.
///
/// Used for evaluating bare expressions like `3 + 4 * 2`, which are not
/// statements on their own because they lack the terminating `;`.
pub fn parse_expression_source(source: String, file: Option<String>) -> Result<Expr, Error> {
    let mut parser = Parser::new(Lexer::new(source, file))?;
    let expr = parse_expr(&mut parser, BindingPower::Default)?;

    if parser.has_tokens() {
        return Err(parser.unexpected_token_error());
    }

    Ok(expr)
}
