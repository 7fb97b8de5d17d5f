use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_led_expr, parse_symbol_tail},
        lookups::BindingPower,
    },
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.descend()?;
    let stmt = parse_nested_stmt(parser);
    parser.ascend();

    stmt
}

fn parse_nested_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if kind == TokenKind::Identifier {
        return parse_identifier_stmt(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    finish_expression_stmt(parser, expr)
}

fn finish_expression_stmt(parser: &mut Parser, expr: Expr) -> Result<Stmt, Error> {
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expr.get_span().start.clone(),
            end: semicolon.span.end,
        },
        expression: expr,
    }))
}

/// A statement starting with an identifier.
///
/// The identifier is consumed first and the token after it decides: `=`
/// makes an assignment, otherwise the identifier (or the call it starts) is
/// the leftmost operand of an expression statement.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance()?;
        let value = parse_expr(parser, BindingPower::Default)?;
        let semicolon = parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assignment(AssignmentStmt {
            identifier: identifier.value,
            value,
            span: Span {
                start: identifier.span.start,
                end: semicolon.span.end,
            },
        }));
    }

    let left = parse_symbol_tail(parser, identifier)?;
    let expr = parse_led_expr(parser, left, BindingPower::Default)?;
    finish_expression_stmt(parser, expr)
}

/// `'(' expression ')'`, shared by `if` and `while`.
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let condition = parse_condition(parser)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    let end = match &else_body {
        Some(else_body) => else_body.get_span().end.clone(),
        None => then_body.get_span().end.clone(),
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body: Box::new(then_body),
        else_body,
        span: Span { start, end },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;
    let end = body.get_span().end.clone();

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
        span: Span { start, end },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let value = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: semicolon.span.end,
        },
    }))
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body: statements,
        span: Span {
            start,
            end: close.span.end,
        },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let name_error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a function name"),
        },
        parser.get_position(),
    );
    let identifier = parser
        .expect_error(TokenKind::Identifier, Some(name_error))?
        .value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters: Vec<String> = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect(TokenKind::Identifier)?;

            if parameters.contains(&name.value) {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: name.value,
                        message: String::from("duplicate parameter name"),
                    },
                    name.span.start,
                ));
            }
            parameters.push(name.value);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance()?;
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::FnDecl(FnDeclStmt {
        identifier,
        parameters,
        body,
        span: Span { start, end },
    }))
}
