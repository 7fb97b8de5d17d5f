use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, CallExpr, NumberExpr, StringExpr, SymbolExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.descend()?;
    let expr = parse_nested_expr(parser, bp);
    parser.ascend();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected_token_error()),
    };

    let left = nud(parser)?;

    parse_led_expr(parser, left, bp)
}

/// Continues an expression whose leftmost operand has already been parsed.
///
/// While the current token binds tighter than `bp`, its LED handler folds it
/// into `left`. Handlers parse their right operand at their own binding
/// power, which makes every operator left-associative.
pub fn parse_led_expr(parser: &mut Parser, mut left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => return Err(parser.unexpected_token_error()),
        };

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance()?;

            match token.value.parse::<i64>() {
                Ok(value) => Ok(Expr::Number(NumberExpr {
                    value,
                    span: token.span,
                })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::String => {
            let token = parser.advance()?;

            Ok(Expr::String(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        _ => Err(parser.unexpected_token_error()),
    }
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    parse_symbol_tail(parser, identifier)
}

/// Finishes an identifier that has already been consumed: a following `(`
/// makes it a call, anything else leaves it a variable reference.
pub fn parse_symbol_tail(parser: &mut Parser, identifier: Token) -> Result<Expr, Error> {
    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_call_expr(parser, identifier);
    }

    Ok(Expr::Symbol(SymbolExpr {
        value: identifier.value,
        span: identifier.span,
    }))
}

pub fn parse_call_expr(parser: &mut Parser, callee: Token) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance()?;
            } else {
                break;
            }
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start,
            end: close.span.end,
        },
        callee: callee.value,
        arguments: args,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance()?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let operator = match BinaryOperator::from_token_kind(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}
