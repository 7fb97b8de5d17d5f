//! Unit tests for the parser module.
//!
//! Precedence is checked through the fully parenthesised `Display` of
//! expressions; statement shapes through the node types.

use crate::{
    ast::ast::{Expr, Stmt, StmtType},
    errors::errors::{ErrorImpl, ErrorKind},
};

use super::parser::{parse, parse_expression_source, MAX_PARSE_DEPTH};

fn parse_ok(source: &str) -> crate::ast::statements::BlockStmt {
    parse(source.to_string(), Some("test.ml".to_string())).unwrap()
}

fn expr(source: &str) -> String {
    parse_expression_source(source.to_string(), None)
        .unwrap()
        .to_string()
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(expr("3 + 4 * 2"), "(3 + (4 * 2))");
    assert_eq!(expr("3 * 4 + 2"), "((3 * 4) + 2)");
}

#[test]
fn test_operators_are_left_associative() {
    assert_eq!(expr("10 - 2 - 3"), "((10 - 2) - 3)");
    assert_eq!(expr("100 / 10 / 5"), "((100 / 10) / 5)");
    assert_eq!(expr("1 + 2 - 3 + 4"), "(((1 + 2) - 3) + 4)");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(expr("(3 + 4) * 2"), "((3 + 4) * 2)");
    assert_eq!(expr("((7))"), "7");
}

#[test]
fn test_call_expressions() {
    assert_eq!(expr("f()"), "f()");
    assert_eq!(expr("f(1, g(2) * 3)"), "f(1, (g(2) * 3))");
    assert_eq!(expr("a + f(b)"), "(a + f(b))");
}

#[test]
fn test_string_argument() {
    let parsed = parse_expression_source("print(\"hi\", 1)".to_string(), None).unwrap();

    match parsed {
        Expr::Call(call) => {
            assert_eq!(call.callee, "print");
            assert_eq!(call.arguments.len(), 2);
            assert!(matches!(&call.arguments[0], Expr::String(s) if s.value == "hi"));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_statement_types() {
    let program = parse_ok(
        "x = 1;\n\
         x + 1;\n\
         { y = 2; }\n\
         if (x) y = 3;\n\
         while (x) x = x - 1;\n\
         function f(a, b) { return a + b; }\n\
         f(1, 2);",
    );

    let types: Vec<StmtType> = program.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        types,
        vec![
            StmtType::AssignmentStmt,
            StmtType::ExpressionStmt,
            StmtType::BlockStmt,
            StmtType::IfStmt,
            StmtType::WhileStmt,
            StmtType::FnDeclStmt,
            StmtType::ExpressionStmt,
        ]
    );
}

#[test]
fn test_empty_program() {
    let program = parse_ok("   // nothing here\n");
    assert!(program.is_empty());
}

#[test]
fn test_function_declaration() {
    let program = parse_ok("function add(a, b) { c = a + b; return c; }");

    match &program.body[0] {
        Stmt::FnDecl(decl) => {
            assert_eq!(decl.identifier, "add");
            assert_eq!(decl.parameters, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(decl.body.len(), 2);
            assert_eq!(decl.body.body[1].get_stmt_type(), StmtType::ReturnStmt);
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_function_without_parameters() {
    let program = parse_ok("function zero() { return 0; }");

    match &program.body[0] {
        Stmt::FnDecl(decl) => assert!(decl.parameters.is_empty()),
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse_ok("if (a) if (b) x = 1; else x = 2;");

    match &program.body[0] {
        Stmt::If(outer) => {
            assert!(outer.else_body.is_none());
            match outer.then_body.as_ref() {
                Stmt::If(inner) => assert!(inner.else_body.is_some()),
                other => panic!("expected inner if, got {:?}", other),
            }
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_identifier_led_expression_statement() {
    let program = parse_ok("x * 2 + f(x);");

    match &program.body[0] {
        Stmt::Expression(stmt) => assert_eq!(stmt.expression.to_string(), "((x * 2) + f(x))"),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_spans_cover_statement() {
    let program = parse_ok("x = 1;\ny = x + 22;");

    let span = program.body[1].get_span();
    assert_eq!(span.start.0, 7);
    assert_eq!(span.end.0, 18);
    assert_eq!(span.start.1.as_str(), "test.ml");
}

#[test]
fn test_missing_close_paren() {
    let err = parse("f(1, 2;".to_string(), None).unwrap_err();

    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ";".to_string()
        }
    );
    assert_eq!(err.get_position().0, 6);
}

#[test]
fn test_unclosed_block_reports_end_of_input() {
    let err = parse("while (1) { x = 1;".to_string(), None).unwrap_err();

    assert_eq!(err.get_error_impl(), &ErrorImpl::UnexpectedEndOfInput);
    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
}

#[test]
fn test_missing_semicolon_at_end() {
    let err = parse("x = 1".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_impl(), &ErrorImpl::UnexpectedEndOfInput);
}

#[test]
fn test_assignment_without_value() {
    let err = parse("x = ;".to_string(), None).unwrap_err();
    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ";".to_string()
        }
    );
}

#[test]
fn test_bare_return_is_rejected() {
    let err = parse("function f() { return; }".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
}

#[test]
fn test_duplicate_parameter() {
    let err = parse("function f(a, a) { return a; }".to_string(), None).unwrap_err();

    assert_eq!(err.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(err.get_position().0, 14);
}

#[test]
fn test_function_name_required() {
    let err = parse("function 1() { return 1; }".to_string(), None).unwrap_err();

    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "1".to_string(),
            message: "expected a function name".to_string()
        }
    );
    assert_eq!(err.get_position().0, 9);
}

#[test]
fn test_number_out_of_range() {
    let err = parse("x = 99999999999999999999;".to_string(), None).unwrap_err();

    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string()
        }
    );
    assert_eq!(err.get_position().0, 4);
}

#[test]
fn test_unary_minus_is_not_supported() {
    let err = parse("-1;".to_string(), None).unwrap_err();
    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "-".to_string()
        }
    );
}

#[test]
fn test_stray_else() {
    let err = parse("else x = 1;".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
}

#[test]
fn test_condition_requires_parentheses() {
    let err = parse("if x { y = 1; }".to_string(), None).unwrap_err();
    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "x".to_string()
        }
    );
}

#[test]
fn test_lex_errors_surface_through_parser() {
    let err = parse("x = 1 @ 2;".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_kind(), ErrorKind::Lex);
}

#[test]
fn test_expression_source_must_be_fully_consumed() {
    let err = parse_expression_source("1 + 2 )".to_string(), None).unwrap_err();
    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ")".to_string()
        }
    );
}

#[test]
fn test_long_chain_parses_flat() {
    let source = vec!["1"; 10_000].join(" + ");
    let rendered = expr(&source);

    assert_eq!(rendered.matches('(').count(), 9_999);
    assert!(rendered.starts_with(&format!("{}1 + 1) + 1)", "(".repeat(9_999))));
    assert!(rendered.ends_with(" + 1)"));
}

#[test]
fn test_very_long_chain_is_dropped() {
    let source = vec!["x"; 200_000].join(" * ");
    let program = parse_ok(&format!("y = {};", source));

    assert_eq!(program.body.len(), 1);
    drop(program);
}

#[test]
fn test_deeply_nested_parentheses() {
    let source = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
    let err = parse_expression_source(source, None).unwrap_err();

    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_PARSE_DEPTH
        }
    );
    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
    assert_eq!(err.get_position().0, MAX_PARSE_DEPTH);
}

#[test]
fn test_nested_parentheses_within_limit() {
    let source = format!("{}1 + 2{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(expr(&source), "(1 + 2)");
}

#[test]
fn test_deeply_nested_statements() {
    let source = format!("{}x = 1;{}", "{".repeat(5_000), "}".repeat(5_000));
    let err = parse(source, None).unwrap_err();

    assert_eq!(
        err.get_error_impl(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_PARSE_DEPTH
        }
    );
}
