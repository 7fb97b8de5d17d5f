use crate::errors::errors::ErrorKind;

use super::compiler::{compile_expression_source, format_listing, Instruction};

fn listing(source: &str) -> String {
    format_listing(&compile_expression_source(source.to_string(), None).unwrap())
}

#[test]
fn test_operands_before_operator() {
    assert_eq!(listing("3 + 4 * 2"), "PUSH 3\nPUSH 4\nPUSH 2\nMUL\nADD");
    assert_eq!(listing("(3 + 4) * 2"), "PUSH 3\nPUSH 4\nADD\nPUSH 2\nMUL");
}

#[test]
fn test_left_associative_listing() {
    assert_eq!(listing("a - b - c"), "LOAD a\nLOAD b\nSUB\nLOAD c\nSUB");
    assert_eq!(listing("x / 2"), "LOAD x\nPUSH 2\nDIV");
}

#[test]
fn test_calls() {
    assert_eq!(
        listing("f(1, g(x) * 3)"),
        "PUSH 1\nLOAD x\nCALL g 1\nPUSH 3\nMUL\nCALL f 2"
    );
    assert_eq!(listing("now()"), "CALL now 0");
}

#[test]
fn test_string_constant() {
    let code = compile_expression_source("print(\"hi\")".to_string(), None).unwrap();

    assert_eq!(
        code,
        vec![
            Instruction::PushStr("hi".to_string()),
            Instruction::Call {
                name: "print".to_string(),
                argc: 1
            }
        ]
    );
    assert_eq!(format_listing(&code), "PUSHS \"hi\"\nCALL print 1");
}

#[test]
fn test_parse_errors_propagate() {
    let err = compile_expression_source("3 +".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_kind(), ErrorKind::Parse);
}

#[test]
fn test_long_chain_listing() {
    let source = vec!["1"; 10_000].join(" + ");
    let code = compile_expression_source(source, None).unwrap();

    assert_eq!(code.len(), 19_999);
    assert_eq!(
        &code[..4],
        &[
            Instruction::Push(1),
            Instruction::Push(1),
            Instruction::Add,
            Instruction::Push(1)
        ]
    );
    assert_eq!(code.last(), Some(&Instruction::Add));
}
