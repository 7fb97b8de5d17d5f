use std::fmt::Display;

use crate::{
    ast::{ast::Expr, expressions::BinaryOperator},
    errors::errors::Error,
    parser::parser::parse_expression_source,
};

/// One stack machine instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Push an integer constant
    Push(i64),
    /// Push a string constant
    PushStr(String),
    /// Push the value of a variable
    Load(String),
    Add,
    Sub,
    Mul,
    Div,
    /// Pop `argc` arguments, call `name`, push its result
    Call { name: String, argc: usize },
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Push(value) => write!(f, "PUSH {}", value),
            Instruction::PushStr(value) => write!(f, "PUSHS {:?}", value),
            Instruction::Load(name) => write!(f, "LOAD {}", name),
            Instruction::Add => write!(f, "ADD"),
            Instruction::Sub => write!(f, "SUB"),
            Instruction::Mul => write!(f, "MUL"),
            Instruction::Div => write!(f, "DIV"),
            Instruction::Call { name, argc } => write!(f, "CALL {} {}", name, argc),
        }
    }
}

impl From<BinaryOperator> for Instruction {
    fn from(operator: BinaryOperator) -> Self {
        match operator {
            BinaryOperator::Add => Instruction::Add,
            BinaryOperator::Subtract => Instruction::Sub,
            BinaryOperator::Multiply => Instruction::Mul,
            BinaryOperator::Divide => Instruction::Div,
        }
    }
}

/// Lowers `expression` into its post-order instruction listing.
pub fn compile_expr(expression: &Expr) -> Vec<Instruction> {
    let mut code = Vec::new();
    gen_expression(&mut code, expression);
    code
}

fn gen_expression(code: &mut Vec<Instruction>, expression: &Expr) {
    match expression {
        Expr::Number(number) => code.push(Instruction::Push(number.value)),
        Expr::String(string) => code.push(Instruction::PushStr(string.value.clone())),
        Expr::Symbol(symbol) => code.push(Instruction::Load(symbol.value.clone())),
        Expr::Binary(binary) => {
            let (spine, leftmost) = binary.left_spine();

            gen_expression(code, leftmost);
            for node in spine.into_iter().rev() {
                gen_expression(code, &node.right);
                code.push(Instruction::from(node.operator));
            }
        }
        Expr::Call(call) => {
            for argument in call.arguments.iter() {
                gen_expression(code, argument);
            }
            code.push(Instruction::Call {
                name: call.callee.clone(),
                argc: call.arguments.len(),
            });
        }
    }
}

/// Parses a standalone expression and lowers it.
pub fn compile_expression_source(
    source: String,
    file: Option<String>,
) -> Result<Vec<Instruction>, Error> {
    let expression = parse_expression_source(source, file)?;
    Ok(compile_expr(&expression))
}

/// Renders a listing one instruction per line.
pub fn format_listing(code: &[Instruction]) -> String {
    code.iter()
        .map(|instruction| instruction.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}
