use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, CallExpr},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    environment::Environment,
    interpreter::Interpreter,
    stdlib::get_builtin,
    stmt::{exec_block, ExecOutcome},
};

pub fn eval_expr(
    interpreter: &mut Interpreter,
    expression: &Expr,
    env: &Environment<'_>,
) -> Result<i64, Error> {
    interpreter.descend(&expression.get_span().start)?;
    let value = eval_nested_expr(interpreter, expression, env);
    interpreter.ascend();

    value
}

fn eval_nested_expr(
    interpreter: &mut Interpreter,
    expression: &Expr,
    env: &Environment<'_>,
) -> Result<i64, Error> {
    match expression {
        Expr::Number(number) => Ok(number.value),
        Expr::String(string) => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("integer"),
                received: String::from("string"),
            },
            string.span.start.clone(),
        )),
        Expr::Symbol(symbol) => env.lookup(&symbol.value, &symbol.span.start),
        Expr::Binary(binary) => eval_binary_expr(interpreter, binary, env),
        Expr::Call(call) => call_function(interpreter, call, env),
    }
}

// Both operands are always evaluated, left first. A chain such as
// `a - b - c` is walked down its left spine once and then folded from the
// innermost operator outwards.
fn eval_binary_expr(
    interpreter: &mut Interpreter,
    binary: &BinaryExpr,
    env: &Environment<'_>,
) -> Result<i64, Error> {
    let (spine, leftmost) = binary.left_spine();

    let mut value = eval_expr(interpreter, leftmost, env)?;
    for node in spine.into_iter().rev() {
        let right = eval_expr(interpreter, &node.right, env)?;
        value = apply_operator(node, value, right)?;
    }

    Ok(value)
}

fn apply_operator(binary: &BinaryExpr, left: i64, right: i64) -> Result<i64, Error> {
    match binary.operator {
        BinaryOperator::Add => Ok(left.wrapping_add(right)),
        BinaryOperator::Subtract => Ok(left.wrapping_sub(right)),
        BinaryOperator::Multiply => Ok(left.wrapping_mul(right)),
        BinaryOperator::Divide => {
            if right == 0 {
                return Err(Error::new(
                    ErrorImpl::DivisionByZero,
                    binary.right.get_span().start.clone(),
                ));
            }
            Ok(left.wrapping_div(right))
        }
    }
}

/// Calls a user function, or a built-in when no user function has the name.
///
/// Arity is checked before any argument is evaluated. Arguments are then
/// evaluated left to right in the caller's environment and bound in a fresh
/// environment whose parent is the global scope.
pub fn call_function(
    interpreter: &mut Interpreter,
    call: &CallExpr,
    env: &Environment<'_>,
) -> Result<i64, Error> {
    let function = match interpreter.registry.get(&call.callee) {
        Some(function) => function,
        None => {
            return match get_builtin(&call.callee) {
                Some(builtin) => builtin(interpreter, call, env),
                None => Err(Error::new(
                    ErrorImpl::FunctionNotDeclared {
                        function: call.callee.clone(),
                    },
                    call.span.start.clone(),
                )),
            }
        }
    };

    if function.arity() != call.arguments.len() {
        return Err(Error::new(
            ErrorImpl::ArityMismatch {
                function: call.callee.clone(),
                expected: function.arity(),
                received: call.arguments.len(),
            },
            call.span.start.clone(),
        ));
    }

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in call.arguments.iter() {
        arguments.push(eval_expr(interpreter, argument, env)?);
    }

    let limit = interpreter.config.max_call_depth;
    if interpreter.call_depth >= limit {
        return Err(Error::new(
            ErrorImpl::RecursionLimitExceeded { limit },
            call.span.start.clone(),
        ));
    }

    let mut local = Environment::with_parent(env.root(), interpreter.config.max_variables);
    for (parameter, value) in function.parameters.iter().zip(arguments) {
        local.assign(parameter, value, &call.span.start)?;
    }

    interpreter.call_depth += 1;
    let outcome = exec_block(interpreter, &function.body, &mut local);
    interpreter.call_depth -= 1;

    match outcome? {
        ExecOutcome::Returned(value) => Ok(value),
        ExecOutcome::Completed => Ok(0),
    }
}
