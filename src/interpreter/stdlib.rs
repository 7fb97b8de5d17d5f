//! Built-in functions.
//!
//! Built-ins are consulted only when no user function of the same name is
//! registered, so a program may shadow any of them.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{ast::Expr, expressions::CallExpr},
    errors::errors::Error,
};

use super::{environment::Environment, expr::eval_expr, interpreter::Interpreter};

pub type BuiltinHandler = fn(&mut Interpreter, &CallExpr, &Environment<'_>) -> Result<i64, Error>;

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinHandler> = {
        let mut builtins: HashMap<&'static str, BuiltinHandler> = HashMap::new();
        builtins.insert("print", builtin_print);
        builtins
    };
}

pub fn get_builtin(name: &str) -> Option<BuiltinHandler> {
    BUILTINS.get(name).copied()
}

/// `print(args...)`: writes its arguments as one space separated line.
///
/// String literal arguments print their text, every other argument must be
/// an integer. Always yields 0.
fn builtin_print(
    interpreter: &mut Interpreter,
    call: &CallExpr,
    env: &Environment<'_>,
) -> Result<i64, Error> {
    let mut parts = Vec::with_capacity(call.arguments.len());

    for argument in call.arguments.iter() {
        match argument {
            Expr::String(string) => parts.push(string.value.clone()),
            _ => parts.push(eval_expr(interpreter, argument, env)?.to_string()),
        }
    }

    interpreter.emit(parts.join(" "));
    Ok(0)
}
