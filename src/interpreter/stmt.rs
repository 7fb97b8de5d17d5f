use crate::{
    ast::{ast::Stmt, statements::BlockStmt},
    errors::errors::Error,
};

use super::{
    environment::Environment, expr::eval_expr, interpreter::Interpreter, registry::FunctionDef,
};

/// How a statement finished.
///
/// `Returned` carries a `return` value outwards through enclosing blocks,
/// branches and loops until the function call (or the program) consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Completed,
    Returned(i64),
}

pub fn exec_stmt(
    interpreter: &mut Interpreter,
    statement: &Stmt,
    env: &mut Environment<'_>,
) -> Result<ExecOutcome, Error> {
    interpreter.descend(&statement.get_span().start)?;
    let outcome = exec_nested_stmt(interpreter, statement, env);
    interpreter.ascend();

    outcome
}

fn exec_nested_stmt(
    interpreter: &mut Interpreter,
    statement: &Stmt,
    env: &mut Environment<'_>,
) -> Result<ExecOutcome, Error> {
    match statement {
        Stmt::Expression(expression_stmt) => {
            eval_expr(interpreter, &expression_stmt.expression, env)?;
            Ok(ExecOutcome::Completed)
        }
        Stmt::Assignment(assignment) => {
            let value = eval_expr(interpreter, &assignment.value, env)?;
            env.assign(&assignment.identifier, value, &assignment.span.start)?;
            Ok(ExecOutcome::Completed)
        }
        Stmt::Block(block) => exec_block(interpreter, block, env),
        Stmt::If(if_stmt) => {
            if eval_expr(interpreter, &if_stmt.condition, env)? != 0 {
                exec_stmt(interpreter, &if_stmt.then_body, env)
            } else if let Some(else_body) = &if_stmt.else_body {
                exec_stmt(interpreter, else_body, env)
            } else {
                Ok(ExecOutcome::Completed)
            }
        }
        Stmt::While(while_stmt) => {
            while eval_expr(interpreter, &while_stmt.condition, env)? != 0 {
                if let ExecOutcome::Returned(value) =
                    exec_stmt(interpreter, &while_stmt.body, env)?
                {
                    return Ok(ExecOutcome::Returned(value));
                }
            }
            Ok(ExecOutcome::Completed)
        }
        Stmt::Return(return_stmt) => {
            let value = eval_expr(interpreter, &return_stmt.value, env)?;
            Ok(ExecOutcome::Returned(value))
        }
        Stmt::FnDecl(fn_decl) => {
            interpreter.registry.define(FunctionDef::from(fn_decl));
            Ok(ExecOutcome::Completed)
        }
    }
}

/// Runs the statements of a block in the current scope.
///
/// Blocks do not open a scope of their own. The first `Returned` stops the
/// block.
pub fn exec_block(
    interpreter: &mut Interpreter,
    block: &BlockStmt,
    env: &mut Environment<'_>,
) -> Result<ExecOutcome, Error> {
    for statement in block.iter() {
        if let ExecOutcome::Returned(value) = exec_stmt(interpreter, statement, env)? {
            return Ok(ExecOutcome::Returned(value));
        }
    }

    Ok(ExecOutcome::Completed)
}
