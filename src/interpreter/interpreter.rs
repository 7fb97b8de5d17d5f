//! The interpreter driver.
//!
//! This module holds the [`Interpreter`] state shared by statement and
//! expression evaluation, and the entry points that take source text through
//! parsing to a final value.

use std::{mem, panic, thread};

use crate::{
    ast::{ast::Stmt, statements::BlockStmt},
    config::InterpreterConfig,
    errors::errors::{Error, ErrorImpl},
    parser::parser::{parse, parse_expression_source},
    Position,
};

use super::{
    environment::Environment,
    expr::eval_expr,
    registry::FunctionRegistry,
    stmt::{exec_stmt, ExecOutcome},
};

/// Evaluation state for one program run (or several, sharing globals).
///
/// Independent interpreters share nothing, so any number of them may exist
/// side by side.
#[derive(Debug)]
pub struct Interpreter {
    /// Limits and output behaviour
    pub config: InterpreterConfig,
    /// User functions registered so far
    pub registry: FunctionRegistry,
    /// Lines produced by `print`, in order
    pub output: Vec<String>,
    /// Number of user function calls currently on the stack
    pub call_depth: usize,
    /// Number of statements and expressions currently being evaluated
    pub nesting_depth: usize,

    globals: Environment<'static>,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Interpreter {
            globals: Environment::new(config.max_variables),
            registry: FunctionRegistry::new(),
            output: Vec::new(),
            call_depth: 0,
            nesting_depth: 0,
            config,
        }
    }

    /// Parses and runs a whole program.
    ///
    /// # Arguments
    ///
    /// * `source` - The program text
    /// * `file` - Optional name of the source, used in error positions
    ///
    /// # Returns
    ///
    /// The program's final value, or the first lex, parse or runtime error.
    pub fn run_source(&mut self, source: &str, file: Option<String>) -> Result<i64, Error> {
        let program = parse(source.to_string(), file)?;
        self.run_program(&program)
    }

    /// Runs an already parsed program against this interpreter's globals.
    ///
    /// A top-level `return` stops the program and its value is the result.
    /// Otherwise the result is the value of the last top-level expression
    /// statement, or 0 if there was none.
    pub fn run_program(&mut self, program: &BlockStmt) -> Result<i64, Error> {
        let mut globals = mem::take(&mut self.globals);
        let result = self.on_evaluation_stack(|interpreter| {
            interpreter.run_statements(program, &mut globals)
        });
        self.globals = globals;

        result
    }

    fn run_statements(
        &mut self,
        program: &BlockStmt,
        globals: &mut Environment<'_>,
    ) -> Result<i64, Error> {
        let mut last_value = 0;

        for statement in program.iter() {
            if let Stmt::Expression(expression_stmt) = statement {
                last_value = eval_expr(self, &expression_stmt.expression, globals)?;
                continue;
            }

            if let ExecOutcome::Returned(value) = exec_stmt(self, statement, globals)? {
                return Ok(value);
            }
        }

        Ok(last_value)
    }

    /// Evaluates a single standalone expression such as `3 + 4 * 2`.
    ///
    /// Variables and functions defined by earlier runs are visible.
    pub fn eval_expression(&mut self, source: &str) -> Result<i64, Error> {
        let expression = parse_expression_source(source.to_string(), None)?;

        let globals = mem::take(&mut self.globals);
        let result = self
            .on_evaluation_stack(|interpreter| eval_expr(interpreter, &expression, &globals));
        self.globals = globals;

        result
    }

    /// Runs `evaluate` on a thread whose stack is sized from the configured
    /// nesting limit, with both depth counters reset.
    ///
    /// A panic on that thread is resumed on the caller's.
    fn on_evaluation_stack<T, F>(&mut self, evaluate: F) -> Result<T, Error>
    where
        T: Send,
        F: FnOnce(&mut Interpreter) -> Result<T, Error> + Send,
    {
        self.call_depth = 0;
        self.nesting_depth = 0;

        let size = self.config.stack_size();
        thread::scope(|scope| {
            let handle = thread::Builder::new()
                .name(String::from("minilang-eval"))
                .stack_size(size)
                .spawn_scoped(scope, move || evaluate(self))
                .map_err(|_| Error::new(ErrorImpl::StackUnavailable { size }, Position::null()))?;

            match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }

    /// Enters one level of evaluation nesting, failing at `position` once the
    /// configured limit is reached.
    ///
    /// Every successful call must be paired with [`Interpreter::ascend`].
    pub fn descend(&mut self, position: &Position) -> Result<(), Error> {
        let limit = self.config.nesting_limit();
        if self.nesting_depth >= limit {
            return Err(Error::new(
                ErrorImpl::RecursionLimitExceeded { limit },
                position.clone(),
            ));
        }

        self.nesting_depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.nesting_depth -= 1;
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Takes the collected output, leaving it empty.
    pub fn take_output(&mut self) -> Vec<String> {
        mem::take(&mut self.output)
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn globals(&self) -> &Environment<'static> {
        &self.globals
    }

    /// Value of a global variable, if it is bound.
    pub fn get_global(&self, name: &str) -> Option<i64> {
        self.globals.get(name)
    }

    /// Records one line of program output.
    pub fn emit(&mut self, line: String) {
        if self.config.echo_output {
            println!("{}", line);
        }
        self.output.push(line);
    }
}
