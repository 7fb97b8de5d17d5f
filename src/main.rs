use std::{fs, path::Path, process, time::Instant};

use clap::Parser;
use minilang::{
    compiler::compiler::{compile_expression_source, format_listing},
    config::{
        InterpreterConfig, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_NESTING_DEPTH, MAX_CALL_DEPTH,
        MAX_NESTING_DEPTH,
    },
    display_error,
    errors::errors::Error,
    interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

/// minilang runs programs written in a small imperative language of integer
/// variables, functions, `if`, `while` and `print`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat `contents` as source text instead of a file path.
    #[arg(short, long)]
    inline: bool,

    /// Print stack code for a single expression instead of running a program.
    #[arg(short, long)]
    emit_stack: bool,

    /// Print per-phase timings and the program's final value.
    #[arg(short, long)]
    verbose: bool,

    /// Maximum depth of nested function calls.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_CALL_DEPTH as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_CALL_DEPTH as u64)
    )]
    max_call_depth: u64,

    /// Maximum nesting of statements and expressions during evaluation.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_NESTING_DEPTH as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_NESTING_DEPTH as u64)
    )]
    max_nesting_depth: u64,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let (source, file_name) = if args.inline {
        (args.contents.clone(), String::from("<inline>"))
    } else {
        let source = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!(
                "Failed to read the input file '{}'. Perhaps this file does not exist?",
                &args.contents
            );
            process::exit(1);
        });

        let file_name = Path::new(&args.contents)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| args.contents.clone());

        (source, file_name)
    };

    let result = if args.emit_stack {
        emit_stack(&source, &file_name)
    } else {
        run(&args, &source, &file_name)
    };

    if let Err(error) = result {
        display_error(&error, &source, &file_name);
        process::exit(1);
    }
}

fn emit_stack(source: &str, file_name: &str) -> Result<(), Error> {
    let code = compile_expression_source(source.to_string(), Some(file_name.to_string()))?;
    println!("{}", format_listing(&code));
    Ok(())
}

fn run(args: &Args, source: &str, file_name: &str) -> Result<(), Error> {
    let start = Instant::now();

    if args.verbose {
        let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
        println!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());
    }

    let parse_start = Instant::now();
    let program = parse(source.to_string(), Some(file_name.to_string()))?;
    if args.verbose {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    let config = InterpreterConfig::default()
        .with_max_call_depth(args.max_call_depth as usize)
        .with_max_nesting_depth(args.max_nesting_depth as usize)
        .with_echo_output(true);
    let mut interpreter = Interpreter::new(config);

    let run_start = Instant::now();
    let value = interpreter.run_program(&program)?;

    if args.verbose {
        println!("Ran in {:?}", run_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
        println!("Result: {}", value);
    }

    Ok(())
}
