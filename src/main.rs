use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use monkey::{eval_program, Environment, Lexer, Object, Parser};

/// Run Monkey programs, or start an interactive session.
#[derive(clap::Parser, Debug)]
#[command(name = "monkey", version, about)]
struct Args {
    /// Source file to run. Starts the REPL when omitted.
    file: Option<PathBuf>,

    /// Evaluate CODE instead of reading a file.
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    eval: Option<String>,

    /// Print the parsed program instead of evaluating it.
    #[arg(long)]
    ast: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONKEY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let source = match (&args.eval, &args.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                println!("This is the Monkey programming language!");
                println!("Feel free to type in commands");
            }
            monkey::repl::start(stdin.lock(), &mut io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    run(&source, args.ast)
}

fn run(source: &str, print_ast: bool) -> Result<ExitCode> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        for error in parser.errors() {
            eprintln!("\t{}", error);
        }
        return Ok(ExitCode::FAILURE);
    }

    if print_ast {
        println!("{}", program);
        return Ok(ExitCode::SUCCESS);
    }

    let env = Environment::new();
    match eval_program(&program, &env) {
        Object::Error(message) => {
            eprintln!("ERROR: {}", message);
            Ok(ExitCode::FAILURE)
        }
        Object::Null => Ok(ExitCode::SUCCESS),
        result => {
            println!("{}", result.inspect());
            Ok(ExitCode::SUCCESS)
        }
    }
}
