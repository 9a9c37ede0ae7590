use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::ast::Statement;
use crate::env::Environment;
use crate::eval::eval_program;
use crate::lexer::Lexer;
use crate::parser::Parser;

const PROMPT: &str = ">> ";

/// Runs an interactive session until `input` is exhausted or the user
/// types `exit`/`quit`. Bindings persist across lines.
pub fn start<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<()> {
    let env = Environment::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let trimmed_line = line.trim();
        if trimmed_line == "exit" || trimmed_line == "quit" {
            writeln!(output, "Exiting...")?;
            return Ok(());
        }
        if trimmed_line.is_empty() {
            continue;
        }

        let mut p = Parser::new(Lexer::new(&line));
        let program = p.parse_program();
        if !p.errors().is_empty() {
            debug!(count = p.errors().len(), "discarding line with parse errors");
            print_parse_errors(output, &p.errors())?;
            continue;
        }

        let evaluated = eval_program(&program, &env);
        // A trailing `let` only binds; echoing its null would be noise.
        if evaluated.is_error() || !matches!(program.statements.last(), Some(Statement::Let(_))) {
            writeln!(output, "{}", evaluated.inspect())?;
        }
    }
}

fn print_parse_errors<W: Write>(output: &mut W, errors: &[String]) -> io::Result<()> {
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }
    Ok(())
}
