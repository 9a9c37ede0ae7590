//! Monkey: a small dynamically typed language.
//!
//! Source text flows through [`Lexer`] into [`Parser`], which builds an
//! [`ast::Program`]; [`eval()`] walks the tree against an [`Environment`]
//! and produces an [`Object`].
//!
//! ```
//! use monkey::{eval_program, Environment, Lexer, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("let add = fn(a, b) { a + b }; add(2, 3)"));
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//!
//! let env = Environment::new();
//! assert_eq!(eval_program(&program, &env).inspect(), "5");
//! ```

pub mod ast;
pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use eval::{eval, eval_program, Node};
pub use lexer::Lexer;
pub use object::Object;
pub use parser::{ParseError, Parser};
pub use token::{Token, TokenSource, TokenType, Tokens};
