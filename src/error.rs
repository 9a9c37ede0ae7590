use thiserror::Error;

use crate::ast::{InfixOperator, PrefixOperator};
use crate::object::ObjectType;

/// Runtime failure raised while evaluating a program.
///
/// The evaluator propagates these with `?`; at the public boundary they
/// become [`Object::Error`](crate::object::Object::Error) values carrying
/// the rendered message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined identifier: {0}")]
    UndefinedIdentifier(String),
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },
    #[error("unknown operation: {operator}{right}")]
    UnknownPrefixOperation {
        operator: PrefixOperator,
        right: ObjectType,
    },
    #[error("unknown operation: {left} {operator} {right}")]
    UnknownInfixOperation {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid as hash key: {0}")]
    InvalidHashKey(ObjectType),
    #[error("invalid index operator: {0}")]
    InvalidIndex(ObjectType),
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("wrong number of arguments: want={want}, got={got}")]
    ArityMismatch { want: usize, got: usize },
    #[error("wrong number of arguments. got={got}, want={want}")]
    BuiltinArity { got: usize, want: usize },
    #[error("argument to `{name}` not supported, got {got}")]
    UnsupportedArgument { name: &'static str, got: ObjectType },
    #[error("argument to `{name}` must be {want}, got {got}")]
    WrongArgumentType {
        name: &'static str,
        want: ObjectType,
        got: ObjectType,
    },
}

pub type EvalResult<T> = Result<T, EvalError>;
