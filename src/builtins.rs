use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::error::{EvalError, EvalResult};
use crate::object::{Builtin, Object, ObjectType, NULL};

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let mut m = HashMap::new();
        for builtin in [
            Builtin::new("len", len),
            Builtin::new("head", head),
            Builtin::new("last", last),
            Builtin::new("tail", tail),
            Builtin::new("append", append),
        ] {
            m.insert(builtin.name, builtin);
        }
        m
    };
}

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

fn check_arity(args: &[Object], want: usize) -> EvalResult<()> {
    if args.len() != want {
        return Err(EvalError::BuiltinArity { got: args.len(), want });
    }
    Ok(())
}

fn array_arg<'a>(name: &'static str, arg: &'a Object) -> EvalResult<&'a Rc<Vec<Object>>> {
    match arg {
        Object::Array(elements) => Ok(elements),
        other => Err(EvalError::WrongArgumentType {
            name,
            want: ObjectType::Array,
            got: other.object_type(),
        }),
    }
}

fn len(args: Vec<Object>) -> EvalResult<Object> {
    check_arity(&args, 1)?;
    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.chars().count() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        other => Err(EvalError::UnsupportedArgument {
            name: "len",
            got: other.object_type(),
        }),
    }
}

fn head(args: Vec<Object>) -> EvalResult<Object> {
    check_arity(&args, 1)?;
    let elements = array_arg("head", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(NULL))
}

fn last(args: Vec<Object>) -> EvalResult<Object> {
    check_arity(&args, 1)?;
    let elements = array_arg("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(NULL))
}

fn tail(args: Vec<Object>) -> EvalResult<Object> {
    check_arity(&args, 1)?;
    let elements = array_arg("tail", &args[0])?;
    match elements.split_first() {
        Some((_, rest)) => Ok(Object::Array(Rc::new(rest.to_vec()))),
        None => Ok(NULL),
    }
}

fn append(args: Vec<Object>) -> EvalResult<Object> {
    check_arity(&args, 2)?;
    let elements = array_arg("append", &args[0])?;
    let mut new_elements = Vec::with_capacity(elements.len() + 1);
    new_elements.extend(elements.iter().cloned());
    new_elements.push(args[1].clone());
    Ok(Object::Array(Rc::new(new_elements)))
}
