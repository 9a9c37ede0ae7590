use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::ast;
use crate::env::Environment;
use crate::error::EvalResult;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Integer => write!(f, "INTEGER"),
            ObjectType::Boolean => write!(f, "BOOLEAN"),
            ObjectType::Null => write!(f, "NULL"),
            ObjectType::String => write!(f, "STRING"),
            ObjectType::Array => write!(f, "ARRAY"),
            ObjectType::Hash => write!(f, "HASH"),
            ObjectType::Function => write!(f, "FUNCTION"),
            ObjectType::Builtin => write!(f, "BUILTIN"),
            ObjectType::ReturnValue => write!(f, "RETURN_VALUE"),
            ObjectType::Error => write!(f, "ERROR"),
        }
    }
}

/// A runtime value.
///
/// Arrays, hashes and functions are reference counted: cloning an object
/// never deep-copies them, and no operation mutates one in place.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashObject>),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Carries a `return` out of nested blocks. Unwrapped at the call
    /// boundary and at the top of the program.
    ReturnValue(Box<Object>),
    Error(String),
    Null,
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Null => ObjectType::Null,
        }
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }

    pub fn native_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => f.write_str(value),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(Object::inspect).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(hash) => Display::fmt(hash, f),
            Object::Function(func) => Display::fmt(func, f),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::ReturnValue(value) => Display::fmt(value, f),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Null => f.write_str("null"),
        }
    }
}

/// Fingerprint of a hashable object. Equal integers, booleans and strings
/// always produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Hash contents, remembering the order in which keys were first inserted.
#[derive(Debug, Clone, Default)]
pub struct HashObject {
    pairs: HashMap<HashKey, HashPair>,
    order: Vec<HashKey>,
}

impl HashObject {
    /// Inserts a pair, replacing the value of an existing equal key while
    /// keeping its original position.
    pub fn insert(&mut self, hash_key: HashKey, pair: HashPair) {
        if self.pairs.insert(hash_key.clone(), pair).is_none() {
            self.order.push(hash_key);
        }
    }

    pub fn get(&self, hash_key: &HashKey) -> Option<&HashPair> {
        self.pairs.get(hash_key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.order.iter().filter_map(|key| self.pairs.get(key))
    }
}

impl Display for HashObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|pair| format!("{}: {}", pair.key.inspect(), pair.value.inspect()))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

pub struct Function {
    pub parameters: Rc<[ast::Identifier]>,
    pub body: Rc<ast::BlockStatement>,
    pub env: Environment,
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.value.as_str()).collect();
        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

// The captured environment usually contains this function again.
impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

pub type BuiltinFn = fn(Vec<Object>) -> EvalResult<Object>;

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Builtin { name, func }
    }
}
