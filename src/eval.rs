use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{
    self, BlockStatement, Expression, HashLiteral, IfExpression, InfixOperator, PrefixOperator,
    Program, Statement,
};
use crate::builtins;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::object::{Function, HashObject, HashPair, Object, ObjectType, NULL};

/// Anything the evaluator can be pointed at.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Why evaluation of a node stopped early.
///
/// `return` travels on the error side so `?` carries it through every
/// enclosing expression until a call or the program consumes it.
#[derive(Debug)]
enum Unwind {
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

type Flow<T> = Result<T, Unwind>;

/// Evaluates `node` in `env`.
///
/// Runtime failures come back as [`Object::Error`]; bindings made before
/// the failure stay in `env`. A `return` reached while evaluating a lone
/// statement or expression comes back wrapped in [`Object::ReturnValue`];
/// a program unwraps it.
pub fn eval<'a>(node: impl Into<Node<'a>>, env: &Environment) -> Object {
    match node.into() {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(statement) => into_object(eval_statement(statement, env)),
        Node::Expression(expression) => into_object(eval_expression(expression, env)),
    }
}

pub fn eval_program(program: &Program, env: &Environment) -> Object {
    match eval_statements(&program.statements, env) {
        Err(Unwind::Return(value)) => value,
        result => into_object(result),
    }
}

fn into_object(result: Flow<Object>) -> Object {
    match result {
        Ok(obj) => obj,
        Err(Unwind::Return(value)) => Object::ReturnValue(Box::new(value)),
        Err(Unwind::Error(err)) => {
            trace!(error = %err, "runtime error");
            Object::Error(err.to_string())
        }
    }
}

fn eval_statements(statements: &[Statement], env: &Environment) -> Flow<Object> {
    let mut result = NULL;
    for statement in statements {
        result = eval_statement(statement, env)?;
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Flow<Object> {
    match statement {
        Statement::Expression(stmt) => eval_expression(&stmt.expression, env),
        Statement::Block(block) => eval_block_statement(block, env),
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.return_value, env)?;
            Err(Unwind::Return(value))
        }
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            env.insert(stmt.name.value.as_str(), value);
            Ok(NULL)
        }
    }
}

fn eval_block_statement(block: &BlockStatement, env: &Environment) -> Flow<Object> {
    eval_statements(&block.statements, env)
}

fn eval_expressions(exprs: &[Expression], env: &Environment) -> Flow<Vec<Object>> {
    exprs.iter().map(|expr| eval_expression(expr, env)).collect()
}

fn eval_expression(expr: &Expression, env: &Environment) -> Flow<Object> {
    match expr {
        Expression::IntegerLiteral(value) => Ok(Object::Integer(*value)),
        Expression::Boolean(value) => Ok(Object::native_bool(*value)),
        Expression::StringLiteral(value) => Ok(Object::String(value.clone())),
        Expression::Identifier(ident) => Ok(eval_identifier(ident, env)?),
        Expression::ArrayLiteral(array) => {
            let elements = eval_expressions(&array.elements, env)?;
            Ok(Object::Array(Rc::new(elements)))
        }
        Expression::HashLiteral(hash) => eval_hash_literal(hash, env),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env)?;
            Ok(eval_prefix_expression(prefix.operator, right)?)
        }
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env)?;
            let right = eval_expression(&infix.right, env)?;
            Ok(eval_infix_expression(infix.operator, left, right)?)
        }
        Expression::If(if_expr) => eval_if_expression(if_expr, env),
        Expression::FunctionLiteral(func) => Ok(Object::Function(Rc::new(Function {
            parameters: Rc::clone(&func.parameters),
            body: Rc::clone(&func.body),
            env: env.clone(),
        }))),
        Expression::Call(call) => {
            let func = eval_expression(&call.function, env)?;
            let args = eval_expressions(&call.arguments, env)?;
            Ok(apply_function(func, args)?)
        }
        Expression::Index(index_expr) => {
            let left = eval_expression(&index_expr.left, env)?;
            let index = eval_expression(&index_expr.index, env)?;
            Ok(eval_index_expression(left, index)?)
        }
    }
}

fn eval_identifier(ident: &ast::Identifier, env: &Environment) -> EvalResult<Object> {
    if let Some(val) = env.get(&ident.value) {
        return Ok(val);
    }
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return Ok(Object::Builtin(builtin));
    }
    Err(EvalError::UndefinedIdentifier(ident.value.clone()))
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> EvalResult<Object> {
    match operator {
        PrefixOperator::Bang => Ok(Object::native_bool(!right.is_truthy())),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
            other => Err(EvalError::UnknownPrefixOperation {
                operator,
                right: other.object_type(),
            }),
        },
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> EvalResult<Object> {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operator, l, r),
        _ if left.object_type() != right.object_type() => Err(EvalError::TypeMismatch {
            left: left.object_type(),
            operator,
            right: right.object_type(),
        }),
        _ => match operator {
            InfixOperator::Eq => Ok(Object::native_bool(same_object(&left, &right))),
            InfixOperator::NotEq => Ok(Object::native_bool(!same_object(&left, &right))),
            _ => Err(unknown_infix(operator, &left, &right)),
        },
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> EvalResult<Object> {
    let result = match operator {
        InfixOperator::Plus => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Minus => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOperator::Lt => Object::native_bool(left < right),
        InfixOperator::Gt => Object::native_bool(left > right),
        InfixOperator::Eq => Object::native_bool(left == right),
        InfixOperator::NotEq => Object::native_bool(left != right),
    };
    Ok(result)
}

fn eval_string_infix_expression(operator: InfixOperator, left: &str, right: &str) -> EvalResult<Object> {
    match operator {
        InfixOperator::Plus => {
            let mut joined = String::with_capacity(left.len() + right.len());
            joined.push_str(left);
            joined.push_str(right);
            Ok(Object::String(joined))
        }
        InfixOperator::Eq => Ok(Object::native_bool(left == right)),
        InfixOperator::NotEq => Ok(Object::native_bool(left != right)),
        _ => Err(EvalError::UnknownInfixOperation {
            left: ObjectType::String,
            operator,
            right: ObjectType::String,
        }),
    }
}

fn unknown_infix(operator: InfixOperator, left: &Object, right: &Object) -> EvalError {
    EvalError::UnknownInfixOperation {
        left: left.object_type(),
        operator,
        right: right.object_type(),
    }
}

/// Identity comparison for operands of the same non-numeric, non-string type.
fn same_object(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Array(l), Object::Array(r)) => Rc::ptr_eq(l, r),
        (Object::Hash(l), Object::Hash(r)) => Rc::ptr_eq(l, r),
        (Object::Function(l), Object::Function(r)) => Rc::ptr_eq(l, r),
        (Object::Builtin(l), Object::Builtin(r)) => l.name == r.name,
        _ => false,
    }
}

fn eval_if_expression(if_expr: &IfExpression, env: &Environment) -> Flow<Object> {
    let condition = eval_expression(&if_expr.condition, env)?;
    if condition.is_truthy() {
        eval_block_statement(&if_expr.consequence, env)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Ok(NULL)
    }
}

fn apply_function(func: Object, args: Vec<Object>) -> EvalResult<Object> {
    match func {
        Object::Function(func) => {
            if func.parameters.len() != args.len() {
                return Err(EvalError::ArityMismatch {
                    want: func.parameters.len(),
                    got: args.len(),
                });
            }
            debug!(params = func.parameters.len(), "applying function");
            let extended_env = extend_function_env(&func, args);
            match eval_block_statement(&func.body, &extended_env) {
                Ok(value) | Err(Unwind::Return(value)) => Ok(value),
                Err(Unwind::Error(err)) => Err(err),
            }
        }
        Object::Builtin(builtin) => {
            debug!(name = builtin.name, args = args.len(), "calling builtin");
            (builtin.func)(args)
        }
        other => Err(EvalError::NotAFunction(other.object_type())),
    }
}

fn extend_function_env(func: &Function, args: Vec<Object>) -> Environment {
    let env = Environment::new_enclosed(&func.env);
    for (param, arg) in func.parameters.iter().zip(args) {
        env.insert(param.value.as_str(), arg);
    }
    env
}

fn eval_index_expression(left: Object, index: Object) -> EvalResult<Object> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(idx)) => Ok(eval_array_index_expression(elements, *idx)),
        (Object::Hash(hash), _) => eval_hash_index_expression(hash, &index),
        _ => Err(EvalError::InvalidIndex(left.object_type())),
    }
}

fn eval_array_index_expression(elements: &[Object], idx: i64) -> Object {
    usize::try_from(idx)
        .ok()
        .and_then(|i| elements.get(i))
        .cloned()
        .unwrap_or(NULL)
}

fn eval_hash_index_expression(hash: &HashObject, index: &Object) -> EvalResult<Object> {
    let key = index
        .hash_key()
        .ok_or_else(|| EvalError::InvalidHashKey(index.object_type()))?;
    Ok(hash.get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL))
}

fn eval_hash_literal(hash: &HashLiteral, env: &Environment) -> Flow<Object> {
    let mut pairs = HashObject::default();
    for (key_node, value_node) in &hash.pairs {
        let key = eval_expression(key_node, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| EvalError::InvalidHashKey(key.object_type()))?;
        let value = eval_expression(value_node, env)?;
        pairs.insert(hash_key, HashPair { key, value });
    }
    Ok(Object::Hash(Rc::new(pairs)))
}
