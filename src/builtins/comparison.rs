// ABOUTME: Comparison built-ins: < > <= >= == !=

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_number(function: &str, v: &Value, position: usize) -> Result<i64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "Number", other, position)),
    }
}

fn numeric_cmp(
    function: &str,
    args: Vec<Value>,
    op: impl Fn(i64, i64) -> bool,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(function, "2", args.len()));
    }
    let a = as_number(function, &args[0], 0)?;
    let b = as_number(function, &args[1], 1)?;
    Ok(Value::Bool(op(a, b)))
}

pub fn lt(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    numeric_cmp("<", args, |a, b| a < b)
}

pub fn gt(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    numeric_cmp(">", args, |a, b| a > b)
}

pub fn le(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    numeric_cmp("<=", args, |a, b| a <= b)
}

pub fn ge(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    numeric_cmp(">=", args, |a, b| a >= b)
}

/// `(== a b)` — structural equality (spec.md §3), any type.
pub fn eq(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("==", "2", args.len()));
    }
    Ok(Value::Bool(args[0] == args[1]))
}

pub fn neq(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("!=", "2", args.len()));
    }
    Ok(Value::Bool(args[0] != args[1]))
}

pub fn register(env: &Rc<Environment>) {
    env.put("<".to_string(), Value::Builtin(lt));
    env.put(">".to_string(), Value::Builtin(gt));
    env.put("<=".to_string(), Value::Builtin(le));
    env.put(">=".to_string(), Value::Builtin(ge));
    env.put("==".to_string(), Value::Builtin(eq));
    env.put("!=".to_string(), Value::Builtin(neq));
}
