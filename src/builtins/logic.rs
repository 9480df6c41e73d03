// ABOUTME: Boolean built-ins: && || ! true false

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_bool(function: &str, v: &Value, position: usize) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(EvalError::type_error(function, "Bool", other, position)),
    }
}

pub fn and(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("&&", "2", args.len()));
    }
    let a = as_bool("&&", &args[0], 0)?;
    let b = as_bool("&&", &args[1], 1)?;
    Ok(Value::Bool(a && b))
}

pub fn or(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("||", "2", args.len()));
    }
    let a = as_bool("||", &args[0], 0)?;
    let b = as_bool("||", &args[1], 1)?;
    Ok(Value::Bool(a || b))
}

pub fn not(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("!", "1", args.len()));
    }
    Ok(Value::Bool(!as_bool("!", &args[0], 0)?))
}

/// Nullary constructor: the reader has no literal syntax for booleans
/// (spec.md §4.7), so `true`/`false` are the only way to produce one.
pub fn tru(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("true", "0", args.len()));
    }
    Ok(Value::Bool(true))
}

pub fn fals(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("false", "0", args.len()));
    }
    Ok(Value::Bool(false))
}

pub fn register(env: &Rc<Environment>) {
    env.put("&&".to_string(), Value::Builtin(and));
    env.put("||".to_string(), Value::Builtin(or));
    env.put("!".to_string(), Value::Builtin(not));
    env.put("true".to_string(), Value::Builtin(tru));
    env.put("false".to_string(), Value::Builtin(fals));
}
