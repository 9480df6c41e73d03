// ABOUTME: Arithmetic built-ins: + - * / % pow min max

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

fn numbers(function: &str, args: &[Value]) -> Result<Vec<i64>, EvalError> {
    args.iter()
        .enumerate()
        .map(|(i, v)| as_number(function, v, i))
        .collect()
}

/// `(+ a b c …)` — sum of all arguments; `(+)` is 0.
pub fn add(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers("+", &args)?.into_iter().sum()))
}

/// `(- a)` negates; `(- a b c …)` subtracts the rest from the first.
pub fn sub(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("-", &args)?;
    match nums.split_first() {
        None => Err(EvalError::arity_error("-", "at least 1", 0)),
        Some((first, [])) => Ok(Value::Number(-first)),
        Some((first, rest)) => Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc - n))),
    }
}

/// `(* a b c …)` — product of all arguments; `(*)` is 1.
pub fn mul(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers("*", &args)?.into_iter().product()))
}

/// `(/ a)` is the integer reciprocal (only meaningful for 1 and -1, but the
/// arithmetic is not special-cased); `(/ a b c …)` divides left to right.
/// Division truncates toward zero (Rust's native `/` on signed integers).
pub fn div(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("/", &args)?;
    match nums.split_first() {
        None => Err(EvalError::arity_error("/", "at least 1", 0)),
        Some((first, rest)) => {
            let mut acc = *first;
            for n in rest {
                if *n == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc /= n;
            }
            Ok(Value::Number(acc))
        }
    }
}

/// `(% a b c …)` — remainder, folded left to right like `/`; sign follows
/// the dividend at each step (Rust's native `%`).
pub fn rem(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("%", &args)?;
    match nums.split_first() {
        None => Err(EvalError::arity_error("%", "at least 1", 0)),
        Some((first, rest)) => {
            let mut acc = *first;
            for n in rest {
                if *n == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc %= n;
            }
            Ok(Value::Number(acc))
        }
    }
}

/// `(pow a b c …)` — left fold of repeated exponentiation; negative
/// exponent is an error since Lispy has no rational/float representation
/// to hold the result.
pub fn pow(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("pow", &args)?;
    match nums.split_first() {
        None => Err(EvalError::arity_error("pow", "at least 1", 0)),
        Some((first, rest)) => {
            let mut acc = *first;
            for n in rest {
                if *n < 0 {
                    return Err(EvalError::NegativeExponent);
                }
                acc = acc.pow(*n as u32);
            }
            Ok(Value::Number(acc))
        }
    }
}

/// `(min a b …)` — smallest of one or more numbers.
pub fn min(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("min", &args)?;
    nums.into_iter()
        .reduce(i64::min)
        .map(Value::Number)
        .ok_or_else(|| EvalError::arity_error("min", "at least 1", 0))
}

/// `(max a b …)` — largest of one or more numbers.
pub fn max(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let nums = numbers("max", &args)?;
    nums.into_iter()
        .reduce(i64::max)
        .map(Value::Number)
        .ok_or_else(|| EvalError::arity_error("max", "at least 1", 0))
}

pub fn register(env: &Rc<Environment>) {
    env.put("+".to_string(), Value::Builtin(add));
    env.put("-".to_string(), Value::Builtin(sub));
    env.put("*".to_string(), Value::Builtin(mul));
    env.put("/".to_string(), Value::Builtin(div));
    env.put("%".to_string(), Value::Builtin(rem));
    env.put("pow".to_string(), Value::Builtin(pow));
    env.put("min".to_string(), Value::Builtin(min));
    env.put("max".to_string(), Value::Builtin(max));
}
