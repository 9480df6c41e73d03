// ABOUTME: Special-form-like built-ins: if def = \ fun

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

fn as_qexpr(function: &str, v: Value, position: usize) -> Result<Vec<Value>, EvalError> {
    match v {
        Value::QExpr(items) => Ok(items),
        other => Err(EvalError::type_error(function, "Q-Expression", &other, position)),
    }
}

/// `(if cond then-q else-q)` — `cond` must be Bool; the untaken branch is
/// never evaluated (spec.md §4.5, §8 scenario "dead branch").
pub fn cond_if(env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity_error("if", "3", args.len()));
    }
    let else_q = args.pop().unwrap();
    let then_q = args.pop().unwrap();
    let cond = match args.pop().unwrap() {
        Value::Bool(b) => b,
        other => return Err(EvalError::type_error("if", "Bool", &other, 0)),
    };
    let branch = if cond { then_q } else { else_q };
    let items = as_qexpr("if", branch, if cond { 1 } else { 2 })?;
    eval(&env, Value::SExpr(items))
}

fn bind_list(
    env: &Rc<Environment>,
    function: &str,
    mut args: Vec<Value>,
    global: bool,
) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(function, "at least 1", 0));
    }
    let names = as_qexpr(function, args.remove(0), 0)?;
    let names: Vec<String> = names
        .into_iter()
        .map(|v| match v {
            Value::Sym(s) => Ok(s),
            other => Err(EvalError::type_error(function, "Symbol", &other, 0)),
        })
        .collect::<Result<_, _>>()?;

    if names.len() != args.len() {
        return Err(EvalError::arity_error(function, names.len().to_string(), args.len()));
    }

    for (name, value) in names.into_iter().zip(args) {
        if global {
            env.def(name, value);
        } else {
            env.put(name, value);
        }
    }
    Ok(Value::SExpr(Vec::new()))
}

/// `(def {s1 s2 …} v1 v2 …)` — binds each symbol to the corresponding value
/// in the root (global) frame.
pub fn def(env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    bind_list(&env, "def", args, true)
}

/// `(= {s1 s2 …} v1 v2 …)` — same, but local to the current frame.
pub fn put(env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    bind_list(&env, "=", args, false)
}

/// `(\ {params} {body})` — constructs a Lambda. Its closure is the
/// environment `\` is itself being evaluated in, giving ordinary lexical
/// scoping (see DESIGN.md for why this is the chosen reading of spec.md
/// §4.5's "fresh environment" over a literal empty one).
pub fn lambda(env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("\\", "2", args.len()));
    }
    let body = args.pop().unwrap();
    let formals = args.pop().unwrap();

    let formals_items = as_qexpr("\\", formals.clone(), 0)?;
    for (i, f) in formals_items.iter().enumerate() {
        match f {
            Value::Sym(s) if s == "&" => {
                if formals_items.len() - i != 2 {
                    return Err(EvalError::MalformedVariadic);
                }
            }
            Value::Sym(_) => {}
            other => return Err(EvalError::type_error("\\", "Symbol", other, 0)),
        }
    }
    as_qexpr("\\", body.clone(), 1)?;

    Ok(Value::Lambda {
        formals: Box::new(formals),
        body: Box::new(body),
        env,
    })
}

/// `(fun {name p1 p2 …} {body})` — sugar for `(def {name} (\ {p1 p2 …} {body}))`.
pub fn fun(env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("fun", "2", args.len()));
    }
    let body = args.pop().unwrap();
    let mut header = as_qexpr("fun", args.pop().unwrap(), 0)?;
    if header.is_empty() {
        return Err(EvalError::runtime_error("fun", "missing function name"));
    }
    let name = match header.remove(0) {
        Value::Sym(s) => s,
        other => return Err(EvalError::type_error("fun", "Symbol", &other, 0)),
    };
    let formals = Value::QExpr(header);
    let lambda_value = lambda(env.clone(), vec![formals, body])?;
    env.def(name, lambda_value);
    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Environment>) {
    env.put("if".to_string(), Value::Builtin(cond_if));
    env.put("def".to_string(), Value::Builtin(def));
    env.put("=".to_string(), Value::Builtin(put));
    env.put("\\".to_string(), Value::Builtin(lambda));
    env.put("fun".to_string(), Value::Builtin(fun));
}
