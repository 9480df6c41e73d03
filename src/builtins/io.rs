// ABOUTME: I/O and loading built-ins: print error load

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::printer::print as render;
use crate::reader;
use crate::value::Value;
use std::rc::Rc;

/// `(print v …)` — writes each value separated by a space, trailing
/// newline, and returns the empty SExpr.
pub fn print(env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let rendered: Vec<String> = args.iter().map(|v| render(&env, v)).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::SExpr(Vec::new()))
}

/// `(error s)` — turns a Str into an in-band Err value.
pub fn error(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("error", "1", args.len()));
    }
    match args.remove(0) {
        Value::Str(s) => Ok(Value::Err(s)),
        other => Err(EvalError::type_error("error", "String", &other, 0)),
    }
}

/// `(load s)` — parses the file at path `s` and evaluates each top-level
/// expression in turn, printing (and continuing past) any Err result
/// (spec.md §4.7, §7). A parse failure returns an Err naming the parser's
/// own message rather than aborting the host process.
pub fn load(env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("load", "1", args.len()));
    }
    let path = match args.remove(0) {
        Value::Str(s) => s,
        other => return Err(EvalError::type_error("load", "String", &other, 0)),
    };

    let tree = crate::parser::parse_file(&path)
        .map_err(|e| EvalError::Custom(format!("Could not load library {}", e)))?;
    let forms = match reader::read(&tree)? {
        Value::SExpr(items) => items,
        other => vec![other],
    };

    for form in forms {
        match eval(&env, form) {
            Ok(v) => {
                if let Value::Err(msg) = v {
                    println!("Error: {}", msg);
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Environment>) {
    env.put("print".to_string(), Value::Builtin(print));
    env.put("error".to_string(), Value::Builtin(error));
    env.put("load".to_string(), Value::Builtin(load));
}
