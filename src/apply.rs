// ABOUTME: Function application — builtins call straight through, lambdas curry

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

/// Applies `f` to `args` (spec.md §4.6). `f` must already satisfy
/// `Value::is_fun`; callers (`eval::eval_sexpr`) check that before calling in.
pub fn apply(env: &Rc<Environment>, f: Value, args: Vec<Value>) -> Result<Value, EvalError> {
    match f {
        Value::Builtin(func) => func(env.clone(), args),
        Value::Lambda { formals, body, env: captured } => apply_lambda(formals, body, captured, args),
        other => Err(EvalError::NotAFunction {
            actual: other.type_name().to_string(),
        }),
    }
}

/// Binds `args` against `formals` one at a time, honoring the `&` variadic
/// sentinel (the symbol after `&` captures every remaining argument as a
/// `QExpr`, spec.md §4.6). Running out of arguments before formals are
/// exhausted returns a partially-applied copy of the lambda (currying),
/// whose closure is the frame built so far — so bindings already made
/// survive into the next round. Running out of formals with arguments
/// still unbound is `TooManyArguments`. A fully-saturated call evaluates
/// the body in that same frame, parented on the lambda's defining
/// environment (true lexical capture — see DESIGN.md for why this departs
/// from a literal reading of the call-site reparenting in spec.md §4.6).
fn apply_lambda(
    formals: Box<Value>,
    body: Box<Value>,
    captured: Rc<Environment>,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    let formals_list = match *formals {
        Value::QExpr(items) => items,
        other => {
            return Err(EvalError::runtime_error(
                "\\",
                format!("malformed formals: {}", other.type_name()),
            ))
        }
    };

    let given = args.len();
    let total = formals_list.len();
    let fenv = Environment::with_parent(captured.clone());
    let mut formals_iter = formals_list.into_iter();
    let mut args_iter = args.into_iter();

    loop {
        let Some(formal) = formals_iter.next() else {
            // Formals exhausted; any leftover args is an arity error.
            if args_iter.next().is_some() {
                return Err(EvalError::TooManyArguments {
                    got: given,
                    expected: total,
                });
            }
            break;
        };

        let name = match formal {
            Value::Sym(s) => s,
            other => {
                return Err(EvalError::runtime_error(
                    "\\",
                    format!("formal is not a symbol: {}", other.type_name()),
                ))
            }
        };

        if name == "&" {
            let variadic_name = match formals_iter.next() {
                Some(Value::Sym(s)) => s,
                _ => return Err(EvalError::MalformedVariadic),
            };
            let rest: Vec<Value> = args_iter.by_ref().collect();
            fenv.put(variadic_name, Value::QExpr(rest));
            break;
        }

        match args_iter.next() {
            Some(arg) => fenv.put(name, arg),
            None => {
                // Not enough arguments yet: return a partially-applied lambda
                // whose formals begin with the symbol we just failed to bind.
                // Its captured environment is `fenv`, carrying the bindings
                // made so far (spec.md §4.6).
                let mut remaining = vec![Value::Sym(name)];
                remaining.extend(formals_iter);
                return Ok(Value::Lambda {
                    formals: Box::new(Value::QExpr(remaining)),
                    body,
                    env: fenv,
                });
            }
        }
    }

    eval(&fenv, Value::SExpr(match *body {
        Value::QExpr(items) => items,
        other => vec![other],
    }))
}
