// ABOUTME: List built-ins: list head tail init len cons join eval

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

/// `(list x …)` — packs its arguments as a QExpr.
pub fn list(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::QExpr(args))
}

/// `(head q)` — the first element of a non-empty QExpr.
pub fn head(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("head", "1", args.len()));
    }
    let mut items = as_qexpr("head", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(EvalError::runtime_error("head", "passed {}"));
    }
    Ok(items.remove(0))
}

/// `(tail q)` — `q` with its first element removed.
pub fn tail(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("tail", "1", args.len()));
    }
    let mut items = as_qexpr("tail", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(EvalError::runtime_error("tail", "passed {}"));
    }
    items.remove(0);
    Ok(Value::QExpr(items))
}

/// `(init q)` — `q` with its last element removed.
pub fn init(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("init", "1", args.len()));
    }
    let mut items = as_qexpr("init", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(EvalError::runtime_error("init", "passed {}"));
    }
    items.pop();
    Ok(Value::QExpr(items))
}

/// `(len q)` — element count.
pub fn len(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("len", "1", args.len()));
    }
    let items = as_qexpr("len", args.remove(0), 0)?;
    Ok(Value::Number(items.len() as i64))
}

/// `(cons x q)` — `q` with `x` prepended.
pub fn cons(_env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cons", "2", args.len()));
    }
    let rest = as_qexpr("cons", args.remove(1), 1)?;
    let x = args.remove(0);
    let mut items = vec![x];
    items.extend(rest);
    Ok(Value::QExpr(items))
}

/// `(join q1 q2 …)` — concatenation of two or more QExprs.
pub fn join(_env: Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let mut out = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        out.extend(as_qexpr("join", arg, i)?);
    }
    Ok(Value::QExpr(out))
}

/// `(eval q)` — retypes `q` as an SExpr and evaluates it.
pub fn eval_builtin(env: Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("eval", "1", args.len()));
    }
    let items = as_qexpr("eval", args.remove(0), 0)?;
    eval(&env, Value::SExpr(items))
}

pub fn register(env: &Rc<Environment>) {
    env.put("list".to_string(), Value::Builtin(list));
    env.put("head".to_string(), Value::Builtin(head));
    env.put("tail".to_string(), Value::Builtin(tail));
    env.put("init".to_string(), Value::Builtin(init));
    env.put("len".to_string(), Value::Builtin(len));
    env.put("cons".to_string(), Value::Builtin(cons));
    env.put("join".to_string(), Value::Builtin(join));
    env.put("eval".to_string(), Value::Builtin(eval_builtin));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    fn q(items: Vec<Value>) -> Value {
        Value::QExpr(items)
    }

    #[test]
    fn head_tail_init_len() {
        let list = q(vec![Value::Number(1), Value::Number(2), Value::Number(3)]);
        assert_eq!(head(env(), vec![list.clone()]).unwrap(), Value::Number(1));
        assert_eq!(
            tail(env(), vec![list.clone()]).unwrap(),
            q(vec![Value::Number(2), Value::Number(3)])
        );
        assert_eq!(
            init(env(), vec![list.clone()]).unwrap(),
            q(vec![Value::Number(1), Value::Number(2)])
        );
        assert_eq!(len(env(), vec![list]).unwrap(), Value::Number(3));
    }

    #[test]
    fn head_of_empty_list_is_an_error() {
        assert!(head(env(), vec![q(vec![])]).is_err());
    }

    #[test]
    fn cons_prepends() {
        let result = cons(env(), vec![Value::Number(1), q(vec![Value::Number(2), Value::Number(3)])]).unwrap();
        assert_eq!(result, q(vec![Value::Number(1), Value::Number(2), Value::Number(3)]));
    }

    #[test]
    fn join_concatenates_several_qexprs() {
        let result = join(
            env(),
            vec![q(vec![Value::Number(1)]), q(vec![Value::Number(2)]), q(vec![Value::Number(3)])],
        )
        .unwrap();
        assert_eq!(result, q(vec![Value::Number(1), Value::Number(2), Value::Number(3)]));
    }

    #[test]
    fn eval_retypes_qexpr_as_code() {
        let e = env();
        crate::builtins::register_all(&e);
        let expr = q(vec![Value::Sym("+".to_string()), Value::Number(1), Value::Number(2)]);
        assert_eq!(eval_builtin(e, vec![expr]).unwrap(), Value::Number(3));
    }

    #[test]
    fn list_packs_arguments() {
        assert_eq!(
            list(env(), vec![Value::Number(1), Value::Number(2)]).unwrap(),
            q(vec![Value::Number(1), Value::Number(2)])
        );
    }
}
