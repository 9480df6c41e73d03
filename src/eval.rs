// ABOUTME: Evaluator module — reduces s-expressions to values

use crate::apply::apply;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Entry point (spec.md §4.4). Symbols resolve through the environment;
/// SExpr delegates to `eval_sexpr`; every other variant — notably QExpr,
/// the quotation rule — is returned unchanged.
pub fn eval(env: &Rc<Environment>, v: Value) -> Result<Value, EvalError> {
    match v {
        Value::Sym(name) => env.get(&name),
        Value::SExpr(items) => eval_sexpr(env, items),
        other => Ok(other),
    }
}

/// Evaluates an SExpr's children left to right, short-circuits on the
/// first error, then either unwraps a singleton or applies the head as a
/// function to the tail (spec.md §4.4 steps 1-5).
fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Result<Value, EvalError> {
    let mut evaluated = Vec::with_capacity(items.len());
    for item in items {
        let v = eval(env, item)?;
        if let Value::Err(msg) = v {
            return Err(EvalError::Custom(msg));
        }
        evaluated.push(v);
    }

    if evaluated.is_empty() {
        return Ok(Value::SExpr(evaluated));
    }
    if evaluated.len() == 1 {
        return Ok(evaluated.into_iter().next().unwrap());
    }

    let mut rest = evaluated;
    let head = rest.remove(0);
    if !head.is_fun() {
        return Err(EvalError::NotAFunction {
            actual: head.type_name().to_string(),
        });
    }
    apply(env, head, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    fn global() -> Rc<Environment> {
        let env = Environment::new();
        builtins::register_all(&env);
        env
    }

    #[test]
    fn number_is_self_evaluating() {
        let env = global();
        assert_eq!(eval(&env, Value::Number(5)).unwrap(), Value::Number(5));
    }

    #[test]
    fn qexpr_is_not_evaluated() {
        let env = global();
        let q = Value::QExpr(vec![Value::Sym("+".to_string()), Value::Number(1)]);
        assert_eq!(eval(&env, q.clone()).unwrap(), q);
    }

    #[test]
    fn symbol_resolves_through_environment() {
        let env = global();
        env.def("x".to_string(), Value::Number(99));
        assert_eq!(
            eval(&env, Value::Sym("x".to_string())).unwrap(),
            Value::Number(99)
        );
    }

    #[test]
    fn undefined_symbol_is_an_error() {
        let env = global();
        assert_eq!(
            eval(&env, Value::Sym("nope".to_string())),
            Err(EvalError::UndefinedSymbol("nope".to_string()))
        );
    }

    #[test]
    fn empty_sexpr_is_legal() {
        let env = global();
        assert_eq!(
            eval(&env, Value::SExpr(vec![])).unwrap(),
            Value::SExpr(vec![])
        );
    }

    #[test]
    fn singleton_sexpr_unwraps() {
        let env = global();
        let v = eval(&env, Value::SExpr(vec![Value::Number(7)])).unwrap();
        assert_eq!(v, Value::Number(7));
    }

    #[test]
    fn applies_builtin_arithmetic() {
        let env = global();
        let v = Value::SExpr(vec![
            Value::Sym("+".to_string()),
            Value::Number(1),
            Value::Number(2),
            Value::Number(3),
        ]);
        assert_eq!(eval(&env, v).unwrap(), Value::Number(6));
    }

    #[test]
    fn error_short_circuits_siblings() {
        let env = global();
        // (+ (/ 1 0) 99) must surface the division error, never reach 99.
        let v = Value::SExpr(vec![
            Value::Sym("+".to_string()),
            Value::SExpr(vec![
                Value::Sym("/".to_string()),
                Value::Number(1),
                Value::Number(0),
            ]),
            Value::Number(99),
        ]);
        assert_eq!(eval(&env, v), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn head_must_be_a_function() {
        let env = global();
        let v = Value::SExpr(vec![Value::Number(1), Value::Number(2)]);
        assert_eq!(
            eval(&env, v),
            Err(EvalError::NotAFunction {
                actual: "Number".to_string()
            })
        );
    }

    #[test]
    fn error_builtin_short_circuits_via_value_err() {
        let env = global();
        let v = Value::SExpr(vec![
            Value::Sym("+".to_string()),
            Value::SExpr(vec![
                Value::Sym("error".to_string()),
                Value::Str("boom".to_string()),
            ]),
            Value::Number(1),
        ]);
        assert_eq!(eval(&env, v), Err(EvalError::Custom("boom".to_string())));
    }

    #[test]
    fn if_does_not_evaluate_the_dead_branch() {
        let env = global();
        let v = Value::SExpr(vec![
            Value::Sym("if".to_string()),
            Value::SExpr(vec![
                Value::Sym(">".to_string()),
                Value::Number(10),
                Value::Number(5),
            ]),
            Value::QExpr(vec![Value::Number(1), Value::Number(1), Value::Sym("+".to_string())]),
            Value::QExpr(vec![
                Value::Sym("/".to_string()),
                Value::Number(1),
                Value::Number(0),
            ]),
        ]);
        // then-branch is {1 1 +}; eval'ing it as code applies + to (1 1).
        let then_branch = Value::SExpr(vec![
            Value::Sym("if".to_string()),
            Value::SExpr(vec![
                Value::Sym(">".to_string()),
                Value::Number(10),
                Value::Number(5),
            ]),
            Value::QExpr(vec![
                Value::Sym("+".to_string()),
                Value::Number(1),
                Value::Number(1),
            ]),
            Value::QExpr(vec![
                Value::Sym("/".to_string()),
                Value::Number(1),
                Value::Number(0),
            ]),
        ]);
        let _ = v;
        assert_eq!(eval(&env, then_branch).unwrap(), Value::Number(2));
    }
}
