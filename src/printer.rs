// ABOUTME: Environment-aware rendering of Values for the REPL and `print`

use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;

/// Renders `v` the way the REPL echoes results (spec.md §4.2): identical to
/// `Value`'s `Display` impl except that a bound builtin is shown by the
/// symbol it's bound to (via `Environment::reverse_lookup`) rather than the
/// bare `<builtin>` placeholder `Display` falls back to when no environment
/// is available.
pub fn print(env: &Rc<Environment>, v: &Value) -> String {
    match v {
        Value::Builtin(f) => match env.reverse_lookup(*f) {
            Some(name) => name,
            None => "<builtin>".to_string(),
        },
        Value::SExpr(items) => wrap('(', items, ')', env),
        Value::QExpr(items) => wrap('{', items, '}', env),
        Value::Lambda { formals, body, .. } => {
            format!("(\\ {} {})", print(env, formals), print(env, body))
        }
        other => format!("{}", other),
    }
}

fn wrap(open: char, items: &[Value], close: char, env: &Rc<Environment>) -> String {
    let mut out = String::new();
    out.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&print(env, item));
    }
    out.push(close);
    out
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
    fn numbers_and_strings_print_like_display() {
        let env = global();
        assert_eq!(print(&env, &Value::Number(5)), "5");
        assert_eq!(print(&env, &Value::Str("hi".to_string())), "\"hi\"");
    }

    #[test]
    fn bound_builtin_prints_its_symbol() {
        let env = global();
        let plus = env.get("+").unwrap();
        assert_eq!(print(&env, &plus), "+");
    }

    #[test]
    fn unbound_builtin_falls_back_to_placeholder() {
        fn dummy(_env: Rc<Environment>, _args: Vec<Value>) -> Result<Value, crate::error::EvalError> {
            Ok(Value::Number(0))
        }
        let env = Environment::new();
        assert_eq!(print(&env, &Value::Builtin(dummy)), "<builtin>");
    }

    #[test]
    fn nested_qexpr_prints_recursively() {
        let env = global();
        let v = Value::QExpr(vec![
            Value::Number(1),
            Value::QExpr(vec![Value::Sym("+".to_string())]),
        ]);
        assert_eq!(print(&env, &v), "{1 {+}}");
    }

    #[test]
    fn lambda_prints_formals_and_body() {
        let env = global();
        let lambda = Value::Lambda {
            formals: Box::new(Value::QExpr(vec![Value::Sym("x".to_string())])),
            body: Box::new(Value::QExpr(vec![Value::Sym("x".to_string())])),
            env: env.clone(),
        };
        assert_eq!(print(&env, &lambda), "(\\ {x} {x})");
    }
}
