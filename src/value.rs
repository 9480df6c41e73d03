// ABOUTME: Value types representing Lispy data structures and expressions

use crate::env::Environment;
use crate::error::EvalError;
use std::fmt;
use std::rc::Rc;

/// Signature every host-provided builtin satisfies. Builtins receive the
/// calling environment (some of them — `if`, `def`, `\`, `eval` — need it)
/// and take ownership of their already-evaluated argument vector.
pub type Builtin = fn(Rc<Environment>, Vec<Value>) -> Result<Value, EvalError>;

#[derive(Debug, Clone)]
pub enum Value {
    Number(i64),
    Bool(bool),
    Str(String),
    Sym(String),
    /// An in-band error value (spec.md §7): evaluation failures are data,
    /// not exceptions, so they can be inspected with `error?`-style checks
    /// or simply propagate by the short-circuit rule in `eval_sexpr`.
    Err(String),
    /// An evaluable list: the head is applied to the tail.
    SExpr(Vec<Value>),
    /// A quoted list: never implicitly evaluated.
    QExpr(Vec<Value>),
    Builtin(Builtin),
    /// A user-defined function. `formals` and `body` are always `QExpr`
    /// values — formals a QExpr of `Sym` (with at most one `&` sentinel),
    /// body the QExpr the function evaluates as code when fully applied.
    Lambda {
        formals: Box<Value>,
        body: Box<Value>,
        env: Rc<Environment>,
    },
}

impl Value {
    /// Short, human-readable type name used in type-mismatch error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Sym(_) => "Symbol",
            Value::Err(_) => "Error",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Builtin(_) => "Function",
            Value::Lambda { .. } => "Function",
        }
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn is_fun(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Lambda { .. })
    }
}

/// Structural equality per spec.md §3: numbers/bools/strings/symbols/errors
/// compare by content; `SExpr`/`QExpr` element-wise; builtins by function
/// pointer identity; lambdas by structural equality of formals and body
/// (captured environment is deliberately excluded).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => *a as usize == *b as usize,
            (
                Value::Lambda {
                    formals: f1,
                    body: b1,
                    ..
                },
                Value::Lambda {
                    formals: f2,
                    body: b2,
                    ..
                },
            ) => f1 == f2 && b1 == b2,
            _ => false,
        }
    }
}

/// Bare, environment-unaware rendering. Used for error messages and the
/// `Debug`-adjacent cases where no environment is available to name
/// builtins by their bound symbol; see `printer` for the full spec.md §4.2
/// behavior (including builtin reverse-lookup).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Str(s) => write!(f, "\"{}\"", crate::parser::escape(s)),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Err(msg) => write!(f, "Error: {}", msg),
            Value::SExpr(items) => write_seq(f, '(', items, ')'),
            Value::QExpr(items) => write_seq(f, '{', items, '}'),
            Value::Builtin(_) => write!(f, "<builtin>"),
            Value::Lambda { formals, body, .. } => write!(f, "(\\ {} {})", formals, body),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}
