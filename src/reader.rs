// ABOUTME: Converts the parser's generic syntax tree into Value instances

use crate::error::EvalError;
use crate::parser::{self, Node};
use crate::value::Value;

/// Converts a single tagged tree node into a `Value`, per spec.md §4.1.
/// Punctuation (`(`, `)`, `{`, `}`) and comment nodes are skipped by the
/// caller before they ever reach this function.
pub fn read(node: &Node) -> Result<Value, EvalError> {
    match node.tag {
        "number" => node
            .text
            .parse::<i64>()
            .map(Value::Number)
            .map_err(|_| EvalError::InvalidNumber),
        "symbol" => Ok(Value::Sym(node.text.clone())),
        "string" => {
            let interior = &node.text[1..node.text.len() - 1];
            Ok(Value::Str(parser::unescape(interior)))
        }
        "root" | "sexpr" => Ok(Value::SExpr(read_children(&node.children)?)),
        "qexpr" => Ok(Value::QExpr(read_children(&node.children)?)),
        other => Err(EvalError::Custom(format!("unexpected node tag '{}'", other))),
    }
}

fn read_children(children: &[Node]) -> Result<Vec<Value>, EvalError> {
    children
        .iter()
        .filter(|n| !is_ignored(n))
        .map(read)
        .collect()
}

fn is_ignored(node: &Node) -> bool {
    node.tag == "comment"
        || (node.tag == "char" && matches!(node.text.as_str(), "(" | ")" | "{" | "}"))
}

/// Convenience: parse source text and read it into a `Value` in one step.
pub fn read_source(input: &str) -> Result<Value, EvalError> {
    let tree = parser::parse(input).map_err(EvalError::Custom)?;
    read(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_number() {
        assert_eq!(read_source("42").unwrap(), Value::SExpr(vec![Value::Number(42)]));
    }

    #[test]
    fn rejects_overflowing_number() {
        let err = read_source("99999999999999999999").unwrap_err();
        assert_eq!(err, EvalError::InvalidNumber);
    }

    #[test]
    fn reads_a_symbol() {
        assert_eq!(
            read_source("foo").unwrap(),
            Value::SExpr(vec![Value::Sym("foo".to_string())])
        );
    }

    #[test]
    fn reads_a_string_and_unescapes_it() {
        assert_eq!(
            read_source(r#""a\nb""#).unwrap(),
            Value::SExpr(vec![Value::Str("a\nb".to_string())])
        );
    }

    #[test]
    fn reads_nested_sexpr_ignoring_punctuation() {
        let v = read_source("(+ 1 2)").unwrap();
        assert_eq!(
            v,
            Value::SExpr(vec![Value::SExpr(vec![
                Value::Sym("+".to_string()),
                Value::Number(1),
                Value::Number(2)
            ])])
        );
    }

    #[test]
    fn reads_qexpr() {
        let v = read_source("{1 2 3}").unwrap();
        assert_eq!(
            v,
            Value::SExpr(vec![Value::QExpr(vec![
                Value::Number(1),
                Value::Number(2),
                Value::Number(3)
            ])])
        );
    }

    #[test]
    fn comments_produce_no_values() {
        let v = read_source("(1 ; comment\n 2)").unwrap();
        assert_eq!(
            v,
            Value::SExpr(vec![Value::SExpr(vec![Value::Number(1), Value::Number(2)])])
        );
    }

    #[test]
    fn root_with_multiple_top_level_forms() {
        let v = read_source("1 2 3").unwrap();
        assert_eq!(
            v,
            Value::SExpr(vec![Value::Number(1), Value::Number(2), Value::Number(3)])
        );
    }
}
