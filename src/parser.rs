// ABOUTME: Concrete-syntax parser producing a generic tagged tree (spec.md §6's external parser)

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace0, none_of},
    combinator::opt,
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};
use std::fs;

/// A generic, tagged syntax-tree node — the shape an external parser like
/// `mpc` hands back. `reader::read` is the only consumer; it is the only
/// module that interprets `tag`/`text` into a `Value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: &'static str,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(tag: &'static str, text: impl Into<String>) -> Self {
        Node {
            tag,
            text: text.into(),
            children: Vec::new(),
        }
    }

    fn branch(tag: &'static str, children: Vec<Node>) -> Self {
        Node {
            tag,
            text: String::new(),
            children,
        }
    }
}

const NUMBER_TAIL_CHARS: &str = "0123456789";
const SYMBOL_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-*/\\=<>!&^%|";

fn parse_number(input: &str) -> IResult<&str, Node> {
    let (input, sign) = opt(char('-')).parse(input)?;
    let (input, int_part) = digit1(input)?;
    let (input, frac) = opt((char('.'), take_while(|c: char| NUMBER_TAIL_CHARS.contains(c)))).parse(input)?;

    let mut text = String::new();
    if sign.is_some() {
        text.push('-');
    }
    text.push_str(int_part);
    if let Some((_, tail)) = frac {
        text.push('.');
        text.push_str(tail);
    }
    Ok((input, Node::leaf("number", text)))
}

fn parse_symbol(input: &str) -> IResult<&str, Node> {
    let (input, text) = nom::bytes::complete::take_while1(|c: char| SYMBOL_CHARS.contains(c))(input)?;
    Ok((input, Node::leaf("symbol", text)))
}

/// Matches the grammar's `string : /"(\\.|[^"])*"/` — the returned text
/// retains the surrounding quotes; `reader::read` strips and unescapes them.
fn parse_string(input: &str) -> IResult<&str, Node> {
    let (mut rest, _) = char('"')(input)?;
    let mut raw = String::from('"');
    loop {
        if let Ok((r, _)) = char::<_, nom::error::Error<&str>>('"')(rest) {
            raw.push('"');
            return Ok((r, Node::leaf("string", raw)));
        }
        if let Ok((r, c)) = none_of::<_, _, nom::error::Error<&str>>("\"\\")(rest) {
            raw.push(c);
            rest = r;
            continue;
        }
        let (r, _) = char::<_, nom::error::Error<&str>>('\\')(rest)?;
        let (r, c) = nom::character::complete::anychar::<_, nom::error::Error<&str>>(r)?;
        raw.push('\\');
        raw.push(c);
        rest = r;
    }
}

fn parse_comment(input: &str) -> IResult<&str, Node> {
    let (input, _) = char(';')(input)?;
    let (input, text) = take_while(|c| c != '\n' && c != '\r')(input)?;
    Ok((input, Node::leaf("comment", format!(";{}", text))))
}

/// Insignificant whitespace only — comments are *not* swallowed here.
/// They are matched by `parse_child` like any other node so they survive
/// into the tree; `reader::read`'s `is_ignored` is what discards them
/// (spec.md §4.1: "Ignore child nodes ... whose tag is `regex` or
/// `comment`"), the same way it discards `(`/`)`/`{`/`}` `char` nodes.
fn ws(input: &str) -> IResult<&str, ()> {
    multispace0.map(|_| ()).parse(input)
}

/// An expression or a comment — anything that can appear between
/// delimiters at any nesting level.
fn parse_child(input: &str) -> IResult<&str, Node> {
    alt((parse_comment, parse_expr)).parse(input)
}

fn parse_sexpr(input: &str) -> IResult<&str, Node> {
    let (input, _) = char('(')(input)?;
    let mut children = vec![Node::leaf("char", "(")];
    let (input, inner) = many0(preceded(ws, parse_child)).parse(input)?;
    children.extend(inner);
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;
    children.push(Node::leaf("char", ")"));
    Ok((input, Node::branch("sexpr", children)))
}

fn parse_qexpr(input: &str) -> IResult<&str, Node> {
    let (input, _) = char('{')(input)?;
    let mut children = vec![Node::leaf("char", "{")];
    let (input, inner) = many0(preceded(ws, parse_child)).parse(input)?;
    children.extend(inner);
    let (input, _) = ws(input)?;
    let (input, _) = char('}')(input)?;
    children.push(Node::leaf("char", "}"));
    Ok((input, Node::branch("qexpr", children)))
}

fn parse_expr(input: &str) -> IResult<&str, Node> {
    alt((
        parse_number,
        parse_string,
        parse_sexpr,
        parse_qexpr,
        parse_symbol,
    ))
    .parse(input)
}

/// Parses a whole program: zero or more top-level expressions. Mirrors the
/// grammar's `lispy : /^/ expr* /$/` — the returned node is tagged `root`.
pub fn parse(input: &str) -> Result<Node, String> {
    let (rest, children) = many0(preceded(ws, parse_child))
        .parse(input)
        .map_err(|e| format!("parse error: {:?}", e))?;
    let (rest, _) = ws(rest).map_err(|e| format!("parse error: {:?}", e))?;
    if !rest.is_empty() {
        return Err(format!("unexpected trailing input: '{}'", rest));
    }
    Ok(Node::branch("root", children))
}

/// Parses the contents of a file on disk (used by the `load` built-in).
pub fn parse_file(path: &str) -> Result<Node, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("could not read '{}': {}", path, e))?;
    parse(&contents)
}

/// C-style unescape of a string literal's interior (no surrounding quotes).
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of `unescape`, used by the printer when rendering `Str` values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
