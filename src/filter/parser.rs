//! Recursive-descent reader for the canonical filter grammar.
//!
//! The grammar is exactly what [`Filter`]'s `Display` implementation emits:
//!
//! ```text
//! expr    := funcName "(" [ " " argList " " ] ")"
//! argList := arg ("," " " arg)*
//! ```
//!
//! An argument is a nested expression when its function name is in the
//! constructor registry and the text reads back as a valid expression;
//! anything else is a bare literal extending to the next top-level comma or
//! the enclosing close paren.

use super::case::CasePolicy;
use super::error::ParseError;
use super::node::Filter;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

/// A parsed argument: a nested filter or a literal token.
enum Arg {
    Expr(Filter),
    Literal(String),
}

impl Arg {
    /// Literal view of the argument. A nested expression renders back to its
    /// canonical string, so values that happen to look like filter calls
    /// still round-trip.
    fn into_literal(self) -> String {
        match self {
            Arg::Literal(s) => s,
            Arg::Expr(f) => f.to_string(),
        }
    }
}

type Builder = fn(Vec<Arg>) -> Result<Filter, ParseError>;

/// Function-name registry, populated once at first use and read-only after.
static REGISTRY: LazyLock<HashMap<&'static str, Builder>> = LazyLock::new(|| {
    let mut registry: HashMap<&'static str, Builder> = HashMap::new();
    registry.insert("True", |args| build_constant("True", Filter::True, args));
    registry.insert("False", |args| build_constant("False", Filter::False, args));
    registry.insert("Abstract", |args| {
        build_constant("Abstract", Filter::Abstract, args)
    });
    registry.insert("Interface", |args| {
        build_constant("Interface", Filter::Interface, args)
    });
    registry.insert("Not", build_not);
    registry.insert("And", |args| build_gate("And", Filter::and, args));
    registry.insert("Or", |args| build_gate("Or", Filter::or, args));
    registry.insert("Name", |args| build_string_leaf("Name", Filter::name, args));
    registry.insert("Prefix", |args| {
        build_string_leaf("Prefix", Filter::prefix, args)
    });
    registry.insert("Suffix", |args| {
        build_string_leaf("Suffix", Filter::suffix, args)
    });
    registry.insert("Regex", |args| {
        build_pattern_leaf("Regex", Filter::regex, args)
    });
    registry.insert("Wildcard", |args| {
        build_pattern_leaf("Wildcard", Filter::wildcard, args)
    });
    registry.insert("HasAnnotation", build_has_annotation);
    registry
});

/// Reconstruct a filter tree from its canonical textual form.
pub fn parse(input: &str) -> Result<Filter, ParseError> {
    let trimmed = input.trim();
    let open = trimmed
        .find('(')
        .ok_or_else(|| ParseError::Malformed(input.to_string()))?;
    let func = trimmed[..open].trim_end();
    if func.is_empty() {
        return Err(ParseError::Malformed(input.to_string()));
    }

    let close = matching_close(trimmed, open)
        .ok_or_else(|| ParseError::Unterminated(input.to_string()))?;
    if !trimmed[close + 1..].trim().is_empty() {
        return Err(ParseError::TrailingInput(input.to_string()));
    }

    let builder = REGISTRY
        .get(func)
        .ok_or_else(|| ParseError::UnknownFunction(func.to_string()))?;

    let args = split_top_level(&trimmed[open + 1..close])
        .into_iter()
        .map(parse_arg)
        .collect();
    builder(args)
}

/// Index of the `)` matching the `(` at `open`, by depth-counted scan.
fn matching_close(s: &str, open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, ch) in s[open + 1..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1 + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas at paren depth 0, trimming each piece. Blank input yields
/// no arguments.
fn split_top_level(inner: &str) -> Vec<&str> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(inner[start..].trim());
    parts
}

fn parse_arg(raw: &str) -> Arg {
    if let Some(func) = call_shape(raw)
        && REGISTRY.contains_key(func)
        && let Ok(filter) = parse(raw)
    {
        return Arg::Expr(filter);
    }
    // call-shaped text that does not read back as a valid expression is a
    // value, so serializer output parses no matter what the values hold
    Arg::Literal(raw.to_string())
}

/// Function name of `s` when it has the shape `identifier( ... )`.
fn call_shape(s: &str) -> Option<&str> {
    let open = s.find('(')?;
    let name = s[..open].trim_end();
    if name.is_empty()
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        || !s.ends_with(')')
    {
        return None;
    }
    Some(name)
}

fn build_constant(
    func: &'static str,
    filter: Filter,
    args: Vec<Arg>,
) -> Result<Filter, ParseError> {
    if !args.is_empty() {
        return Err(ParseError::WrongArgumentCount {
            func,
            expected: "no arguments",
            found: args.len(),
        });
    }
    Ok(filter)
}

fn build_not(args: Vec<Arg>) -> Result<Filter, ParseError> {
    if args.len() != 1 {
        return Err(ParseError::WrongArgumentCount {
            func: "Not",
            expected: "exactly 1 sub-filter",
            found: args.len(),
        });
    }
    match args.into_iter().next().expect("one argument") {
        Arg::Expr(child) => Ok(Filter::not(child)),
        Arg::Literal(arg) => Err(ParseError::ExpectedExpression { func: "Not", arg }),
    }
}

fn build_gate(
    func: &'static str,
    build: fn(Vec<Filter>) -> Result<Filter, super::error::FilterError>,
    args: Vec<Arg>,
) -> Result<Filter, ParseError> {
    let mut children = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Arg::Expr(child) => children.push(child),
            Arg::Literal(arg) => return Err(ParseError::ExpectedExpression { func, arg }),
        }
    }
    Ok(build(children)?)
}

fn build_string_leaf(
    func: &'static str,
    build: fn(CasePolicy, Vec<String>) -> Result<Filter, super::error::FilterError>,
    args: Vec<Arg>,
) -> Result<Filter, ParseError> {
    if args.len() < 2 {
        return Err(ParseError::WrongArgumentCount {
            func,
            expected: "a case policy and at least one value",
            found: args.len(),
        });
    }
    let mut args = args.into_iter();
    let case = CasePolicy::from_str(&args.next().expect("case argument").into_literal())?;
    let values: Vec<String> = args.map(Arg::into_literal).collect();
    Ok(build(case, values)?)
}

fn build_pattern_leaf(
    func: &'static str,
    build: fn(CasePolicy, &str) -> Result<Filter, super::error::FilterError>,
    args: Vec<Arg>,
) -> Result<Filter, ParseError> {
    if args.len() != 2 {
        return Err(ParseError::WrongArgumentCount {
            func,
            expected: "a case policy and a pattern",
            found: args.len(),
        });
    }
    let mut args = args.into_iter();
    let case = CasePolicy::from_str(&args.next().expect("case argument").into_literal())?;
    let pattern = args.next().expect("pattern argument").into_literal();
    Ok(build(case, &pattern)?)
}

fn build_has_annotation(args: Vec<Arg>) -> Result<Filter, ParseError> {
    if args.len() != 1 {
        return Err(ParseError::WrongArgumentCount {
            func: "HasAnnotation",
            expected: "exactly 1 annotation name",
            found: args.len(),
        });
    }
    let annotation = args.into_iter().next().expect("one argument").into_literal();
    Ok(Filter::has_annotation(annotation))
}
