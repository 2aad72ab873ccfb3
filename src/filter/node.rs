use super::candidate::{Candidate, TypeHandle};
use super::case::CasePolicy;
use super::error::FilterError;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// One node of a filter expression tree.
///
/// Trees are immutable after construction. Use the checked constructors
/// ([`Filter::and`], [`Filter::name`], ...) rather than building variants
/// directly; they enforce the arity and value invariants.
///
/// Two filters are equal, and hash identically, iff their canonical
/// serialized forms (see [`fmt::Display`]) are equal.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Accepts everything.
    True,
    /// Accepts nothing.
    False,
    /// Logical negation of the enclosed filter.
    Not(Box<Filter>),
    /// Accepts when every child accepts; short-circuits on the first miss.
    And(Vec<Filter>),
    /// Accepts when any child accepts; short-circuits on the first hit.
    Or(Vec<Filter>),
    /// Exact identifier match against any of the values.
    Name { case: CasePolicy, values: Vec<String> },
    /// Identifier starts with any of the values.
    Prefix { case: CasePolicy, values: Vec<String> },
    /// Identifier ends with any of the values.
    Suffix { case: CasePolicy, values: Vec<String> },
    /// Regular expression over the whole identifier.
    Regex {
        case: CasePolicy,
        pattern: String,
        regex: Regex,
    },
    /// Shell-style wildcard (`*` any run, `?` any char), kept in its source
    /// form for serialization and compiled to an anchored regex internally.
    Wildcard {
        case: CasePolicy,
        pattern: String,
        regex: Regex,
    },
    /// Loaded type carries the named annotation.
    HasAnnotation(String),
    /// Loaded type is abstract.
    Abstract,
    /// Loaded type is an interface.
    Interface,
}

impl Filter {
    /// Negate a filter.
    pub fn not(child: Filter) -> Filter {
        Filter::Not(Box::new(child))
    }

    /// Conjunction over two or more filters.
    pub fn and(children: Vec<Filter>) -> Result<Filter, FilterError> {
        if children.len() < 2 {
            return Err(FilterError::InvalidArity {
                func: "And",
                found: children.len(),
            });
        }
        Ok(Filter::And(children))
    }

    /// Disjunction over two or more filters.
    pub fn or(children: Vec<Filter>) -> Result<Filter, FilterError> {
        if children.len() < 2 {
            return Err(FilterError::InvalidArity {
                func: "Or",
                found: children.len(),
            });
        }
        Ok(Filter::Or(children))
    }

    /// Exact-name filter over one or more identifier values.
    pub fn name<I, S>(case: CasePolicy, values: I) -> Result<Filter, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = collect_values("Name", values)?;
        Ok(Filter::Name { case, values })
    }

    /// Prefix filter over one or more values.
    pub fn prefix<I, S>(case: CasePolicy, values: I) -> Result<Filter, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = collect_values("Prefix", values)?;
        Ok(Filter::Prefix { case, values })
    }

    /// Suffix filter over one or more values.
    pub fn suffix<I, S>(case: CasePolicy, values: I) -> Result<Filter, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = collect_values("Suffix", values)?;
        Ok(Filter::Suffix { case, values })
    }

    /// Regular-expression filter. The pattern must cover the whole
    /// identifier for the filter to accept it.
    pub fn regex(case: CasePolicy, pattern: &str) -> Result<Filter, FilterError> {
        let regex = compile(case, &format!("^(?:{pattern})$"), pattern)?;
        Ok(Filter::Regex {
            case,
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Wildcard filter; see [`make_regex`] for the translation.
    pub fn wildcard(case: CasePolicy, pattern: &str) -> Result<Filter, FilterError> {
        let regex = compile(case, &make_regex(pattern), pattern)?;
        Ok(Filter::Wildcard {
            case,
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Annotation-presence filter.
    pub fn has_annotation(annotation: impl Into<String>) -> Filter {
        Filter::HasAnnotation(annotation.into())
    }

    /// Function name used in the textual form, e.g. `"And"` or `"Regex"`.
    pub fn func_name(&self) -> &'static str {
        match self {
            Filter::True => "True",
            Filter::False => "False",
            Filter::Not(_) => "Not",
            Filter::And(_) => "And",
            Filter::Or(_) => "Or",
            Filter::Name { .. } => "Name",
            Filter::Prefix { .. } => "Prefix",
            Filter::Suffix { .. } => "Suffix",
            Filter::Regex { .. } => "Regex",
            Filter::Wildcard { .. } => "Wildcard",
            Filter::HasAnnotation(_) => "HasAnnotation",
            Filter::Abstract => "Abstract",
            Filter::Interface => "Interface",
        }
    }

    /// Serialized arguments of this node. String filters lead with the case
    /// policy and list values in case-insensitive order; composites list the
    /// canonical forms of their children in stored order.
    pub fn args(&self) -> Vec<String> {
        match self {
            Filter::True | Filter::False | Filter::Abstract | Filter::Interface => Vec::new(),
            Filter::Not(child) => vec![child.to_string()],
            Filter::And(children) | Filter::Or(children) => {
                children.iter().map(Filter::to_string).collect()
            }
            Filter::Name { case, values }
            | Filter::Prefix { case, values }
            | Filter::Suffix { case, values } => {
                let mut args = Vec::with_capacity(values.len() + 1);
                args.push(case.name().to_string());
                let mut sorted = values.clone();
                sorted.sort_by_key(|v| v.to_lowercase());
                args.extend(sorted);
                args
            }
            Filter::Regex { case, pattern, .. } | Filter::Wildcard { case, pattern, .. } => {
                vec![case.name().to_string(), pattern.clone()]
            }
            Filter::HasAnnotation(annotation) => vec![annotation.clone()],
        }
    }

    /// Evaluate against a single candidate. Never fails: filters that cannot
    /// interpret the candidate's shape reject it.
    pub fn accept(&self, candidate: Candidate<'_>) -> bool {
        match self {
            Filter::True => true,
            Filter::False => false,
            Filter::Not(child) => !child.accept(candidate),
            Filter::And(children) => {
                !children.is_empty() && children.iter().all(|c| c.accept(candidate))
            }
            Filter::Or(children) => children.iter().any(|c| c.accept(candidate)),
            Filter::Name { case, values } => {
                let id = candidate.as_identifier();
                values.iter().any(|v| case.matches(id, v))
            }
            Filter::Prefix { case, values } => {
                let id = candidate.as_identifier();
                values.iter().any(|v| case.starts_with(id, v))
            }
            Filter::Suffix { case, values } => {
                let id = candidate.as_identifier();
                values.iter().any(|v| case.ends_with(id, v))
            }
            Filter::Regex { regex, .. } | Filter::Wildcard { regex, .. } => {
                regex.is_match(candidate.as_identifier())
            }
            Filter::HasAnnotation(annotation) => match candidate {
                Candidate::Type(handle) => handle.has_annotation(annotation),
                _ => false,
            },
            Filter::Abstract => matches!(candidate, Candidate::Type(h) if h.is_abstract()),
            Filter::Interface => matches!(candidate, Candidate::Type(h) if h.is_interface()),
        }
    }

    /// Evaluate against an identifier string.
    pub fn accept_name(&self, name: &str) -> bool {
        self.accept(Candidate::Name(name))
    }

    /// Evaluate against a resource locator.
    pub fn accept_location(&self, location: &Url) -> bool {
        self.accept(Candidate::Location(location))
    }

    /// Evaluate against a loaded type handle.
    pub fn accept_type(&self, handle: &dyn TypeHandle) -> bool {
        self.accept(Candidate::Type(handle))
    }

    /// Keep the identifiers the filter accepts, in input order.
    pub fn filter_names<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|n| self.accept_name(n)).collect()
    }

    /// Keep the locators the filter accepts, in input order.
    pub fn filter_locations<'a, I>(&self, locations: I) -> Vec<&'a Url>
    where
        I: IntoIterator<Item = &'a Url>,
    {
        locations
            .into_iter()
            .filter(|l| self.accept_location(l))
            .collect()
    }

    /// Keep the type handles the filter accepts, in input order.
    pub fn filter_types<'a, I, T>(&self, types: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: TypeHandle,
    {
        types.into_iter().filter(|t| self.accept_type(*t)).collect()
    }
}

impl fmt::Display for Filter {
    /// Canonical textual form: `Func()` or `Func( arg, arg )`. This string is
    /// the identity of the filter and round-trips through
    /// [`parse`](super::parser::parse).
    ///
    /// The grammar has no quoting, so a value containing a top-level comma
    /// (e.g. `a,b`) re-reads as two values. Such filters still parse; only
    /// the value boundaries shift.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args();
        write!(f, "{}(", self.func_name())?;
        if !args.is_empty() {
            write!(f, " {} ", args.join(", "))?;
        }
        f.write_str(")")
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// Translate a wildcard pattern into anchored regex source: `*` matches any
/// run, `?` matches a single character, everything else is literal.
pub fn make_regex(wildcard: &str) -> String {
    let mut source = String::with_capacity(wildcard.len() + 2);
    source.push('^');
    let mut literal = String::new();
    for ch in wildcard.chars() {
        match ch {
            '*' | '?' => {
                if !literal.is_empty() {
                    source.push_str(&regex::escape(&literal));
                    literal.clear();
                }
                source.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    if !literal.is_empty() {
        source.push_str(&regex::escape(&literal));
    }
    source.push('$');
    source
}

fn collect_values<I, S>(func: &'static str, values: I) -> Result<Vec<String>, FilterError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(FilterError::NoValues { func });
    }
    Ok(values)
}

fn compile(case: CasePolicy, source: &str, original: &str) -> Result<Regex, FilterError> {
    RegexBuilder::new(source)
        .case_insensitive(!case.is_sensitive())
        .build()
        .map_err(|err| FilterError::BadPattern {
            pattern: original.to_string(),
            source: Box::new(err),
        })
}
