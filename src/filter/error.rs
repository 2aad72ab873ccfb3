use thiserror::Error;

/// Errors raised when constructing filter nodes directly.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{func}() requires at least 2 sub-filters, got {found}")]
    InvalidArity { func: &'static str, found: usize },

    #[error("{func}() requires at least one value")]
    NoValues { func: &'static str },

    #[error("invalid pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Errors raised when reading a filter expression from its textual form.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unterminated filter expression: '{0}'")]
    Unterminated(String),

    #[error("expected 'Func( ... )', got: '{0}'")]
    Malformed(String),

    #[error("unexpected input after filter expression: '{0}'")]
    TrailingInput(String),

    #[error("unknown filter function: '{0}'")]
    UnknownFunction(String),

    #[error("{func}() expects {expected}, got {found} argument(s)")]
    WrongArgumentCount {
        func: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("{func}() expects a nested filter expression, got literal '{arg}'")]
    ExpectedExpression { func: &'static str, arg: String },

    #[error("unknown case policy: '{0}'. Valid policies are: Sensitive, Insensitive")]
    UnknownCasePolicy(String),

    #[error(transparent)]
    InvalidFilter(#[from] FilterError),
}
