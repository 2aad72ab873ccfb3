use super::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// String comparison mode shared by the name, prefix, suffix, regex and
/// wildcard filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CasePolicy {
    /// Exact character comparison.
    #[default]
    Sensitive,
    /// Case-insensitive comparison; regex filters map this to the engine's
    /// case-insensitive flag.
    Insensitive,
}

impl CasePolicy {
    /// The name used as the first serialized argument of string filters.
    pub fn name(self) -> &'static str {
        match self {
            CasePolicy::Sensitive => "Sensitive",
            CasePolicy::Insensitive => "Insensitive",
        }
    }

    pub fn is_sensitive(self) -> bool {
        self == CasePolicy::Sensitive
    }

    /// Equality under this policy. Named to stay clear of [`PartialEq::eq`],
    /// which otherwise wins method resolution on a borrowed receiver.
    pub fn matches(self, left: &str, right: &str) -> bool {
        match self {
            CasePolicy::Sensitive => left == right,
            CasePolicy::Insensitive => left.to_lowercase() == right.to_lowercase(),
        }
    }

    /// Prefix check under this policy.
    pub fn starts_with(self, value: &str, prefix: &str) -> bool {
        match self {
            CasePolicy::Sensitive => value.starts_with(prefix),
            CasePolicy::Insensitive => value.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }

    /// Suffix check under this policy.
    pub fn ends_with(self, value: &str, suffix: &str) -> bool {
        match self {
            CasePolicy::Sensitive => value.ends_with(suffix),
            CasePolicy::Insensitive => value.to_lowercase().ends_with(&suffix.to_lowercase()),
        }
    }
}

impl fmt::Display for CasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CasePolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sensitive" => Ok(CasePolicy::Sensitive),
            "Insensitive" => Ok(CasePolicy::Insensitive),
            _ => Err(ParseError::UnknownCasePolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_comparisons() {
        let case = CasePolicy::Sensitive;
        assert!(case.matches("org.example.Foo", "org.example.Foo"));
        assert!(!case.matches("org.example.Foo", "org.example.foo"));
        assert!(case.starts_with("org.example.Foo", "org.example"));
        assert!(!case.starts_with("org.example.Foo", "ORG.example"));
        assert!(case.ends_with("org.example.Foo", "Foo"));
        assert!(!case.ends_with("org.example.Foo", "foo"));
    }

    #[test]
    fn test_matches_resolves_through_a_borrowed_policy() {
        // evaluation sites hold &CasePolicy out of a matched filter node;
        // the derived PartialEq::eq must not shadow the string comparison
        let case = &CasePolicy::Insensitive;
        assert!(case.matches("org.example.Foo", "ORG.EXAMPLE.FOO"));
    }

    #[test]
    fn test_insensitive_comparisons() {
        let case = CasePolicy::Insensitive;
        assert!(case.matches("org.example.Foo", "ORG.Example.FOO"));
        assert!(case.starts_with("org.example.Foo", "ORG.example"));
        assert!(case.ends_with("org.example.Foo", "FOO"));
        assert!(!case.matches("org.example.Foo", "org.example.Bar"));
    }

    #[test]
    fn test_parse_policy_names() {
        assert_eq!("Sensitive".parse::<CasePolicy>().unwrap(), CasePolicy::Sensitive);
        assert_eq!(
            "Insensitive".parse::<CasePolicy>().unwrap(),
            CasePolicy::Insensitive
        );
        assert!("sensitive".parse::<CasePolicy>().is_err());
    }
}
