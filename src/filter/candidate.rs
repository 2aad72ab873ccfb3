use serde::{Deserialize, Serialize};
use url::Url;

/// Capability surface over an already-loaded type. The scanning collaborator
/// supplies the implementation; the filter core only queries it.
pub trait TypeHandle {
    /// Fully-qualified type name, e.g. `org.example.Foo`.
    fn qualified_name(&self) -> &str;

    fn is_abstract(&self) -> bool;

    fn is_interface(&self) -> bool;

    fn has_annotation(&self, annotation: &str) -> bool;
}

/// Plain metadata record implementing [`TypeHandle`]. Lets scanners feed type
/// information without holding a live loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeRecord {
    pub name: String,
    pub is_abstract: bool,
    pub is_interface: bool,
    pub annotations: Vec<String>,
}

impl TypeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        TypeRecord {
            name: name.into(),
            ..TypeRecord::default()
        }
    }
}

impl TypeHandle for TypeRecord {
    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn is_interface(&self) -> bool {
        self.is_interface
    }

    fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }
}

/// One input to evaluate a filter against. String filters stringify the
/// locator and type shapes; reflective filters only answer for `Type`.
#[derive(Clone, Copy)]
pub enum Candidate<'a> {
    /// A fully-qualified identifier such as a class name.
    Name(&'a str),
    /// A resource locator; compared by its serialized external form.
    Location(&'a Url),
    /// A loaded type handle.
    Type(&'a dyn TypeHandle),
}

impl<'a> Candidate<'a> {
    /// The string form used by name/prefix/suffix/regex/wildcard filters.
    pub fn as_identifier(&self) -> &'a str {
        match *self {
            Candidate::Name(name) => name,
            Candidate::Location(url) => url.as_str(),
            Candidate::Type(handle) => handle.qualified_name(),
        }
    }
}

/// Strip a trailing `.class` resource extension from a candidate identifier.
pub fn strip_class_suffix(name: &str) -> &str {
    name.strip_suffix(".class").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_class_suffix() {
        assert_eq!(strip_class_suffix("org.example.Foo.class"), "org.example.Foo");
        assert_eq!(strip_class_suffix("org.example.Foo"), "org.example.Foo");
        assert_eq!(strip_class_suffix(".class"), "");
    }

    #[test]
    fn test_type_record_annotations() {
        let record = TypeRecord {
            name: "org.example.Foo".to_string(),
            annotations: vec!["org.example.Marker".to_string()],
            ..TypeRecord::default()
        };
        assert!(record.has_annotation("org.example.Marker"));
        assert!(!record.has_annotation("org.example.Other"));
    }

    #[test]
    fn test_candidate_identifier_forms() {
        assert_eq!(Candidate::Name("org.example.Foo").as_identifier(), "org.example.Foo");

        let url = Url::parse("http://example.com/a.jar").unwrap();
        assert_eq!(
            Candidate::Location(&url).as_identifier(),
            "http://example.com/a.jar"
        );

        let record = TypeRecord::new("org.example.Foo");
        assert_eq!(Candidate::Type(&record).as_identifier(), "org.example.Foo");
    }
}
