//! Filter expression algebra for classifying classpath identifiers.
//!
//! A filter is an immutable tree of predicate nodes evaluated against class
//! names, resource locators or loaded type handles. Trees serialize to a
//! canonical textual form that parses back to an equal tree, and
//! [`Filter::optimize`] rewrites a tree into a simplified canonical shape.
//!
//! # Syntax
//!
//! ```text
//! True() / False()                      constants
//! Not( f ) / And( f, g, ... ) / Or( f, g, ... )   composites
//! Name( Sensitive, org.example.Foo )    exact identifier match
//! Prefix( Sensitive, org.example )      identifier prefix
//! Suffix( Insensitive, test )           identifier suffix
//! Regex( Sensitive, ^.+x.+$ )           whole-identifier regex
//! Wildcard( Sensitive, *Foo?Bar )       shell-style wildcard
//! HasAnnotation( org.example.Marker )   reflective checks
//! Abstract() / Interface()
//! ```
//!
//! # Examples
//!
//! ```
//! use class_filter::filter::{CasePolicy, Filter, parse};
//!
//! let filter = Filter::and(vec![
//!     Filter::prefix(CasePolicy::Sensitive, ["org.example"]).unwrap(),
//!     Filter::not(Filter::suffix(CasePolicy::Sensitive, ["Test"]).unwrap()),
//! ])
//! .unwrap()
//! .optimize();
//!
//! assert!(filter.accept_name("org.example.Widget"));
//! assert!(!filter.accept_name("org.example.WidgetTest"));
//! assert_eq!(parse(&filter.to_string()).unwrap(), filter);
//! ```

pub mod candidate;
pub mod case;
pub mod error;
pub mod node;
pub mod optimize;
pub mod parser;

pub use candidate::{Candidate, TypeHandle, TypeRecord, strip_class_suffix};
pub use case::CasePolicy;
pub use error::{FilterError, ParseError};
pub use node::{Filter, make_regex};
pub use parser::parse;
