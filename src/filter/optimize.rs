//! Canonicalization pass over filter trees.
//!
//! `optimize` folds constants, flattens nested conjunctions/disjunctions,
//! removes duplicate children and re-orders the survivors so the cheapest
//! checks run first. The result is semantically equivalent to the input and
//! the pass is idempotent.

use super::case::CasePolicy;
use super::node::Filter;
use std::collections::HashSet;

impl Filter {
    /// Return a canonical, simplified, semantically equivalent tree. Returns
    /// a copy of `self` when nothing changed.
    pub fn optimize(&self) -> Filter {
        match self {
            Filter::Not(child) => {
                let optimized = child.optimize();
                match optimized {
                    Filter::False => Filter::True,
                    Filter::True => Filter::False,
                    optimized if optimized.to_string() == child.to_string() => self.clone(),
                    optimized => Filter::not(optimized),
                }
            }
            Filter::And(children) => optimize_gate(self, children, Gate::And),
            Filter::Or(children) => optimize_gate(self, children, Gate::Or),
            Filter::Name { case, values } => {
                optimize_string_leaf(self, *case, values, |case, values| Filter::Name {
                    case,
                    values,
                })
            }
            Filter::Prefix { case, values } => {
                optimize_string_leaf(self, *case, values, |case, values| Filter::Prefix {
                    case,
                    values,
                })
            }
            Filter::Suffix { case, values } => {
                optimize_string_leaf(self, *case, values, |case, values| Filter::Suffix {
                    case,
                    values,
                })
            }
            // no internal reducibility
            _ => self.clone(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Gate {
    And,
    Or,
}

/// Ranking used to sort composite children for short-circuit savings. A
/// composite wrapping a single effective child ranks as that child.
pub(crate) fn execution_rank(filter: &Filter) -> u32 {
    let effective = match filter {
        Filter::Not(child) => child,
        Filter::And(children) | Filter::Or(children) if children.len() == 1 => &children[0],
        _ => filter,
    };
    match effective {
        Filter::True | Filter::False => 0,
        Filter::Name { .. }
        | Filter::Prefix { .. }
        | Filter::Suffix { .. }
        | Filter::Regex { .. }
        | Filter::Wildcard { .. } => 1,
        Filter::Not(_) | Filter::And(_) | Filter::Or(_) => 10,
        Filter::HasAnnotation(_) | Filter::Abstract | Filter::Interface => 100,
    }
}

fn optimize_gate(original: &Filter, children: &[Filter], gate: Gate) -> Filter {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<Filter> = Vec::new();
    let mut changed = false;

    let mut push_unique = |kept: &mut Vec<Filter>, changed: &mut bool, filter: Filter| {
        if seen.insert(filter.to_string()) {
            kept.push(filter);
        } else {
            *changed = true;
        }
    };

    for child in children {
        let optimized = child.optimize();
        if optimized.to_string() != child.to_string() {
            changed = true;
        }
        match (optimized, gate) {
            // absorbing constant folds the whole gate
            (Filter::False, Gate::And) => return Filter::False,
            (Filter::True, Gate::Or) => return Filter::True,
            // identity constant is dropped
            (Filter::True, Gate::And) | (Filter::False, Gate::Or) => changed = true,
            // same-gate child is spliced in; its children are already flat
            (Filter::And(grandchildren), Gate::And) | (Filter::Or(grandchildren), Gate::Or) => {
                changed = true;
                for grandchild in grandchildren {
                    push_unique(&mut kept, &mut changed, grandchild);
                }
            }
            (optimized, _) => push_unique(&mut kept, &mut changed, optimized),
        }
    }

    if kept.is_empty() {
        // an emptied gate folds to False for both And and Or
        return Filter::False;
    }
    if kept.len() == 1 {
        return kept.into_iter().next().expect("one child");
    }

    let unsorted: Option<Vec<String>> =
        (!changed).then(|| kept.iter().map(Filter::to_string).collect());
    kept.sort_by_key(execution_rank);
    if let Some(before) = unsorted {
        let after: Vec<String> = kept.iter().map(Filter::to_string).collect();
        if before == after {
            return original.clone();
        }
    }

    match gate {
        Gate::And => Filter::And(kept),
        Gate::Or => Filter::Or(kept),
    }
}

fn optimize_string_leaf(
    original: &Filter,
    case: CasePolicy,
    values: &[String],
    rebuild: fn(CasePolicy, Vec<String>) -> Filter,
) -> Filter {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept: Vec<String> = Vec::new();
    for value in values {
        if seen.insert(value.as_str()) {
            kept.push(value.clone());
        }
    }
    if kept.is_empty() {
        return Filter::False;
    }
    if kept.iter().any(|v| v.is_empty()) {
        return Filter::True;
    }
    if kept.len() == values.len() {
        return original.clone();
    }
    rebuild(case, kept)
}
