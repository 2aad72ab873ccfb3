pub mod cli;
pub mod filter;

pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use filter::{Candidate, CasePolicy, Filter, FilterError, ParseError, TypeHandle, TypeRecord};
pub use filter::{make_regex, parse, strip_class_suffix};

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use std::fmt::Write as _;
use std::io::Read as _;
use std::path::Path;

/// Read candidate names from a file, one per line, skipping blanks.
pub fn load_candidates(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidate file '{}'", path.display()))?;
    Ok(collect_candidates(&content))
}

fn collect_candidates(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render the parse tree of a filter with one node per line, children
/// indented under their parent, each composite annotated with its execution
/// rank.
pub fn explain_tree(filter: &Filter) -> String {
    let mut out = String::new();
    render_node(filter, 0, &mut out);
    out
}

fn render_node(filter: &Filter, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let rank = filter::optimize::execution_rank(filter);
    match filter {
        Filter::Not(child) => {
            let _ = writeln!(out, "{indent}Not  [rank {rank}]");
            render_node(child, depth + 1, out);
        }
        Filter::And(children) | Filter::Or(children) => {
            let _ = writeln!(out, "{indent}{}  [rank {rank}]", filter.func_name());
            for child in children {
                render_node(child, depth + 1, out);
            }
        }
        leaf => {
            let _ = writeln!(out, "{indent}{leaf}  [rank {rank}]");
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let format = cli.format;

    match &cli.command {
        Commands::Check {
            expression,
            names,
            file,
            invert,
            no_optimize,
        } => {
            let parsed = parse(expression)
                .with_context(|| format!("Invalid filter expression: {expression}"))?;
            let filter = if *no_optimize {
                parsed
            } else {
                parsed.optimize()
            };

            let candidates = if let Some(path) = file {
                load_candidates(path)?
            } else if !names.is_empty() {
                names.clone()
            } else {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read candidate names from stdin")?;
                collect_candidates(&buffer)
            };

            let accepted = filter.filter_names(candidates.iter().map(String::as_str));
            let selected: Vec<&str> = if *invert {
                let keep: std::collections::HashSet<&str> = accepted.iter().copied().collect();
                candidates
                    .iter()
                    .map(String::as_str)
                    .filter(|n| !keep.contains(n))
                    .collect()
            } else {
                accepted
            };

            match format {
                OutputFormat::Text => {
                    for name in &selected {
                        println!("{name}");
                    }
                    eprintln!(
                        "{}",
                        format!(
                            "{} of {} candidate(s) {} {}",
                            selected.len(),
                            candidates.len(),
                            if *invert { "rejected by" } else { "accepted by" },
                            filter
                        )
                        .dimmed()
                    );
                }
                OutputFormat::Json => {
                    let report = json!({
                        "expression": expression,
                        "filter": filter.to_string(),
                        "inverted": invert,
                        "total": candidates.len(),
                        "selected": selected,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        Commands::Optimize { expression } => {
            let parsed = parse(expression)
                .with_context(|| format!("Invalid filter expression: {expression}"))?;
            let optimized = parsed.optimize();
            match format {
                OutputFormat::Text => {
                    println!("{} {}", "canonical:".bold(), parsed);
                    println!("{} {}", "optimized:".bold(), optimized);
                }
                OutputFormat::Json => {
                    let report = json!({
                        "expression": expression,
                        "canonical": parsed.to_string(),
                        "optimized": optimized.to_string(),
                        "changed": parsed != optimized,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        Commands::Explain { expression } => {
            let parsed = parse(expression)
                .with_context(|| format!("Invalid filter expression: {expression}"))?;
            match format {
                OutputFormat::Text => print!("{}", explain_tree(&parsed)),
                OutputFormat::Json => {
                    let report = json!({
                        "expression": expression,
                        "canonical": parsed.to_string(),
                        "tree": explain_tree(&parsed),
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_candidates_skips_blank_lines() {
        let content = "org.example.Foo\n\n  org.example.Bar  \n";
        assert_eq!(
            collect_candidates(content),
            vec!["org.example.Foo", "org.example.Bar"]
        );
    }

    #[test]
    fn test_explain_tree_indents_children() {
        let filter = parse("And( Name( Sensitive, foo ), Abstract() )").unwrap();
        let rendered = explain_tree(&filter);
        assert_eq!(
            rendered,
            "And  [rank 10]\n  Name( Sensitive, foo )  [rank 1]\n  Abstract()  [rank 100]\n"
        );
    }
}
