use super::{short_name, AuditResults};
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Print each hit's root caller methods under it
    show_roots: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_roots: true }
    }

    pub fn with_roots(mut self, show: bool) -> Self {
        self.show_roots = show;
        self
    }

    pub fn report(&self, results: &AuditResults<'_>) -> Result<()> {
        self.print_hits(results);

        print_section(
            "Keywords hit",
            results.inspector.keywords_hit().iter().map(String::as_str),
        );
        print_section(
            "Keywords in package",
            results.inspector.keywords_in_package().iter().map(String::as_str),
        );

        if results.policy.record_container_symbol {
            print_section(
                &format!("Statements using {}", results.policy.container_symbol),
                results
                    .inspector
                    .container_symbol_statements()
                    .iter()
                    .map(String::as_str),
            );
        }

        print_section(
            "Root caller classes",
            results.resolver.root_caller_classes().iter().map(String::as_str),
        );

        self.print_summary(results);
        Ok(())
    }

    fn print_hits(&self, results: &AuditResults<'_>) {
        let hits = results.inspector.hits();
        println!();
        if hits.is_empty() {
            println!("{}", "No statements with keywords found.".green().bold());
            println!();
            return;
        }

        println!(
            "{}",
            format!("Statements with keywords ({}):", hits.len())
                .yellow()
                .bold()
        );

        // Group by containing method
        let mut by_method = BTreeMap::new();
        for hit in hits {
            by_method.entry(hit.method()).or_insert_with(Vec::new).push(hit);
        }

        for (method, method_hits) in by_method {
            let signature = results
                .program
                .method(method)
                .map(|m| m.signature.as_str())
                .unwrap_or("<unknown method>");
            println!("{}", signature.cyan().bold());

            for hit in method_hits {
                println!(
                    "  {} [{}] {}",
                    format!("#{}", hit.statement.index).dimmed(),
                    hit.keyword.red().bold(),
                    hit.text
                );
            }

            if self.show_roots {
                for &root in results.resolver.roots_for(method) {
                    let root_signature = results
                        .program
                        .method(root)
                        .map(|m| m.signature.as_str())
                        .unwrap_or("<unknown method>");
                    match short_name(results.program, root) {
                        Some(label) => println!(
                            "    {} {} {}",
                            "←".dimmed(),
                            label.white().bold(),
                            root_signature.dimmed()
                        ),
                        None => println!("    {} {}", "←".dimmed(), root_signature.white()),
                    }
                }
            }
        }
        println!();
    }

    fn print_summary(&self, results: &AuditResults<'_>) {
        println!("{}", "─".repeat(60).dimmed());
        println!(
            "Summary: {}, {}, {}",
            format!("{} hits", results.inspector.hits().len()).yellow(),
            format!("{} keywords", results.inspector.keywords_hit().len()).yellow(),
            format!(
                "{} root caller classes",
                results.resolver.root_caller_classes().len()
            )
            .cyan()
        );

        if !results.policy.interested_api_only {
            println!(
                "{}",
                "Note: API filtering disabled, every statement was inspected".dimmed()
            );
        } else if results.policy.api_in_libraries_only {
            println!(
                "{}",
                "Note: library classification is best-effort and may be incomplete".dimmed()
            );
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn print_section<'a>(title: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    println!(
        "{}",
        format!("{} ({}):", title, items.len()).yellow().bold()
    );
    if items.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for item in items {
        println!("  {}", item);
    }
    println!();
}
