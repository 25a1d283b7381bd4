use super::{short_name, AuditResults};
use crate::program::MethodId;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, results: &AuditResults<'_>) -> Result<()> {
        let report = JsonReport::from_results(results);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
pub(crate) struct JsonReport {
    version: &'static str,
    policy: JsonPolicy,
    hits: Vec<JsonHit>,
    keywords_hit: Vec<String>,
    keywords_in_package: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_symbol_statements: Option<Vec<String>>,
    root_caller_classes: Vec<String>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonPolicy {
    interested_api_only: bool,
    api_in_libraries_only: bool,
    record_container_symbol: bool,
    container_symbol: String,
}

#[derive(Serialize)]
struct JsonHit {
    keyword: String,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    method_name: Option<String>,
    class: Option<String>,
    statement_index: usize,
    statement: String,
    scope: &'static str,
    root_callers: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total_hits: usize,
    distinct_keywords: usize,
    methods_with_hits: usize,
    root_caller_classes: usize,
}

impl JsonReport {
    pub(crate) fn from_results(results: &AuditResults<'_>) -> Self {
        let program = results.program;
        let signature = |id: MethodId| {
            program
                .method(id)
                .map(|m| m.signature.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let hits: Vec<JsonHit> = results
            .inspector
            .hits()
            .iter()
            .map(|hit| JsonHit {
                keyword: hit.keyword.clone(),
                method: signature(hit.method()),
                method_name: short_name(program, hit.method()),
                class: program.declaring_class(hit.method()).map(|c| c.name.clone()),
                statement_index: hit.statement.index,
                statement: hit.text.clone(),
                scope: hit.scope.as_str(),
                root_callers: results
                    .resolver
                    .roots_for(hit.method())
                    .iter()
                    .map(|&root| signature(root))
                    .collect(),
            })
            .collect();

        let mut methods: Vec<_> = results.inspector.hits().iter().map(|h| h.method()).collect();
        methods.sort_unstable();
        methods.dedup();

        let policy = results.policy;
        Self {
            version: "1.0",
            policy: JsonPolicy {
                interested_api_only: policy.interested_api_only,
                api_in_libraries_only: policy.api_in_libraries_only,
                record_container_symbol: policy.record_container_symbol,
                container_symbol: policy.container_symbol.clone(),
            },
            summary: JsonSummary {
                total_hits: hits.len(),
                distinct_keywords: results.inspector.keywords_hit().len(),
                methods_with_hits: methods.len(),
                root_caller_classes: results.resolver.root_caller_classes().len(),
            },
            hits,
            keywords_hit: results.inspector.keywords_hit().iter().cloned().collect(),
            keywords_in_package: results.inspector.keywords_in_package().iter().cloned().collect(),
            container_symbol_statements: policy
                .record_container_symbol
                .then(|| results.inspector.container_symbol_statements().to_vec()),
            root_caller_classes: results.resolver.root_caller_classes().iter().cloned().collect(),
        }
    }
}
