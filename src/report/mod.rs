mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::{InspectionPolicy, KeywordInspector, RootCallerResolver};
use crate::program::{AnalysisFacade, MethodDescriptor, MethodId};
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    /// Parse a format name from configuration, `None` if unknown
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "terminal" | "text" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Everything a reporter needs from one analysis run
pub struct AuditResults<'a> {
    pub program: &'a dyn AnalysisFacade,
    pub inspector: &'a KeywordInspector,
    pub resolver: &'a RootCallerResolver,
    pub policy: &'a InspectionPolicy,
}

/// Short `Class.method` label for a method, `None` if its signature does not parse
pub(crate) fn short_name(program: &dyn AnalysisFacade, id: MethodId) -> Option<String> {
    let method = program.method(id)?;
    let descriptor = MethodDescriptor::parse(&method.signature)?;
    let class = program
        .declaring_class(id)
        .map(|c| c.simple_name())
        .unwrap_or(descriptor.class_name.as_str());
    Some(format!("{}.{}", class, descriptor.name))
}

/// Reporter for outputting keyword audit results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_roots: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_roots: true,
        }
    }

    /// Print root caller methods under each hit (terminal output only)
    pub fn with_roots(mut self, show: bool) -> Self {
        self.show_roots = show;
        self
    }

    pub fn report(&self, results: &AuditResults<'_>) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new().with_roots(self.show_roots);
                reporter.report(results)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(results)
            }
        }
    }
}
