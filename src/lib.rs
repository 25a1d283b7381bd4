//! keywordtrace - find keywords in an Android app's IR and trace them to entry points
//!
//! This library scans the statements of an analyzed application for
//! user-supplied keywords and walks the call graph backward from every hit
//! to the entry-point classes that can reach it.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Model Loading** - Build a `ProgramGraph` from an exported program model
//! 2. **Keyword Loading** - Read the keyword list into a `KeywordSet`
//! 3. **Inspection** - `KeywordInspector` matches keywords under an `InspectionPolicy`
//! 4. **Root Caller Resolution** - `RootCallerResolver` walks callers back to roots
//! 5. **Reporting** - Output results as colored text or JSON

pub mod analysis;
pub mod config;
pub mod keywords;
pub mod program;
pub mod report;

pub use analysis::{Hit, HitScope, InspectionPolicy, KeywordInspector, RootCallerResolver};
pub use config::Config;
pub use keywords::KeywordSet;
pub use program::{AnalysisFacade, ModelLoader, ProgramBuilder, ProgramGraph};
pub use report::{AuditResults, ReportFormat, Reporter};
