use super::{Hit, InspectionPolicy, KeywordMatcher, SubstringMatcher};
use crate::keywords::KeywordSet;
use crate::program::{text_form, AnalysisFacade, ClassId, StatementRef};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, trace};

/// Scans every in-scope statement for keywords
///
/// All results are computed up front by [`KeywordInspector::inspect`]; the
/// accessors are plain reads.
#[derive(Debug, Clone, Default)]
pub struct KeywordInspector {
    hits: Vec<Hit>,
    keywords_hit: BTreeSet<String>,
    keywords_in_package: BTreeSet<String>,
    container_symbol_statements: Vec<String>,
}

impl KeywordInspector {
    /// Inspect the program with literal substring matching
    pub fn inspect<F>(facade: &F, keywords: &KeywordSet, policy: &InspectionPolicy) -> Self
    where
        F: AnalysisFacade + ?Sized,
    {
        Self::inspect_with(facade, keywords, policy, &SubstringMatcher)
    }

    /// Inspect the program with a custom matching strategy
    pub fn inspect_with<F, M>(
        facade: &F,
        keywords: &KeywordSet,
        policy: &InspectionPolicy,
        matcher: &M,
    ) -> Self
    where
        F: AnalysisFacade + ?Sized,
        M: KeywordMatcher + ?Sized,
    {
        let mut inspector = Self::default();
        let mut seen_classes: HashSet<ClassId> = HashSet::new();

        for method_id in facade.methods() {
            let Some(method) = facade.method(method_id) else {
                continue;
            };

            // Package keywords are checked once per class
            if seen_classes.insert(method.class) {
                if let Some(class) = facade.class(method.class) {
                    for keyword in keywords.iter() {
                        if matcher.matches(&class.package, keyword) {
                            trace!("Keyword '{}' in package {}", keyword, class.package);
                            inspector.keywords_in_package.insert(keyword.to_string());
                        }
                    }
                }
            }

            for (index, statement) in facade.statements(method_id).iter().enumerate() {
                let text = text_form(statement);

                if policy.record_container_symbol
                    && !policy.container_symbol.is_empty()
                    && text.contains(&policy.container_symbol)
                {
                    inspector.container_symbol_statements.push(text.to_string());
                }

                let Some(scope) = policy.scope_of(statement) else {
                    continue;
                };

                for keyword in keywords.iter() {
                    if !matcher.matches(text, keyword) {
                        continue;
                    }

                    debug!("Hit '{}' in {}: {}", keyword, method.signature, text);
                    inspector.keywords_hit.insert(keyword.to_string());
                    inspector.hits.push(Hit {
                        statement: StatementRef {
                            method: method_id,
                            index,
                        },
                        text: text.to_string(),
                        keyword: keyword.to_string(),
                        scope,
                    });
                }
            }
        }

        info!(
            "Keyword inspection: {} hits, {} distinct keywords, {} keywords in packages",
            inspector.hits.len(),
            inspector.keywords_hit.len(),
            inspector.keywords_in_package.len()
        );

        inspector
    }

    /// Hits in method/statement enumeration order
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Distinct keywords that produced at least one hit
    pub fn keywords_hit(&self) -> &BTreeSet<String> {
        &self.keywords_hit
    }

    /// Keywords found in the package name of any inspected class
    pub fn keywords_in_package(&self) -> &BTreeSet<String> {
        &self.keywords_in_package
    }

    /// Statements referencing the container symbol, empty unless recording is on
    pub fn container_symbol_statements(&self) -> &[String] {
        &self.container_symbol_statements
    }
}
