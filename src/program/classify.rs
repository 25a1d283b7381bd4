// Best-effort classification of invocation targets.
//
// Library detection is a package-prefix heuristic and is known to be
// incomplete: obfuscated or repackaged libraries are reported as app code.

use super::{Invocation, MethodDescriptor};
use crate::config::{glob_match, ClassificationConfig};

/// Classifies invocation targets as interesting and/or library-declared
#[derive(Debug, Clone)]
pub struct ApiClassifier {
    interesting_apis: Vec<String>,
    library_packages: Vec<String>,
}

impl ApiClassifier {
    pub fn new(config: &ClassificationConfig) -> Self {
        Self {
            interesting_apis: config.interesting_apis.clone(),
            library_packages: config.library_packages.clone(),
        }
    }

    /// Whether the target's declaring class matches an interesting API pattern
    pub fn is_interesting(&self, target: &str) -> bool {
        MethodDescriptor::class_of(target)
            .map(|class| self.interesting_apis.iter().any(|p| glob_match(p, class)))
            .unwrap_or(false)
    }

    /// Whether the target's declaring class looks like library code
    pub fn is_library(&self, target: &str) -> bool {
        MethodDescriptor::class_of(target)
            .map(|class| self.library_packages.iter().any(|p| glob_match(p, class)))
            .unwrap_or(false)
    }

    /// Build an invocation record, preferring explicit flags over the heuristics
    pub fn invocation(
        &self,
        target: String,
        interesting: Option<bool>,
        library: Option<bool>,
    ) -> Invocation {
        let interesting = interesting.unwrap_or_else(|| self.is_interesting(&target));
        let library = library.unwrap_or_else(|| self.is_library(&target));
        Invocation {
            target,
            interesting,
            library,
        }
    }
}

impl Default for ApiClassifier {
    fn default() -> Self {
        Self::new(&ClassificationConfig::default())
    }
}
