mod inspector;
mod matcher;
mod root_caller;

pub use inspector::KeywordInspector;
pub use matcher::{KeywordMatcher, SubstringMatcher};
pub use root_caller::RootCallerResolver;

use crate::config::{InspectionConfig, DEFAULT_CONTAINER_SYMBOL};
use crate::program::{MethodId, Statement, StatementRef};

/// Filtering policy applied to every statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionPolicy {
    /// Only invocations of interesting APIs are eligible
    pub interested_api_only: bool,

    /// With `interested_api_only`, the target must also be library-declared
    pub api_in_libraries_only: bool,

    /// Record statements referencing `container_symbol`
    pub record_container_symbol: bool,

    pub container_symbol: String,
}

impl InspectionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interested_api_only(mut self, enabled: bool) -> Self {
        self.interested_api_only = enabled;
        self
    }

    pub fn with_api_in_libraries_only(mut self, enabled: bool) -> Self {
        self.api_in_libraries_only = enabled;
        self
    }

    pub fn with_record_container_symbol(mut self, enabled: bool) -> Self {
        self.record_container_symbol = enabled;
        self
    }

    pub fn with_container_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.container_symbol = symbol.into();
        self
    }

    /// Scope under which a statement may produce hits, `None` if it is filtered out
    pub fn scope_of(&self, statement: &Statement) -> Option<HitScope> {
        if !self.interested_api_only {
            return Some(HitScope::AnyStatement);
        }

        let invocation = statement.invocation.as_ref()?;
        if !invocation.interesting {
            return None;
        }

        if self.api_in_libraries_only {
            invocation.library.then_some(HitScope::LibraryApi)
        } else {
            Some(HitScope::InterestingApi)
        }
    }

    pub fn is_eligible(&self, statement: &Statement) -> bool {
        self.scope_of(statement).is_some()
    }
}

impl Default for InspectionPolicy {
    fn default() -> Self {
        Self {
            interested_api_only: true,
            api_in_libraries_only: false,
            record_container_symbol: false,
            container_symbol: DEFAULT_CONTAINER_SYMBOL.to_string(),
        }
    }
}

impl From<&InspectionConfig> for InspectionPolicy {
    fn from(config: &InspectionConfig) -> Self {
        Self {
            interested_api_only: config.interested_api_only,
            api_in_libraries_only: config.api_in_libraries_only,
            record_container_symbol: config.record_container_symbol,
            container_symbol: config.container_symbol.clone(),
        }
    }
}

/// Why a statement was eligible for keyword matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitScope {
    /// API filtering disabled, every statement is inspected
    AnyStatement,
    /// Invocation of an interesting API
    InterestingApi,
    /// Invocation of an interesting API declared in library code
    LibraryApi,
}

impl HitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitScope::AnyStatement => "any-statement",
            HitScope::InterestingApi => "interesting-api",
            HitScope::LibraryApi => "library-api",
        }
    }
}

impl std::fmt::Display for HitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A keyword found in an eligible statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// The matching statement
    pub statement: StatementRef,

    /// Text form of the statement at inspection time
    pub text: String,

    /// Keyword found in `text`
    pub keyword: String,

    /// Eligibility path that let the statement be inspected
    pub scope: HitScope,
}

impl Hit {
    /// Method containing the statement
    pub fn method(&self) -> MethodId {
        self.statement.method
    }
}
