use serde::{Deserialize, Serialize};

/// Index of a method in the program's method arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub usize);

impl MethodId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for MethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Index of a class in the program's class arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A class declared by the analyzed application or one of its libraries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Fully qualified name, e.g. `com.example.MainActivity`
    pub name: String,

    /// Package name, e.g. `com.example` (empty for the default package)
    pub package: String,
}

impl Class {
    /// Create a class whose package is derived from its qualified name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let package = package_of(&name).to_string();
        Self { name, package }
    }

    pub fn with_package(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    /// Simple name without the package prefix
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Package part of a qualified class name
pub fn package_of(class_name: &str) -> &str {
    class_name
        .rfind('.')
        .map(|idx| &class_name[..idx])
        .unwrap_or("")
}

/// A method with its ordered statement body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Full IR signature, e.g. `<com.example.A: void run()>`
    pub signature: String,

    /// Declaring class
    pub class: ClassId,

    /// Statements in body order
    pub body: Vec<Statement>,
}

/// Invocation details of a statement that calls a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Descriptor of the invoked method
    pub target: String,

    /// Whether the target is an API the analysis cares about
    pub interesting: bool,

    /// Whether the target is declared in library code (best-effort)
    pub library: bool,
}

/// A single IR statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Printed form, including literals and invoked descriptors
    pub text: String,

    /// Present when the statement invokes a method
    pub invocation: Option<Invocation>,
}

impl Statement {
    /// A statement that does not invoke anything
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            invocation: None,
        }
    }

    /// An invocation statement with explicit classification
    pub fn invoke(
        text: impl Into<String>,
        target: impl Into<String>,
        interesting: bool,
        library: bool,
    ) -> Self {
        Self {
            text: text.into(),
            invocation: Some(Invocation {
                target: target.into(),
                interesting,
                library,
            }),
        }
    }

    pub fn is_invocation(&self) -> bool {
        self.invocation.is_some()
    }
}

/// Text form a statement is matched against
pub fn text_form(statement: &Statement) -> &str {
    &statement.text
}

/// Location of a statement inside a method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementRef {
    pub method: MethodId,
    pub index: usize,
}
