// Loader for exported program models.
//
// A model file lists classes, methods with their statement bodies, and
// call edges. Format:
//
// ```json
// {
//   "classes": [{ "name": "com.example.MainActivity", "package": "com.example" }],
//   "methods": [{
//     "signature": "<com.example.MainActivity: void onCreate(android.os.Bundle)>",
//     "class": "com.example.MainActivity",
//     "body": [
//       { "text": "$r1 = \"token\"" },
//       { "text": "staticinvoke <android.util.Log: ...>($r1)",
//         "invoke": { "target": "<android.util.Log: ...>", "interesting": true } }
//     ]
//   }],
//   "call_edges": [{ "caller": "<...>", "callee": "<...>" }]
// }
// ```

use super::{
    AnalysisFacade, ApiClassifier, Class, ModelError, ProgramBuilder, ProgramGraph, Statement,
};
use crate::config::ClassificationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Serialized program model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelFile {
    pub classes: Vec<ClassEntry>,
    pub methods: Vec<MethodEntry>,
    pub call_edges: Vec<CallEdgeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEntry {
    pub signature: String,
    pub class: String,
    #[serde(default)]
    pub body: Vec<StatementEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoke: Option<InvokeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeEntry {
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interesting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEdgeEntry {
    pub caller: String,
    pub callee: String,
}

/// Builds a `ProgramGraph` from a model file
pub struct ModelLoader {
    classifier: ApiClassifier,
    synthetic_entry_classes: Vec<String>,
}

impl ModelLoader {
    pub fn new(config: &ClassificationConfig) -> Self {
        Self {
            classifier: ApiClassifier::new(config),
            synthetic_entry_classes: config.synthetic_entry_classes.clone(),
        }
    }

    /// Load a model file; the extension selects JSON or YAML
    pub fn load(&self, path: &Path) -> Result<ProgramGraph, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let model: ModelFile = match extension {
            "json" => serde_json::from_str(&content)?,
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            _ => match serde_json::from_str(&content) {
                Ok(model) => model,
                Err(_) => serde_yaml::from_str(&content)?,
            },
        };

        info!("Loaded program model from {}", path.display());
        self.build(model)
    }

    pub fn load_json(&self, content: &str) -> Result<ProgramGraph, ModelError> {
        let model: ModelFile = serde_json::from_str(content)?;
        self.build(model)
    }

    pub fn load_yaml(&self, content: &str) -> Result<ProgramGraph, ModelError> {
        let model: ModelFile = serde_yaml::from_str(content)?;
        self.build(model)
    }

    pub fn build(&self, model: ModelFile) -> Result<ProgramGraph, ModelError> {
        let mut builder =
            ProgramBuilder::new().with_synthetic_entry_classes(self.synthetic_entry_classes.clone());

        for class in model.classes {
            let class = match class.package {
                Some(package) => Class::with_package(class.name, package),
                None => Class::new(class.name),
            };
            builder.add_class(class);
        }

        for method in model.methods {
            let body = method
                .body
                .into_iter()
                .map(|stmt| self.statement(stmt))
                .collect();
            builder.add_method(method.signature, &method.class, body)?;
        }

        let mut skipped = 0usize;
        for edge in &model.call_edges {
            if !builder.add_call_by_signature(&edge.caller, &edge.callee) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!("Skipped {} call edges with unknown endpoints", skipped);
        }

        let program = builder.build();
        info!(
            "Program model: {} classes, {} methods, {} statements, {} call edges",
            program.class_count(),
            program.method_count(),
            program.statement_count(),
            program.call_edge_count()
        );
        Ok(program)
    }

    fn statement(&self, entry: StatementEntry) -> Statement {
        let invocation = entry
            .invoke
            .map(|inv| self.classifier.invocation(inv.target, inv.interesting, inv.library));
        Statement {
            text: entry.text,
            invocation,
        }
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(&ClassificationConfig::default())
    }
}
