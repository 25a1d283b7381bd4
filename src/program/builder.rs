use super::{Class, ClassId, Method, MethodId, ModelError, ProgramGraph, Statement};
use crate::config::glob_match;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Builds a `ProgramGraph` from classes, methods and call edges
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    classes: Vec<Class>,
    class_index: HashMap<String, ClassId>,
    methods: Vec<Method>,
    method_index: HashMap<String, MethodId>,
    edges: Vec<(MethodId, MethodId)>,

    /// Class patterns whose outgoing call edges are dropped
    synthetic_entry_classes: Vec<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop call edges whose caller is declared in a class matching one of `patterns`
    pub fn with_synthetic_entry_classes(mut self, patterns: Vec<String>) -> Self {
        self.synthetic_entry_classes = patterns;
        self
    }

    /// Add a class, returning the existing id if the name is already known
    ///
    /// The first declaration of a class wins; a later one with another package is ignored.
    pub fn add_class(&mut self, class: Class) -> ClassId {
        if let Some(&id) = self.class_index.get(&class.name) {
            if let Some(existing) = self.classes.get(id.index()) {
                if existing.package != class.package {
                    warn!(
                        "Class {} declared with package '{}', keeping '{}'",
                        class.name, class.package, existing.package
                    );
                }
            }
            return id;
        }

        let id = ClassId(self.classes.len());
        self.class_index.insert(class.name.clone(), id);
        self.classes.push(class);
        id
    }

    /// Add a method declared in `class_name`; the class is created if unknown
    pub fn add_method(
        &mut self,
        signature: impl Into<String>,
        class_name: &str,
        body: Vec<Statement>,
    ) -> Result<MethodId, ModelError> {
        let signature = signature.into();
        if self.method_index.contains_key(&signature) {
            return Err(ModelError::DuplicateMethod(signature));
        }

        let class = match self.class_index.get(class_name) {
            Some(&id) => id,
            None => self.add_class(Class::new(class_name)),
        };
        let id = MethodId(self.methods.len());
        self.method_index.insert(signature.clone(), id);
        self.methods.push(Method {
            signature,
            class,
            body,
        });
        Ok(id)
    }

    pub fn add_call(&mut self, caller: MethodId, callee: MethodId) {
        self.edges.push((caller, callee));
    }

    /// Add a call edge by signatures; unknown signatures leave the graph unchanged
    pub fn add_call_by_signature(&mut self, caller: &str, callee: &str) -> bool {
        match (self.method_index.get(caller), self.method_index.get(callee)) {
            (Some(&from), Some(&to)) => {
                self.add_call(from, to);
                true
            }
            _ => {
                warn!("Skipping call edge with unknown method: {} -> {}", caller, callee);
                false
            }
        }
    }

    pub fn method_id(&self, signature: &str) -> Option<MethodId> {
        self.method_index.get(signature).copied()
    }

    pub fn build(self) -> ProgramGraph {
        let classes = &self.classes;
        let methods = &self.methods;
        let patterns = &self.synthetic_entry_classes;

        let edges: Vec<(MethodId, MethodId)> = self
            .edges
            .iter()
            .copied()
            .filter(|&(caller, callee)| {
                let Some(caller_method) = methods.get(caller.index()) else {
                    warn!("Skipping call edge with unknown method: {} -> {}", caller, callee);
                    return false;
                };
                if callee.index() >= methods.len() {
                    warn!("Skipping call edge with unknown method: {} -> {}", caller, callee);
                    return false;
                }

                let Some(class) = classes.get(caller_method.class.index()) else {
                    return true;
                };
                let synthetic = patterns.iter().any(|p| glob_match(p, &class.name));
                if synthetic {
                    debug!("Dropping edge from synthetic entry class {}", class.name);
                }
                !synthetic
            })
            .collect();

        ProgramGraph::from_parts(self.classes, self.methods, &edges)
    }
}
