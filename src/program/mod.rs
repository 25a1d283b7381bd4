//! Program model: the analysis facade the inspector and resolver read from.
//!
//! The facade exposes in-scope methods in a stable order, each method's
//! statement body, the declaring classes and the app-scope call graph as a
//! caller-by-callee lookup. `ProgramGraph` is the concrete implementation,
//! built with `ProgramBuilder` or loaded from an exported model file.

mod builder;
mod classify;
mod descriptor;
mod error;
mod loader;
mod model;

pub use builder::ProgramBuilder;
pub use classify::ApiClassifier;
pub use descriptor::MethodDescriptor;
pub use error::ModelError;
pub use loader::{ModelFile, ModelLoader};
pub use model::{
    package_of, text_form, Class, ClassId, Invocation, Method, MethodId, Statement, StatementRef,
};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Read-only view of an analyzed program
pub trait AnalysisFacade {
    /// In-scope methods in enumeration order
    fn methods(&self) -> Vec<MethodId>;

    /// Method details, `None` for ids outside the arena
    fn method(&self, id: MethodId) -> Option<&Method>;

    /// Class details, `None` for ids outside the arena
    fn class(&self, id: ClassId) -> Option<&Class>;

    /// Distinct methods with a call edge into `id`
    fn callers(&self, id: MethodId) -> Vec<MethodId>;

    /// Size of the method arena; every valid `MethodId` is below it
    fn method_count(&self) -> usize;

    /// Statement body of a method, empty when the method is unknown
    fn statements(&self, id: MethodId) -> &[Statement] {
        self.method(id).map(|m| m.body.as_slice()).unwrap_or(&[])
    }

    /// Declaring class of a method
    fn declaring_class(&self, id: MethodId) -> Option<&Class> {
        self.method(id).and_then(|m| self.class(m.class))
    }
}

/// Program model backed by a petgraph call graph
///
/// Node `i` of the call graph is `MethodId(i)`; edges point from caller to callee.
#[derive(Debug)]
pub struct ProgramGraph {
    classes: Vec<Class>,
    methods: Vec<Method>,

    /// Map from method signature to id
    signature_index: HashMap<String, MethodId>,

    call_graph: DiGraph<MethodId, ()>,
}

impl ProgramGraph {
    pub(crate) fn from_parts(
        classes: Vec<Class>,
        methods: Vec<Method>,
        edges: &[(MethodId, MethodId)],
    ) -> Self {
        let mut call_graph = DiGraph::with_capacity(methods.len(), edges.len());
        for idx in 0..methods.len() {
            call_graph.add_node(MethodId(idx));
        }
        for &(caller, callee) in edges {
            call_graph.update_edge(
                NodeIndex::new(caller.index()),
                NodeIndex::new(callee.index()),
                (),
            );
        }

        let signature_index = methods
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.signature.clone(), MethodId(idx)))
            .collect();

        Self {
            classes,
            methods,
            signature_index,
            call_graph,
        }
    }

    /// Find a method by its full signature
    pub fn find_method(&self, signature: &str) -> Option<MethodId> {
        self.signature_index.get(signature).copied()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn statement_count(&self) -> usize {
        self.methods.iter().map(|m| m.body.len()).sum()
    }

    pub fn call_edge_count(&self) -> usize {
        self.call_graph.edge_count()
    }

    fn neighbors(&self, id: MethodId, direction: Direction) -> Vec<MethodId> {
        if id.index() >= self.call_graph.node_count() {
            return Vec::new();
        }

        let mut ids: Vec<MethodId> = self
            .call_graph
            .neighbors_directed(NodeIndex::new(id.index()), direction)
            .filter_map(|idx| self.call_graph.node_weight(idx).copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl AnalysisFacade for ProgramGraph {
    fn methods(&self) -> Vec<MethodId> {
        (0..self.methods.len()).map(MethodId).collect()
    }

    fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index())
    }

    fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.index())
    }

    fn callers(&self, id: MethodId) -> Vec<MethodId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn method_count(&self) -> usize {
        self.methods.len()
    }
}
