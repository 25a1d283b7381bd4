// Root caller resolution
//
// Walks the call graph against edge direction, from the method containing a
// hit toward methods that have no caller in app scope. Each traversal keeps
// its own visited bitset over the method arena, so a node is expanded at
// most once and cycles cannot make the walk loop. A cycle with no caller
// outside itself has no root and contributes nothing.

use super::Hit;
use crate::program::{AnalysisFacade, MethodId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Resolves the entry-point classes that can reach each hit
#[derive(Debug, Clone, Default)]
pub struct RootCallerResolver {
    root_caller_classes: BTreeSet<String>,

    /// Root caller methods per hit-containing method
    roots_by_method: BTreeMap<MethodId, Vec<MethodId>>,
}

impl RootCallerResolver {
    /// Resolve root callers for every hit and union their classes
    pub fn resolve<F>(facade: &F, hits: &[Hit]) -> Self
    where
        F: AnalysisFacade + ?Sized,
    {
        let mut resolver = Self::default();

        for hit in hits {
            let method = hit.method();
            if resolver.roots_by_method.contains_key(&method) {
                continue;
            }

            let roots = Self::root_callers(facade, method);
            for &root in &roots {
                match facade.declaring_class(root) {
                    Some(class) => {
                        resolver.root_caller_classes.insert(class.name.clone());
                    }
                    None => debug!("Root caller {} has no declaring class", root),
                }
            }
            resolver.roots_by_method.insert(method, roots);
        }

        info!(
            "Root caller resolution: {} methods traced, {} root caller classes",
            resolver.roots_by_method.len(),
            resolver.root_caller_classes.len()
        );

        resolver
    }

    /// Methods with no caller that can reach `start`, in discovery order
    pub fn root_callers<F>(facade: &F, start: MethodId) -> Vec<MethodId>
    where
        F: AnalysisFacade + ?Sized,
    {
        let mut visited = vec![false; facade.method_count()];
        let mut roots = Vec::new();

        mark_visited(&mut visited, start);
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for method in frontier {
                let callers = facade.callers(method);
                if callers.is_empty() {
                    roots.push(method);
                    continue;
                }

                for caller in callers {
                    if mark_visited(&mut visited, caller) {
                        next.push(caller);
                    }
                }
            }

            frontier = next;
        }

        debug!("{} root callers for {}", roots.len(), start);
        roots
    }

    /// Declaring classes of all root callers found
    pub fn root_caller_classes(&self) -> &BTreeSet<String> {
        &self.root_caller_classes
    }

    /// Root callers of a hit-containing method, empty if it was not traced
    pub fn roots_for(&self, method: MethodId) -> &[MethodId] {
        self.roots_by_method
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Mark `id` visited, returning whether it was unvisited before
fn mark_visited(visited: &mut Vec<bool>, id: MethodId) -> bool {
    let idx = id.index();
    if idx >= visited.len() {
        visited.resize(idx + 1, false);
    }
    !std::mem::replace(&mut visited[idx], true)
}
