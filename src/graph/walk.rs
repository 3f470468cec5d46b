//! Deterministic traversal of the import graph.

use super::{ConfigGraph, DocId};
use crate::cancel::CancelToken;
use crate::error::Result;
use std::collections::HashSet;
use tracing::trace;

/// One document reached by [`ConfigGraph::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub document: DocId,
    /// Activation list in force for this document, in precedence order.
    pub profiles: Vec<String>,
}

impl ConfigGraph {
    /// Depth-first pre-order over the graph starting at the root.
    ///
    /// Imports are followed in declaration order and every document is
    /// visited once, tracked by identity rather than depth, so cycles
    /// terminate. A visit's activation list is the caller's `profiles`
    /// followed by the `activeProfiles` of each edge on the path that first
    /// reached it. Cancellation is checked before each document.
    pub fn walk(&self, profiles: &[String], cancel: &CancelToken) -> Result<Vec<Visit>> {
        let mut visits = Vec::with_capacity(self.len());
        let mut visited = HashSet::new();
        let mut stack = vec![(self.root(), profiles.to_vec())];

        while let Some((id, active)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            cancel.check()?;
            trace!(document = %self.document(id).source.display(), "visiting");

            // Reverse so the first declared import is popped next.
            for edge in self.imports(id).iter().rev() {
                if visited.contains(&edge.target) {
                    continue;
                }
                let mut inherited = active.clone();
                for name in &edge.active_profiles {
                    if !inherited.contains(name) {
                        inherited.push(name.clone());
                    }
                }
                stack.push((edge.target, inherited));
            }

            visits.push(Visit {
                document: id,
                profiles: active,
            });
        }

        Ok(visits)
    }
}
