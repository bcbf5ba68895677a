// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{CallGraphError, FunctionIdentity};
use std::fmt;

/// Index of a node inside a [`CallGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_offset(offset: usize) -> Result<Self, CallGraphError> {
        u32::try_from(offset)
            .map(Self)
            .map_err(|_| CallGraphError::StorageFull)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One function in the call graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallGraphNode {
    identity: FunctionIdentity,
    body_size: Option<u64>,
    callees: Vec<NodeId>,
}

impl CallGraphNode {
    pub fn identity(&self) -> &FunctionIdentity {
        &self.identity
    }

    /// Approximate size of the function body, 0 when the body could not be
    /// inspected (external or synthetic functions).
    pub fn body_size(&self) -> u64 {
        self.body_size.unwrap_or(0)
    }

    /// Outgoing edges in the order the builder received them. The same
    /// callee may appear more than once, one edge per call site.
    pub fn callees(&self) -> &[NodeId] {
        &self.callees
    }

    /// A node without any outgoing edge: unknown, external or terminal.
    pub fn is_leaf(&self) -> bool {
        self.callees.is_empty()
    }
}

/// A read-only, possibly cyclic, call graph with a designated entry point.
#[derive(Clone, Debug)]
pub struct CallGraph {
    nodes: Vec<CallGraphNode>,
    root: NodeId,
}

impl CallGraph {
    pub fn builder() -> CallGraphBuilder {
        CallGraphBuilder::default()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &CallGraphNode {
        &self.nodes[self.root.index()]
    }

    /// Ids are only minted by the builder of this graph, so the lookup
    /// cannot miss for ids taken from it.
    pub fn node(&self, id: NodeId) -> &CallGraphNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&CallGraphNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.callees.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    nodes: Vec<CallGraphNode>,
}

impl CallGraphBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Adds a function. `body_size` is `None` when the body is unavailable.
    /// Functions are not deduplicated here; the external builder decides
    /// what constitutes a node.
    pub fn add_function(
        &mut self,
        identity: FunctionIdentity,
        body_size: Option<u64>,
    ) -> Result<NodeId, CallGraphError> {
        let id = NodeId::from_offset(self.nodes.len())?;
        self.nodes.push(CallGraphNode {
            identity,
            body_size,
            callees: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_call(&mut self, caller: NodeId, callee: NodeId) -> Result<(), CallGraphError> {
        self.check(callee)?;
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(caller.index())
            .ok_or(CallGraphError::UnknownNode {
                index: caller.index(),
                len,
            })?;
        node.callees.push(callee);
        Ok(())
    }

    /// Used by the interchange loader, which refers to nodes by position.
    pub fn node_id(&self, index: usize) -> Result<NodeId, CallGraphError> {
        let id = NodeId::from_offset(index)?;
        self.check(id)?;
        Ok(id)
    }

    pub fn build(self, root: NodeId) -> Result<CallGraph, CallGraphError> {
        self.check(root)?;
        Ok(CallGraph {
            nodes: self.nodes,
            root,
        })
    }

    fn check(&self, id: NodeId) -> Result<(), CallGraphError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(CallGraphError::UnknownNode {
                index: id.index(),
                len: self.nodes.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_cyclic_graph() {
        let mut b = CallGraph::builder();
        let main = b.add_function(FunctionIdentity::new("main", "main"), Some(10)).unwrap();
        let rec = b.add_function(FunctionIdentity::new("main", "rec"), None).unwrap();
        b.add_call(main, rec).unwrap();
        b.add_call(rec, rec).unwrap();
        b.add_call(rec, main).unwrap();
        let graph = b.build(main).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.root_node().identity().name, "main");
        assert_eq!(graph.node(rec).body_size(), 0);
        assert_eq!(graph.node(rec).callees(), &[rec, main]);
        assert!(!graph.node(rec).is_leaf());
    }

    #[test]
    fn duplicate_edges_are_kept_in_order() {
        let mut b = CallGraph::builder();
        let a = b.add_function(FunctionIdentity::new("p", "a"), None).unwrap();
        let c = b.add_function(FunctionIdentity::new("p", "c"), None).unwrap();
        let d = b.add_function(FunctionIdentity::new("p", "d"), None).unwrap();
        b.add_call(a, c).unwrap();
        b.add_call(a, d).unwrap();
        b.add_call(a, c).unwrap();
        let graph = b.build(a).unwrap();
        assert_eq!(graph.node(a).callees(), &[c, d, c]);
        assert!(graph.node(d).is_leaf());
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let mut b = CallGraph::builder();
        let a = b.add_function(FunctionIdentity::new("p", "a"), None).unwrap();
        let bogus = NodeId(7);
        assert!(matches!(
            b.add_call(a, bogus),
            Err(CallGraphError::UnknownNode { index: 7, len: 1 })
        ));
        assert!(matches!(
            b.add_call(bogus, a),
            Err(CallGraphError::UnknownNode { index: 7, len: 1 })
        ));
        assert!(b.node_id(1).is_err());
        assert!(matches!(
            b.build(bogus),
            Err(CallGraphError::UnknownNode { .. })
        ));
    }
}
