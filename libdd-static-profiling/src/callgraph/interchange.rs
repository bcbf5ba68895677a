// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{CallGraph, CallGraphBuilder, CallGraphError, FunctionIdentity};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// JSON form of a call graph, as emitted by the external analysis:
///
/// ```json
/// {
///   "root": 0,
///   "nodes": [
///     { "path": "main", "name": "main", "body_size": 120, "callees": [1] },
///     { "path": "example.com/pkg", "receiver": "*T", "name": "Run", "callees": [] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CallGraphDocument {
    /// Index of the entry point in `nodes`.
    #[serde(default)]
    pub root: Option<usize>,
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(flatten)]
    pub identity: FunctionIdentity,
    #[serde(default)]
    pub body_size: Option<u64>,
    /// Indices into the enclosing `nodes` list.
    #[serde(default)]
    pub callees: Vec<usize>,
}

impl TryFrom<CallGraphDocument> for CallGraph {
    type Error = CallGraphError;

    fn try_from(doc: CallGraphDocument) -> Result<Self, Self::Error> {
        let root = doc.root.ok_or(CallGraphError::NoEntryPoint)?;
        let mut builder = CallGraphBuilder::with_capacity(doc.nodes.len());
        let mut edges = Vec::with_capacity(doc.nodes.len());
        for node in doc.nodes {
            let id = builder.add_function(node.identity, node.body_size)?;
            edges.push((id, node.callees));
        }
        for (caller, callees) in edges {
            for callee in callees {
                let callee = builder.node_id(callee)?;
                builder.add_call(caller, callee)?;
            }
        }
        let root = builder.node_id(root)?;
        builder.build(root)
    }
}

impl CallGraph {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CallGraphError> {
        let doc: CallGraphDocument = serde_json::from_reader(reader)?;
        Self::try_from(doc)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CallGraphError> {
        let doc: CallGraphDocument = serde_json::from_slice(bytes)?;
        Self::try_from(doc)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CallGraphError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}
