// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::io;

/// Errors raised while resolving the input call graph. All of them are
/// fatal: there is no meaningful profile without a well-formed graph.
#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    /// The graph does not designate an entry point.
    #[error("no entry point: the call graph has no root")]
    NoEntryPoint,
    /// An edge or the root refers to a node that does not exist.
    #[error("unknown call graph node {index} (graph has {len} nodes)")]
    UnknownNode { index: usize, len: usize },
    /// A receiver type name could not be parsed.
    #[error("invalid receiver `{0}`")]
    InvalidReceiver(String),
    /// The graph holds more nodes than a [`super::NodeId`] can address.
    #[error("storage full: call graph exceeds {} nodes", u32::MAX)]
    StorageFull,
    #[error("failed to parse call graph: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
