// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{CallPath, SynthesisConfig};
use crate::callgraph::{CallGraph, CallGraphNode, FunctionIdentity};
use tracing::{debug, trace};

/// One weighted call path observed during the walk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sample<'g> {
    /// Root-to-leaf order, as traversed.
    pub frames: Vec<&'g FunctionIdentity>,
    /// Always greater than zero.
    pub count: u64,
}

/// Walks a [`CallGraph`] depth-first from its root and attributes a
/// heuristic cost to every call path it reaches.
///
/// A node reached through a path of length `L` weighs `body_size / L`
/// (integer division), plus one if it has no callees at all. Paths weighing
/// zero are not emitted. A callee that is already on the current path is
/// skipped, as is any receiver-less `init`, and the walk never descends past
/// [`SynthesisConfig::max_depth`] frames.
pub struct Synthesizer<'g> {
    graph: &'g CallGraph,
    config: SynthesisConfig,
}

impl<'g> Synthesizer<'g> {
    pub fn new(graph: &'g CallGraph) -> Self {
        Self {
            graph,
            config: SynthesisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn synthesize(&self) -> Vec<Sample<'g>> {
        let mut samples = Vec::new();
        let root = self.graph.root_node();
        let path = CallPath::root(root.identity());
        self.visit(root, &path, &mut samples);
        debug!(
            samples = samples.len(),
            nodes = self.graph.len(),
            max_depth = self.config.depth_ceiling(),
            "Synthesized static profile"
        );
        samples
    }

    fn visit(&self, node: &'g CallGraphNode, path: &CallPath<'g>, out: &mut Vec<Sample<'g>>) {
        let count = self_weight(node, path.len());
        if count > 0 {
            trace!(count, depth = path.len(), leaf = %node.identity(), "Emitting sample");
            out.push(Sample {
                frames: path.frames().to_vec(),
                count,
            });
        }

        if path.len() >= self.config.depth_ceiling() {
            return;
        }

        for &callee_id in node.callees() {
            let callee = self.graph.node(callee_id);
            let identity = callee.identity();
            if identity.is_elided() {
                debug!(caller = %node.identity(), "Skipping call to {identity}");
                continue;
            }
            if path.contains(identity) {
                debug!(caller = %node.identity(), "Skipping recursive call to {identity}");
                continue;
            }
            self.visit(callee, &path.extend(identity), out);
        }
    }
}

/// Body size amortized over the path length, plus one for leaves.
pub fn self_weight(node: &CallGraphNode, depth: usize) -> u64 {
    let depth = u64::try_from(depth.max(1)).unwrap_or(u64::MAX);
    let mut count = node.body_size() / depth;
    if node.is_leaf() {
        count = count.saturating_add(1);
    }
    count
}

/// Synthesizes samples for `graph` with the default configuration.
pub fn synthesize(graph: &CallGraph) -> Vec<Sample<'_>> {
    Synthesizer::new(graph).synthesize()
}
