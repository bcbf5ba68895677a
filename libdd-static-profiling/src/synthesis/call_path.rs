// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::callgraph::FunctionIdentity;
use rustc_hash::FxHashSet;

/// The call stack from the traversal root to the current node, inclusive.
///
/// Extending a path yields a new value and leaves the original untouched, so
/// sibling branches of the walk never observe each other's frames. Membership
/// is tracked in a set so the recursion guard does not depend on depth.
#[derive(Clone, Debug, Default)]
pub struct CallPath<'g> {
    frames: Vec<&'g FunctionIdentity>,
    seen: FxHashSet<&'g FunctionIdentity>,
}

impl<'g> CallPath<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(function: &'g FunctionIdentity) -> Self {
        Self::new().extend(function)
    }

    /// Returns a copy of this path with `function` appended.
    pub fn extend(&self, function: &'g FunctionIdentity) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.extend_from_slice(&self.frames);
        frames.push(function);

        let mut seen = self.seen.clone();
        seen.insert(function);

        Self { frames, seen }
    }

    pub fn contains(&self, function: &FunctionIdentity) -> bool {
        self.seen.contains(function)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in root-to-leaf order.
    pub fn frames(&self) -> &[&'g FunctionIdentity] {
        &self.frames
    }

    pub fn leaf(&self) -> Option<&'g FunctionIdentity> {
        self.frames.last().copied()
    }
}
