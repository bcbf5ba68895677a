// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Number of frames after which the walk stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Hard ceiling on the call path length. The node at the ceiling is
    /// still weighed; its callees are not visited. Zero behaves like one.
    pub max_depth: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SynthesisConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn depth_ceiling(&self) -> usize {
        self.max_depth.max(1)
    }
}
