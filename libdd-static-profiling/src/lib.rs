// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Static profiling: turns a whole-program call graph into a synthetic,
//! weighted pprof profile without ever running the program.
//!
//! The pipeline is:
//!
//! 1. [`callgraph::CallGraph`] is handed over by an external analysis,
//!    usually as JSON (see [`callgraph::CallGraph::from_path`]).
//! 2. [`synthesis::Synthesizer`] walks the graph depth-first from its root
//!    and weighs every call path, producing [`synthesis::Sample`]s.
//! 3. [`pprof::ProfileEncoder`] turns the samples into a
//!    [`pprof::ProfileDocument`].
//! 4. [`pprof::write_profile`] validates the document and persists it as a
//!    gzipped pprof file.
//!
//! The counts are heuristic estimates derived from function body sizes and
//! call depth, not measurements.

pub mod callgraph;
pub mod pprof;
pub mod synthesis;
