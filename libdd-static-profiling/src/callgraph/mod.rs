// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The call graph consumed by the synthesizer. Building it (loading sources,
//! resolving types, points-to analysis) is the job of an external tool; this
//! module only models the result and loads the JSON interchange format.

mod error;
mod graph;
mod identity;
mod interchange;

pub use error::*;
pub use graph::*;
pub use identity::*;
pub use interchange::*;
