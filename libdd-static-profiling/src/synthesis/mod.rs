// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod call_path;
mod config;
mod synthesizer;

pub use call_path::*;
pub use config::*;
pub use synthesizer::*;
