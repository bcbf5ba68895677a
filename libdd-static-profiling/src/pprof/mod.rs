// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Everything between synthesized samples and a pprof file on disk.
//!
//! [`ProfileEncoder`] builds a [`ProfileDocument`] whose records carry plain
//! strings and ids. The document is checked with
//! [`ProfileDocument::validate`] and converted to the [`proto`] messages
//! (string table and all) only when it is written.

mod document;
mod encoder;
mod error;
pub mod proto;
mod string_table;
mod validate;
mod writer;

pub use document::*;
pub use encoder::*;
pub use error::*;
pub use writer::*;
