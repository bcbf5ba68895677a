// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::io;

/// A structurally invalid [`super::ProfileDocument`]. The encoder never
/// produces one, so hitting this points at a defect rather than bad input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing sample type information")]
    NoSampleTypes,
    #[error("mismatch: sample has {values} values vs. {expected} types")]
    SampleValueMismatch { values: usize, expected: usize },
    #[error("found {kind} with reserved id=0")]
    ZeroId { kind: &'static str },
    #[error("multiple {kind}s with same id: {id}")]
    DuplicateId { kind: &'static str, id: u64 },
    #[error("location id {location_id} has unknown mapping id {mapping_id}")]
    UnknownMapping { location_id: u64, mapping_id: u64 },
    #[error("location id {location_id} has a line with unknown function id {function_id}")]
    UnknownFunction { location_id: u64, function_id: u64 },
    #[error("sample references unknown location id {0}")]
    UnknownLocation(u64),
}

/// Errors from writing a profile. Nothing is left at the destination when
/// one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("invalid profile: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to encode profile: {0}")]
    Encode(#[from] prost::EncodeError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to persist profile: {0}")]
    Persist(#[from] tempfile::PersistError),
}
