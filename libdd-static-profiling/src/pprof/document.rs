// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::proto;
use super::string_table::StringTable;

/// The logical address space every function belongs to. There is exactly one
/// per document; the tool does not model separate binaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mapping {
    pub id: u64,
    pub filename: String,
    pub has_functions: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueType {
    pub r#type: String,
    pub unit: String,
}

impl ValueType {
    pub fn new(r#type: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            unit: unit.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    pub id: u64,
    pub name: String,
    pub filename: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Line {
    pub function_id: u64,
    pub line: i64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub id: u64,
    pub mapping_id: u64,
    pub lines: Vec<Line>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sample {
    /// Leaf first.
    pub location_ids: Vec<u64>,
    pub values: Vec<i64>,
}

/// A profile with resolved strings, built by the
/// [`super::ProfileEncoder`] and written with [`super::write_profile`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileDocument {
    /// Creation time, in nanoseconds since the Unix epoch.
    pub time_nanos: i64,
    pub mapping: Mapping,
    pub sample_types: Vec<ValueType>,
    pub functions: Vec<Function>,
    pub locations: Vec<Location>,
    pub samples: Vec<Sample>,
}

impl ProfileDocument {
    /// Converts to the wire representation, interning every string.
    pub fn to_pprof(&self) -> proto::Profile {
        let mut strings = StringTable::with_capacity(self.functions.len() + 4);

        let sample_types = self
            .sample_types
            .iter()
            .map(|vt| proto::ValueType {
                r#type: strings.intern(&vt.r#type),
                unit: strings.intern(&vt.unit),
            })
            .collect();

        let mappings = vec![proto::Mapping {
            id: self.mapping.id,
            filename: strings.intern(&self.mapping.filename),
            has_functions: self.mapping.has_functions,
        }];

        let functions = self
            .functions
            .iter()
            .map(|function| {
                let name = strings.intern(&function.name);
                proto::Function {
                    id: function.id,
                    name,
                    system_name: name,
                    filename: strings.intern(&function.filename),
                }
            })
            .collect();

        let locations = self
            .locations
            .iter()
            .map(|location| proto::Location {
                id: location.id,
                mapping_id: location.mapping_id,
                lines: location
                    .lines
                    .iter()
                    .map(|line| proto::Line {
                        function_id: line.function_id,
                        line: line.line,
                    })
                    .collect(),
            })
            .collect();

        let samples = self
            .samples
            .iter()
            .map(|sample| proto::Sample {
                location_ids: sample.location_ids.clone(),
                values: sample.values.clone(),
            })
            .collect();

        proto::Profile {
            sample_types,
            samples,
            mappings,
            locations,
            functions,
            string_table: strings.into_vec(),
            time_nanos: self.time_nanos,
        }
    }
}
