// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{Function, Line, Location, Mapping, ProfileDocument, Sample, ValueType};
use crate::synthesis;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Id of the only mapping in a document.
pub const MAPPING_ID: u64 = 1;

/// Static data has no line information, every location uses this line.
pub const PLACEHOLDER_LINE: i64 = 1;

pub const DEFAULT_FILENAME: &str = "main.go";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Source file name attached to every function.
    pub filename: String,
    /// Pins the creation timestamp; the current time is used when unset.
    pub time_nanos: Option<i64>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            time_nanos: None,
        }
    }
}

impl EncoderConfig {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_time_nanos(mut self, time_nanos: i64) -> Self {
        self.time_nanos = Some(time_nanos);
        self
    }
}

/// Converts synthesized samples into a [`ProfileDocument`].
///
/// Frames are not deduplicated: each frame of each sample gets a fresh
/// function and a fresh location, with ids handed out sequentially from 1.
/// Stacks are emitted leaf first.
#[derive(Debug, Default)]
pub struct ProfileEncoder {
    config: EncoderConfig,
}

impl ProfileEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn encode(&self, samples: &[synthesis::Sample<'_>]) -> ProfileDocument {
        let frame_count: usize = samples.iter().map(|s| s.frames.len()).sum();
        let mut functions = Vec::with_capacity(frame_count);
        let mut locations = Vec::with_capacity(frame_count);
        let mut encoded = Vec::with_capacity(samples.len());

        for sample in samples {
            let mut location_ids = Vec::with_capacity(sample.frames.len());
            for frame in sample.frames.iter().rev() {
                let function_id = functions.len() as u64 + 1;
                functions.push(Function {
                    id: function_id,
                    name: frame.to_string(),
                    filename: self.config.filename.clone(),
                });

                let location_id = locations.len() as u64 + 1;
                locations.push(Location {
                    id: location_id,
                    mapping_id: MAPPING_ID,
                    lines: vec![Line {
                        function_id,
                        line: PLACEHOLDER_LINE,
                    }],
                });
                location_ids.push(location_id);
            }
            encoded.push(Sample {
                location_ids,
                values: vec![i64::try_from(sample.count).unwrap_or(i64::MAX)],
            });
        }

        debug!(
            samples = encoded.len(),
            functions = functions.len(),
            "Encoded profile document"
        );

        ProfileDocument {
            time_nanos: self.config.time_nanos.unwrap_or_else(now_nanos),
            mapping: Mapping {
                id: MAPPING_ID,
                filename: String::new(),
                has_functions: true,
            },
            sample_types: vec![ValueType::new("calls", "count")],
            functions,
            locations,
            samples: encoded,
        }
    }
}

fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
