// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{ProfileDocument, ValidationError};
use rustc_hash::FxHashSet;

fn unique_ids(
    kind: &'static str,
    ids: impl Iterator<Item = u64>,
) -> Result<FxHashSet<u64>, ValidationError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if id == 0 {
            return Err(ValidationError::ZeroId { kind });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId { kind, id });
        }
    }
    Ok(seen)
}

impl ProfileDocument {
    /// Checks referential integrity: ids are non-zero and unique, every
    /// location points at the mapping and at known functions, and every
    /// sample points at known locations with one value per sample type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected = self.sample_types.len();
        if expected == 0 {
            return Err(ValidationError::NoSampleTypes);
        }
        for sample in &self.samples {
            if sample.values.len() != expected {
                return Err(ValidationError::SampleValueMismatch {
                    values: sample.values.len(),
                    expected,
                });
            }
        }

        let mappings = unique_ids("mapping", std::iter::once(self.mapping.id))?;
        let functions = unique_ids("function", self.functions.iter().map(|f| f.id))?;
        let locations = unique_ids("location", self.locations.iter().map(|l| l.id))?;

        for location in &self.locations {
            if !mappings.contains(&location.mapping_id) {
                return Err(ValidationError::UnknownMapping {
                    location_id: location.id,
                    mapping_id: location.mapping_id,
                });
            }
            for line in &location.lines {
                if !functions.contains(&line.function_id) {
                    return Err(ValidationError::UnknownFunction {
                        location_id: location.id,
                        function_id: line.function_id,
                    });
                }
            }
        }

        for sample in &self.samples {
            if let Some(&missing) = sample
                .location_ids
                .iter()
                .find(|&&id| !locations.contains(&id))
            {
                return Err(ValidationError::UnknownLocation(missing));
            }
        }
        Ok(())
    }
}
