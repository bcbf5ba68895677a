// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

type SetHasher = BuildHasherDefault<FxHasher>;

/// Interns strings to their offset in the pprof string table. The empty
/// string always sits at offset 0, as pprof requires.
pub(crate) struct StringTable<'a> {
    set: IndexSet<&'a str, SetHasher>,
}

impl<'a> StringTable<'a> {
    pub fn with_capacity(cap: usize) -> Self {
        let mut set = IndexSet::with_capacity_and_hasher(cap.max(1), SetHasher::default());
        set.insert("");
        Self { set }
    }

    pub fn intern(&mut self, s: &'a str) -> i64 {
        let (offset, _) = self.set.insert_full(s);
        // An IndexSet cannot hold more than isize::MAX entries.
        offset as i64
    }

    pub fn into_vec(self) -> Vec<String> {
        self.set.into_iter().map(String::from).collect()
    }
}
