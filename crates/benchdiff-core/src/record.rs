// Dweve Benchdiff - Benchmark report comparison
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Benchmark records and ordered record sets.

use crate::metric::MetricKind;
use std::collections::HashMap;

/// Per-metric storage. `None` means the metric was not measured.
pub type MetricValues = [Option<f64>; MetricKind::COUNT];

/// One named measurement, aggregated over every line that carried its name.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    name: String,
    iterations: u64,
    metrics: MetricValues,
}

impl BenchmarkRecord {
    /// Build a record from its parts.
    ///
    /// Returns `None` when the name is empty or no metric is measured: such a
    /// record carries nothing to compare.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchdiff_core::{BenchmarkRecord, MetricKind};
    ///
    /// let record = BenchmarkRecord::from_metrics("BenchmarkFoo-8", 1000, [Some(150.0), None, None, None])
    ///     .expect("valid record");
    /// assert_eq!(record.value(MetricKind::TimePerOp), Some(150.0));
    /// assert!(!record.is_measured(MetricKind::BytesPerOp));
    ///
    /// assert!(BenchmarkRecord::from_metrics("BenchmarkFoo-8", 1000, [None; 4]).is_none());
    /// ```
    pub fn from_metrics(
        name: impl Into<String>,
        iterations: u64,
        metrics: MetricValues,
    ) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || metrics.iter().all(Option::is_none) {
            return None;
        }
        Some(Self {
            name,
            iterations,
            metrics,
        })
    }

    /// Benchmark name exactly as it appeared in the report.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iteration count of the latest line seen for this name.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Value of a metric, if it was measured.
    #[inline]
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        self.metrics[kind.index()]
    }

    /// Whether a metric was measured.
    #[inline]
    pub fn is_measured(&self, kind: MetricKind) -> bool {
        self.metrics[kind.index()].is_some()
    }

    /// Measured metrics in report column order.
    pub fn measured(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL
            .into_iter()
            .filter_map(move |kind| self.value(kind).map(|v| (kind, v)))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BenchmarkRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct Measured<'a>(&'a BenchmarkRecord);

        impl serde::Serialize for Measured<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                for (kind, value) in self.0.measured() {
                    map.serialize_entry(kind.name(), &value)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("BenchmarkRecord", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("iterations", &self.iterations)?;
        state.serialize_field("metrics", &Measured(self))?;
        state.end()
    }
}

/// Benchmark records in order of first appearance, unique by name.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BenchmarkSet {
    records: Vec<BenchmarkRecord>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<String, usize>,
}

impl BenchmarkSet {
    /// Build a set from records already unique by name.
    ///
    /// Later duplicates are discarded; the parser merges repeats before they
    /// reach this point.
    pub(crate) fn from_unique(records: Vec<BenchmarkRecord>) -> Self {
        let mut set = Self {
            records: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
        };
        for record in records {
            if set.index.contains_key(record.name()) {
                continue;
            }
            set.index.insert(record.name.clone(), set.records.len());
            set.records.push(record);
        }
        set
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Whether a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkRecord> {
        self.records.iter()
    }

    /// Names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(BenchmarkRecord::name)
    }

    /// Records as a slice.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a BenchmarkSet {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
