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

//! Matching of same-named records across two benchmark sets.
//!
//! Output order is fully determined by the inputs: every name of the
//! `before` set in its stored order, then names that only exist in `after`,
//! in `after`'s order.

use crate::delta::Delta;
use crate::metric::MetricKind;
use crate::record::{BenchmarkRecord, BenchmarkSet};
use std::collections::HashSet;

/// A benchmark name with its record on each side, if present.
///
/// At least one side is always present.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonEntry<'a> {
    name: &'a str,
    before: Option<&'a BenchmarkRecord>,
    after: Option<&'a BenchmarkRecord>,
}

impl<'a> ComparisonEntry<'a> {
    /// Pair two records.
    pub fn paired(before: &'a BenchmarkRecord, after: &'a BenchmarkRecord) -> Self {
        Self {
            name: before.name(),
            before: Some(before),
            after: Some(after),
        }
    }

    /// A record found only in the first report.
    pub fn before_only(before: &'a BenchmarkRecord) -> Self {
        Self {
            name: before.name(),
            before: Some(before),
            after: None,
        }
    }

    /// A record found only in the second report.
    pub fn after_only(after: &'a BenchmarkRecord) -> Self {
        Self {
            name: after.name(),
            before: None,
            after: Some(after),
        }
    }

    /// Benchmark name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Record from the first report.
    pub fn before(&self) -> Option<&'a BenchmarkRecord> {
        self.before
    }

    /// Record from the second report.
    pub fn after(&self) -> Option<&'a BenchmarkRecord> {
        self.after
    }

    /// Whether both reports contain this benchmark.
    pub fn is_paired(&self) -> bool {
        self.before.is_some() && self.after.is_some()
    }

    /// Values of a metric on both sides, when both sides measured it.
    pub fn values(&self, metric: MetricKind) -> Option<(f64, f64)> {
        let before = self.before?.value(metric)?;
        let after = self.after?.value(metric)?;
        Some((before, after))
    }

    /// Whether both sides measured a metric.
    pub fn measured(&self, metric: MetricKind) -> bool {
        self.values(metric).is_some()
    }

    /// Change of a metric, when both sides measured it.
    pub fn delta(&self, metric: MetricKind) -> Option<Delta> {
        self.values(metric)
            .map(|(before, after)| crate::delta::delta(metric, before, after))
    }
}

/// Correlate two sets by benchmark name.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{correlate, parse};
///
/// let before = parse("BenchmarkA 1 10 ns/op\nBenchmarkB 1 20 ns/op\n").unwrap();
/// let after = parse("BenchmarkC 1 5 ns/op\nBenchmarkA 1 12 ns/op\n").unwrap();
///
/// let entries = correlate(&before, &after);
/// let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
/// assert_eq!(names, vec!["BenchmarkA", "BenchmarkB", "BenchmarkC"]);
/// assert!(entries[0].is_paired());
/// assert!(entries[1].after().is_none());
/// assert!(entries[2].before().is_none());
/// ```
pub fn correlate<'a>(before: &'a BenchmarkSet, after: &'a BenchmarkSet) -> Vec<ComparisonEntry<'a>> {
    let mut entries = Vec::with_capacity(before.len().max(after.len()));
    let mut matched: HashSet<&str> = HashSet::with_capacity(after.len());

    for record in before {
        match after.get(record.name()) {
            Some(other) => {
                matched.insert(other.name());
                entries.push(ComparisonEntry::paired(record, other));
            }
            None => entries.push(ComparisonEntry::before_only(record)),
        }
    }

    entries.extend(
        after
            .iter()
            .filter(|record| !matched.contains(record.name()))
            .map(ComparisonEntry::after_only),
    );

    entries
}
