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

//! Metric kinds and the unit-label table that maps report units onto them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the four standard benchmark metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetricKind {
    /// Nanoseconds per operation (`ns/op`). The canonical comparison metric.
    TimePerOp,
    /// Megabytes processed per second (`MB/s`).
    Throughput,
    /// Bytes allocated per operation (`B/op`).
    BytesPerOp,
    /// Heap allocations per operation (`allocs/op`).
    AllocsPerOp,
}

impl MetricKind {
    /// Number of metric kinds.
    pub const COUNT: usize = 4;

    /// All metric kinds in report column order.
    pub const ALL: [MetricKind; Self::COUNT] = [
        MetricKind::TimePerOp,
        MetricKind::Throughput,
        MetricKind::BytesPerOp,
        MetricKind::AllocsPerOp,
    ];

    /// The metric rendered by the default diff table.
    pub const CANONICAL: MetricKind = MetricKind::TimePerOp;

    /// Dense index used for per-metric storage.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MetricKind::TimePerOp => 0,
            MetricKind::Throughput => 1,
            MetricKind::BytesPerOp => 2,
            MetricKind::AllocsPerOp => 3,
        }
    }

    /// Suffix appended to formatted values (`150ns`, `12.5MB/s`).
    pub const fn display_suffix(self) -> &'static str {
        match self {
            MetricKind::TimePerOp => "ns",
            MetricKind::Throughput => "MB/s",
            MetricKind::BytesPerOp => "B",
            MetricKind::AllocsPerOp => "allocs",
        }
    }

    /// Whether a larger value means better performance.
    ///
    /// Only throughput grows when things get faster.
    pub const fn higher_is_better(self) -> bool {
        matches!(self, MetricKind::Throughput)
    }

    /// Short command-line name of the metric.
    pub const fn name(self) -> &'static str {
        match self {
            MetricKind::TimePerOp => "time",
            MetricKind::Throughput => "throughput",
            MetricKind::BytesPerOp => "bytes",
            MetricKind::AllocsPerOp => "allocs",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a metric name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}' (expected one of: time, throughput, bytes, allocs)")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricKind {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" | "ns/op" | "time-per-op" => Ok(MetricKind::TimePerOp),
            "throughput" | "mb/s" => Ok(MetricKind::Throughput),
            "bytes" | "b/op" | "bytes-per-op" => Ok(MetricKind::BytesPerOp),
            "allocs" | "allocs/op" | "allocs-per-op" => Ok(MetricKind::AllocsPerOp),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

/// Maps unit labels found in report lines to metric kinds.
///
/// Labels are matched exactly (case-sensitive), the way benchmark tools emit
/// them. The default table understands the Go testing package output.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{MetricKind, UnitTable};
///
/// let units = UnitTable::default().with_label("us/op", MetricKind::TimePerOp);
/// assert_eq!(units.lookup("ns/op"), Some(MetricKind::TimePerOp));
/// assert_eq!(units.lookup("us/op"), Some(MetricKind::TimePerOp));
/// assert_eq!(units.lookup("widgets"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTable {
    labels: HashMap<String, MetricKind>,
}

impl UnitTable {
    /// Create a table with no labels at all.
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Add or remap a unit label.
    pub fn with_label(mut self, label: impl Into<String>, kind: MetricKind) -> Self {
        self.insert(label, kind);
        self
    }

    /// Add or remap a unit label in place.
    pub fn insert(&mut self, label: impl Into<String>, kind: MetricKind) {
        self.labels.insert(label.into(), kind);
    }

    /// Resolve a unit label.
    #[inline]
    pub fn lookup(&self, label: &str) -> Option<MetricKind> {
        self.labels.get(label).copied()
    }

    /// Number of known labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::empty()
            .with_label("ns/op", MetricKind::TimePerOp)
            .with_label("MB/s", MetricKind::Throughput)
            .with_label("B/op", MetricKind::BytesPerOp)
            .with_label("allocs/op", MetricKind::AllocsPerOp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_kinds() {
        let units = UnitTable::default();
        assert_eq!(units.len(), MetricKind::COUNT);
        for kind in MetricKind::ALL {
            assert!(
                units.labels.values().any(|k| *k == kind),
                "no label for {kind}"
            );
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let units = UnitTable::default();
        assert_eq!(units.lookup("B/op"), Some(MetricKind::BytesPerOp));
        assert_eq!(units.lookup("b/op"), None);
    }

    #[test]
    fn test_remap_label() {
        let units = UnitTable::default().with_label("ns/op", MetricKind::AllocsPerOp);
        assert_eq!(units.lookup("ns/op"), Some(MetricKind::AllocsPerOp));
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, kind) in MetricKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("time".parse::<MetricKind>(), Ok(MetricKind::TimePerOp));
        assert_eq!("MB/s".parse::<MetricKind>(), Ok(MetricKind::Throughput));
        assert_eq!("Allocs".parse::<MetricKind>(), Ok(MetricKind::AllocsPerOp));
        assert!("latency".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_direction() {
        assert!(MetricKind::Throughput.higher_is_better());
        assert!(!MetricKind::TimePerOp.higher_is_better());
        assert!(!MetricKind::BytesPerOp.higher_is_better());
    }
}
