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

//! Column-aligned diff table.
//!
//! Only entries present in both reports that measured the rendered metric on
//! both sides become rows. Everything else is dropped without comment.
//!
//! Alignment follows elastic tabstops: every cell but the last in a row is
//! padded to the widest cell of its column plus [`TableRenderer::padding`]
//! spaces.

use crate::correlate::ComparisonEntry;
use crate::delta::Delta;
use crate::metric::MetricKind;

/// Default gap between columns.
pub const DEFAULT_PADDING: usize = 2;

/// One row of the diff table, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Display name of the benchmark.
    pub name: String,
    /// Formatted baseline value.
    pub before: String,
    /// Formatted new value.
    pub after: String,
    /// The raw delta.
    pub delta: Delta,
}

impl TableRow {
    /// Cells in column order, with the delta formatted.
    pub fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.before.clone(),
            self.after.clone(),
            self.delta.to_string(),
        ]
    }
}

/// Renders correlated entries as an aligned text table.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{correlate, parse, TableRenderer};
///
/// let before = parse("BenchmarkFoo-8 1000000 150 ns/op\n").unwrap();
/// let after = parse("BenchmarkFoo-8 1000000 180 ns/op\n").unwrap();
///
/// let table = TableRenderer::new().render(&correlate(&before, &after));
/// assert_eq!(table, "Foo  150ns  180ns  +20.00%\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRenderer {
    /// Metric shown in the table.
    pub metric: MetricKind,
    /// Spaces added after the widest cell of each column.
    pub padding: usize,
    /// Strip the `Benchmark` prefix and `-N` suffix from names.
    pub trim_names: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            metric: MetricKind::CANONICAL,
            padding: DEFAULT_PADDING,
            trim_names: true,
        }
    }
}

impl TableRenderer {
    /// Renderer for the canonical metric with default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a different metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Change the column gap.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Enable or disable name trimming.
    pub fn with_trim_names(mut self, trim_names: bool) -> Self {
        self.trim_names = trim_names;
        self
    }

    /// Rows for every reportable entry, in entry order.
    pub fn rows(&self, entries: &[ComparisonEntry<'_>]) -> Vec<TableRow> {
        entries
            .iter()
            .filter_map(|entry| {
                let (before, after) = entry.values(self.metric)?;
                let name = if self.trim_names {
                    display_name(entry.name())
                } else {
                    entry.name()
                };
                Some(TableRow {
                    name: name.to_string(),
                    before: format_value(before, self.metric),
                    after: format_value(after, self.metric),
                    delta: Delta::between(before, after),
                })
            })
            .collect()
    }

    /// Render entries as an aligned table, one line per row.
    pub fn render(&self, entries: &[ComparisonEntry<'_>]) -> String {
        let rows: Vec<[String; 4]> = self.rows(entries).iter().map(TableRow::cells).collect();
        self.layout(&rows)
    }

    /// Align pre-formatted cells.
    ///
    /// Widths are measured in characters. The last column is never padded or
    /// measured, so it may carry terminal escape codes.
    pub fn layout<const N: usize>(&self, rows: &[[String; N]]) -> String {
        if N == 0 {
            return String::new();
        }

        let mut widths = [0usize; N];
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(N - 1) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                out.push_str(cell);
                if i + 1 < N {
                    let fill = widths[i] - cell.chars().count() + self.padding;
                    out.extend(std::iter::repeat(' ').take(fill));
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Human-facing benchmark name.
///
/// Drops a leading `Benchmark` (when something follows it) and a trailing
/// `-<digits>` GOMAXPROCS suffix.
///
/// ```
/// use benchdiff_core::display_name;
///
/// assert_eq!(display_name("BenchmarkFoo-8"), "Foo");
/// assert_eq!(display_name("BenchmarkParse/small-16"), "Parse/small");
/// assert_eq!(display_name("Benchmark"), "Benchmark");
/// assert_eq!(display_name("encode-v2"), "encode-v2");
/// ```
pub fn display_name(name: &str) -> &str {
    let mut trimmed = name;
    if let Some((head, procs)) = trimmed.rsplit_once('-') {
        if !head.is_empty() && !procs.is_empty() && procs.bytes().all(|b| b.is_ascii_digit()) {
            trimmed = head;
        }
    }
    match trimmed.strip_prefix("Benchmark") {
        Some(rest) if !rest.is_empty() => rest,
        _ => trimmed,
    }
}

/// Format a value with at most two decimals, trailing zeros trimmed, followed
/// by the metric's suffix.
///
/// ```
/// use benchdiff_core::{format_value, MetricKind};
///
/// assert_eq!(format_value(150.0, MetricKind::TimePerOp), "150ns");
/// assert_eq!(format_value(12.5, MetricKind::TimePerOp), "12.5ns");
/// assert_eq!(format_value(0.126, MetricKind::TimePerOp), "0.13ns");
/// assert_eq!(format_value(121.63, MetricKind::Throughput), "121.63MB/s");
/// ```
pub fn format_value(value: f64, metric: MetricKind) -> String {
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        let len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(len);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s.push_str(metric.display_suffix());
    s
}
