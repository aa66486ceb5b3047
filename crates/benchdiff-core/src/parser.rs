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

//! Line-oriented benchmark report parser.
//!
//! # Grammar
//!
//! ```text
//! line   := name iterations pair+
//! pair   := value unit
//! name   := any token without whitespace
//! iterations := non-negative integer
//! value  := finite decimal or scientific number
//! unit   := label known to the UnitTable
//! ```
//!
//! Tokens are separated by arbitrary runs of whitespace. Anything that does
//! not match (headers, `PASS`, `ok  pkg  1.2s`, log noise) is skipped.
//!
//! # Aggregation
//!
//! Reports produced with `-count=N` repeat every benchmark name N times. All
//! lines sharing a name fold into one record at the position of the first
//! occurrence: each metric becomes the arithmetic mean of its observations and
//! the iteration count is taken from the latest line.
//!
//! # Recovery
//!
//! A value that fails to parse (or is not finite) drops only that metric from
//! that line. Pairs with unknown unit labels are ignored, as is a trailing
//! token without a partner.

use crate::error::ParseError;
use crate::metric::{MetricKind, UnitTable};
use crate::record::{BenchmarkRecord, BenchmarkSet, MetricValues};
use std::collections::HashMap;

/// Options controlling which lines count as benchmark lines.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{parse_with_options, MetricKind, ParseOptions, UnitTable};
///
/// let options = ParseOptions::new()
///     .with_units(UnitTable::default().with_label("us/op", MetricKind::TimePerOp))
///     .with_name_prefix("Benchmark");
///
/// let set = parse_with_options("BenchmarkA 10 3 us/op\nTestB 10 4 us/op\n", &options).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Unit labels understood by the parser.
    pub units: UnitTable,

    /// When set, only names starting with this prefix are benchmark lines.
    pub name_prefix: Option<String>,
}

impl ParseOptions {
    /// Create options with the default unit table and no name prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the unit table.
    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.units = units;
        self
    }

    /// Require benchmark names to start with `prefix`.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }
}

/// Parse a report with default options.
///
/// # Errors
///
/// Returns [`ParseError`] when the text holds no benchmark line at all.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{parse, MetricKind};
///
/// let report = "goos: linux\nBenchmarkFoo-8 1000000 150 ns/op 64 B/op 2 allocs/op\nPASS\n";
/// let set = parse(report).unwrap();
///
/// let foo = set.get("BenchmarkFoo-8").unwrap();
/// assert_eq!(foo.iterations(), 1_000_000);
/// assert_eq!(foo.value(MetricKind::TimePerOp), Some(150.0));
/// assert_eq!(foo.value(MetricKind::Throughput), None);
/// ```
pub fn parse(text: &str) -> Result<BenchmarkSet, ParseError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse a report with custom options.
///
/// # Errors
///
/// Returns [`ParseError`] when the text holds no benchmark line at all.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<BenchmarkSet, ParseError> {
    let mut accumulators: Vec<Accumulator<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut lines_scanned = 0;
    let mut recognized = 0;

    for line in text.lines() {
        lines_scanned += 1;

        let Some(sample) = parse_line(line, options) else {
            continue;
        };
        recognized += 1;

        match positions.get(sample.name) {
            Some(&pos) => accumulators[pos].add(&sample),
            None => {
                positions.insert(sample.name, accumulators.len());
                let mut acc = Accumulator::new(sample.name);
                acc.add(&sample);
                accumulators.push(acc);
            }
        }
    }

    if recognized == 0 {
        return Err(ParseError::new(lines_scanned));
    }

    let records = accumulators
        .into_iter()
        .filter_map(Accumulator::finish)
        .collect();
    Ok(BenchmarkSet::from_unique(records))
}

/// Metrics read from a single benchmark line.
#[derive(Debug, PartialEq)]
struct LineSample<'a> {
    name: &'a str,
    iterations: u64,
    values: MetricValues,
}

/// Recognize one benchmark line.
///
/// A line is recognized once it has a name, an iteration count and at least
/// one pair with a known unit, even if that pair's value is malformed.
fn parse_line<'a>(line: &'a str, options: &ParseOptions) -> Option<LineSample<'a>> {
    let mut fields = line.split_whitespace();

    let name = fields.next()?;
    if let Some(prefix) = &options.name_prefix {
        if !name.starts_with(prefix.as_str()) {
            return None;
        }
    }

    let iterations = fields.next()?.parse::<u64>().ok()?;

    let mut values: MetricValues = [None; MetricKind::COUNT];
    let mut known_unit = false;
    while let (Some(value), Some(unit)) = (fields.next(), fields.next()) {
        let Some(kind) = options.units.lookup(unit) else {
            continue;
        };
        known_unit = true;
        if let Some(v) = parse_value(value) {
            values[kind.index()] = Some(v);
        }
    }

    known_unit.then_some(LineSample {
        name,
        iterations,
        values,
    })
}

#[inline]
fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Running per-metric means for one benchmark name.
///
/// The mean is updated incrementally so that finite inputs near `f64::MAX`
/// never overflow into a non-finite result.
struct Accumulator<'a> {
    name: &'a str,
    iterations: u64,
    means: [f64; MetricKind::COUNT],
    counts: [u32; MetricKind::COUNT],
}

impl<'a> Accumulator<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            iterations: 0,
            means: [0.0; MetricKind::COUNT],
            counts: [0; MetricKind::COUNT],
        }
    }

    fn add(&mut self, sample: &LineSample<'_>) {
        self.iterations = sample.iterations;
        for (i, value) in sample.values.iter().enumerate() {
            if let Some(v) = value {
                self.counts[i] += 1;
                self.means[i] += (v - self.means[i]) / f64::from(self.counts[i]);
            }
        }
    }

    /// Mean of every metric observed; `None` if nothing was ever measured.
    fn finish(self) -> Option<BenchmarkRecord> {
        let mut metrics: MetricValues = [None; MetricKind::COUNT];
        for (i, slot) in metrics.iter_mut().enumerate() {
            if self.counts[i] > 0 {
                *slot = Some(self.means[i]);
            }
        }
        BenchmarkRecord::from_metrics(self.name, self.iterations, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_REPORT: &str = "\
goos: linux
goarch: amd64
pkg: example.com/widgets
cpu: AMD Ryzen 9 5950X 16-Core Processor
BenchmarkEncode-32       	 1000000	      1052 ns/op	 121.63 MB/s	     512 B/op	       3 allocs/op
BenchmarkDecode-32       	  500000	      2310 ns/op	      55.41 MB/s
PASS
ok  	example.com/widgets	3.140s
";

    fn time(set: &BenchmarkSet, name: &str) -> Option<f64> {
        set.get(name).and_then(|r| r.value(MetricKind::TimePerOp))
    }

    #[test]
    fn test_parse_go_report() {
        let set = parse(GO_REPORT).unwrap();
        assert_eq!(
            set.names().collect::<Vec<_>>(),
            vec!["BenchmarkEncode-32", "BenchmarkDecode-32"]
        );

        let encode = set.get("BenchmarkEncode-32").unwrap();
        assert_eq!(encode.iterations(), 1_000_000);
        assert_eq!(encode.value(MetricKind::TimePerOp), Some(1052.0));
        assert_eq!(encode.value(MetricKind::Throughput), Some(121.63));
        assert_eq!(encode.value(MetricKind::BytesPerOp), Some(512.0));
        assert_eq!(encode.value(MetricKind::AllocsPerOp), Some(3.0));

        let decode = set.get("BenchmarkDecode-32").unwrap();
        assert!(!decode.is_measured(MetricKind::BytesPerOp));
        assert!(!decode.is_measured(MetricKind::AllocsPerOp));
    }

    #[test]
    fn test_no_benchmark_lines_is_error() {
        let err = parse("PASS\nok  \tpkg\t0.1s\n\n").unwrap_err();
        assert_eq!(err.lines_scanned, 3);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert_eq!(parse("").unwrap_err().lines_scanned, 0);
    }

    #[test]
    fn test_repeated_name_is_averaged() {
        let set = parse("BenchmarkA 10 100 ns/op\nBenchmarkA 20 200 ns/op\n").unwrap();
        assert_eq!(set.len(), 1);
        let a = set.get("BenchmarkA").unwrap();
        assert_eq!(a.value(MetricKind::TimePerOp), Some(150.0));
        assert_eq!(a.iterations(), 20);
    }

    #[test]
    fn test_repeat_keeps_first_position() {
        let report = "BenchmarkA 1 1 ns/op\nBenchmarkB 1 2 ns/op\nBenchmarkA 1 3 ns/op\n";
        let set = parse(report).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["BenchmarkA", "BenchmarkB"]);
        assert_eq!(time(&set, "BenchmarkA"), Some(2.0));
    }

    #[test]
    fn test_metrics_averaged_independently() {
        let report = "\
BenchmarkA 1 100 ns/op 10 B/op
BenchmarkA 1 300 ns/op
";
        let set = parse(report).unwrap();
        let a = set.get("BenchmarkA").unwrap();
        assert_eq!(a.value(MetricKind::TimePerOp), Some(200.0));
        assert_eq!(a.value(MetricKind::BytesPerOp), Some(10.0));
    }

    #[test]
    fn test_malformed_value_drops_only_that_metric() {
        let set = parse("BenchmarkA 10 abc ns/op 64 B/op\n").unwrap();
        let a = set.get("BenchmarkA").unwrap();
        assert!(!a.is_measured(MetricKind::TimePerOp));
        assert_eq!(a.value(MetricKind::BytesPerOp), Some(64.0));
    }

    #[test]
    fn test_malformed_value_does_not_poison_mean() {
        let set = parse("BenchmarkA 1 100 ns/op\nBenchmarkA 1 x ns/op\n").unwrap();
        assert_eq!(time(&set, "BenchmarkA"), Some(100.0));
    }

    #[test]
    fn test_non_finite_values_are_malformed() {
        let set = parse("BenchmarkA 1 NaN ns/op 1 allocs/op\nBenchmarkB 1 inf ns/op 2 allocs/op\n")
            .unwrap();
        assert_eq!(time(&set, "BenchmarkA"), None);
        assert_eq!(time(&set, "BenchmarkB"), None);
    }

    #[test]
    fn test_mean_of_values_near_max_stays_finite() {
        let set = parse("BenchmarkA 1 1e308 ns/op\nBenchmarkA 1 1e308 ns/op\n").unwrap();
        assert_eq!(time(&set, "BenchmarkA"), Some(1e308));

        let set = parse("BenchmarkA 1 1.7e308 ns/op\nBenchmarkA 1 1.5e308 ns/op\n").unwrap();
        let mean = time(&set, "BenchmarkA").unwrap();
        assert!(mean.is_finite());
        assert!((mean - 1.6e308).abs() <= 1e295);
    }

    #[test]
    fn test_line_with_only_malformed_metrics_emits_no_record() {
        let set = parse("BenchmarkA 1 oops ns/op\nBenchmarkB 1 5 ns/op\n").unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["BenchmarkB"]);
    }

    #[test]
    fn test_recognized_but_empty_report_is_not_error() {
        let set = parse("BenchmarkA 1 oops ns/op\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_metricless_first_line_reserves_position() {
        let report = "BenchmarkA 1 ? ns/op\nBenchmarkB 1 5 ns/op\nBenchmarkA 1 7 ns/op\n";
        let set = parse(report).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["BenchmarkA", "BenchmarkB"]);
        assert_eq!(time(&set, "BenchmarkA"), Some(7.0));
    }

    #[test]
    fn test_bad_iteration_count_skips_line() {
        assert!(parse("BenchmarkA -5 100 ns/op\n").is_err());
        assert!(parse("BenchmarkA 1.5 100 ns/op\n").is_err());
    }

    #[test]
    fn test_unknown_units_ignored() {
        let set = parse("BenchmarkA 10 7 widgets/op 100 ns/op\n").unwrap();
        assert_eq!(time(&set, "BenchmarkA"), Some(100.0));
        assert!(parse("BenchmarkA 10 7 widgets/op\n").is_err());
    }

    #[test]
    fn test_trailing_token_ignored() {
        let set = parse("BenchmarkA 10 100 ns/op 64\n").unwrap();
        let a = set.get("BenchmarkA").unwrap();
        assert_eq!(a.measured().count(), 1);
    }

    #[test]
    fn test_scientific_notation() {
        let set = parse("BenchmarkA 1 1.5e+03 ns/op\n").unwrap();
        assert_eq!(time(&set, "BenchmarkA"), Some(1500.0));
    }

    #[test]
    fn test_name_prefix_filter() {
        let options = ParseOptions::new().with_name_prefix("Benchmark");
        let set = parse_with_options("Foo 1 1 ns/op\nBenchmarkBar 1 2 ns/op\n", &options).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["BenchmarkBar"]);
    }

    #[test]
    fn test_custom_unit_table() {
        let units = UnitTable::empty().with_label("cycles/op", MetricKind::TimePerOp);
        let options = ParseOptions::new().with_units(units);
        let set = parse_with_options("BenchmarkA 1 42 cycles/op 10 ns/op\n", &options).unwrap();
        assert_eq!(time(&set, "BenchmarkA"), Some(42.0));
    }

    #[test]
    fn test_parse_line_tolerates_whitespace() {
        let options = ParseOptions::default();
        let sample = parse_line("   BenchmarkA\t\t 3   9 ns/op   ", &options).unwrap();
        assert_eq!(sample.name, "BenchmarkA");
        assert_eq!(sample.iterations, 3);
        assert_eq!(sample.values[MetricKind::TimePerOp.index()], Some(9.0));
    }

    #[test]
    fn test_crlf_line_endings() {
        let set = parse("BenchmarkA 1 10 ns/op\r\nBenchmarkB 1 20 ns/op\r\n").unwrap();
        assert_eq!(set.len(), 2);
    }
}
