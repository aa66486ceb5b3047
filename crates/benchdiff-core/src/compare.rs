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

//! Two-report comparison pipeline: parse, correlate, render.

use crate::correlate::correlate;
use crate::error::{CompareError, CompareResult, Side};
use crate::parser::{parse_with_options, ParseOptions};
use crate::record::BenchmarkSet;
use crate::render::TableRenderer;

/// Parse options and table settings for a comparison.
///
/// A `Comparator` holds no state between calls; one value can serve any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    /// How report text is parsed.
    pub options: ParseOptions,
    /// How the diff table is laid out.
    pub renderer: TableRenderer,
}

impl Comparator {
    /// Comparator with default parse options and renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the renderer.
    pub fn with_renderer(mut self, renderer: TableRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Parse both reports, naming the side that fails.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Parse`] if either report has no benchmark lines.
    pub fn parse_pair(&self, before: &str, after: &str) -> CompareResult<(BenchmarkSet, BenchmarkSet)> {
        let before = parse_with_options(before, &self.options)
            .map_err(|e| CompareError::parse(Side::First, e))?;
        let after = parse_with_options(after, &self.options)
            .map_err(|e| CompareError::parse(Side::Second, e))?;
        Ok((before, after))
    }

    /// Compare two reports and render the diff table.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Parse`] if either report has no benchmark lines.
    pub fn compare(&self, before: &str, after: &str) -> CompareResult<String> {
        let (before, after) = self.parse_pair(before, after)?;
        let entries = correlate(&before, &after);
        Ok(self.renderer.render(&entries))
    }
}

/// Compare two reports with default settings.
///
/// # Errors
///
/// Returns [`CompareError::Parse`] naming the report that holds no benchmark
/// lines.
///
/// # Examples
///
/// ```
/// use benchdiff_core::{compare, Side};
///
/// let table = compare(
///     "BenchmarkFoo-8 1000000 150 ns/op\nBenchmarkBar-8 500000 300 ns/op\n",
///     "BenchmarkFoo-8 1000000 180 ns/op\nBenchmarkBar-8 500000 270 ns/op\n",
/// )
/// .unwrap();
/// assert_eq!(table, "Foo  150ns  180ns  +20.00%\nBar  300ns  270ns  -10.00%\n");
///
/// let err = compare("BenchmarkFoo-8 1 1 ns/op\n", "garbage\n").unwrap_err();
/// assert_eq!(err.side(), Side::Second);
/// ```
pub fn compare(before: &str, after: &str) -> CompareResult<String> {
    Comparator::default().compare(before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;

    #[test]
    fn test_first_side_failure_reported_first() {
        let err = compare("nothing here", "also nothing").unwrap_err();
        assert_eq!(err.side(), Side::First);
    }

    #[test]
    fn test_second_side_failure() {
        let err = compare("BenchmarkA 1 1 ns/op", "").unwrap_err();
        assert_eq!(err.side(), Side::Second);
        assert!(err.to_string().starts_with("cannot parse second report"));
    }

    #[test]
    fn test_no_common_benchmarks_renders_empty_table() {
        let table = compare("BenchmarkA 1 1 ns/op\n", "BenchmarkB 1 1 ns/op\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_comparator_with_custom_settings() {
        let comparator = Comparator::new()
            .with_options(ParseOptions::new().with_name_prefix("Benchmark"))
            .with_renderer(TableRenderer::new().with_metric(MetricKind::AllocsPerOp));
        let table = comparator
            .compare(
                "noise 1 1 allocs/op\nBenchmarkA 1 10 ns/op 4 allocs/op\n",
                "BenchmarkA 1 10 ns/op 2 allocs/op\n",
            )
            .unwrap();
        assert_eq!(table, "A  4allocs  2allocs  -50.00%\n");
    }

    #[test]
    fn test_compare_is_usable_across_threads() {
        let comparator = std::sync::Arc::new(Comparator::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let comparator = comparator.clone();
                std::thread::spawn(move || {
                    let before = format!("BenchmarkA 1 {} ns/op\n", 100 + i);
                    comparator.compare(&before, "BenchmarkA 1 100 ns/op\n")
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }
}
