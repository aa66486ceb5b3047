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

//! Property-based tests for the comparison pipeline.
//!
//! # Properties Tested
//!
//! 1. **Determinism**: the same pair of reports always renders the same table
//! 2. **Order Preservation**: rows follow first-seen order of the first report
//! 3. **Aggregation**: repeated names average each metric
//! 4. **Identity Delta**: comparing a report with itself shows `+0.00%` everywhere
//! 5. **Filter Correctness**: one-sided benchmarks never produce rows

use benchdiff_core::{compare, correlate, parse, Delta, MetricKind, TableRenderer};
use proptest::prelude::*;
use std::collections::HashSet;

/// Distinct benchmark names in generation order.
fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z][a-zA-Z]{0,8}", 1..12).prop_map(|names| {
        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter(|n| seen.insert(n.clone()))
            .map(|n| format!("Benchmark{}", n))
            .collect()
    })
}

fn report(names: &[String], values: &[u32]) -> String {
    let mut text = String::from("goos: linux\ngoarch: amd64\n");
    for (name, value) in names.iter().zip(values.iter().cycle()) {
        text.push_str(&format!("{}-8 1000 {} ns/op 16 B/op 1 allocs/op\n", name, value));
    }
    text.push_str("PASS\nok  \texample.com/pkg\t1.234s\n");
    text
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: rendering is a pure function of the two inputs.
    #[test]
    fn prop_compare_determinism(
        names in names(),
        before in prop::collection::vec(1u32..100_000, 1..12),
        after in prop::collection::vec(1u32..100_000, 1..12),
    ) {
        let a = report(&names, &before);
        let b = report(&names, &after);

        let first = compare(&a, &b).unwrap();
        let second = compare(&a, &b).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: the parsed set keeps first-seen order, even with repeats.
    #[test]
    fn prop_order_preservation(
        names in names(),
        values in prop::collection::vec(1u32..1000, 1..12),
    ) {
        let mut text = report(&names, &values);
        // Repeat the report reversed; positions must not move.
        let reversed: Vec<String> = names.iter().rev().cloned().collect();
        text.push_str(&report(&reversed, &values));

        let set = parse(&text).unwrap();
        let parsed: Vec<String> = set.names().map(|n| n.trim_end_matches("-8").to_string()).collect();
        prop_assert_eq!(parsed, names);
    }

    /// Property: a metric observed twice is the mean of both observations.
    #[test]
    fn prop_aggregation_is_mean(a in 0u32..1_000_000, b in 0u32..1_000_000) {
        let text = format!("BenchmarkX-8 10 {} ns/op\nBenchmarkX-8 20 {} ns/op\n", a, b);
        let set = parse(&text).unwrap();
        let record = set.get("BenchmarkX-8").unwrap();

        let expected = (f64::from(a) + f64::from(b)) / 2.0;
        let actual = record.value(MetricKind::TimePerOp).unwrap();
        prop_assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
        prop_assert_eq!(record.iterations(), 20);
    }

    /// Property: any value compared with itself has a zero delta.
    #[test]
    fn prop_identity_delta(v in 1e-6f64..1e12) {
        let d = Delta::between(v, v);
        prop_assert_eq!(d, Delta::Percent(0.0));
        prop_assert_eq!(d.to_string(), "+0.00%");
    }

    /// Property: a report compared with itself shows no change on any row.
    #[test]
    fn prop_self_compare_rows_are_zero(
        names in names(),
        values in prop::collection::vec(0u32..100_000, 1..12),
    ) {
        let text = report(&names, &values);
        let table = compare(&text, &text).unwrap();

        prop_assert_eq!(table.lines().count(), names.len());
        for line in table.lines() {
            prop_assert!(line.ends_with("+0.00%"), "unexpected row {:?}", line);
        }
    }

    /// Property: only names present on both sides reach the table.
    #[test]
    fn prop_filter_correctness(
        names in names(),
        split in 0usize..12,
        values in prop::collection::vec(1u32..1000, 1..12),
    ) {
        let split = split.min(names.len());
        let (left, right) = names.split_at(split);
        let shared: Vec<String> = names.iter().step_by(2).cloned().collect();

        let mut before_names = left.to_vec();
        before_names.extend(shared.iter().filter(|n| !left.contains(n)).cloned());
        let mut after_names = right.to_vec();
        after_names.extend(shared.iter().filter(|n| !right.contains(n)).cloned());

        let before = parse(&report(&before_names, &values)).unwrap_or_default();
        let after = parse(&report(&after_names, &values)).unwrap_or_default();

        let entries = correlate(&before, &after);
        let rows = TableRenderer::new().with_trim_names(false).rows(&entries);

        let paired: HashSet<&str> = entries.iter().filter(|e| e.is_paired()).map(|e| e.name()).collect();
        prop_assert_eq!(rows.len(), paired.len());
        for row in &rows {
            prop_assert!(paired.contains(row.name.as_str()));
        }
    }
}
