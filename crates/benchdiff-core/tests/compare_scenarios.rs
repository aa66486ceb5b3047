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

//! End-to-end comparisons of realistic `go test -bench` output.

use benchdiff_core::{
    compare, parse, Comparator, CompareError, MetricKind, ParseOptions, Side, TableRenderer,
    UnitTable,
};

const BEFORE: &str = "\
goos: linux
goarch: amd64
pkg: example.com/codec
cpu: AMD Ryzen 9 5950X 16-Core Processor
BenchmarkEncode/small-32         	 2000000	       612 ns/op	  83.65 MB/s	     256 B/op	       4 allocs/op
BenchmarkEncode/large-32         	   10000	    121000 ns/op	 423.21 MB/s	   65536 B/op	      12 allocs/op
BenchmarkDecode-32               	 1000000	      1024 ns/op	     512 B/op	       8 allocs/op
PASS
ok  	example.com/codec	4.512s
";

const AFTER: &str = "\
goos: linux
goarch: amd64
pkg: example.com/codec
BenchmarkDecode-32               	 1000000	       768 ns/op	     256 B/op	       6 allocs/op
BenchmarkEncode/small-32         	 2000000	       700 ns/op	  73.14 MB/s	     256 B/op	       4 allocs/op
BenchmarkStream-32               	  500000	      2000 ns/op
BenchmarkEncode/large-32         	   10000	    121000 ns/op	 423.21 MB/s	   65536 B/op	      12 allocs/op
PASS
ok  	example.com/codec	4.100s
";

#[test]
fn test_spec_scenario() {
    let before = "BenchmarkFoo-8 1000000 150 ns/op\nBenchmarkBar-8 500000 300 ns/op\n";
    let after = "BenchmarkFoo-8 1000000 180 ns/op\nBenchmarkBar-8 500000 270 ns/op\n";
    assert_eq!(
        compare(before, after).unwrap(),
        "Foo  150ns  180ns  +20.00%\nBar  300ns  270ns  -10.00%\n"
    );
}

#[test]
fn test_go_report_time_table() {
    let table = compare(BEFORE, AFTER).unwrap();
    assert_eq!(
        table,
        "\
Encode/small  612ns     700ns     +14.38%
Encode/large  121000ns  121000ns  +0.00%
Decode        1024ns    768ns     -25.00%
"
    );
}

#[test]
fn test_go_report_throughput_table() {
    let table = Comparator::new()
        .with_renderer(TableRenderer::new().with_metric(MetricKind::Throughput))
        .compare(BEFORE, AFTER)
        .unwrap();
    assert_eq!(
        table,
        "\
Encode/small  83.65MB/s   73.14MB/s   -12.56%
Encode/large  423.21MB/s  423.21MB/s  +0.00%
"
    );
}

#[test]
fn test_unparseable_first_report() {
    let err = compare("PASS\nok  \tpkg\t0.1s\n", AFTER).unwrap_err();
    assert_eq!(err.side(), Side::First);
    match err {
        CompareError::Parse { source, .. } => assert_eq!(source.lines_scanned, 2),
    }
}

#[test]
fn test_unparseable_second_report() {
    let err = compare(BEFORE, "").unwrap_err();
    assert_eq!(err.side(), Side::Second);
    assert_eq!(
        err.to_string(),
        "cannot parse second report: no benchmark lines found in 0 line(s) of input"
    );
}

#[test]
fn test_repeated_runs_are_averaged_before_comparison() {
    let before = "BenchmarkA-8 100 100 ns/op\nBenchmarkA-8 100 200 ns/op\n";
    let after = "BenchmarkA-8 100 300 ns/op\n";
    assert_eq!(compare(before, after).unwrap(), "A  150ns  300ns  +100.00%\n");
}

#[test]
fn test_huge_repeated_values_never_render_nan() {
    let before = "BenchmarkA 1 1e308 ns/op\nBenchmarkA 1 1e308 ns/op\n";
    let after = "BenchmarkA 1 1e308 ns/op\n";
    let table = compare(before, after).unwrap();
    assert!(table.ends_with("+0.00%\n"), "{table}");
    assert!(!table.contains("NaN") && !table.contains("inf"), "{table}");
}

#[test]
fn test_custom_units() {
    let units = UnitTable::default().with_label("us/op", MetricKind::TimePerOp);
    let comparator = Comparator::new().with_options(ParseOptions::new().with_units(units));
    let table = comparator
        .compare("BenchmarkA 1 2 us/op\n", "BenchmarkA 1 3 us/op\n")
        .unwrap();
    assert_eq!(table, "A  2ns  3ns  +50.00%\n");
}

#[test]
fn test_parse_keeps_unrendered_metrics() {
    let set = parse(AFTER).unwrap();
    let stream = set.get("BenchmarkStream-32").unwrap();
    assert_eq!(stream.value(MetricKind::TimePerOp), Some(2000.0));
    assert!(!stream.is_measured(MetricKind::Throughput));
    assert_eq!(set.len(), 4);
}
