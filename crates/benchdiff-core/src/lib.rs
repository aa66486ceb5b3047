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

//! Benchmark report comparison engine.
//!
//! Turns two plain-text benchmark reports (Go `testing` style, one line per
//! measured operation) into an order-stable diff table:
//!
//! - [`parse`]: report text → [`BenchmarkSet`], repeated names averaged
//! - [`correlate`]: two sets → [`ComparisonEntry`] list, matched by name
//! - [`Delta`]: signed percentage change with a zero-baseline sentinel
//! - [`TableRenderer`]: entries → column-aligned table
//! - [`compare`]: the whole pipeline
//!
//! Everything here is pure: no I/O, no logging, no shared state.
//!
//! # Examples
//!
//! ```
//! let before = "BenchmarkFoo-8 1000000 150 ns/op\nBenchmarkBar-8 500000 300 ns/op\n";
//! let after = "BenchmarkFoo-8 1000000 180 ns/op\nBenchmarkBar-8 500000 270 ns/op\n";
//!
//! let table = benchdiff_core::compare(before, after).unwrap();
//! assert_eq!(table, "Foo  150ns  180ns  +20.00%\nBar  300ns  270ns  -10.00%\n");
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` for the data model (records, sets, entries, deltas).

mod compare;
mod correlate;
mod delta;
mod error;
mod metric;
mod parser;
mod record;
mod render;

pub use compare::{compare, Comparator};
pub use correlate::{correlate, ComparisonEntry};
pub use delta::{delta, Change, Delta};
pub use error::{CompareError, CompareResult, ParseError, Side};
pub use metric::{MetricKind, UnitTable, UnknownMetric};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use record::{BenchmarkRecord, BenchmarkSet, MetricValues};
pub use render::{display_name, format_value, TableRenderer, TableRow, DEFAULT_PADDING};
