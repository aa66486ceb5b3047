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

//! Parse command - show how a report is understood

use super::{read_file, write_output};
use crate::cli::OutputFormat;
use crate::error::CliError;
use benchdiff_core::{format_value, parse as parse_report, BenchmarkSet, TableRenderer};

/// Print the benchmarks found in a report file.
///
/// Text output has one line per benchmark: name, iteration count, and every
/// measured metric.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or holds no benchmark lines.
pub fn parse(file: &str, format: OutputFormat) -> Result<(), CliError> {
    let content = read_file(file)?;
    let set = parse_report(&content).map_err(|source| CliError::Report {
        path: file.into(),
        source,
    })?;

    let output = match format {
        OutputFormat::Text => render_text(&set),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&set)?;
            json.push('\n');
            json
        }
    };
    write_output(&output)
}

fn render_text(set: &BenchmarkSet) -> String {
    let rows: Vec<[String; 3]> = set
        .iter()
        .map(|record| {
            let metrics: Vec<String> = record
                .measured()
                .map(|(kind, value)| format_value(value, kind))
                .collect();
            [
                record.name().to_string(),
                record.iterations().to_string(),
                metrics.join(" "),
            ]
        })
        .collect();
    TableRenderer::new().layout(&rows)
}
