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

//! Compare command - diff two benchmark reports

use super::{read_file, write_output};
use crate::cli::OutputFormat;
use crate::error::CliError;
use benchdiff_core::{
    correlate, Change, CompareError, Comparator, ComparisonEntry, Delta, MetricKind, Side,
    TableRenderer, TableRow,
};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Settings of one `compare` run.
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions {
    /// Metric shown in the table and checked against the threshold.
    pub metric: MetricKind,
    /// Output format.
    pub format: OutputFormat,
    /// Largest tolerated regression, in percent.
    pub threshold: Option<f64>,
}

/// Compare two report files and print the result.
///
/// # Errors
///
/// Returns `Err` if either file cannot be read or holds no benchmark lines,
/// or when `threshold` is set and a benchmark regressed by more than it.
pub fn compare(old: &str, new: &str, options: &CompareOptions) -> Result<(), CliError> {
    let old_text = read_file(old)?;
    let new_text = read_file(new)?;

    let (before, after) = Comparator::new()
        .parse_pair(&old_text, &new_text)
        .map_err(|err| {
            let path = match err.side() {
                Side::First => old,
                Side::Second => new,
            };
            let CompareError::Parse { source, .. } = err;
            CliError::Report {
                path: path.into(),
                source,
            }
        })?;

    let renderer = TableRenderer::new().with_metric(options.metric);
    let entries = correlate(&before, &after);
    let rows = renderer.rows(&entries);

    let output = match options.format {
        OutputFormat::Text => render_text(&renderer, &rows, options.metric),
        OutputFormat::Json => render_json(&entries, options.metric)?,
    };
    write_output(&output)?;

    match options.threshold {
        Some(threshold) => check_threshold(&rows, options.metric, threshold),
        None => Ok(()),
    }
}

fn render_text(renderer: &TableRenderer, rows: &[TableRow], metric: MetricKind) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            let [name, before, after, delta] = row.cells();
            let delta = match row.delta.classify(metric) {
                Change::Regression => delta.red().to_string(),
                Change::Improvement => delta.green().to_string(),
                Change::Unchanged => delta,
            };
            [name, before, after, delta]
        })
        .collect();
    renderer.layout(&cells)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metric: MetricKind,
    entries: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    entry: ComparisonEntry<'a>,
    deltas: BTreeMap<&'static str, Delta>,
    change: Option<Change>,
}

fn render_json(entries: &[ComparisonEntry<'_>], metric: MetricKind) -> Result<String, CliError> {
    let report = JsonReport {
        metric,
        entries: entries
            .iter()
            .map(|entry| JsonEntry {
                entry: *entry,
                deltas: MetricKind::ALL
                    .iter()
                    .filter_map(|&kind| entry.delta(kind).map(|d| (kind.name(), d)))
                    .collect(),
                change: entry.delta(metric).map(|d| d.classify(metric)),
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn check_threshold(rows: &[TableRow], metric: MetricKind, threshold: f64) -> Result<(), CliError> {
    let offenders: Vec<(&TableRow, f64)> = rows
        .iter()
        .filter(|row| row.delta.classify(metric) == Change::Regression)
        .filter_map(|row| row.delta.percent().map(|p| (row, p.abs())))
        .filter(|(_, magnitude)| *magnitude > threshold)
        .collect();

    let Some((worst, _)) = offenders
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
    else {
        return Ok(());
    };

    Err(CliError::ThresholdExceeded {
        count: offenders.len(),
        threshold,
        worst: format!("{} {}", worst.name, worst.delta),
    })
}
