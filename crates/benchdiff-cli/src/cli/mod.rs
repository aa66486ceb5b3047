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

//! Command-line argument definitions.

use crate::commands::{self, CompareOptions};
use crate::error::CliError;
use benchdiff_core::MetricKind;
use clap::{Subcommand, ValueEnum};

/// Output format of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// When to colour the delta column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    /// Always emit colour codes
    Always,
    /// Never emit colour codes
    Never,
}

impl ColorChoice {
    /// Apply the choice to the `colored` crate's global switch.
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => colored::control::unset_override(),
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}

/// Top-level `benchdiff` commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compare two benchmark reports
    ///
    /// Benchmarks are matched by name. Only benchmarks present in both
    /// reports that measured the selected metric on both sides are shown.
    Compare {
        /// Baseline report
        #[arg(value_name = "OLD")]
        old: String,

        /// Report to compare against the baseline
        #[arg(value_name = "NEW")]
        new: String,

        /// Metric to compare (time, throughput, bytes, allocs)
        #[arg(short, long, default_value = "time", value_parser = parse_metric)]
        metric: MetricKind,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Colour the delta column
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Fail when any benchmark regresses by more than this many percent
        #[arg(short, long, value_name = "PCT", value_parser = parse_threshold)]
        threshold: Option<f64>,
    },

    /// Show the benchmarks found in a report
    ///
    /// Repeated runs of the same benchmark are averaged, exactly as compare
    /// sees them.
    Parse {
        /// Report file
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an input cannot be read or parsed, output cannot be
    /// written, or a regression exceeds the threshold.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Compare {
                old,
                new,
                metric,
                format,
                color,
                threshold,
            } => {
                color.apply();
                commands::compare(
                    &old,
                    &new,
                    &CompareOptions {
                        metric,
                        format,
                        threshold,
                    },
                )
            }
            Commands::Parse { file, format } => commands::parse(&file, format),
        }
    }
}

fn parse_metric(s: &str) -> Result<MetricKind, String> {
    s.parse().map_err(|e: benchdiff_core::UnknownMetric| e.to_string())
}

/// A regression limit in percent: finite and not negative.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|_| format!("{:?} is not a number", s))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{} is not a finite, non-negative percentage", s))
    }
}
