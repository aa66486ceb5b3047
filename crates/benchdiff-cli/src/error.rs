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

//! Error type of the `benchdiff` command.

use benchdiff_core::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a `benchdiff` command can fail with.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// An input file is above the size limit.
    #[error(
        "File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB). \
         Set BENCHDIFF_MAX_FILE_SIZE (in bytes) to raise the limit"
    )]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// An input file holds no benchmark lines.
    #[error("cannot parse '{path}': {source}")]
    Report {
        /// The file that failed to parse
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: ParseError,
    },

    /// JSON output could not be produced.
    #[error("JSON format error: {0}")]
    Json(String),

    /// Writing to stdout failed.
    #[error("cannot write output: {0}")]
    Output(String),

    /// `--threshold` was exceeded.
    #[error("{count} benchmark(s) regressed by more than {threshold}% (worst: {worst})")]
    ThresholdExceeded {
        /// Number of offending rows
        count: usize,
        /// The configured threshold, in percent
        threshold: f64,
        /// Display name and delta of the worst row
        worst: String,
    },
}

impl CliError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
