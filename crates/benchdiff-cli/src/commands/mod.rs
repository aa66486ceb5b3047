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

//! CLI command implementations

mod compare;
mod parse;

pub use compare::{compare, CompareOptions};
pub use parse::parse;

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};

/// Default maximum input file size (1 GB).
/// Can be overridden via the BENCHDIFF_MAX_FILE_SIZE environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("BENCHDIFF_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a report from disk, refusing files above the size limit.
///
/// # Errors
///
/// Returns `Err` if the file cannot be inspected or read, is not UTF-8, or
/// exceeds the limit set by `BENCHDIFF_MAX_FILE_SIZE`.
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max = get_max_file_size();
    if metadata.len() > max {
        return Err(CliError::FileTooLarge {
            path: path.into(),
            actual: metadata.len(),
            max,
            max_mb: max / (1024 * 1024),
        });
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write command output to stdout.
pub fn write_output(content: &str) -> Result<(), CliError> {
    io::stdout()
        .write_all(content.as_bytes())
        .map_err(|e| CliError::Output(e.to_string()))
}
