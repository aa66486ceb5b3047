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

//! Benchdiff command line interface

use benchdiff_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;

/// Benchdiff - compare benchmark reports
///
/// # Examples
///
/// ```bash
/// # Compare two `go test -bench` outputs
/// benchdiff compare old.txt new.txt
///
/// # Fail CI when anything got more than 5% slower
/// benchdiff compare old.txt new.txt --threshold 5
///
/// # Allocation diff as JSON
/// benchdiff compare old.txt new.txt --metric allocs --format json
/// ```
#[derive(Parser)]
#[command(name = "benchdiff")]
#[command(author, version, about = "Benchdiff - compare benchmark reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
