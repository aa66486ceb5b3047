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

//! Error types for report parsing and comparison.
//!
//! Malformed tokens inside a benchmark line never surface here: the parser
//! drops the offending metric and keeps going. Only a report with no
//! benchmark lines at all is an error.

use std::fmt;
use thiserror::Error;

/// A report contained no recognizable benchmark lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no benchmark lines found in {lines_scanned} line(s) of input")]
pub struct ParseError {
    /// Number of input lines examined.
    pub lines_scanned: usize,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(lines_scanned: usize) -> Self {
        Self { lines_scanned }
    }
}

/// Which of the two compared reports an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The baseline ("before") report.
    First,
    /// The candidate ("after") report.
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Failure of a two-report comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// One of the reports could not be parsed.
    #[error("cannot parse {side} report: {source}")]
    Parse {
        /// Which report failed.
        side: Side,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
}

impl CompareError {
    /// Create a parse error for the given side.
    pub fn parse(side: Side, source: ParseError) -> Self {
        Self::Parse { side, source }
    }

    /// Which report failed.
    pub fn side(&self) -> Side {
        match self {
            Self::Parse { side, .. } => *side,
        }
    }
}

/// Result type for comparison operations.
pub type CompareResult<T> = Result<T, CompareError>;
