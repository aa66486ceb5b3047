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

//! Storage error types.

use crate::model::ReportId;
use thiserror::Error;

/// Errors raised by a [`Store`](crate::Store) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No report with this identifier exists.
    #[error("report {0} not found")]
    NotFound(ReportId),

    /// The SQLite backend failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database file or its directory could not be prepared.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The caller stopped waiting before a write committed; nothing was
    /// persisted.
    #[error("write abandoned by caller and rolled back")]
    Abandoned,

    /// A stored creation time is outside the representable range.
    #[error("report {id} has an invalid creation time ({micros} us)")]
    InvalidTimestamp {
        /// Report whose row is damaged.
        id: ReportId,
        /// Raw stored value.
        micros: i64,
    },
}

impl StoreError {
    /// Whether this is a lookup miss rather than a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct_from_failures() {
        assert!(StoreError::NotFound(7).is_not_found());
        let err = StoreError::InvalidTimestamp { id: 1, micros: i64::MAX };
        assert!(!err.is_not_found());
        assert_eq!(StoreError::NotFound(7).to_string(), "report 7 not found");
    }
}
