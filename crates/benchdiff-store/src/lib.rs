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

//! Persistence of raw benchmark reports.
//!
//! Reports are stored verbatim; parsing happens at comparison time. Two
//! backends implement [`Store`]:
//!
//! - [`MemoryStore`]: an append-only list behind one lock, for tests and
//!   throwaway servers
//! - [`SqliteStore`]: a single SQLite connection, queried on the blocking
//!   thread pool
//!
//! # Examples
//!
//! ```
//! use benchdiff_store::{MemoryStore, Store};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! let id = store.create("BenchmarkFoo-8 1000 150 ns/op\n".to_string()).await.unwrap();
//! assert_eq!(store.find(id).await.unwrap().id, id);
//! assert!(store.find(id + 1).await.unwrap_err().is_not_found());
//! # });
//! ```

mod error;
mod memory;
mod model;
mod schema;
mod sqlite;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use model::{ReportId, StoredReport};
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A report repository.
///
/// Implementations must be safe to share between request handlers.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a raw report and return its new identifier.
    ///
    /// A call whose future is dropped before it resolves must not leave a
    /// report behind that the caller never learned the identifier of.
    async fn create(&self, content: String) -> Result<ReportId>;

    /// Fetch a report.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no report has this identifier.
    async fn find(&self, id: ReportId) -> Result<StoredReport>;

    /// Up to `limit` reports created at or before `older_than`, most recent
    /// first. An empty result is not an error.
    async fn list(&self, older_than: DateTime<Utc>, limit: usize) -> Result<Vec<StoredReport>>;
}
