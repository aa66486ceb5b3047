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

//! In-memory store.

use crate::error::{Result, StoreError};
use crate::model::{self, ReportId, StoredReport};
use crate::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

/// Append-only in-memory store.
///
/// Identifiers are 1-based positions in the list. Every operation holds the
/// single lock for its whole duration. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: Mutex<Vec<StoredReport>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create(&self, content: String) -> Result<ReportId> {
        let mut reports = self.reports.lock();
        let id = reports.len() as ReportId + 1;
        reports.push(StoredReport {
            id,
            created: model::now(),
            content,
        });
        debug!(id, "stored report in memory");
        Ok(id)
    }

    async fn find(&self, id: ReportId) -> Result<StoredReport> {
        let reports = self.reports.lock();
        usize::try_from(id)
            .ok()
            .and_then(|pos| pos.checked_sub(1))
            .and_then(|pos| reports.get(pos))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, older_than: DateTime<Utc>, limit: usize) -> Result<Vec<StoredReport>> {
        let reports = self.reports.lock();
        Ok(reports
            .iter()
            .rev()
            .filter(|report| report.created <= older_than)
            .take(limit)
            .cloned()
            .collect())
    }
}
