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

//! SQLite store.

use crate::error::{Result, StoreError};
use crate::model::{self, ReportId, StoredReport};
use crate::{schema, Store};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Store backed by a single SQLite connection.
///
/// The connection sits behind a mutex; every query runs on tokio's blocking
/// pool so request handlers never block the runtime.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a database file, creating parent directories and the
    /// schema as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening sqlite store");
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await?
    }

    /// Run `f` inside a transaction on the blocking pool.
    ///
    /// Dropping the returned future marks the write abandoned: a blocking
    /// task that has not committed yet rolls back and persists nothing.
    async fn write<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let guard = AbandonOnDrop::default();
        let abandoned = Arc::clone(&guard.0);
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            if abandoned.load(Ordering::Acquire) {
                return Err(StoreError::Abandoned);
            }
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            if abandoned.load(Ordering::Acquire) {
                debug!("rolling back abandoned write");
                return Err(StoreError::Abandoned);
            }
            tx.commit()?;
            Ok(value)
        });
        let result = task.await?;
        drop(guard);
        result
    }
}

/// Flags a pending write as abandoned when the awaiting future is dropped.
#[derive(Default)]
struct AbandonOnDrop(Arc<AtomicBool>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

type RawRow = (ReportId, i64, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn into_report((id, micros, content): RawRow) -> Result<StoredReport> {
    let created = DateTime::from_timestamp_micros(micros)
        .ok_or(StoreError::InvalidTimestamp { id, micros })?;
    Ok(StoredReport { id, created, content })
}

#[async_trait]
impl Store for SqliteStore {
    async fn create(&self, content: String) -> Result<ReportId> {
        let created = model::now().timestamp_micros();
        let id = self
            .write(move |tx| {
                tx.execute(
                    "INSERT INTO reports (created_us, content) VALUES (?1, ?2)",
                    params![created, content],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .await?;
        debug!(id, "stored report in sqlite");
        Ok(id)
    }

    async fn find(&self, id: ReportId) -> Result<StoredReport> {
        self.run(move |conn| {
            let raw = conn
                .query_row(
                    "SELECT id, created_us, content FROM reports WHERE id = ?1",
                    params![id],
                    read_row,
                )
                .optional()?;
            raw.map_or(Err(StoreError::NotFound(id)), into_report)
        })
        .await
    }

    async fn list(&self, older_than: DateTime<Utc>, limit: usize) -> Result<Vec<StoredReport>> {
        let cutoff = older_than.timestamp_micros();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, created_us, content FROM reports
                 WHERE created_us <= ?1
                 ORDER BY created_us DESC, id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![cutoff, limit], read_row)?;
            let reports = rows
                .map(|raw| into_report(raw?))
                .collect::<Result<Vec<_>>>()?;
            Ok(reports)
        })
        .await
    }
}
