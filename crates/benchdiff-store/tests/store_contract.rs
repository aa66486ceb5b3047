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

//! Behaviour shared by every `Store` backend.

use benchdiff_store::{MemoryStore, SqliteStore, Store};
use chrono::Utc;
use std::sync::Arc;

fn backends() -> Vec<(&'static str, Arc<dyn Store>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::open_in_memory().unwrap())),
    ]
}

#[tokio::test]
async fn test_ids_are_positive_and_increasing() {
    for (name, store) in backends() {
        let mut last = 0;
        for i in 0..5 {
            let id = store.create(format!("content {}", i)).await.unwrap();
            assert!(id > last, "{}: {} after {}", name, id, last);
            last = id;
        }
    }
}

#[tokio::test]
async fn test_content_is_stored_verbatim() {
    let content = "goos: linux\n\tBenchmarkFoo-8 \t 1000 \t 150 ns/op\r\nPASS\n";
    for (name, store) in backends() {
        let id = store.create(content.to_string()).await.unwrap();
        assert_eq!(store.find(id).await.unwrap().content, content, "{}", name);
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    for (name, store) in backends() {
        store.create("something".into()).await.unwrap();
        for id in [0, 2, 1000] {
            let err = store.find(id).await.unwrap_err();
            assert!(err.is_not_found(), "{}: id {} gave {}", name, id, err);
        }
    }
}

#[tokio::test]
async fn test_list_most_recent_first() {
    for (name, store) in backends() {
        assert!(store.list(Utc::now(), 10).await.unwrap().is_empty(), "{}", name);

        let ids: Vec<_> = create_many(&*store, 3).await;
        let listed: Vec<_> = store
            .list(Utc::now(), 10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        let expected: Vec<_> = ids.into_iter().rev().collect();
        assert_eq!(listed, expected, "{}", name);

        assert_eq!(store.list(Utc::now(), 2).await.unwrap().len(), 2, "{}", name);
    }
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    for (name, store) in backends() {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(format!("report {}", i)).await.unwrap() })
            })
            .collect();
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16, "{}", name);
    }
}

#[tokio::test]
async fn test_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("reports.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        store.create("BenchmarkA 1 10 ns/op\n".into()).await.unwrap()
    };

    let reopened = SqliteStore::open(&path).unwrap();
    let report = reopened.find(id).await.unwrap();
    assert_eq!(report.content, "BenchmarkA 1 10 ns/op\n");
    assert_eq!(reopened.create("next".into()).await.unwrap(), id + 1);
}

async fn create_many(store: &dyn Store, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        ids.push(store.create(format!("r{}", i)).await.unwrap());
    }
    ids
}
