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

//! Benchdiff HTTP server binary.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store on port 8000
//! benchdiff-server
//!
//! # Persistent store
//! DATABASE_URL=/var/lib/benchdiff/reports.db benchdiff-server --port 9000
//!
//! # Request tracing
//! RUST_LOG=benchdiff_server=debug,tower_http=debug benchdiff-server
//! ```

use anyhow::Context;
use benchdiff_server::{config, ServerConfig};
use benchdiff_store::{MemoryStore, SqliteStore, Store};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::parse();

    let store: Arc<dyn Store> = match &config.database {
        Some(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("cannot open database {}", path.display()))?;
            info!(path = %path.display(), "using sqlite storage");
            Arc::new(store)
        }
        None => {
            info!("using an in memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    benchdiff_server::serve(&config, store).await
}
