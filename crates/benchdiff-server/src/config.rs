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

//! Server configuration, from flags or environment variables.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Default cap on upload bodies (8 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is unset, empty or invalid.
pub const DEFAULT_LOG_DIRECTIVE: &str = "benchdiff_server=info";

/// Log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_DIRECTIVE`].
pub fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Log filter from an explicit directive string. The directives replace
/// the default entirely rather than being merged with it.
pub fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Runtime configuration of the HTTP service.
#[derive(Debug, Clone, Parser)]
#[command(name = "benchdiff-server")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "Upload benchmark reports and compare them over HTTP")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file; reports are kept in memory when omitted
    #[arg(long, env = "DATABASE_URL")]
    pub database: Option<PathBuf>,

    /// Seconds a single storage call may take before the request fails
    #[arg(long, default_value_t = 5)]
    pub store_timeout_secs: u64,

    /// Largest accepted upload body, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database: None,
            store_timeout_secs: 5,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout applied to each storage call.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
