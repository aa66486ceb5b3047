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

//! HTTP front end for benchmark report comparison.
//!
//! # Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /upload` | Store a raw report, answer `201` with its id |
//! | `GET /` | List stored reports, most recent first |
//! | `GET /benchmarks/:id` | Raw content of one report |
//! | `GET /compare?a=<id>&b=<id>` | Diff table of two reports |
//!
//! Failures are answered with an HTML page rendered from the [`ErrorPage`]
//! held in [`AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use pages::ErrorPage;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use benchdiff_core::Comparator;
use benchdiff_store::Store;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Uploads shorter than this are rejected as dummy content.
pub const MIN_UPLOAD_BYTES: usize = 10;

/// Reports listed when no `limit` is given.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Upper bound on the `limit` query parameter.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    comparator: Arc<Comparator>,
    pages: Arc<ErrorPage>,
    store_timeout: Duration,
    max_upload_bytes: usize,
}

impl AppState {
    /// State with default comparison settings, error page and limits.
    pub fn new(store: Arc<dyn Store>) -> Self {
        let defaults = ServerConfig::default();
        Self {
            store,
            comparator: Arc::new(Comparator::default()),
            pages: Arc::new(ErrorPage::default()),
            store_timeout: defaults.store_timeout(),
            max_upload_bytes: defaults.max_upload_bytes,
        }
    }

    /// State configured from the server flags.
    pub fn from_config(store: Arc<dyn Store>, config: &ServerConfig) -> Self {
        Self::new(store)
            .with_store_timeout(config.store_timeout())
            .with_max_upload_bytes(config.max_upload_bytes)
    }

    /// Replace the comparison settings.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Arc::new(comparator);
        self
    }

    /// Replace the error page template.
    pub fn with_error_page(mut self, page: ErrorPage) -> Self {
        self.pages = Arc::new(page);
        self
    }

    /// Change the per-call storage timeout.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Change the upload body cap.
    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// The report store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The comparison settings.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Await a storage call, bounded by the storage timeout.
    ///
    /// On timeout the call's future is dropped; stores roll back writes
    /// that had not committed by then.
    pub async fn store_call<T, F>(&self, call: F) -> ApiResult<T>
    where
        F: Future<Output = benchdiff_store::Result<T>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => Err(ApiError::Timeout(self.store_timeout)),
        }
    }

    /// Turn a handler result into a response, rendering failures as HTML.
    pub fn respond(&self, result: ApiResult<Response>) -> Response {
        match result {
            Ok(response) => response,
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    error!(%status, error = %err, "request failed");
                } else {
                    debug!(%status, error = %err, "request rejected");
                }
                (
                    status,
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    self.pages.render(&err.to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Bodies of plain error responses read back into the HTML page.
const MAX_REJECTION_BODY_BYTES: usize = 16 * 1024;

/// Render error responses produced outside the handlers (body limit,
/// unmatched routes, wrong methods) through the error page.
async fn render_plain_errors(State(state): State<AppState>, response: Response) -> Response {
    let status = response.status();
    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));
    if !(status.is_client_error() || status.is_server_error()) || is_html {
        return response;
    }

    let err = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::UploadTooLarge(state.max_upload_bytes)
    } else {
        let body = axum::body::to_bytes(response.into_body(), MAX_REJECTION_BODY_BYTES)
            .await
            .unwrap_or_default();
        let text = String::from_utf8_lossy(&body).trim().to_string();
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            text
        };
        ApiError::Rejected { status, message }
    };
    state.respond(Err(err))
}

/// Build the router over `state`.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::list))
        .route("/upload", post(handlers::upload))
        .route("/upload/", post(handlers::upload))
        .route("/benchmarks/:id", get(handlers::show))
        .route("/compare", get(handlers::compare))
        .route("/compare/", get(handlers::compare))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(middleware::map_response_with_state(
            state.clone(),
            render_plain_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, store: Arc<dyn Store>) -> anyhow::Result<()> {
    let app = router(AppState::from_config(store, config));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("running HTTP server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
