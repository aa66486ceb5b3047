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

//! Route handlers.
//!
//! Each handler delegates to a fallible function and hands the result to
//! [`AppState::respond`], which renders failures through the shared error
//! page.

use crate::error::{ApiError, ApiResult};
use crate::{AppState, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MIN_UPLOAD_BYTES};
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use benchdiff_store::{ReportId, Store};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt::Write;
use tracing::{debug, info};

/// `POST /upload`: store a raw report.
pub async fn upload(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = upload_report(&state, body).await;
    state.respond(result)
}

async fn upload_report(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::UploadTooLarge(state.max_upload_bytes)
        } else {
            ApiError::from(rejection)
        }
    })?;
    if body.len() < MIN_UPLOAD_BYTES {
        info!(bytes = body.len(), "rejected undersized upload");
        return Err(ApiError::UploadTooSmall(body.len()));
    }
    let content = String::from_utf8(body.to_vec()).map_err(|_| ApiError::InvalidEncoding)?;
    let bytes = content.len();
    let id = state.store_call(state.store().create(content)).await?;
    info!(id, bytes, "stored report");
    Ok((StatusCode::CREATED, format!("{}\n", id)).into_response())
}

/// Query of the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    limit: Option<String>,
}

/// `GET /`: most recent reports, one `<id>\t<created>` line each.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let result = list_reports(&state, params).await;
    state.respond(result)
}

async fn list_reports(
    state: &AppState,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params?;
    let limit = match params.limit.as_deref() {
        Some(raw) => ApiError::parse_number::<usize>("limit", raw)?,
        None => DEFAULT_LIST_LIMIT,
    }
    .min(MAX_LIST_LIMIT);

    let reports = state.store_call(state.store().list(Utc::now(), limit)).await?;
    let mut body = String::with_capacity(reports.len() * 40);
    for report in &reports {
        let _ = writeln!(
            body,
            "{}\t{}",
            report.id,
            report.created.to_rfc3339_opts(SecondsFormat::Micros, true)
        );
    }
    Ok(body.into_response())
}

/// `GET /benchmarks/:id`: raw content of one report.
pub async fn show(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let result = show_report(&state, id).await;
    state.respond(result)
}

async fn show_report(
    state: &AppState,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let Path(id) = id?;
    let id: ReportId = ApiError::parse_number("id", &id)?;
    let report = state.store_call(state.store().find(id)).await?;
    Ok(report.content.into_response())
}

/// Query of the compare route.
#[derive(Debug, Default, Deserialize)]
pub struct CompareParams {
    a: Option<String>,
    b: Option<String>,
}

/// `GET /compare?a=<id>&b=<id>`: diff table of two stored reports.
pub async fn compare(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Query<CompareParams>, QueryRejection>,
) -> Response {
    let result = compare_reports(&state, uri.path(), params).await;
    state.respond(result)
}

async fn compare_reports(
    state: &AppState,
    path: &str,
    params: Result<Query<CompareParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params?;
    let (Some(a), Some(b)) = (non_empty(params.a), non_empty(params.b)) else {
        return Err(ApiError::MissingIds {
            path: path.to_string(),
        });
    };
    let a: ReportId = ApiError::parse_number("a", &a)?;
    let b: ReportId = ApiError::parse_number("b", &b)?;

    let before = state.store_call(state.store().find(a)).await?;
    let after = state.store_call(state.store().find(b)).await?;

    let table = state.comparator().compare(&before.content, &after.content)?;
    debug!(a, b, rows = table.lines().count(), "compared reports");
    Ok(table.into_response())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
