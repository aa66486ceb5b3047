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

//! Request errors and their HTTP status codes.

use crate::MIN_UPLOAD_BYTES;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use benchdiff_core::CompareError;
use benchdiff_store::{ReportId, StoreError};
use std::time::Duration;
use thiserror::Error;

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload body below the minimum size.
    #[error("report too small: {0} byte(s), at least {} required", MIN_UPLOAD_BYTES)]
    UploadTooSmall(usize),

    /// Upload body above the configured cap.
    #[error("report too large: at most {0} byte(s) accepted")]
    UploadTooLarge(usize),

    /// Upload body is not UTF-8 text.
    #[error("report is not valid UTF-8 text")]
    InvalidEncoding,

    /// A compare request without both identifiers.
    #[error("Missing benchmark IDs. Usage: {path}?a=<ID>&b=<ID>")]
    MissingIds {
        /// Request path, echoed in the usage line.
        path: String,
    },

    /// A query or path value that should be a number.
    #[error("invalid {name}: {value:?} is not a number")]
    InvalidNumber {
        /// Parameter name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// A request the extractors or middleware refused before any handler
    /// logic ran.
    #[error("{message}")]
    Rejected {
        /// Status chosen by the rejecting layer.
        status: StatusCode,
        /// Its explanation.
        message: String,
    },

    /// Unknown report identifier.
    #[error("cannot find benchmark {0}")]
    NotFound(ReportId),

    /// One of the stored reports has no benchmark lines.
    #[error("cannot compare: {0}")]
    Compare(#[from] CompareError),

    /// The store failed.
    #[error("storage failure: {0}")]
    Store(StoreError),

    /// The store did not answer in time.
    #[error("storage did not respond within {0:?}")]
    Timeout(Duration),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {$(
        impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                Self::Rejected {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            }
        }
    )*};
}

impl_from_rejection!(BytesRejection, PathRejection, QueryRejection);

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UploadTooSmall(_)
            | Self::InvalidEncoding
            | Self::MissingIds { .. }
            | Self::InvalidNumber { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Compare(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Parse a numeric parameter.
    pub(crate) fn parse_number<T: std::str::FromStr>(
        name: &'static str,
        value: &str,
    ) -> Result<T, Self> {
        value.trim().parse().map_err(|_| Self::InvalidNumber {
            name,
            value: value.to_string(),
        })
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;
