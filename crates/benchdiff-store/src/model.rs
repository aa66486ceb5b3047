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

//! Stored report model.

use chrono::{DateTime, SubsecRound, Utc};

/// Identifier of a stored report. Positive and increasing.
pub type ReportId = i64;

/// A raw report as persisted by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    /// Unique identifier.
    pub id: ReportId,
    /// Server-side upload time.
    pub created: DateTime<Utc>,
    /// Raw report text, unparsed.
    pub content: String,
}

/// Current time at the resolution every backend can persist.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
