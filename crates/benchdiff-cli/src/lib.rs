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

//! Benchdiff command-line library.
//!
//! # Commands
//!
//! - **compare**: diff two benchmark reports as an aligned table or JSON,
//!   optionally failing on regressions above a threshold
//! - **parse**: show how a report is understood (names, iterations, averaged
//!   metrics)

pub mod cli;
pub mod commands;
pub mod error;
