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

//! HTML error pages.

use std::fmt::Write;

const DEFAULT_STYLE: &str = "\
*    { box-sizing: border-box; }
html { position: relative; min-height: 100%; margin: 20px; }
body { margin: 40px auto 120px auto; max-width: 50em; line-height: 28px; }
.error { font-family: monospace; white-space: pre-wrap; }";

/// Error page template, built once at start-up and shared through the
/// router state.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    title: String,
    style: String,
}

impl Default for ErrorPage {
    fn default() -> Self {
        Self {
            title: "benchdiff".to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl ErrorPage {
    /// Page with the default title and style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the inline stylesheet.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Render a page showing `message`. The message is escaped.
    pub fn render(&self, message: &str) -> String {
        let mut html = String::with_capacity(512 + message.len());
        html.push_str("<!doctype html>\n<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(html, "<title>{}</title>", escape_text(&self.title));
        let _ = writeln!(html, "<style>\n{}\n</style>", self.style);
        let _ = writeln!(html, "<div class=\"error\">{}</div>", escape_text(message));
        html
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
