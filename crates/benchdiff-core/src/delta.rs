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

//! Percentage change between two measurements.

use crate::metric::MetricKind;
use std::fmt;

/// Signed percentage change, or `Undefined` when the baseline is zero or
/// the ratio is not representable.
///
/// Displays with two decimals and an explicit sign (`+20.00%`, `-10.00%`,
/// `+0.00%`); `Undefined` displays as `n/a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    /// `(after - before) / before * 100`.
    Percent(f64),
    /// The baseline was zero and the new value was not, or the ratio
    /// overflowed.
    Undefined,
}

impl Delta {
    /// Change from `before` to `after`.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchdiff_core::Delta;
    ///
    /// assert_eq!(Delta::between(150.0, 180.0).to_string(), "+20.00%");
    /// assert_eq!(Delta::between(300.0, 270.0).to_string(), "-10.00%");
    /// assert_eq!(Delta::between(0.0, 0.0), Delta::Percent(0.0));
    /// assert_eq!(Delta::between(0.0, 5.0), Delta::Undefined);
    /// ```
    pub fn between(before: f64, after: f64) -> Self {
        if before == 0.0 {
            if after == 0.0 {
                Delta::Percent(0.0)
            } else {
                Delta::Undefined
            }
        } else {
            let p = (after - before) / before * 100.0;
            if p.is_finite() {
                Delta::Percent(p)
            } else {
                Delta::Undefined
            }
        }
    }

    /// The percentage, if defined.
    pub fn percent(self) -> Option<f64> {
        match self {
            Delta::Percent(p) => Some(p),
            Delta::Undefined => None,
        }
    }

    /// Whether the baseline was zero.
    pub fn is_undefined(self) -> bool {
        matches!(self, Delta::Undefined)
    }

    /// Interpret the change for a metric's direction.
    ///
    /// A change that rounds to `0.00%` and an undefined delta are both
    /// [`Change::Unchanged`]: neither can be ranked.
    pub fn classify(self, metric: MetricKind) -> Change {
        let Some(p) = self.percent().map(round_hundredths) else {
            return Change::Unchanged;
        };
        if p == 0.0 {
            return Change::Unchanged;
        }
        let worse = if metric.higher_is_better() { p < 0.0 } else { p > 0.0 };
        if worse {
            Change::Regression
        } else {
            Change::Improvement
        }
    }
}

/// Compute the delta of one metric between two values.
///
/// The metric does not affect the arithmetic. Use [`Delta::classify`] to
/// apply its direction.
#[inline]
pub fn delta(_metric: MetricKind, before: f64, after: f64) -> Delta {
    Delta::between(before, after)
}

/// Direction of a change once the metric's polarity is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Change {
    /// Performance got worse.
    Regression,
    /// Performance got better.
    Improvement,
    /// No rankable change.
    Unchanged,
}

fn round_hundredths(p: f64) -> f64 {
    (p * 100.0).round() / 100.0
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Delta::Undefined => f.write_str("n/a"),
            // Values that round to zero print as +0.00%, never -0.00%.
            Delta::Percent(p) if round_hundredths(p) == 0.0 => f.write_str("+0.00%"),
            Delta::Percent(p) => write!(f, "{:+.2}%", p),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Delta {
    /// Serialized as the percentage, or `null` when undefined.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.percent() {
            Some(p) => serializer.serialize_f64(p),
            None => serializer.serialize_none(),
        }
    }
}
