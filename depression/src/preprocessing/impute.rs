// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::collections::HashMap;

/// Placeholder used for missing categorical values by default.
pub const MISSING_PLACEHOLDER: &str = "missing";

/// How missing categorical values are filled before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoricalImputation {
    /// Replace missing values with a fixed category of their own.
    Constant(String),
    /// Replace missing values with the most frequent training value.
    MostFrequent,
}

impl Default for CategoricalImputation {
    fn default() -> Self {
        CategoricalImputation::Constant(MISSING_PLACEHOLDER.to_string())
    }
}

impl CategoricalImputation {
    /// Learns the fill value from the observed training values.
    ///
    /// `MostFrequent` breaks ties with the smallest value and falls back to
    /// [`MISSING_PLACEHOLDER`] when nothing was observed.
    pub fn fit<'a>(&self, values: impl Iterator<Item = Option<&'a str>>) -> String {
        match self {
            CategoricalImputation::Constant(fill) => fill.clone(),
            CategoricalImputation::MostFrequent => {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for value in values.flatten() {
                    *counts.entry(value).or_insert(0) += 1;
                }
                counts
                    .into_iter()
                    .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then(vb.cmp(va)))
                    .map(|(value, _)| value.to_string())
                    .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string())
            }
        }
    }
}

/// Mean of the observed values, or `None` when every value is missing.
pub fn fit_mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values.flatten().fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
