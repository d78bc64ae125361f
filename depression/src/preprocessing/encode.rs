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

use std::collections::BTreeSet;

/// One-hot vocabulary for a single categorical field.
///
/// Categories are kept sorted, so the column layout only depends on the set
/// of training values. Values outside the vocabulary encode to all zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    pub fn fit<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let categories: BTreeSet<&str> = values.collect();
        OneHotEncoder { categories: categories.into_iter().map(str::to_string).collect() }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories.binary_search_by(|c| c.as_str().cmp(value)).ok()
    }

    /// Writes the indicator block for `value` into `out`, which must be
    /// zeroed and exactly `self.len()` wide.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.len());
        if let Some(i) = self.index_of(value) {
            out[i] = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted_and_unique() {
        let encoder = OneHotEncoder::fit(["No", "Yes", "No", "Maybe"].into_iter());
        assert_eq!(encoder.categories(), &["Maybe", "No", "Yes"]);
        assert_eq!(encoder.index_of("Yes"), Some(2));
    }

    #[test]
    fn test_encode_known_and_unknown() {
        let encoder = OneHotEncoder::fit(["No", "Yes"].into_iter());
        let mut known = [0.0; 2];
        encoder.encode_into("Yes", &mut known);
        assert_eq!(known, [0.0, 1.0]);

        let mut unknown = [0.0; 2];
        encoder.encode_into("Sometimes", &mut unknown);
        assert_eq!(unknown, [0.0, 0.0]);
    }
}
