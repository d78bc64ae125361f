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

use log::debug;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::Dataset;
use crate::data::error::DataError;

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    pub fn apply(&self, dataset: &Dataset) -> Result<(Dataset, Dataset), DataError> {
        Ok((dataset.subset(&self.train)?, dataset.subset(&self.test)?))
    }
}

/// Stratified shuffle split.
///
/// Each class contributes `round(n_class * test_ratio)` rows to the test set,
/// so the label balance of both halves follows the full dataset. The same
/// `seed` always yields the same indices.
pub fn train_test_split(
    labels: &Array1<f64>,
    test_ratio: f64,
    seed: u64,
) -> Result<Split, DataError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(DataError::InvalidRatio(test_ratio));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in [0.0, 1.0] {
        let mut members: Vec<usize> =
            labels.iter().enumerate().filter(|&(_, &y)| y == class).map(|(i, _)| i).collect();
        members.shuffle(&mut rng);
        let n_test = (members.len() as f64 * test_ratio).round() as usize;
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(DataError::TooFewRows { rows: labels.len() });
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);
    debug!("Split data: train_size={}, test_size={}", train.len(), test.len());

    Ok(Split { train, test })
}

/// Splits a dataset into `(train, test)` datasets.
pub fn split(
    dataset: &Dataset,
    test_ratio: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), DataError> {
    train_test_split(dataset.labels(), test_ratio, seed)?.apply(dataset)
}
