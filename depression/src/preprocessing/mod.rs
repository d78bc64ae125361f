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

//! Column-wise preprocessing of [`Record`]s into a numeric design matrix.
//!
//! Numeric features are mean-imputed and standardized; categorical features
//! are imputed (constant placeholder or most frequent value) and one-hot
//! encoded. Output columns are the numeric features in schema order followed
//! by each categorical field's indicator block.

pub mod encode;
pub mod impute;

pub use encode::OneHotEncoder;
pub use impute::{CategoricalImputation, MISSING_PLACEHOLDER, fit_mean};

use log::debug;
use ndarray::{Array2, s};

use crate::data::Record;
use crate::errors::PipelineError;
use crate::scalers::{Scaler, StandardScaler};
use crate::schema::{CATEGORICAL_FEATURES, NUMERIC_FEATURES};

/// Unfitted preprocessing configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    imputation: CategoricalImputation,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    pub fn imputation(mut self, imputation: CategoricalImputation) -> Self {
        self.imputation = imputation;
        self
    }

    /// Learns imputation values, scaling statistics and one-hot vocabularies
    /// from the training records.
    pub fn fit(&self, records: &[Record]) -> Result<FittedPipeline, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let numeric_fill = NUMERIC_FEATURES
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                fit_mean(records.iter().map(|r| r.numeric(i)))
                    .ok_or_else(|| PipelineError::NoObservedValues { field: name.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut scaler = StandardScaler::new();
        scaler.fit(&impute_numeric(records, &numeric_fill))?;

        let categorical = CATEGORICAL_FEATURES
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let fill = self.imputation.fit(records.iter().map(|r| r.categorical(i)));
                let encoder = OneHotEncoder::fit(
                    records.iter().map(|r| r.categorical(i).unwrap_or(fill.as_str())),
                );
                debug!("Field '{}': fill '{}', {} categories", name, fill, encoder.len());
                CategoricalColumn { fill, encoder }
            })
            .collect();

        Ok(FittedPipeline { numeric_fill, scaler, categorical })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColumn {
    pub fill: String,
    pub encoder: OneHotEncoder,
}

/// Preprocessing statistics learned on a training set.
///
/// [`FittedPipeline::transform`] only reads these statistics; inference input
/// is never used to refit them.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPipeline {
    numeric_fill: Vec<f64>,
    scaler: StandardScaler<f64>,
    categorical: Vec<CategoricalColumn>,
}

impl FittedPipeline {
    pub fn numeric_fill(&self) -> &[f64] {
        &self.numeric_fill
    }

    pub fn scaler(&self) -> &StandardScaler<f64> {
        &self.scaler
    }

    pub fn categorical(&self) -> &[CategoricalColumn] {
        &self.categorical
    }

    pub fn n_features_out(&self) -> usize {
        NUMERIC_FEATURES.len() + self.categorical.iter().map(|c| c.encoder.len()).sum::<usize>()
    }

    /// Output column names: numeric field names, then `field=category`.
    pub fn feature_names(&self) -> Vec<String> {
        let numeric = NUMERIC_FEATURES.iter().map(|n| n.to_string());
        let categorical =
            CATEGORICAL_FEATURES.iter().zip(&self.categorical).flat_map(|(name, column)| {
                column.encoder.categories().iter().map(move |c| format!("{}={}", name, c))
            });
        numeric.chain(categorical).collect()
    }

    pub fn transform(&self, records: &[Record]) -> Result<Array2<f64>, PipelineError> {
        let n_numeric = NUMERIC_FEATURES.len();
        let mut out = Array2::zeros((records.len(), self.n_features_out()));

        let scaled = self.scaler.transform(&impute_numeric(records, &self.numeric_fill))?;
        out.slice_mut(s![.., ..n_numeric]).assign(&scaled);

        for (row, record) in records.iter().enumerate() {
            let mut offset = n_numeric;
            for (i, column) in self.categorical.iter().enumerate() {
                let width = column.encoder.len();
                let value = record.categorical(i).unwrap_or(column.fill.as_str());
                let mut block = out.slice_mut(s![row, offset..offset + width]);
                let block = block
                    .as_slice_mut()
                    .ok_or_else(|| PipelineError::Shape("non-contiguous output row".to_string()))?;
                column.encoder.encode_into(value, block);
                offset += width;
            }
        }

        Ok(out)
    }

    pub fn transform_one(&self, record: &Record) -> Result<Array2<f64>, PipelineError> {
        self.transform(std::slice::from_ref(record))
    }
}

fn impute_numeric(records: &[Record], fill: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((records.len(), fill.len()), |(row, col)| {
        records[row].numeric(col).unwrap_or(fill[col])
    })
}
