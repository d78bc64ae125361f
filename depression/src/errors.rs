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

use std::path::PathBuf;

use thiserror::Error;

pub use crate::data::error::{CsvError, DataError};

/// Errors raised when a column or record does not match the feature schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Required column '{0}' is missing from the dataset")]
    MissingColumn(String),

    #[error("Record is missing field '{0}'")]
    MissingField(String),

    #[error("'{0}' is not a field of the feature schema")]
    UnknownField(String),

    #[error("Field '{field}' is {expected}, got a {actual} value")]
    WrongKind { field: String, expected: &'static str, actual: &'static str },

    #[error("Field '{field}' must be a finite number, got {value}")]
    NonFinite { field: String, value: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum ScalerError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Scaler has not been fitted")]
    NotFitted,
}

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("Cannot fit a pipeline on zero records")]
    EmptyInput,

    #[error("Numeric field '{field}' has no observed values to impute from")]
    NoObservedValues { field: String },

    #[error("Scaler error: {0}")]
    Scaler(#[from] ScalerError),

    #[error("Failed to shape transformed data: {0}")]
    Shape(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum LossError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains NaN or infinite values")]
    InvalidNumericValue,

    #[error("Predictions must lie in [0, 1]")]
    InvalidPredictionRange,

    #[error("Actual values must be 0 or 1")]
    InvalidActualValue,
}

#[derive(Error, Debug, PartialEq)]
pub enum OptimizerError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains NaN or infinite values")]
    InvalidNumericValue,

    #[error("Gradient became NaN or infinite")]
    NumericalInstability,
}

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Labels must be 0 or 1, found {0}")]
    InvalidLabel(f64),

    #[error("Training labels contain a single class ({0}); both classes are required")]
    SingleClass(f64),

    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("Optimizer error: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("Loss error: {0}")]
    Loss(#[from] LossError),
}

#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Crate-level error returned by the session and the high-level operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "No dataset found (searched: {}). Place student_depression_dataset.csv in the project or supply a file.",
        display_paths(.searched)
    )]
    DataSourceNotFound { searched: Vec<PathBuf> },

    #[error("Model not trained yet: train a model before requesting predictions")]
    ModelNotTrained,

    #[error("No dataset loaded")]
    NoDataset,

    #[error("Data has not been split into train and test sets")]
    NotSplit,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

impl From<CsvError> for Error {
    fn from(err: CsvError) -> Self {
        Error::Data(DataError::Csv(err))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
