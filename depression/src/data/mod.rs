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

pub mod csv;
pub mod error;
pub mod split;
pub mod summary;

pub use self::csv::CsvLoader;
pub use self::split::{Split, train_test_split};
pub use self::summary::{ColumnInfo, Describe};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::Array1;

use crate::errors::Error;
use crate::schema::{CATEGORICAL_FEATURES, FeatureKind, NUMERIC_FEATURES};

use self::error::DataError;

pub const DATASET_FILE_NAME: &str = "student_depression_dataset.csv";

/// One student observation, with feature values stored in schema order.
///
/// Every value may be missing; the preprocessing pipeline is responsible for
/// imputing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    numeric: [Option<f64>; NUMERIC_FEATURES.len()],
    categorical: [Option<String>; CATEGORICAL_FEATURES.len()],
}

impl Record {
    pub fn new(
        numeric: [Option<f64>; NUMERIC_FEATURES.len()],
        categorical: [Option<String>; CATEGORICAL_FEATURES.len()],
    ) -> Self {
        Record { numeric, categorical }
    }

    pub fn numeric(&self, index: usize) -> Option<f64> {
        self.numeric[index]
    }

    pub fn categorical(&self, index: usize) -> Option<&str> {
        self.categorical[index].as_deref()
    }

    pub(crate) fn set_numeric(&mut self, index: usize, value: Option<f64>) {
        self.numeric[index] = value;
    }

    pub(crate) fn set_categorical(&mut self, index: usize, value: Option<String>) {
        self.categorical[index] = value;
    }
}

/// A loaded CSV: the raw rows (kept for exploration), the typed feature
/// records, and the `Depression` labels as `0.0`/`1.0`.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<::csv::StringRecord>,
    records: Vec<Record>,
    labels: Array1<f64>,
}

impl Dataset {
    pub(crate) fn new(
        headers: Vec<String>,
        rows: Vec<::csv::StringRecord>,
        records: Vec<Record>,
        labels: Array1<f64>,
    ) -> Self {
        debug_assert_eq!(rows.len(), records.len());
        debug_assert_eq!(rows.len(), labels.len());
        Dataset { headers, rows, records, labels }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn labels(&self) -> &Array1<f64> {
        &self.labels
    }

    /// Builds a new dataset from the given row indices, in that order.
    pub fn subset(&self, indices: &[usize]) -> Result<Dataset, DataError> {
        let len = self.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(DataError::RowOutOfBounds { index, len });
        }

        Ok(Dataset {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        })
    }

    pub(crate) fn column_position(&self, column: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataError::UnknownColumn(column.to_string()))
    }

    /// Raw cell values of a column; empty cells are `None`.
    pub fn column_values(
        &self,
        column: &str,
    ) -> Result<impl Iterator<Item = Option<&str>> + '_, DataError> {
        let position = self.column_position(column)?;
        Ok(self.rows.iter().map(move |row| row.get(position).filter(|v| !v.is_empty())))
    }

    /// Infers the kind of a column the way a dataframe would: numeric when
    /// every non-empty cell parses as a number.
    pub fn column_kind(&self, column: &str) -> Result<FeatureKind, DataError> {
        let numeric = self.column_values(column)?.flatten().all(|v| v.parse::<f64>().is_ok());
        Ok(if numeric { FeatureKind::Numeric } else { FeatureKind::Categorical })
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_kind(FeatureKind::Numeric)
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_of_kind(FeatureKind::Categorical)
    }

    fn columns_of_kind(&self, kind: FeatureKind) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| self.column_kind(h).map(|k| k == kind).unwrap_or(false))
            .map(String::as_str)
            .collect()
    }

    /// Most frequent observed value of a categorical feature. Ties go to the
    /// value seen first.
    pub fn most_frequent(&self, index: usize) -> Option<&str> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (order, value) in self.records.iter().filter_map(|r| r.categorical(index)).enumerate() {
            counts.entry(value).or_insert((0, order)).0 += 1;
        }
        counts
            .into_iter()
            .max_by(|(_, (ca, oa)), (_, (cb, ob))| ca.cmp(cb).then(ob.cmp(oa)))
            .map(|(value, _)| value)
    }
}

/// Where to read the dataset from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Search the default candidate locations under the current directory.
    Discover,
    /// Search the default file name under each of these directories.
    Search(Vec<PathBuf>),
    /// Read this exact file.
    Path(PathBuf),
    /// Contents of an uploaded file.
    Bytes(Vec<u8>),
}

/// Default directories searched for the dataset, relative to `base`.
pub fn candidate_dirs(base: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![base.to_path_buf()];
    if let Some(parent) = base.parent() {
        dirs.push(parent.to_path_buf());
    }
    dirs.push(base.join("app"));
    dirs.push(base.join("ML"));
    dirs
}

/// Returns the first existing dataset file under `dirs`.
pub fn find_csv(dirs: &[PathBuf]) -> Result<PathBuf, Error> {
    let searched: Vec<PathBuf> = dirs.iter().map(|d| d.join(DATASET_FILE_NAME)).collect();
    for path in &searched {
        debug!("Looking for dataset at {}", path.display());
        if path.is_file() {
            return Ok(path.clone());
        }
    }
    Err(Error::DataSourceNotFound { searched })
}

/// Loads a dataset from any [`DataSource`].
pub fn load(source: DataSource) -> Result<Dataset, Error> {
    let dataset = match source {
        DataSource::Discover => {
            let cwd = std::env::current_dir().map_err(|e| DataError::Csv(e.into()))?;
            load_data::<CsvLoader, _>(find_csv(&candidate_dirs(&cwd))?)?
        }
        DataSource::Search(dirs) => load_data::<CsvLoader, _>(find_csv(&dirs)?)?,
        DataSource::Path(path) => load_data::<CsvLoader, _>(path)?,
        DataSource::Bytes(bytes) => CsvLoader::from_reader(bytes.as_slice())?,
    };
    info!(
        "Dataset loaded with {} rows and {} columns",
        dataset.len(),
        dataset.headers().len()
    );
    Ok(dataset)
}

/// A trait for loading a [`Dataset`] from a file.
///
/// Implementors read the file at a path, resolve the schema columns in its
/// header and return the typed records alongside the raw rows and labels.
///
/// # Associated Types
/// - `Error`: The error type returned by `load`, which must implement
///   `std::error::Error` and have a `'static` lifetime.
///
/// # Methods
/// - `load`: Reads the file at `path` into a [`Dataset`].
///
/// # Notes
/// - Unreadable feature cells become missing values; a malformed header or
///   label is an error.
pub trait DataLoader {
    /// Loads a dataset from a file.
    ///
    /// # Parameters
    /// - `path`: The path to the data file, accepting any type that implements `AsRef<Path>`.
    ///
    /// # Returns
    /// The loaded [`Dataset`], or `Self::Error` when the file cannot be opened
    /// or does not match the schema.
    fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, Self::Error>;

    type Error: std::error::Error + 'static;
}

/// Loads a dataset from a file using a specified `DataLoader` implementation.
///
/// # Type Parameters
/// - `T`: The type implementing `DataLoader`, determining the file format and
///   error type.
/// - `P`: The path type, constrained to implement `AsRef<Path>`.
///
/// # Parameters
/// - `path`: The path to the data file.
///
/// # Returns
/// The [`Dataset`] on success, or an error of type `T::Error` from the loader.
pub fn load_data<T: DataLoader, P: AsRef<Path>>(path: P) -> Result<Dataset, T::Error> {
    T::load(path)
}
