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

//! Exploratory statistics over the raw dataset columns.

use std::collections::HashMap;

use crate::data::Dataset;
use crate::data::error::DataError;
use crate::schema::{FeatureKind, explanation};

/// One line of the dataset information table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: FeatureKind,
    pub non_null: usize,
    /// `(mean, min, max)` for numeric columns.
    pub stats: Option<(f64, f64, f64)>,
    pub explanation: Option<&'static str>,
}

/// Summary of a numeric column. `std` is the sample standard deviation and
/// quartiles use linear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Dataset {
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        self.headers()
            .iter()
            .map(|name| {
                let kind = self.column_kind(name).unwrap_or(FeatureKind::Categorical);
                let non_null = self.column_values(name).map(|v| v.flatten().count()).unwrap_or(0);
                let stats = match kind {
                    FeatureKind::Numeric => self.numeric_values(name).ok().and_then(|values| {
                        if values.is_empty() {
                            return None;
                        }
                        let mean = values.iter().sum::<f64>() / values.len() as f64;
                        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                        Some((mean, min, max))
                    }),
                    FeatureKind::Categorical => None,
                };
                ColumnInfo { name: name.clone(), kind, non_null, stats, explanation: explanation(name) }
            })
            .collect()
    }

    /// Non-missing values of a numeric column.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>, DataError> {
        self.column_values(column)?
            .flatten()
            .map(|v| v.parse::<f64>().map_err(|_| DataError::NotNumeric(column.to_string())))
            .collect()
    }

    /// Category counts, most frequent first; ties are ordered by value.
    pub fn value_counts(&self, column: &str) -> Result<Vec<(String, usize)>, DataError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in self.column_values(column)?.flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> =
            counts.into_iter().map(|(v, c)| (v.to_string(), c)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }

    pub fn describe(&self, column: &str) -> Result<Describe, DataError> {
        let mut values = self.numeric_values(column)?;
        if values.is_empty() {
            return Err(DataError::NoValues(column.to_string()));
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Ok(Describe {
            count,
            mean,
            std,
            min: values[0],
            q25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q75: quantile(&values, 0.75),
            max: values[count - 1],
        })
    }

    /// Pearson correlation over the rows where both columns are present.
    /// `None` when fewer than two such rows exist or a column is constant.
    pub fn correlation(&self, a: &str, b: &str) -> Result<Option<f64>, DataError> {
        let parse = |column: &str| -> Result<Vec<Option<f64>>, DataError> {
            self.column_values(column)?
                .map(|v| match v {
                    Some(v) => v
                        .parse::<f64>()
                        .map(Some)
                        .map_err(|_| DataError::NotNumeric(column.to_string())),
                    None => Ok(None),
                })
                .collect()
        };
        let pairs: Vec<(f64, f64)> = parse(a)?
            .into_iter()
            .zip(parse(b)?)
            .filter_map(|(x, y)| Some((x?, y?)))
            .collect();
        if pairs.len() < 2 {
            return Ok(None);
        }

        let n = pairs.len() as f64;
        let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
        let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
        for (x, y) in &pairs {
            cov += (x - mean_x) * (y - mean_y);
            var_x += (x - mean_x).powi(2);
            var_y += (y - mean_y).powi(2);
        }
        if var_x == 0.0 || var_y == 0.0 {
            return Ok(None);
        }
        Ok(Some(cov / (var_x.sqrt() * var_y.sqrt())))
    }

    /// Pairwise [`Dataset::correlation`] of `columns`, as a symmetric matrix
    /// in the given order. A diagonal entry is `None` for a constant column.
    pub fn correlation_matrix(
        &self,
        columns: &[&str],
    ) -> Result<Vec<Vec<Option<f64>>>, DataError> {
        let k = columns.len();
        let mut matrix = vec![vec![None; k]; k];
        for i in 0..k {
            matrix[i][i] = self.correlation(columns[i], columns[i])?.map(|_| 1.0);
            for j in (i + 1)..k {
                let corr = self.correlation(columns[i], columns[j])?;
                matrix[i][j] = corr;
                matrix[j][i] = corr;
            }
        }
        Ok(matrix)
    }

    /// The first `n` raw rows, as read from the file.
    pub fn head(&self, n: usize) -> Vec<Vec<&str>> {
        self.rows.iter().take(n).map(|row| row.iter().collect()).collect()
    }

    /// `(negatives, positives)` label counts.
    pub fn label_balance(&self) -> (usize, usize) {
        let positives = self.labels().iter().filter(|&&y| y == 1.0).count();
        (self.len() - positives, positives)
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

#[cfg(test)]
mod tests {
    use crate::data::CsvLoader;
    use crate::data::csv::tests::SAMPLE_CSV;
    use crate::data::error::DataError;
    use crate::schema::{AGE, CGPA, CITY, FINANCIAL_STRESS, GENDER, LABEL, WORK_PRESSURE};

    fn sample() -> crate::data::Dataset {
        CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_column_info() {
        let info = sample().column_info();
        assert_eq!(info.len(), 18);

        let age = info.iter().find(|c| c.name == AGE).unwrap();
        assert_eq!(age.non_null, 4);
        let (mean, min, max) = age.stats.unwrap();
        assert!((mean - 29.0).abs() < 1e-12);
        assert_eq!((min, max), (24.0, 33.0));

        let city = info.iter().find(|c| c.name == CITY).unwrap();
        assert!(city.stats.is_none());
        assert_eq!(city.explanation, Some("City where the student lives."));
    }

    #[test]
    fn test_value_counts() {
        let counts = sample().value_counts(GENDER).unwrap();
        assert_eq!(counts, vec![("Female".to_string(), 2), ("Male".to_string(), 2)]);
    }

    #[test]
    fn test_describe() {
        let d = sample().describe(CGPA).unwrap();
        assert_eq!(d.count, 4);
        assert_eq!(d.min, 5.59);
        assert_eq!(d.max, 8.97);
        // sorted: 5.59, 5.9, 7.03, 8.97
        assert!((d.median - 6.465).abs() < 1e-9);
        assert!((d.q25 - 5.8225).abs() < 1e-9);
    }

    #[test]
    fn test_describe_non_numeric() {
        let result = sample().describe(FINANCIAL_STRESS);
        assert!(matches!(result, Err(DataError::NotNumeric(_))));
        let result = sample().describe("Shoe Size");
        assert!(matches!(result, Err(DataError::UnknownColumn(_))));
    }

    #[test]
    fn test_correlation() {
        let dataset = sample();
        let self_corr = dataset.correlation(AGE, AGE).unwrap().unwrap();
        assert!((self_corr - 1.0).abs() < 1e-12);
        let corr = dataset.correlation(CGPA, LABEL).unwrap().unwrap();
        assert!((-1.0..=1.0).contains(&corr));
    }

    #[test]
    fn test_label_balance() {
        assert_eq!(sample().label_balance(), (2, 2));
    }

    #[test]
    fn test_correlation_matrix() {
        let matrix = sample().correlation_matrix(&[AGE, CGPA, WORK_PRESSURE]).unwrap();
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[0][0], Some(1.0));
        assert_eq!(matrix[1][1], Some(1.0));
        // Work Pressure is 0 in every row
        assert_eq!(matrix[2][2], None);
        assert_eq!(matrix[0][2], None);
        assert_eq!(matrix[0][1], matrix[1][0]);
        let corr = matrix[0][1].unwrap();
        assert!(corr > 0.0 && corr <= 1.0);

        let result = sample().correlation_matrix(&[AGE, FINANCIAL_STRESS]);
        assert!(matches!(result, Err(DataError::NotNumeric(ref c)) if c == FINANCIAL_STRESS));
    }

    #[test]
    fn test_head() {
        let dataset = sample();
        let rows = dataset.head(2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 18);
        assert_eq!(&rows[0][..3], &["2", "Male", "33"]);
        assert_eq!(rows[1][3], "Bangalore");
        assert_eq!(dataset.head(10).len(), 4);
        assert!(dataset.head(0).is_empty());
    }
}
