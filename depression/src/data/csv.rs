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

use crate::data::error::CsvError;
use crate::data::{DataLoader, Dataset, Record};
use crate::schema::FeatureSchema;
use log::{debug, warn};
use ndarray::Array1;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub struct CsvLoader;

impl CsvLoader {
    /// Parses a headed CSV from any reader, e.g. the bytes of an uploaded file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, CsvError> {
        load_csv_common(reader)
    }
}

fn load_csv_common<R: Read>(reader: R) -> Result<Dataset, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::EmptyFile);
    }
    let index = FeatureSchema.locate(&headers)?;

    let mut rows = Vec::new();
    let mut records = Vec::new();
    let mut labels = Vec::new();
    let mut coerced = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        if row.len() != headers.len() {
            return Err(CsvError::InconsistentColumns {
                row: i + 1,
                actual: row.len(),
                expected: headers.len(),
            });
        }

        let mut record = Record::default();
        for (slot, &col) in index.numeric.iter().enumerate() {
            let value = &row[col];
            // Unparseable numerics are coerced to missing and imputed later
            let parsed = if value.is_empty() {
                None
            } else {
                match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => {
                        debug!("Row {}: coercing '{}' in '{}' to missing", i + 1, value, headers[col]);
                        coerced += 1;
                        None
                    }
                }
            };
            record.set_numeric(slot, parsed);
        }
        for (slot, &col) in index.categorical.iter().enumerate() {
            let value = &row[col];
            record.set_categorical(slot, (!value.is_empty()).then(|| value.to_string()));
        }

        let target = &row[index.label];
        let label = match target.parse::<f64>() {
            Ok(v) if v == 0.0 || v == 1.0 => v,
            _ => return Err(CsvError::InvalidTarget { value: target.to_string(), row: i + 1 }),
        };

        records.push(record);
        labels.push(label);
        rows.push(row);
    }

    if records.is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if coerced > 0 {
        warn!("{} non-numeric cells in numeric feature columns were treated as missing", coerced);
    }

    Ok(Dataset::new(headers, rows, records, Array1::from_vec(labels)))
}

impl DataLoader for CsvLoader {
    type Error = CsvError;

    fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, Self::Error> {
        let file = File::open(path.as_ref())?;
        load_csv_common(file)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::load_data;
    use crate::errors::SchemaError;
    use crate::schema::{FINANCIAL_STRESS, NUMERIC_FEATURES};
    use ndarray::array;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const SAMPLE_CSV: &str = "\
id,Gender,Age,City,Profession,Academic Pressure,Work Pressure,CGPA,Study Satisfaction,Job Satisfaction,Sleep Duration,Dietary Habits,Degree,Have you ever had suicidal thoughts ?,Work/Study Hours,Financial Stress,Family History of Mental Illness,Depression
2,Male,33,Visakhapatnam,Student,5,0,8.97,2,0,'5-6 hours',Healthy,B.Pharm,Yes,3,1,No,1
8,Female,24,Bangalore,Student,2,0,5.9,5,0,'5-6 hours',Moderate,B.Sc,No,3,2,Yes,0
26,Male,31,Srinagar,Student,3,0,7.03,5,0,'Less than 5 hours',Healthy,B.Sc,No,9,?,Yes,0
30,Female,28,Varanasi,Student,3,0,5.59,2,0,'7-8 hours',Moderate,BCA,Yes,4,5,Yes,1
";

    pub(crate) fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn numeric_index(name: &str) -> usize {
        NUMERIC_FEATURES.iter().position(|&n| n == name).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let temp_file = create_temp_csv(SAMPLE_CSV);
        let dataset = load_data::<CsvLoader, _>(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.headers().len(), 18);
        assert_eq!(dataset.labels(), &array![1.0, 0.0, 0.0, 1.0]);

        let first = &dataset.records()[0];
        assert_eq!(first.numeric(0), Some(33.0));
        assert_eq!(first.categorical(0), Some("Male"));
        assert_eq!(first.categorical(4), Some("'5-6 hours'"));
    }

    #[test]
    fn test_load_coerces_unparseable_numeric() {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let stress = numeric_index(FINANCIAL_STRESS);
        assert_eq!(dataset.records()[2].numeric(stress), None);
        assert_eq!(dataset.records()[3].numeric(stress), Some(5.0));
    }

    #[test]
    fn test_load_empty_categorical_is_missing() {
        let csv_content = SAMPLE_CSV.replacen(",Moderate,B.Sc,", ",,B.Sc,", 1);
        let dataset = CsvLoader::from_reader(csv_content.as_bytes()).unwrap();
        assert_eq!(dataset.records()[1].categorical(3), None);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_file = create_temp_csv("");
        let result = load_data::<CsvLoader, _>(temp_file.path());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_load_header_only() {
        let header = SAMPLE_CSV.lines().next().unwrap();
        let result = CsvLoader::from_reader(header.as_bytes());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_load_missing_required_column() {
        let csv_content = SAMPLE_CSV.replacen("Dietary Habits", "Diet", 1);
        let result = CsvLoader::from_reader(csv_content.as_bytes());
        assert!(matches!(
            result,
            Err(CsvError::Schema(SchemaError::MissingColumn(ref c))) if c == "Dietary Habits"
        ));
    }

    #[test]
    fn test_load_optional_columns_absent() {
        let csv_content: String = SAMPLE_CSV
            .lines()
            .map(|line| line.splitn(2, ',').nth(1).unwrap().to_string() + "\n")
            .collect();
        let dataset = CsvLoader::from_reader(csv_content.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.headers().len(), 17);
    }

    #[test]
    fn test_load_invalid_target() {
        let csv_content = SAMPLE_CSV.replacen(",No,1\n", ",No,maybe\n", 1);
        let result = CsvLoader::from_reader(csv_content.as_bytes());
        assert!(
            matches!(result, Err(CsvError::InvalidTarget { value, row }) if value == "maybe" && row == 1)
        );
    }

    #[test]
    fn test_load_non_binary_target() {
        let csv_content = SAMPLE_CSV.replacen(",Yes,1\n", ",Yes,2\n", 1);
        let result = CsvLoader::from_reader(csv_content.as_bytes());
        assert!(matches!(result, Err(CsvError::InvalidTarget { row: 4, .. })));
    }

    #[test]
    fn test_load_inconsistent_columns() {
        let csv_content = SAMPLE_CSV.replacen(",Yes,0\n", ",Yes,0,extra\n", 1);
        let result = CsvLoader::from_reader(csv_content.as_bytes());
        assert!(
            matches!(result, Err(CsvError::InconsistentColumns { row, actual, expected }) if row == 2 && actual == 19 && expected == 18)
        );
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_data::<CsvLoader, _>("nonexistent.csv");
        assert!(matches!(result, Err(CsvError::FileOpen(_))));
    }
}
