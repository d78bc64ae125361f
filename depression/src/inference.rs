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

use log::{debug, info};

use crate::algorithms::FittedLogisticRegression;
use crate::config::TrainConfig;
use crate::data::{Dataset, Record};
use crate::errors::{Error, SchemaError};
use crate::metrics::{Metrics, evaluate};
use crate::preprocessing::FittedPipeline;
use crate::schema::{
    ACADEMIC_PRESSURE, AGE, CATEGORICAL_FEATURES, CGPA, FINANCIAL_STRESS, FeatureKind,
    FeatureSchema, JOB_SATISFACTION, NUMERIC_FEATURES, STUDY_SATISFACTION, WORK_PRESSURE,
    WORK_STUDY_HOURS,
};

/// Values the input form starts from for a new student.
pub const NUMERIC_DEFAULTS: [(&str, f64); 8] = [
    (AGE, 20.0),
    (CGPA, 7.0),
    (ACADEMIC_PRESSURE, 3.0),
    (STUDY_SATISFACTION, 3.0),
    (JOB_SATISFACTION, 0.0),
    (WORK_STUDY_HOURS, 6.0),
    (WORK_PRESSURE, 3.0),
    (FINANCIAL_STRESS, 3.0),
];

/// Assembles a single [`Record`] for inference, by field name.
///
/// Unlike records read from a CSV, a built record must have every schema
/// field set. The first invalid call is remembered and reported by
/// [`RecordBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
    numeric_set: [bool; NUMERIC_FEATURES.len()],
    categorical_set: [bool; CATEGORICAL_FEATURES.len()],
    error: Option<SchemaError>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        RecordBuilder::default()
    }

    /// Starts from the form defaults: mid-range numeric values and the most
    /// frequent value of each categorical field in `dataset`.
    pub fn with_defaults(dataset: &Dataset) -> Self {
        let mut builder = NUMERIC_DEFAULTS
            .iter()
            .fold(RecordBuilder::new(), |builder, &(name, value)| builder.numeric(name, value));
        for (index, name) in CATEGORICAL_FEATURES.iter().enumerate() {
            if let Some(value) = dataset.most_frequent(index) {
                builder = builder.categorical(name, value);
            }
        }
        builder
    }

    pub fn numeric(mut self, name: &str, value: f64) -> Self {
        if let Some(index) = self.slot(name, FeatureKind::Numeric, "numeric") {
            if !value.is_finite() {
                return self.fail(SchemaError::NonFinite {
                    field: name.to_string(),
                    value: value.to_string(),
                });
            }
            self.record.set_numeric(index, Some(value));
            self.numeric_set[index] = true;
        }
        self
    }

    pub fn categorical(mut self, name: &str, value: &str) -> Self {
        if let Some(index) = self.slot(name, FeatureKind::Categorical, "categorical") {
            self.record.set_categorical(index, Some(value.to_string()));
            self.categorical_set[index] = true;
        }
        self
    }

    /// Sets a field from text, parsing it as a number for numeric fields.
    pub fn parse(self, name: &str, raw: &str) -> Self {
        match FeatureSchema.kind(name) {
            Some(FeatureKind::Numeric) => match raw.trim().parse::<f64>() {
                Ok(value) => self.numeric(name, value),
                Err(_) => self.fail(SchemaError::WrongKind {
                    field: name.to_string(),
                    expected: FeatureKind::Numeric.as_str(),
                    actual: "text",
                }),
            },
            Some(FeatureKind::Categorical) => self.categorical(name, raw.trim()),
            None => self.fail(SchemaError::UnknownField(name.to_string())),
        }
    }

    pub fn build(self) -> Result<Record, SchemaError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let missing = NUMERIC_FEATURES
            .iter()
            .zip(self.numeric_set.iter())
            .chain(CATEGORICAL_FEATURES.iter().zip(self.categorical_set.iter()))
            .find(|&(_, &set)| !set);
        if let Some((name, _)) = missing {
            return Err(SchemaError::MissingField(name.to_string()));
        }
        Ok(self.record)
    }

    fn slot(&mut self, name: &str, kind: FeatureKind, actual: &'static str) -> Option<usize> {
        if self.error.is_some() {
            return None;
        }
        match FeatureSchema.slot(name) {
            Ok(slot) if slot.kind == kind => Some(slot.index),
            Ok(slot) => {
                self.error = Some(SchemaError::WrongKind {
                    field: name.to_string(),
                    expected: slot.kind.as_str(),
                    actual,
                });
                None
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    fn fail(mut self, err: SchemaError) -> Self {
        self.error.get_or_insert(err);
        self
    }
}

/// Outcome of a single-record prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// `1` for depressed, `0` otherwise.
    pub label: u8,
    /// Probability of the depressed class.
    pub probability: f64,
}

impl Prediction {
    pub fn is_depressed(&self) -> bool {
        self.label == 1
    }
}

/// A fitted preprocessing pipeline together with the classifier trained on
/// its output.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pipeline: FittedPipeline,
    classifier: FittedLogisticRegression,
}

impl TrainedModel {
    pub fn fit(train: &Dataset, config: &TrainConfig) -> Result<TrainedModel, Error> {
        config.validate()?;
        let pipeline = config.pipeline().fit(train.records())?;
        let x = pipeline.transform(train.records())?;
        debug!("Transformed training data: {} x {}", x.nrows(), x.ncols());

        let classifier = config.classifier().fit(&x, train.labels())?;
        info!("Model trained on {} rows with {} features", x.nrows(), x.ncols());
        Ok(TrainedModel { pipeline, classifier })
    }

    pub fn pipeline(&self) -> &FittedPipeline {
        &self.pipeline
    }

    pub fn classifier(&self) -> &FittedLogisticRegression {
        &self.classifier
    }

    /// Output feature names paired with their learned weights, largest
    /// magnitude first.
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        let mut pairs: Vec<(String, f64)> = self
            .pipeline
            .feature_names()
            .into_iter()
            .zip(self.classifier.weights().iter().copied())
            .collect();
        pairs.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        pairs
    }

    pub fn evaluate(&self, dataset: &Dataset) -> Result<Metrics, Error> {
        let x = self.pipeline.transform(dataset.records())?;
        let predictions = self.classifier.predict(&x)?;
        Ok(evaluate(dataset.labels(), &predictions)?)
    }

    /// Runs one record through the fitted pipeline and classifier.
    ///
    /// The record must be complete: every schema field set and every numeric
    /// value finite. Imputation only applies to training data.
    pub fn predict_one(&self, record: &Record) -> Result<Prediction, Error> {
        check_complete(record)?;
        let x = self.pipeline.transform_one(record)?;
        let probability = self.classifier.predict_proba(&x)?[0];
        let label = u8::from(probability >= self.classifier.threshold());
        debug!("Prediction: label {} (p = {:.4})", label, probability);
        Ok(Prediction { label, probability })
    }
}

/// Checks that `record` has every schema field set, with finite numerics.
pub fn check_complete(record: &Record) -> Result<(), SchemaError> {
    for (index, name) in NUMERIC_FEATURES.iter().enumerate() {
        match record.numeric(index) {
            None => return Err(SchemaError::MissingField(name.to_string())),
            Some(value) if !value.is_finite() => {
                return Err(SchemaError::NonFinite {
                    field: name.to_string(),
                    value: value.to_string(),
                });
            }
            Some(_) => {}
        }
    }
    for (index, name) in CATEGORICAL_FEATURES.iter().enumerate() {
        if record.categorical(index).is_none() {
            return Err(SchemaError::MissingField(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::tests::SAMPLE_CSV;
    use crate::data::csv::CsvLoader;
    use crate::schema::{DEGREE, GENDER, SLEEP_DURATION, SUICIDAL_THOUGHTS};

    fn full_builder() -> RecordBuilder {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        RecordBuilder::with_defaults(&dataset)
    }

    #[test]
    fn test_with_defaults_builds_complete_record() {
        let record = full_builder().build().unwrap();
        assert_eq!(record.numeric(0), Some(20.0));
        assert_eq!(record.numeric(1), Some(7.0));
        assert_eq!(record.numeric(4), Some(0.0));
        // Male and Female tie; the first one seen wins
        assert_eq!(record.categorical(0), Some("Male"));
        assert_eq!(record.categorical(1), Some("B.Sc"));
    }

    #[test]
    fn test_overrides() {
        let record = full_builder()
            .numeric(AGE, 25.0)
            .categorical(GENDER, "Female")
            .parse(CGPA, " 8.5 ")
            .parse(SLEEP_DURATION, "'7-8 hours'")
            .build()
            .unwrap();
        assert_eq!(record.numeric(0), Some(25.0));
        assert_eq!(record.numeric(1), Some(8.5));
        assert_eq!(record.categorical(0), Some("Female"));
        assert_eq!(record.categorical(4), Some("'7-8 hours'"));
    }

    #[test]
    fn test_missing_field() {
        let result = RecordBuilder::new().numeric(AGE, 21.0).build();
        assert_eq!(result, Err(SchemaError::MissingField(CGPA.to_string())));

        let mut builder = RecordBuilder::new();
        for name in NUMERIC_FEATURES {
            builder = builder.numeric(name, 1.0);
        }
        assert_eq!(builder.build(), Err(SchemaError::MissingField(GENDER.to_string())));
    }

    #[test]
    fn test_unknown_field() {
        let result = full_builder().numeric("Shoe Size", 42.0).build();
        assert_eq!(result, Err(SchemaError::UnknownField("Shoe Size".to_string())));

        let result = full_builder().parse("City", "Pune").build();
        assert_eq!(result, Err(SchemaError::UnknownField("City".to_string())));
    }

    #[test]
    fn test_wrong_kind() {
        let result = full_builder().numeric(DEGREE, 1.0).build();
        assert_eq!(
            result,
            Err(SchemaError::WrongKind {
                field: DEGREE.to_string(),
                expected: "categorical",
                actual: "numeric"
            })
        );

        let result = full_builder().parse(AGE, "twenty").build();
        assert!(matches!(result, Err(SchemaError::WrongKind { .. })));
    }

    #[test]
    fn test_first_error_wins() {
        let result = full_builder().numeric("Height", 1.0).categorical(AGE, "x").build();
        assert_eq!(result, Err(SchemaError::UnknownField("Height".to_string())));
    }

    #[test]
    fn test_fit_and_predict_one() {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let model = TrainedModel::fit(&dataset, &TrainConfig::default()).unwrap();

        let record = RecordBuilder::with_defaults(&dataset)
            .categorical(SUICIDAL_THOUGHTS, "Yes")
            .build()
            .unwrap();
        let prediction = model.predict_one(&record).unwrap();
        assert!(prediction.label <= 1);
        assert!((0.0..=1.0).contains(&prediction.probability));
        assert_eq!(prediction.is_depressed(), prediction.probability >= 0.5);

        let metrics = model.evaluate(&dataset).unwrap();
        assert!((0.0..=1.0).contains(&metrics.accuracy));
        assert_eq!(metrics.confusion.total(), dataset.len());
        assert_eq!(model.coefficients().len(), model.pipeline().n_features_out());
    }

    #[test]
    fn test_non_finite_numeric() {
        let result = full_builder().parse(AGE, "NaN").build();
        assert_eq!(
            result,
            Err(SchemaError::NonFinite { field: AGE.to_string(), value: "NaN".to_string() })
        );

        let result = full_builder().numeric(CGPA, f64::INFINITY).build();
        assert!(matches!(result, Err(SchemaError::NonFinite { field, .. }) if field == CGPA));

        let result = full_builder().parse(WORK_STUDY_HOURS, "-inf").build();
        assert!(matches!(result, Err(SchemaError::NonFinite { .. })));
    }

    #[test]
    fn test_predict_one_rejects_incomplete_record() {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let model = TrainedModel::fit(&dataset, &TrainConfig::default()).unwrap();

        let result = model.predict_one(&Record::default());
        assert!(matches!(
            result,
            Err(Error::Schema(SchemaError::MissingField(field))) if field == AGE
        ));

        let mut record = full_builder().build().unwrap();
        record.set_categorical(3, None);
        let result = model.predict_one(&record);
        assert!(matches!(
            result,
            Err(Error::Schema(SchemaError::MissingField(field))) if field == CATEGORICAL_FEATURES[3]
        ));
    }

    #[test]
    fn test_predict_one_rejects_non_finite_value() {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let model = TrainedModel::fit(&dataset, &TrainConfig::default()).unwrap();

        let mut record = full_builder().build().unwrap();
        record.set_numeric(1, Some(f64::NAN));
        let result = model.predict_one(&record);
        assert!(matches!(
            result,
            Err(Error::Schema(SchemaError::NonFinite { field, .. })) if field == CGPA
        ));
    }

    #[test]
    fn test_fit_rejects_invalid_config() {
        let dataset = CsvLoader::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let result = TrainedModel::fit(&dataset, &TrainConfig::default().with_c(0.0));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
