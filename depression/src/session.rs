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

use log::{info, warn};

use crate::config::TrainConfig;
use crate::data::{self, DataSource, Dataset, Record, Split, train_test_split};
use crate::errors::{Error, Result};
use crate::inference::{Prediction, RecordBuilder, TrainedModel};
use crate::metrics::Metrics;

/// Scores of one training run on both halves of the split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub train: Metrics,
    pub test: Metrics,
}

#[derive(Debug, Clone)]
struct Partition {
    indices: Split,
    train: Dataset,
    test: Dataset,
}

/// Everything one user works with: the dataset, its split, the trained model
/// and that model's scores.
///
/// Loading a dataset clears the split, model and scores derived from the
/// previous one. Training replaces the model only once the new one has been
/// fitted and scored, so a failed run leaves the previous model in place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: TrainConfig,
    dataset: Option<Dataset>,
    partition: Option<Partition>,
    model: Option<TrainedModel>,
    evaluation: Option<Evaluation>,
}

impl Session {
    pub fn new(config: TrainConfig) -> Self {
        Session { config, ..Session::default() }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Replaces the configuration used by later splits and training runs.
    pub fn set_config(&mut self, config: TrainConfig) {
        self.config = config;
    }

    pub fn load(&mut self, source: DataSource) -> Result<&Dataset> {
        let dataset = data::load(source)?;
        self.partition = None;
        self.model = None;
        self.evaluation = None;
        Ok(self.dataset.insert(dataset))
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset.as_ref().ok_or(Error::NoDataset)
    }

    /// Stratified train/test split using the configured ratio and seed.
    pub fn split(&mut self) -> Result<&Split> {
        self.config.validate()?;
        let dataset = self.dataset.as_ref().ok_or(Error::NoDataset)?;
        let indices = train_test_split(dataset.labels(), self.config.test_ratio, self.config.seed)?;
        let (train, test) = indices.apply(dataset)?;
        info!("Split {} rows into {} train / {} test", dataset.len(), train.len(), test.len());
        let partition = self.partition.insert(Partition { indices, train, test });
        Ok(&partition.indices)
    }

    pub fn split_indices(&self) -> Option<&Split> {
        self.partition.as_ref().map(|p| &p.indices)
    }

    /// Fits a model on the training half and scores it on both halves.
    pub fn train(&mut self) -> Result<Evaluation> {
        let partition = self.partition.as_ref().ok_or(Error::NotSplit)?;
        let model = TrainedModel::fit(&partition.train, &self.config).inspect_err(|err| {
            if self.model.is_some() {
                warn!("Training failed, keeping the previous model: {}", err);
            }
        })?;
        let evaluation = Evaluation {
            train: model.evaluate(&partition.train)?,
            test: model.evaluate(&partition.test)?,
        };
        info!("Train: {}", evaluation.train);
        info!("Test: {}", evaluation.test);

        self.model = Some(model);
        self.evaluation = Some(evaluation);
        Ok(evaluation)
    }

    /// Splits (if needed) and trains in one step.
    pub fn fit(&mut self) -> Result<Evaluation> {
        if self.partition.is_none() {
            self.split()?;
        }
        self.train()
    }

    pub fn model(&self) -> Result<&TrainedModel> {
        self.model.as_ref().ok_or(Error::ModelNotTrained)
    }

    pub fn evaluation(&self) -> Result<Evaluation> {
        self.evaluation.ok_or(Error::ModelNotTrained)
    }

    /// A record builder pre-filled from the loaded dataset.
    pub fn record_builder(&self) -> Result<RecordBuilder> {
        Ok(RecordBuilder::with_defaults(self.dataset()?))
    }

    pub fn predict_one(&self, record: &Record) -> Result<Prediction> {
        self.model()?.predict_one(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::tests::SAMPLE_CSV;
    use crate::errors::SchemaError;
    use crate::schema::SUICIDAL_THOUGHTS;

    fn loaded(config: TrainConfig) -> Session {
        let mut session = Session::new(config);
        session.load(DataSource::Bytes(SAMPLE_CSV.as_bytes().to_vec())).unwrap();
        session
    }

    #[test]
    fn test_predict_without_model() {
        let session = loaded(TrainConfig::default());
        let record = session.record_builder().unwrap().build().unwrap();
        assert!(matches!(session.predict_one(&record), Err(Error::ModelNotTrained)));
        assert!(matches!(session.evaluation(), Err(Error::ModelNotTrained)));
    }

    #[test]
    fn test_operations_need_prior_steps() {
        let mut session = Session::default();
        assert!(matches!(session.split(), Err(Error::NoDataset)));
        assert!(matches!(session.record_builder(), Err(Error::NoDataset)));
        assert!(matches!(session.train(), Err(Error::NotSplit)));
    }

    #[test]
    fn test_fit_then_predict() {
        let mut session = loaded(TrainConfig::default().with_test_ratio(0.5));
        let evaluation = session.fit().unwrap();
        assert_eq!(evaluation.train.confusion.total(), 2);
        assert_eq!(evaluation.test.confusion.total(), 2);

        let record = session
            .record_builder()
            .unwrap()
            .categorical(SUICIDAL_THOUGHTS, "Yes")
            .build()
            .unwrap();
        let prediction = session.predict_one(&record).unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
    }

    #[test]
    fn test_predict_incomplete_record() {
        let mut session = loaded(TrainConfig::default().with_test_ratio(0.5));
        session.fit().unwrap();
        let result = session.predict_one(&Record::default());
        assert!(matches!(result, Err(Error::Schema(SchemaError::MissingField(_)))));
    }

    #[test]
    fn test_failed_retrain_keeps_previous_model() {
        let mut session = loaded(TrainConfig::default().with_test_ratio(0.5));
        session.fit().unwrap();
        let before = session.model().unwrap().clone();

        session.set_config(session.config().clone().with_c(-1.0));
        assert!(matches!(session.train(), Err(Error::Config(_))));
        assert_eq!(session.model().unwrap(), &before);
    }

    #[test]
    fn test_load_clears_derived_state() {
        let mut session = loaded(TrainConfig::default().with_test_ratio(0.5));
        session.fit().unwrap();
        session.load(DataSource::Bytes(SAMPLE_CSV.as_bytes().to_vec())).unwrap();
        assert!(session.split_indices().is_none());
        assert!(matches!(session.model(), Err(Error::ModelNotTrained)));
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        let result = session.load(DataSource::Search(vec![dir.path().to_path_buf()]));
        match result {
            Err(Error::DataSourceNotFound { searched }) => {
                assert_eq!(searched, vec![dir.path().join(data::DATASET_FILE_NAME)]);
            }
            other => panic!("expected DataSourceNotFound, got {:?}", other.map(|d| d.len())),
        }
    }
}
